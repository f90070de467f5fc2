// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::dates;
use crate::error::DomainError;
use crate::stage::StageClassification;

/// A stable journey identifier.
///
/// Legacy ids arrive as either strings or numbers; they are normalized to
/// their string form, which is what every bucket, tag, and audit record
/// keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JourneyId {
    value: String,
}

impl JourneyId {
    /// Creates a new `JourneyId`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the id value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for JourneyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A journey priority classification.
///
/// Priorities are fixed domain constants A (highest) through D (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Highest priority.
    A,
    /// High priority.
    B,
    /// Medium priority.
    C,
    /// Lowest priority.
    D,
}

impl Priority {
    /// Parses a priority from its exact letter form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not one of A, B, C, D
    /// (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            other => Err(DomainError::InvalidPriority(other.to_owned())),
        }
    }

    /// Normalizes a free-text legacy priority.
    ///
    /// Exact letters pass through; legacy words convert (`High` to A,
    /// `Low` to D, `Medium` to C); anything else defaults to C.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let s: String = raw.trim().to_uppercase();
        match s.as_str() {
            "A" => Self::A,
            "B" => Self::B,
            "D" => Self::D,
            "C" => Self::C,
            _ => {
                if s.starts_with('H') {
                    Self::A
                } else if s.starts_with('L') {
                    Self::D
                } else {
                    Self::C
                }
            }
        }
    }

    /// Returns the letter form of this priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A confidence percentage, clamped to 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence {
    value: u8,
}

impl Confidence {
    /// Creates a confidence, clamping the value to 0..=100.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self {
            value: if value > 100 { 100 } else { value },
        }
    }

    /// Parses a free-text legacy confidence value.
    ///
    /// `Closed Won` parses to 100 and `Closed Lost` to 0; otherwise the
    /// first run of digits is taken and clamped to 0..=100. Empty or
    /// digit-free input parses to `None`.
    #[must_use]
    pub fn parse_legacy(raw: &str) -> Option<Self> {
        let s: &str = raw.trim();
        if s.is_empty() {
            return None;
        }
        let lower: String = s.to_lowercase();
        if lower.contains("closed won") {
            return Some(Self::new(100));
        }
        if lower.contains("closed lost") {
            return Some(Self::new(0));
        }

        let digits: String = s
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            return None;
        }
        // Anything that overflows u8 is far beyond 100 anyway.
        Some(Self::new(digits.parse::<u8>().unwrap_or(100)))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.value
    }
}

/// A customer record, possibly synthesized from a journey's embedded
/// company name when no customer record exists for the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// The customer identifier.
    pub id: String,
    /// The customer display name.
    pub name: String,
}

impl Customer {
    /// Creates a new `Customer`.
    #[must_use]
    pub const fn new(id: String, name: String) -> Self {
        Self { id, name }
    }

    /// Synthesizes a customer from a journey's soft reference, if the
    /// journey carries both a real customer id and a company name.
    ///
    /// A customer id of `"0"` means "no customer record, use the company
    /// name directly" and synthesizes nothing.
    #[must_use]
    pub fn from_journey(journey: &Journey) -> Option<Self> {
        let id: &str = journey.customer_id.as_deref()?;
        if id.is_empty() || id == "0" {
            return None;
        }
        let name: &str = journey.company_name.as_deref()?;
        Some(Self::new(id.to_owned(), name.to_owned()))
    }
}

/// A normalized sales journey (opportunity) record.
///
/// Produced by the legacy record adapter; every field has a defined
/// fallback, so adaptation is total over arbitrary legacy rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    /// The stable identifier from the legacy source.
    pub id: JourneyId,
    /// Display name: project name, else target account, else `Journey {id}`.
    pub name: String,
    /// Classified stage, paired with the backend-authoritative label.
    pub stage: StageClassification,
    /// Non-negative currency amount.
    pub value: f64,
    /// Normalized priority.
    pub priority: Priority,
    /// Confidence percentage, when the legacy field parses.
    pub confidence: Option<Confidence>,
    /// Expected decision date.
    #[serde(default, with = "dates::iso_option")]
    pub expected_decision_date: Option<PrimitiveDateTime>,
    /// Creation timestamp.
    #[serde(default, with = "dates::iso_option")]
    pub created_at: Option<PrimitiveDateTime>,
    /// Last-activity timestamp.
    #[serde(default, with = "dates::iso_option")]
    pub updated_at: Option<PrimitiveDateTime>,
    /// Soft reference to a customer; `"0"` means "no customer".
    pub customer_id: Option<String>,
    /// Company name embedded in the journey record.
    pub company_name: Option<String>,
    /// Soft-delete flag: a disabled journey, not a removed one.
    pub disabled: bool,
    /// Legacy quote number, when assigned.
    pub quote_number: Option<String>,
    /// Regional sales manager initials.
    pub rsm: Option<String>,
    /// Industry classification.
    pub industry: Option<String>,
    /// Dealer name.
    pub dealer: Option<String>,
    /// Equipment type.
    pub equipment_type: Option<String>,
    /// Lead source.
    pub lead_source: Option<String>,
    /// Free-text journey status.
    pub journey_status: Option<String>,
}

impl Journey {
    /// Returns the weighted value of this journey
    /// (`value * stage weight`).
    #[must_use]
    pub fn weighted_value(&self) -> f64 {
        self.value * self.stage.stage.weight()
    }

    /// Returns the text searched by the fuzzy matcher: the display name
    /// concatenated with the company name fields.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        match &self.company_name {
            Some(company) => format!("{} {company}", self.name),
            None => self.name.clone(),
        }
    }
}

/// A free-form child record attached to a journey.
///
/// Notes, next steps, and last-activity stamps share one record shape,
/// discriminated by [`NoteKind`]; they are created and deleted
/// independently of the journey itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// The note identifier, when persisted.
    pub id: Option<String>,
    /// The journey this note belongs to.
    pub entity_id: JourneyId,
    /// The note discriminator.
    pub kind: NoteKind,
    /// The note body.
    pub body: String,
    /// Initials of the author.
    pub created_by: Option<String>,
}

/// Discriminator for journey child notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteKind {
    /// A free-form note.
    Note,
    /// A planned next step.
    NextStep,
    /// A last-activity stamp whose body is an ISO-8601 timestamp.
    LastActivity,
}

impl NoteKind {
    /// Returns the wire discriminator for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::NextStep => "NextStep",
            Self::LastActivity => "LastActivity",
        }
    }
}

/// A tag attached to a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag identifier.
    pub id: String,
    /// The tag description.
    pub description: String,
}

/// An index from journey id to its tags, used by the `tag:` search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    tags: HashMap<JourneyId, Vec<Tag>>,
}

impl TagIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tags for a journey.
    pub fn set(&mut self, journey: JourneyId, tags: Vec<Tag>) {
        self.tags.insert(journey, tags);
    }

    /// Returns the tags for a journey.
    #[must_use]
    pub fn get(&self, journey: &JourneyId) -> &[Tag] {
        self.tags.get(journey).map_or(&[], Vec::as_slice)
    }

    /// Returns whether the journey has at least one tag.
    #[must_use]
    pub fn has_any(&self, journey: &JourneyId) -> bool {
        !self.get(journey).is_empty()
    }

    /// Returns whether any tag description contains the term,
    /// compared case-insensitively against the upper-cased description.
    #[must_use]
    pub fn matches_term(&self, journey: &JourneyId, term: &str) -> bool {
        let needle: String = term.to_uppercase();
        self.get(journey)
            .iter()
            .any(|tag| tag.description.to_uppercase().contains(&needle))
    }
}

/// The active board view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Kanban columns with drag-and-drop.
    #[default]
    Kanban,
    /// Server-paginated table.
    List,
    /// Monthly revenue projections.
    Projections,
}

impl ViewMode {
    /// Parses a view mode from its wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "kanban" => Ok(Self::Kanban),
            "list" => Ok(Self::List),
            "projections" => Ok(Self::Projections),
            other => Err(DomainError::InvalidViewMode(other.to_owned())),
        }
    }

    /// Returns the wire form of this view mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kanban => "kanban",
            Self::List => "list",
            Self::Projections => "projections",
        }
    }
}

/// A sortable journey field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Display name.
    Name,
    /// Currency value.
    Value,
    /// Pipeline stage.
    Stage,
    /// Confidence percentage.
    Confidence,
    /// Priority letter.
    Priority,
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Last-activity timestamp.
    UpdatedAt,
    /// Expected decision date.
    ExpectedDecisionDate,
}

impl SortField {
    /// Parses a sort field from its wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "value" => Ok(Self::Value),
            "stage" => Ok(Self::Stage),
            "confidence" => Ok(Self::Confidence),
            "priority" => Ok(Self::Priority),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            "expected_decision_date" => Ok(Self::ExpectedDecisionDate),
            other => Err(DomainError::InvalidSortField(other.to_owned())),
        }
    }

    /// Returns the wire form of this sort field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Value => "value",
            Self::Stage => "stage",
            Self::Confidence => "confidence",
            Self::Priority => "priority",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::ExpectedDecisionDate => "expected_decision_date",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortDirection {
    /// Parses a sort direction from its wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `asc` or `desc`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DomainError::InvalidSortDirection(other.to_owned())),
        }
    }

    /// Returns the wire form of this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The Kanban client-side batch cap.
///
/// The Kanban view fetches server-filtered journeys but caps the batch to
/// one of a fixed set of sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum KanbanBatchSize {
    /// 25 journeys.
    TwentyFive,
    /// 50 journeys (the default).
    #[default]
    Fifty,
    /// 75 journeys.
    SeventyFive,
    /// 100 journeys.
    OneHundred,
}

impl KanbanBatchSize {
    /// Creates a batch size from its numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not 25, 50, 75, or 100.
    pub const fn from_number(size: u16) -> Result<Self, DomainError> {
        match size {
            25 => Ok(Self::TwentyFive),
            50 => Ok(Self::Fifty),
            75 => Ok(Self::SeventyFive),
            100 => Ok(Self::OneHundred),
            _ => Err(DomainError::InvalidBatchSize(size)),
        }
    }

    /// Returns the numeric batch size.
    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::SeventyFive => 75,
            Self::OneHundred => 100,
        }
    }
}

impl TryFrom<u16> for KanbanBatchSize {
    type Error = DomainError;

    fn try_from(size: u16) -> Result<Self, Self::Error> {
        Self::from_number(size)
    }
}

impl From<KanbanBatchSize> for u16 {
    fn from(size: KanbanBatchSize) -> Self {
        size.value()
    }
}
