// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// One of the six fixed pipeline stages.
///
/// Stages are domain constants: the catalog never changes at runtime.
/// Each stage carries a probability weight used for the weighted pipeline
/// value (`value * weight`), an expected-revenue estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StageId {
    /// Stage 1: an unqualified lead.
    Lead,
    /// Stage 2: a qualified opportunity.
    Qualified,
    /// Stage 3: presentations, demos, proposals, or quotes in flight.
    Presentations,
    /// Stage 4: active negotiation.
    Negotiation,
    /// Stage 5: closed and won (purchase order received).
    ClosedWon,
    /// Stage 6: closed and lost.
    ClosedLost,
}

impl StageId {
    /// All stages in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::Lead,
        Self::Qualified,
        Self::Presentations,
        Self::Negotiation,
        Self::ClosedWon,
        Self::ClosedLost,
    ];

    /// Creates a `StageId` from its numeric id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStage` if the id is not between 1 and 6.
    pub const fn from_number(id: u8) -> Result<Self, DomainError> {
        match id {
            1 => Ok(Self::Lead),
            2 => Ok(Self::Qualified),
            3 => Ok(Self::Presentations),
            4 => Ok(Self::Negotiation),
            5 => Ok(Self::ClosedWon),
            6 => Ok(Self::ClosedLost),
            _ => Err(DomainError::InvalidStage(id)),
        }
    }

    /// Returns the numeric stage id (1..=6).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Lead => 1,
            Self::Qualified => 2,
            Self::Presentations => 3,
            Self::Negotiation => 4,
            Self::ClosedWon => 5,
            Self::ClosedLost => 6,
        }
    }

    /// Returns the display label for this stage.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Qualified => "Qualified",
            Self::Presentations => "Presentations",
            Self::Negotiation => "Negotiation",
            Self::ClosedWon => "Closed Won",
            Self::ClosedLost => "Closed Lost",
        }
    }

    /// Returns the probability weight for this stage.
    ///
    /// Weights are fixed domain constants in `[0, 1]` and are not stored
    /// per journey.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Lead => 0.20,
            Self::Qualified => 0.40,
            Self::Presentations => 0.60,
            Self::Negotiation => 0.90,
            Self::ClosedWon => 1.0,
            Self::ClosedLost => 0.0,
        }
    }
}

impl TryFrom<u8> for StageId {
    type Error = DomainError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_number(id)
    }
}

impl From<StageId> for u8 {
    fn from(stage: StageId) -> Self {
        stage.number()
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A stage catalog entry: numeric id, display label, and probability weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stage {
    /// The stage identifier.
    pub id: StageId,
    /// The display label.
    pub label: &'static str,
    /// The probability weight in `[0, 1]`.
    pub weight: f64,
}

impl Stage {
    /// Returns the catalog entry for a stage id.
    #[must_use]
    pub const fn of(id: StageId) -> Self {
        Self {
            id,
            label: id.label(),
            weight: id.weight(),
        }
    }

    /// Returns the full six-entry stage catalog in pipeline order.
    #[must_use]
    pub fn catalog() -> [Self; 6] {
        StageId::ALL.map(Self::of)
    }
}

/// Classifies a free-text legacy stage label into a fixed stage id.
///
/// The match is case-insensitive substring matching in a fixed priority
/// order: stages 2, 3, 4, 5, 6 are checked in that exact order before
/// defaulting to 1. Inputs may match several categories (for example
/// "Closed Won Order"); the fixed order keeps the classification
/// deterministic.
///
/// This is a lossy, one-way transform: the original free-text label must
/// be preserved alongside the classified id (see [`StageClassification`]),
/// because the backend persists the label, not the numeric id.
#[must_use]
pub fn classify_stage(raw: &str) -> StageId {
    let s: String = raw.trim().to_lowercase();
    if s.is_empty() {
        return StageId::Lead;
    }
    let contains_any = |needles: &[&str]| needles.iter().any(|n| s.contains(n));

    if contains_any(&["qualify", "qualifi", "pain", "discover"]) {
        return StageId::Qualified;
    }
    if contains_any(&["present", "demo", "proposal", "quote"]) {
        return StageId::Presentations;
    }
    if contains_any(&["negot"]) {
        return StageId::Negotiation;
    }
    if contains_any(&["po", "won", "closedwon", "closed won", "order"]) {
        return StageId::ClosedWon;
    }
    if contains_any(&["lost", "closedlost", "closed lost", "declin"]) {
        return StageId::ClosedLost;
    }
    StageId::Lead
}

/// The classified stage of a journey, paired with the free-text label it
/// was classified from.
///
/// The backend is authoritative for the free-text label; the numeric id is
/// a derived, lossy view. Keeping both avoids information loss across
/// round-trips: updates are written back as labels, never as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageClassification {
    /// The free-text label as stored by the backend, if any.
    pub raw_label: Option<String>,
    /// The stage id classified from the label.
    pub stage: StageId,
}

impl StageClassification {
    /// Classifies an optional free-text label.
    ///
    /// An absent or empty label classifies to `Lead`, matching the
    /// classifier's default.
    #[must_use]
    pub fn from_label(raw_label: Option<&str>) -> Self {
        let stage: StageId = raw_label.map_or(StageId::Lead, classify_stage);
        Self {
            raw_label: raw_label.map(str::to_owned),
            stage,
        }
    }

    /// Creates a classification for a stage chosen directly (for example
    /// by dragging a card to a column). The canonical label becomes the
    /// raw label, since that is what will be written back.
    #[must_use]
    pub fn from_stage(stage: StageId) -> Self {
        Self {
            raw_label: Some(String::from(stage.label())),
            stage,
        }
    }

    /// Returns the label to send to the backend: the preserved free-text
    /// label when present, the canonical label otherwise.
    #[must_use]
    pub fn backend_label(&self) -> &str {
        self.raw_label.as_deref().unwrap_or(self.stage.label())
    }

    /// Reports whether re-running the classifier over the stored label
    /// would produce a different stage id than the one recorded.
    ///
    /// Label drift (a renamed legacy stage reclassifying an existing
    /// journey) is surfaced to callers, never silently repaired.
    #[must_use]
    pub fn differs_from_label(&self) -> bool {
        self.raw_label
            .as_deref()
            .is_some_and(|label| classify_stage(label) != self.stage)
    }
}
