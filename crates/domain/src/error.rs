// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur when validating or constructing domain values.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A stage id outside the fixed 1..=6 catalog was supplied.
    InvalidStage(u8),
    /// A priority string could not be strictly parsed.
    InvalidPriority(String),
    /// A view mode string was not recognized.
    InvalidViewMode(String),
    /// A sort field string was not recognized.
    InvalidSortField(String),
    /// A sort direction string was not recognized.
    InvalidSortDirection(String),
    /// A Kanban batch size outside the supported set was supplied.
    InvalidBatchSize(u16),
    /// A confidence level outside 0..=100 was supplied in a filter.
    InvalidConfidenceLevel(u8),
    /// The minimum value filter exceeds the maximum value filter.
    InvalidValueRange {
        /// The minimum value supplied.
        min: f64,
        /// The maximum value supplied.
        max: f64,
    },
    /// The start of the date range filter is after its end.
    InvalidDateRange {
        /// The range start (ISO 8601 date).
        start: String,
        /// The range end (ISO 8601 date).
        end: String,
    },
    /// The visible stage set is empty; at least one stage must be shown.
    EmptyVisibleStages,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStage(id) => {
                write!(f, "Invalid stage id {id}: must be between 1 and 6")
            }
            Self::InvalidPriority(value) => {
                write!(f, "Invalid priority '{value}': must be one of A, B, C, D")
            }
            Self::InvalidViewMode(value) => {
                write!(
                    f,
                    "Invalid view mode '{value}': must be kanban, list, or projections"
                )
            }
            Self::InvalidSortField(value) => write!(f, "Invalid sort field '{value}'"),
            Self::InvalidSortDirection(value) => {
                write!(f, "Invalid sort direction '{value}': must be asc or desc")
            }
            Self::InvalidBatchSize(size) => {
                write!(
                    f,
                    "Invalid Kanban batch size {size}: must be 25, 50, 75, or 100"
                )
            }
            Self::InvalidConfidenceLevel(level) => {
                write!(
                    f,
                    "Invalid confidence level {level}: must be between 0 and 100"
                )
            }
            Self::InvalidValueRange { min, max } => {
                write!(f, "Invalid value range: minimum {min} exceeds maximum {max}")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: start {start} is after end {end}")
            }
            Self::EmptyVisibleStages => {
                write!(f, "Visible stage set is empty: at least one stage required")
            }
        }
    }
}

impl std::error::Error for DomainError {}
