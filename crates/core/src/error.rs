// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use journey_board_domain::JourneyId;

/// Errors that can occur inside the board engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The journey is not present in any stage bucket.
    JourneyNotFound(JourneyId),
    /// A drag event arrived with no gesture in progress.
    NoActiveGesture,
    /// A drag start arrived while another gesture was already active.
    GestureAlreadyActive(JourneyId),
    /// A drop target could not be resolved to a stage.
    DropTargetUnresolved,
    /// The exactly-one-bucket invariant was violated.
    BucketInvariantViolation {
        /// The offending journey.
        journey: JourneyId,
        /// How many buckets it appeared in.
        occurrences: usize,
    },
    /// An autosave edit targeted a backend-authoritative calculated field.
    CalculatedFieldReadOnly(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JourneyNotFound(journey) => {
                write!(f, "Journey {journey} is not present in any stage bucket")
            }
            Self::NoActiveGesture => write!(f, "No drag gesture is in progress"),
            Self::GestureAlreadyActive(journey) => {
                write!(f, "A drag gesture is already active for journey {journey}")
            }
            Self::DropTargetUnresolved => {
                write!(f, "Drop target could not be resolved to a stage")
            }
            Self::BucketInvariantViolation {
                journey,
                occurrences,
            } => {
                write!(
                    f,
                    "Journey {journey} appears in {occurrences} buckets; expected exactly one"
                )
            }
            Self::CalculatedFieldReadOnly(path) => {
                write!(f, "Field '{path}' is calculated by the backend and read-only")
            }
        }
    }
}

impl std::error::Error for CoreError {}
