// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use journey_board::CoreError;
use journey_board_domain::DomainError;
use journey_board_persistence::PersistenceError;

use crate::client::ClientError;

/// Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The legacy backend could not be reached or rejected the request.
    BackendUnavailable {
        /// A description of the failure.
        message: String,
    },
    /// A board engine rule was violated.
    EngineRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::BackendUnavailable { message } => {
                write!(f, "Legacy backend unavailable: {message}")
            }
            Self::EngineRuleViolation { rule, message } => {
                write!(f, "Board rule violation ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStage(id) => ApiError::InvalidInput {
            field: String::from("stage"),
            message: format!("Invalid stage id {id}: must be between 1 and 6"),
        },
        DomainError::InvalidPriority(value) => ApiError::InvalidInput {
            field: String::from("priority"),
            message: format!("Invalid priority '{value}'"),
        },
        DomainError::InvalidViewMode(value) => ApiError::InvalidInput {
            field: String::from("view"),
            message: format!("Invalid view mode '{value}'"),
        },
        DomainError::InvalidSortField(value) => ApiError::InvalidInput {
            field: String::from("sort"),
            message: format!("Invalid sort field '{value}'"),
        },
        DomainError::InvalidSortDirection(value) => ApiError::InvalidInput {
            field: String::from("order"),
            message: format!("Invalid sort direction '{value}'"),
        },
        DomainError::InvalidBatchSize(size) => ApiError::InvalidInput {
            field: String::from("kanban_batch_size"),
            message: format!("Invalid batch size {size}: must be 25, 50, 75, or 100"),
        },
        DomainError::InvalidConfidenceLevel(level) => ApiError::InvalidInput {
            field: String::from("confidence_levels"),
            message: format!("Invalid confidence level {level}: must be between 0 and 100"),
        },
        DomainError::InvalidValueRange { min, max } => ApiError::InvalidInput {
            field: String::from("value_range"),
            message: format!("Minimum {min} exceeds maximum {max}"),
        },
        DomainError::InvalidDateRange { start, end } => ApiError::InvalidInput {
            field: String::from("date_range"),
            message: format!("Start {start} is after end {end}"),
        },
        DomainError::EmptyVisibleStages => ApiError::InvalidInput {
            field: String::from("visible_stages"),
            message: String::from("At least one stage must be visible"),
        },
    }
}

/// Translates a core engine error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::JourneyNotFound(journey) => ApiError::ResourceNotFound {
            resource_type: String::from("Journey"),
            message: format!("Journey {journey} is not on the board"),
        },
        CoreError::NoActiveGesture => ApiError::EngineRuleViolation {
            rule: String::from("gesture_lifecycle"),
            message: String::from("No drag gesture is in progress"),
        },
        CoreError::GestureAlreadyActive(journey) => ApiError::EngineRuleViolation {
            rule: String::from("gesture_lifecycle"),
            message: format!("A drag gesture is already active for journey {journey}"),
        },
        CoreError::DropTargetUnresolved => ApiError::InvalidInput {
            field: String::from("target"),
            message: String::from("Drop target could not be resolved to a stage"),
        },
        CoreError::BucketInvariantViolation {
            journey,
            occurrences,
        } => ApiError::Internal {
            message: format!(
                "Bucket invariant violated: journey {journey} appears {occurrences} times"
            ),
        },
        CoreError::CalculatedFieldReadOnly(path) => ApiError::InvalidInput {
            field: path,
            message: String::from("Field is calculated by the backend and read-only"),
        },
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        Self::BackendUnavailable {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::PresetNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Preset"),
                message: format!("Preset {id} does not exist"),
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}
