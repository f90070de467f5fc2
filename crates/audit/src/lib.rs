// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use journey_board_domain::{JourneyId, StageId};
use time::OffsetDateTime;
use time::macros::format_description;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This could be a user, a system process, or an automated trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor (operator initials).
    pub id: String,
    /// The type of actor (e.g., "user", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, gesture ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
///
/// An action describes what state change occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`MoveStage`", "`ToggleDisabled`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of board state at a point in time.
///
/// Captures the minimal facts needed to reconstruct what a transition
/// changed: for stage moves, the bucket assignment before or after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
/// - The journey the transition is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The journey this event is scoped to.
    pub journey: JourneyId,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `journey` - The journey the event is scoped to
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        journey: JourneyId,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            journey,
        }
    }
}

/// Timestamp format used by the legacy journey log:
/// `YYYY-MM-DD HH:MM:SS.mmm`.
const LOG_TIMESTAMP_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
);

/// A completed stage transition, as recorded in the legacy journey log.
///
/// The log line carries the stage labels, not the numeric ids: the legacy
/// backend is label-oriented and the labels are what operators read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageChange {
    /// The journey that moved.
    pub journey: JourneyId,
    /// The stage the journey left.
    pub from: StageId,
    /// The stage the journey entered.
    pub to: StageId,
}

impl StageChange {
    /// Creates a new `StageChange`.
    #[must_use]
    pub const fn new(journey: JourneyId, from: StageId, to: StageId) -> Self {
        Self { journey, from, to }
    }

    /// Renders the legacy journey-log line for this change:
    /// `Journey_Stage: FROM {old label} TO {new label}`.
    #[must_use]
    pub fn log_line(&self) -> String {
        format!(
            "Journey_Stage: FROM {} TO {}",
            self.from.label(),
            self.to.label()
        )
    }

    /// Converts this change into an audit event.
    #[must_use]
    pub fn to_audit_event(&self, actor: Actor, cause: Cause) -> AuditEvent {
        let action: Action = Action::new(String::from("MoveStage"), Some(self.log_line()));
        let before: StateSnapshot =
            StateSnapshot::new(format!("journey={},stage={}", self.journey, self.from));
        let after: StateSnapshot =
            StateSnapshot::new(format!("journey={},stage={}", self.journey, self.to));
        AuditEvent::new(actor, cause, action, before, after, self.journey.clone())
    }
}

/// Formats a timestamp in the legacy journey-log shape
/// (`YYYY-MM-DD HH:MM:SS.mmm`).
#[must_use]
pub fn format_log_timestamp(at: OffsetDateTime) -> String {
    at.format(LOG_TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| at.to_string())
}

/// A last-activity stamp: a note whose body is the ISO-8601 time of the
/// most recent stage commit, keyed to the journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityStamp {
    /// The journey the stamp belongs to.
    pub journey: JourneyId,
    /// The stamp body (ISO-8601 timestamp).
    pub body: String,
    /// Initials of the operator who triggered the activity.
    pub created_by: String,
}

impl ActivityStamp {
    /// Creates an activity stamp for a commit time.
    #[must_use]
    pub fn new(journey: JourneyId, at: OffsetDateTime, created_by: String) -> Self {
        let body: String = at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| at.to_string());
        Self {
            journey,
            body,
            created_by,
        }
    }
}
