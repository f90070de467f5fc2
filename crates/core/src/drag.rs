// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The drag-gesture state machine.
//!
//! One gesture runs Idle → Dragging → Idle. Cross-column drag-over events
//! splice the active id between buckets optimistically, before any backend
//! confirmation; drag-end finalizes the placement and emits the commit
//! intent plus its audit event. A failed backend PATCH does not revert the
//! local assignment: after any completed gesture the index reflects the
//! last drag action, and every id sits in exactly one bucket.
//!
//! Data-source refreshes that land mid-gesture are deferred: the rebuilt
//! index is applied when the gesture ends, with the gesture's outcome
//! re-applied on top.

use journey_board_audit::{Actor, AuditEvent, Cause, StageChange};
use journey_board_domain::{JourneyId, StageId};

use crate::buckets::StageBuckets;
use crate::error::CoreError;

/// What a drag is currently over: a stage column or another card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A stage column.
    Column(StageId),
    /// A card, identified by its journey id.
    Card(JourneyId),
}

/// The gesture lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A card is being dragged.
    Dragging {
        /// The journey being dragged.
        active: JourneyId,
        /// The stage the journey was in when the gesture started.
        original_stage: StageId,
    },
}

/// The commit intent produced by a cross-stage drop.
///
/// Carries enough to drive the backend PATCH, the audit line, and a
/// future undo should one ever be queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCommit {
    /// The journey that moved.
    pub journey: JourneyId,
    /// The stage it left.
    pub from: StageId,
    /// The stage it entered.
    pub to: StageId,
}

impl StageCommit {
    /// Converts the commit into its audit stage change.
    #[must_use]
    pub fn to_stage_change(&self) -> StageChange {
        StageChange::new(self.journey.clone(), self.from, self.to)
    }
}

/// The result of a completed gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOutcome {
    /// The backend commit to fire, when the gesture crossed stages.
    pub commit: Option<StageCommit>,
    /// The audit event for the transition, when the gesture crossed
    /// stages.
    pub audit_event: Option<AuditEvent>,
}

impl DragOutcome {
    /// An outcome with no cross-stage movement.
    const fn none() -> Self {
        Self {
            commit: None,
            audit_event: None,
        }
    }
}

/// The drag engine: the bucket index plus the active gesture.
#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    buckets: StageBuckets,
    gesture: GestureState,
    /// A rebuild that arrived while a gesture was active, applied when
    /// the gesture ends.
    deferred_rebuild: Option<StageBuckets>,
}

impl DragEngine {
    /// Creates an engine over an initial bucket index.
    #[must_use]
    pub fn new(buckets: StageBuckets) -> Self {
        Self {
            buckets,
            gesture: GestureState::Idle,
            deferred_rebuild: None,
        }
    }

    /// Returns the current bucket index.
    #[must_use]
    pub const fn buckets(&self) -> &StageBuckets {
        &self.buckets
    }

    /// Returns the current gesture state.
    #[must_use]
    pub const fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Replaces the bucket index from a freshly-derived rebuild.
    ///
    /// Mid-gesture rebuilds are deferred until the gesture ends so a
    /// refresh cannot yank the card out from under the pointer.
    pub fn rebuild(&mut self, buckets: StageBuckets) {
        match self.gesture {
            GestureState::Idle => self.buckets = buckets,
            GestureState::Dragging { .. } => self.deferred_rebuild = Some(buckets),
        }
    }

    /// Resolves a drop target to its stage: columns directly, cards via
    /// the bucket that holds them.
    fn stage_for(&self, target: &DropTarget) -> Option<StageId> {
        match target {
            DropTarget::Column(stage) => Some(*stage),
            DropTarget::Card(journey) => self.buckets.stage_of(journey),
        }
    }

    /// Starts a gesture, recording the active id and its original stage.
    ///
    /// # Errors
    ///
    /// Returns an error if a gesture is already active or the journey is
    /// in no bucket.
    pub fn drag_start(&mut self, active: JourneyId) -> Result<(), CoreError> {
        if let GestureState::Dragging { active: current, .. } = &self.gesture {
            return Err(CoreError::GestureAlreadyActive(current.clone()));
        }
        let original_stage: StageId = self
            .buckets
            .stage_of(&active)
            .ok_or_else(|| CoreError::JourneyNotFound(active.clone()))?;
        self.gesture = GestureState::Dragging {
            active,
            original_stage,
        };
        Ok(())
    }

    /// Handles a drag-over event.
    ///
    /// Moving over a different stage optimistically splices the active id
    /// out of its current bucket and into the target bucket at the
    /// nearest-sibling position (before the hovered card, or the top of a
    /// hovered column). Same-stage hovers are no-ops; reordering within a
    /// column is resolved at drag-end.
    ///
    /// # Errors
    ///
    /// Returns an error if no gesture is active.
    pub fn drag_over(&mut self, target: &DropTarget) -> Result<(), CoreError> {
        let GestureState::Dragging { active, .. } = &self.gesture else {
            return Err(CoreError::NoActiveGesture);
        };
        let active: JourneyId = active.clone();

        let Some(source_stage) = self.buckets.stage_of(&active) else {
            return Err(CoreError::JourneyNotFound(active));
        };
        let Some(target_stage) = self.stage_for(target) else {
            // Unresolvable hover targets are ignored, not fatal.
            return Ok(());
        };
        if source_stage == target_stage {
            return Ok(());
        }

        let insert_at: usize = match target {
            DropTarget::Column(_) => 0,
            DropTarget::Card(over) => self
                .buckets
                .ids(target_stage)
                .iter()
                .position(|id| id == over)
                .unwrap_or(0),
        };

        self.buckets.remove(&active);
        self.buckets.insert_at(target_stage, insert_at, active);
        Ok(())
    }

    /// Completes a gesture.
    ///
    /// Same-stage drops reorder within the bucket (clamped array move);
    /// cross-stage drops finalize the splice already performed by
    /// drag-over. The outcome carries the commit intent and audit event
    /// when the final stage differs from the original stage; the caller
    /// fires the backend PATCH and the best-effort audit writes.
    ///
    /// A drop with no resolvable target leaves the optimistic placement
    /// as-is and commits nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if no gesture is active.
    pub fn drag_end(
        &mut self,
        target: Option<&DropTarget>,
        actor: &Actor,
        cause: &Cause,
    ) -> Result<DragOutcome, CoreError> {
        let GestureState::Dragging {
            active,
            original_stage,
        } = std::mem::take(&mut self.gesture)
        else {
            return Err(CoreError::NoActiveGesture);
        };

        let Some(target) = target else {
            self.apply_deferred_rebuild(&active, None);
            return Ok(DragOutcome::none());
        };

        let Some(to_stage) = self.stage_for(target) else {
            self.apply_deferred_rebuild(&active, None);
            return Ok(DragOutcome::none());
        };

        let Some((current_stage, current_index)) = self.buckets.position_of(&active) else {
            return Err(CoreError::JourneyNotFound(active));
        };

        if current_stage == to_stage {
            // Reorder within the bucket.
            let to_index: usize = match target {
                DropTarget::Column(_) => self.buckets.ids(to_stage).len().saturating_sub(1),
                DropTarget::Card(over) => self
                    .buckets
                    .ids(to_stage)
                    .iter()
                    .position(|id| id == over)
                    .unwrap_or(current_index),
            };
            self.buckets.move_within(to_stage, current_index, to_index);
        } else {
            // A drop that outran drag-over: splice now.
            let insert_at: usize = match target {
                DropTarget::Column(_) => self.buckets.ids(to_stage).len(),
                DropTarget::Card(over) => self
                    .buckets
                    .ids(to_stage)
                    .iter()
                    .position(|id| id == over)
                    .unwrap_or_else(|| self.buckets.ids(to_stage).len()),
            };
            self.buckets.remove(&active);
            self.buckets.insert_at(to_stage, insert_at, active.clone());
        }

        self.apply_deferred_rebuild(&active, Some(to_stage));

        if to_stage == original_stage {
            return Ok(DragOutcome::none());
        }

        let commit: StageCommit = StageCommit {
            journey: active,
            from: original_stage,
            to: to_stage,
        };
        let audit_event: AuditEvent = commit
            .to_stage_change()
            .to_audit_event(actor.clone(), cause.clone());

        Ok(DragOutcome {
            commit: Some(commit),
            audit_event: Some(audit_event),
        })
    }

    /// Abandons the active gesture without committing.
    ///
    /// Optimistic splices performed by drag-over remain in place; the
    /// next source rebuild reconciles them.
    ///
    /// # Errors
    ///
    /// Returns an error if no gesture is active.
    pub fn drag_cancel(&mut self) -> Result<(), CoreError> {
        let GestureState::Dragging { active, .. } = std::mem::take(&mut self.gesture) else {
            return Err(CoreError::NoActiveGesture);
        };
        self.apply_deferred_rebuild(&active, None);
        Ok(())
    }

    /// Moves a journey directly to a target, the keyboard-operable
    /// equivalent of a full gesture. Stage resolution is identical to the
    /// pointer path.
    ///
    /// # Errors
    ///
    /// Returns an error if a gesture is already active, the journey is in
    /// no bucket, or the target cannot be resolved to a stage.
    pub fn move_journey(
        &mut self,
        journey: JourneyId,
        target: &DropTarget,
        actor: &Actor,
        cause: &Cause,
    ) -> Result<DragOutcome, CoreError> {
        if self.stage_for(target).is_none() {
            return Err(CoreError::DropTargetUnresolved);
        }
        self.drag_start(journey)?;
        self.drag_end(Some(target), actor, cause)
    }

    /// Applies a rebuild that was deferred during the gesture, then
    /// re-applies the gesture's outcome so the index still reflects the
    /// last drag action.
    fn apply_deferred_rebuild(&mut self, active: &JourneyId, final_stage: Option<StageId>) {
        let Some(mut rebuilt) = self.deferred_rebuild.take() else {
            return;
        };
        if let Some(stage) = final_stage
            && rebuilt.stage_of(active).is_some_and(|s| s != stage)
        {
            rebuilt.remove(active);
            rebuilt.push(stage, active.clone());
        }
        self.buckets = rebuilt;
    }
}
