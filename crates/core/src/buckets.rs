// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The stage-bucket index: stage id to ordered journey ids.
//!
//! The index is derived, not authoritative: it is rebuilt from the active
//! data source whenever that source changes, then locally mutated by drag
//! transitions until the next rebuild. Order within a bucket is display
//! order only; it carries no business meaning until a commit succeeds.

use std::collections::BTreeMap;

use journey_board_domain::{Journey, JourneyId, StageId};
use serde::Serialize;

use crate::error::CoreError;

/// The stage-bucket index.
///
/// Every bucket exists for all six stages, empty or not, so column
/// rendering and drop-target resolution never deal with missing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageBuckets {
    buckets: BTreeMap<StageId, Vec<JourneyId>>,
}

impl StageBuckets {
    /// Creates an index with all six buckets empty.
    #[must_use]
    pub fn new() -> Self {
        let mut buckets: BTreeMap<StageId, Vec<JourneyId>> = BTreeMap::new();
        for stage in StageId::ALL {
            buckets.insert(stage, Vec::new());
        }
        Self { buckets }
    }

    /// Returns the ordered journey ids in a bucket.
    #[must_use]
    pub fn ids(&self, stage: StageId) -> &[JourneyId] {
        self.buckets.get(&stage).map_or(&[], Vec::as_slice)
    }

    /// Finds the bucket a journey currently sits in by walking the index.
    #[must_use]
    pub fn stage_of(&self, journey: &JourneyId) -> Option<StageId> {
        self.buckets
            .iter()
            .find(|(_, ids)| ids.contains(journey))
            .map(|(stage, _)| *stage)
    }

    /// Returns the position of a journey within its bucket.
    #[must_use]
    pub fn position_of(&self, journey: &JourneyId) -> Option<(StageId, usize)> {
        self.buckets.iter().find_map(|(stage, ids)| {
            ids.iter()
                .position(|id| id == journey)
                .map(|index| (*stage, index))
        })
    }

    /// Total number of journey ids across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns whether the index holds no journeys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes a journey from whichever bucket holds it, returning its
    /// former position.
    pub fn remove(&mut self, journey: &JourneyId) -> Option<(StageId, usize)> {
        let (stage, index) = self.position_of(journey)?;
        if let Some(ids) = self.buckets.get_mut(&stage) {
            ids.remove(index);
        }
        Some((stage, index))
    }

    /// Inserts a journey into a bucket at a position, clamped to the
    /// bucket length.
    pub fn insert_at(&mut self, stage: StageId, index: usize, journey: JourneyId) {
        let ids: &mut Vec<JourneyId> = self.buckets.entry(stage).or_default();
        let at: usize = index.min(ids.len());
        ids.insert(at, journey);
    }

    /// Appends a journey to the end of a bucket.
    pub fn push(&mut self, stage: StageId, journey: JourneyId) {
        self.buckets.entry(stage).or_default().push(journey);
    }

    /// Reorders a journey within one bucket, clamping the destination to
    /// the valid range.
    pub fn move_within(&mut self, stage: StageId, from: usize, to: usize) {
        if let Some(ids) = self.buckets.get_mut(&stage)
            && from < ids.len()
        {
            let to_clamped: usize = to.min(ids.len().saturating_sub(1));
            let journey: JourneyId = ids.remove(from);
            ids.insert(to_clamped, journey);
        }
    }

    /// Checks the exactly-one-bucket invariant against the journey ids
    /// of the active data source.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::BucketInvariantViolation` for the first journey
    /// that appears in zero buckets or more than one bucket.
    pub fn validate(&self, expected: &[JourneyId]) -> Result<(), CoreError> {
        for journey in expected {
            let occurrences: usize = self
                .buckets
                .values()
                .map(|ids| ids.iter().filter(|id| *id == journey).count())
                .sum();
            if occurrences != 1 {
                return Err(CoreError::BucketInvariantViolation {
                    journey: journey.clone(),
                    occurrences,
                });
            }
        }
        Ok(())
    }

    /// Iterates buckets in stage order.
    pub fn iter(&self) -> impl Iterator<Item = (StageId, &[JourneyId])> {
        self.buckets
            .iter()
            .map(|(stage, ids)| (*stage, ids.as_slice()))
    }
}

/// Derives a fresh bucket index from a journey set, preserving input
/// order within each stage.
///
/// This is the only way buckets come into existence from data: a pure
/// rebuild on every source change, never an in-place reconciliation.
#[must_use]
pub fn derive_buckets(journeys: &[Journey]) -> StageBuckets {
    let mut buckets: StageBuckets = StageBuckets::new();
    for journey in journeys {
        buckets.push(journey.stage.stage, journey.id.clone());
    }
    buckets
}
