// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stage-commit side effects.
//!
//! A cross-stage drop fires three writes: the stage PATCH (primary), the
//! journey-log line, and the last-activity stamp. The two audit writes
//! are best-effort and at-most-once: they run only after the PATCH
//! succeeds, their failures are logged and never surfaced, and nothing
//! rolls back the local bucket assignment.

use journey_board::StageCommit;
use journey_board_audit::{ActivityStamp, StageChange};
use time::OffsetDateTime;
use tracing::warn;

use crate::client::{ClientError, LegacyClient};

/// Commits a stage change to the legacy backend.
///
/// The PATCH writes the target stage's label (the backend persists
/// labels, not ids). On success the journey-log line and last-activity
/// stamp fire together, fire-and-forget.
///
/// # Errors
///
/// Returns the PATCH error; audit-write failures are logged only.
pub async fn commit_stage_change(
    client: &LegacyClient,
    commit: &StageCommit,
    initials: &str,
    at: OffsetDateTime,
) -> Result<(), ClientError> {
    client
        .update_stage(&commit.journey, commit.to.label())
        .await?;

    let change: StageChange = commit.to_stage_change();
    let stamp: ActivityStamp =
        ActivityStamp::new(commit.journey.clone(), at, initials.to_owned());

    let (log_result, stamp_result) = tokio::join!(
        client.append_log(&change, at, initials),
        client.post_activity_stamp(&stamp),
    );
    if let Err(e) = log_result {
        warn!(journey = %commit.journey, error = %e, "Journey log write failed");
    }
    if let Err(e) = stamp_result {
        warn!(journey = %commit.journey, error = %e, "Last-activity stamp failed");
    }

    Ok(())
}
