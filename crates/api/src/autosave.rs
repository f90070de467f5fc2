// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Autosave flushing for form tabs.
//!
//! The core engine accumulates dotted-path edits; when a debounce window
//! closes, the whole batch goes out as one PATCH. The backend answers
//! with any recalculated fields, which merge back as authoritative,
//! locally read-only values. A failed PATCH re-queues the batch and sets
//! the tab's general error banner; the next edit's window is the only
//! retry.

use std::collections::BTreeMap;

use journey_board::AutosaveState;
use journey_board_domain::JourneyId;
use serde_json::Value;
use tracing::warn;

use crate::client::LegacyClient;

/// The response field carrying backend-calculated values.
const CALCULATED_KEY: &str = "calculated";

/// Flushes the pending autosave batch for a journey's form.
///
/// No-op when nothing is pending. On success, calculated fields from the
/// response merge into the state; on failure, the batch re-queues for
/// the next window and the general error message is set.
pub async fn flush_autosave(
    client: &LegacyClient,
    journey: &JourneyId,
    state: &mut AutosaveState,
) {
    let batch: BTreeMap<String, Value> = state.begin_flush();
    if batch.is_empty() {
        return;
    }

    match client.update_journey(journey, &batch).await {
        Ok(response) => {
            let calculated: BTreeMap<String, Value> = response
                .get(CALCULATED_KEY)
                .and_then(Value::as_object)
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(path, value)| (path.clone(), value.clone()))
                        .collect()
                })
                .unwrap_or_default();
            state.flush_succeeded(calculated);
        }
        Err(e) => {
            warn!(journey = %journey, error = %e, "Autosave flush failed");
            state.flush_failed(batch, format!("Save failed: {e}"));
        }
    }
}
