// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod adapter_tests;
mod search_tests;
mod stage_tests;

use time::macros::datetime;
use time::PrimitiveDateTime;

use crate::stage::{StageClassification, StageId};
use crate::types::{Journey, JourneyId, Priority};

/// Builds a minimal journey for filter and calculation tests.
pub(crate) fn create_test_journey(id: &str, stage: StageId, value: f64) -> Journey {
    Journey {
        id: JourneyId::new(id),
        name: format!("Journey {id}"),
        stage: StageClassification::from_stage(stage),
        value,
        priority: Priority::C,
        confidence: None,
        expected_decision_date: None,
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
        customer_id: None,
        company_name: None,
        disabled: false,
        quote_number: None,
        rsm: None,
        industry: None,
        dealer: None,
        equipment_type: None,
        lead_source: None,
        journey_status: None,
    }
}

/// A fixed reference datetime for deterministic tests.
pub(crate) fn test_datetime() -> PrimitiveDateTime {
    datetime!(2026-01-15 12:00:00)
}
