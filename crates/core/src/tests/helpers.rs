// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use journey_board_audit::{Actor, Cause};
use journey_board_domain::{Journey, JourneyId, Priority, StageClassification, StageId};

/// Builds a minimal journey in a given stage.
pub fn create_test_journey(id: &str, stage: StageId) -> Journey {
    Journey {
        id: JourneyId::new(id),
        name: format!("Journey {id}"),
        stage: StageClassification::from_stage(stage),
        value: 1000.0,
        priority: Priority::C,
        confidence: None,
        expected_decision_date: None,
        created_at: None,
        updated_at: None,
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

/// A fixed test actor.
pub fn create_test_actor() -> Actor {
    Actor::new(String::from("JD"), String::from("user"))
}

/// A fixed test cause.
pub fn create_test_cause() -> Cause {
    Cause::new(String::from("gesture-1"), String::from("Kanban drag"))
}
