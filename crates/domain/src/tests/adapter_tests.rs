// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;

use crate::adapter::{LegacyJourneyRecord, adapt};
use crate::dates::normalize_legacy_datetime;
use crate::stage::StageId;
use crate::types::{Journey, Priority};

fn create_test_record() -> LegacyJourneyRecord {
    LegacyJourneyRecord {
        id: Some(String::from("4711")),
        project_name: Some(String::from("New Press Line")),
        target_account: Some(String::from("Metalsa Inc")),
        journey_stage: Some(String::from("Negotiation")),
        journey_value: Some(String::from("125000")),
        priority: Some(String::from("High")),
        chance_to_secure_order: Some(String::from("75%")),
        expected_decision_date: Some(String::from("2026-03-01")),
        create_dt: Some(String::from("2025-11-20 08:15:00")),
        action_date: Some(String::from("2026-01-05 17:30:00")),
        company_id: Some(String::from("88")),
        rsm: Some(String::from("JD")),
        ..LegacyJourneyRecord::default()
    }
}

#[test]
fn test_adapt_maps_all_core_fields() {
    let journey: Journey = adapt(&create_test_record());

    assert_eq!(journey.id.value(), "4711");
    assert_eq!(journey.name, "New Press Line");
    assert_eq!(journey.stage.stage, StageId::Negotiation);
    assert_eq!(journey.stage.raw_label.as_deref(), Some("Negotiation"));
    assert!((journey.value - 125_000.0).abs() < f64::EPSILON);
    assert_eq!(journey.priority, Priority::A);
    assert_eq!(journey.confidence.map(|c| c.value()), Some(75));
    assert_eq!(
        journey.expected_decision_date,
        Some(datetime!(2026-03-01 00:00:00))
    );
    assert_eq!(journey.created_at, Some(datetime!(2025-11-20 08:15:00)));
    assert_eq!(journey.updated_at, Some(datetime!(2026-01-05 17:30:00)));
    assert_eq!(journey.customer_id.as_deref(), Some("88"));
    assert_eq!(journey.company_name.as_deref(), Some("Metalsa Inc"));
    assert!(!journey.disabled);
}

#[test]
fn test_adapt_is_total_over_an_empty_record() {
    let journey: Journey = adapt(&LegacyJourneyRecord::default());

    assert_eq!(journey.id.value(), "");
    assert_eq!(journey.name, "Journey ");
    assert_eq!(journey.stage.stage, StageId::Lead);
    assert!(journey.value.abs() < f64::EPSILON);
    assert_eq!(journey.priority, Priority::C);
    assert_eq!(journey.confidence, None);
    assert_eq!(journey.expected_decision_date, None);
    assert_eq!(journey.created_at, None);
    assert_eq!(journey.updated_at, None);
}

#[test]
fn test_adapt_name_falls_back_to_target_account() {
    let mut record: LegacyJourneyRecord = create_test_record();
    record.project_name = None;
    assert_eq!(adapt(&record).name, "Metalsa Inc");

    record.project_name = Some(String::from("   "));
    assert_eq!(adapt(&record).name, "Metalsa Inc");
}

#[test]
fn test_adapt_name_falls_back_to_id() {
    let mut record: LegacyJourneyRecord = create_test_record();
    record.project_name = None;
    record.target_account = None;
    assert_eq!(adapt(&record).name, "Journey 4711");
}

#[test]
fn test_adapt_updated_at_falls_back_to_created_at() {
    let mut record: LegacyJourneyRecord = create_test_record();
    record.action_date = None;
    let journey: Journey = adapt(&record);
    assert_eq!(journey.updated_at, journey.created_at);
}

#[test]
fn test_adapt_null_date_sentinel_is_absent() {
    let mut record: LegacyJourneyRecord = create_test_record();
    record.expected_decision_date = Some(String::from("0000-00-00"));
    record.create_dt = Some(String::from("0000-00-00 00:00:00"));
    record.action_date = Some(String::from("0000-00-00 11:22:33"));

    let journey: Journey = adapt(&record);
    assert_eq!(journey.expected_decision_date, None);
    assert_eq!(journey.created_at, None);
    assert_eq!(journey.updated_at, None);
}

#[test]
fn test_adapt_invalid_dates_are_absent() {
    let mut record: LegacyJourneyRecord = create_test_record();
    record.expected_decision_date = Some(String::from("not a date"));
    record.create_dt = Some(String::from("2026-13-45"));

    let journey: Journey = adapt(&record);
    assert_eq!(journey.expected_decision_date, None);
    assert_eq!(journey.created_at, None);
}

#[test]
fn test_adapt_value_clamps_and_defaults() {
    let mut record: LegacyJourneyRecord = create_test_record();

    record.journey_value = Some(String::from("-500"));
    assert!(adapt(&record).value.abs() < f64::EPSILON);

    record.journey_value = Some(String::from("garbage"));
    assert!(adapt(&record).value.abs() < f64::EPSILON);

    record.journey_value = Some(String::from("1,250,000"));
    assert!((adapt(&record).value - 1_250_000.0).abs() < f64::EPSILON);

    record.journey_value = None;
    assert!(adapt(&record).value.abs() < f64::EPSILON);
}

#[test]
fn test_adapt_deleted_flag() {
    let mut record: LegacyJourneyRecord = create_test_record();
    record.deleted_at = Some(String::from("1"));
    assert!(adapt(&record).disabled);

    record.deleted_at = Some(String::from("0"));
    assert!(!adapt(&record).disabled);

    record.deleted_at = None;
    assert!(!adapt(&record).disabled);
}

#[test]
fn test_record_deserializes_numeric_and_string_fields() {
    let json: &str = r#"{
        "ID": 4711,
        "Project_Name": "Line Upgrade",
        "Journey_Value": 98000.5,
        "Chance_To_Secure_order": "90%",
        "deletedAt": 1
    }"#;

    let record: LegacyJourneyRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.id.as_deref(), Some("4711"));
    assert_eq!(record.journey_value.as_deref(), Some("98000.5"));
    assert_eq!(record.deleted_at.as_deref(), Some("1"));

    let journey: Journey = adapt(&record);
    assert_eq!(journey.id.value(), "4711");
    assert!((journey.value - 98_000.5).abs() < f64::EPSILON);
    assert_eq!(journey.confidence.map(|c| c.value()), Some(90));
    assert!(journey.disabled);
}

#[test]
fn test_normalize_accepts_both_legacy_shapes() {
    assert_eq!(
        normalize_legacy_datetime("2026-03-01"),
        Some(datetime!(2026-03-01 00:00:00))
    );
    assert_eq!(
        normalize_legacy_datetime("2026-03-01 14:30:15"),
        Some(datetime!(2026-03-01 14:30:15))
    );
    assert_eq!(
        normalize_legacy_datetime("2026-03-01T14:30:15"),
        Some(datetime!(2026-03-01 14:30:15))
    );
    assert_eq!(
        normalize_legacy_datetime("2026-03-01 14:30:15.123"),
        Some(datetime!(2026-03-01 14:30:15))
    );
}

#[test]
fn test_normalize_rejects_sentinel_and_garbage() {
    assert_eq!(normalize_legacy_datetime(""), None);
    assert_eq!(normalize_legacy_datetime("0000-00-00"), None);
    assert_eq!(normalize_legacy_datetime("0000-00-00 00:00:00"), None);
    assert_eq!(normalize_legacy_datetime("soon"), None);
    assert_eq!(normalize_legacy_datetime("2026-02-30"), None);
}
