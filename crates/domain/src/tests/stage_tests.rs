// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::stage::{Stage, StageClassification, StageId, classify_stage};

#[test]
fn test_classify_qualified_keywords() {
    assert_eq!(classify_stage("Qualify"), StageId::Qualified);
    assert_eq!(classify_stage("Qualified Opportunity"), StageId::Qualified);
    assert_eq!(classify_stage("Pain Identified"), StageId::Qualified);
    assert_eq!(classify_stage("Discovery"), StageId::Qualified);
}

#[test]
fn test_classify_presentations_keywords() {
    assert_eq!(classify_stage("Presentation"), StageId::Presentations);
    assert_eq!(classify_stage("Demo Scheduled"), StageId::Presentations);
    assert_eq!(classify_stage("Proposal Sent"), StageId::Presentations);
    assert_eq!(classify_stage("Quote Issued"), StageId::Presentations);
}

#[test]
fn test_classify_negotiation_keyword() {
    assert_eq!(classify_stage("Negotiation"), StageId::Negotiation);
    assert_eq!(classify_stage("negotiating terms"), StageId::Negotiation);
}

#[test]
fn test_classify_closed_won_keywords() {
    assert_eq!(classify_stage("PO Received"), StageId::ClosedWon);
    assert_eq!(classify_stage("Won"), StageId::ClosedWon);
    assert_eq!(classify_stage("Closed Won"), StageId::ClosedWon);
    assert_eq!(classify_stage("Order Placed"), StageId::ClosedWon);
}

#[test]
fn test_classify_closed_lost_keywords() {
    assert_eq!(classify_stage("Lost"), StageId::ClosedLost);
    assert_eq!(classify_stage("Closed Lost"), StageId::ClosedLost);
    assert_eq!(classify_stage("Declined"), StageId::ClosedLost);
}

#[test]
fn test_classify_lead_keywords_and_default() {
    assert_eq!(classify_stage("Lead"), StageId::Lead);
    assert_eq!(classify_stage("Open"), StageId::Lead);
    assert_eq!(classify_stage("New"), StageId::Lead);
    assert_eq!(classify_stage(""), StageId::Lead);
    assert_eq!(classify_stage("   "), StageId::Lead);
    assert_eq!(classify_stage("Some Unknown Stage Text"), StageId::Lead);
}

#[test]
fn test_classify_is_case_insensitive() {
    assert_eq!(classify_stage("QUALIFY"), StageId::Qualified);
    assert_eq!(classify_stage("closed WON"), StageId::ClosedWon);
}

#[test]
fn test_classify_priority_order_resolves_multi_matches() {
    // "Closed Won Order" matches both the won and the lost category's
    // substrings in principle; the fixed 2,3,4,5,6 order must pick 5.
    assert_eq!(classify_stage("Closed Won Order"), StageId::ClosedWon);
    // "Quote for PO" matches presentations (3) before closed won (5).
    assert_eq!(classify_stage("Quote for PO"), StageId::Presentations);
    // "Qualified Proposal" matches qualified (2) before presentations (3).
    assert_eq!(classify_stage("Qualified Proposal"), StageId::Qualified);
}

#[test]
fn test_stage_id_from_number_round_trip() {
    for id in 1..=6u8 {
        let stage: StageId = StageId::from_number(id).unwrap();
        assert_eq!(stage.number(), id);
    }
}

#[test]
fn test_stage_id_from_number_rejects_out_of_range() {
    assert_eq!(StageId::from_number(0), Err(DomainError::InvalidStage(0)));
    assert_eq!(StageId::from_number(7), Err(DomainError::InvalidStage(7)));
}

#[test]
fn test_stage_catalog_weights() {
    let catalog: [Stage; 6] = Stage::catalog();
    let weights: Vec<f64> = catalog.iter().map(|s| s.weight).collect();
    assert_eq!(weights, vec![0.20, 0.40, 0.60, 0.90, 1.0, 0.0]);
}

#[test]
fn test_stage_labels() {
    assert_eq!(StageId::Lead.label(), "Lead");
    assert_eq!(StageId::Qualified.label(), "Qualified");
    assert_eq!(StageId::Presentations.label(), "Presentations");
    assert_eq!(StageId::Negotiation.label(), "Negotiation");
    assert_eq!(StageId::ClosedWon.label(), "Closed Won");
    assert_eq!(StageId::ClosedLost.label(), "Closed Lost");
}

#[test]
fn test_classification_preserves_raw_label() {
    let classification: StageClassification =
        StageClassification::from_label(Some("Quote Presented to Dealer"));
    assert_eq!(classification.stage, StageId::Presentations);
    assert_eq!(
        classification.raw_label.as_deref(),
        Some("Quote Presented to Dealer")
    );
    assert_eq!(classification.backend_label(), "Quote Presented to Dealer");
}

#[test]
fn test_classification_from_stage_uses_canonical_label() {
    let classification: StageClassification =
        StageClassification::from_stage(StageId::Negotiation);
    assert_eq!(classification.backend_label(), "Negotiation");
    assert!(!classification.differs_from_label());
}

#[test]
fn test_classification_reports_label_drift() {
    // A stored classification whose label no longer classifies to the
    // recorded stage is reported, not silently repaired.
    let drifted: StageClassification = StageClassification {
        raw_label: Some(String::from("Closed Lost")),
        stage: StageId::Negotiation,
    };
    assert!(drifted.differs_from_label());
}

#[test]
fn test_classification_of_absent_label_defaults_to_lead() {
    let classification: StageClassification = StageClassification::from_label(None);
    assert_eq!(classification.stage, StageId::Lead);
    assert_eq!(classification.raw_label, None);
    assert_eq!(classification.backend_label(), "Lead");
}
