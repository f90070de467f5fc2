// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The legacy record adapter.
//!
//! Maps heterogeneous legacy column names into the normalized [`Journey`]
//! shape. Adaptation is a pure, total function: missing, null, numeric,
//! and malformed fields all have defined fallbacks, and nothing here can
//! fail or panic.

use serde::{Deserialize, Deserializer, Serialize};
use time::PrimitiveDateTime;

use crate::dates::normalize_legacy_datetime;
use crate::stage::StageClassification;
use crate::types::{Confidence, Journey, JourneyId, Priority};

/// Deserializes a legacy field that may arrive as a string, a number, a
/// boolean, or null, normalizing everything to its string form.
///
/// The legacy backend is free-text-oriented but not consistent about it:
/// numeric columns serialize as numbers on some rows and strings on
/// others.
fn flexible_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// A raw journey row as returned by the legacy backend.
///
/// Every field is optional; the adapter supplies the fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyJourneyRecord {
    /// The row identifier.
    #[serde(rename = "ID", default, deserialize_with = "flexible_string")]
    pub id: Option<String>,
    /// Project name, the preferred display name.
    #[serde(rename = "Project_Name", default, deserialize_with = "flexible_string")]
    pub project_name: Option<String>,
    /// Target account, the fallback display name and company name.
    #[serde(rename = "Target_Account", default, deserialize_with = "flexible_string")]
    pub target_account: Option<String>,
    /// Free-text pipeline stage.
    #[serde(rename = "Journey_Stage", default, deserialize_with = "flexible_string")]
    pub journey_stage: Option<String>,
    /// Currency value.
    #[serde(rename = "Journey_Value", default, deserialize_with = "flexible_string")]
    pub journey_value: Option<String>,
    /// Free-text priority.
    #[serde(rename = "Priority", default, deserialize_with = "flexible_string")]
    pub priority: Option<String>,
    /// Free-text confidence ("90%", "Closed Won", ...).
    #[serde(
        rename = "Chance_To_Secure_order",
        default,
        deserialize_with = "flexible_string"
    )]
    pub chance_to_secure_order: Option<String>,
    /// Expected decision date.
    #[serde(
        rename = "Expected_Decision_Date",
        default,
        deserialize_with = "flexible_string"
    )]
    pub expected_decision_date: Option<String>,
    /// Row creation timestamp.
    #[serde(rename = "CreateDT", default, deserialize_with = "flexible_string")]
    pub create_dt: Option<String>,
    /// Last action timestamp.
    #[serde(rename = "Action_Date", default, deserialize_with = "flexible_string")]
    pub action_date: Option<String>,
    /// Soft reference to the company record.
    #[serde(rename = "Company_ID", default, deserialize_with = "flexible_string")]
    pub company_id: Option<String>,
    /// Regional sales manager initials.
    #[serde(rename = "RSM", default, deserialize_with = "flexible_string")]
    pub rsm: Option<String>,
    /// Quote number, when assigned.
    #[serde(rename = "Quote_Number", default, deserialize_with = "flexible_string")]
    pub quote_number: Option<String>,
    /// Free-text journey status.
    #[serde(rename = "Journey_Status", default, deserialize_with = "flexible_string")]
    pub journey_status: Option<String>,
    /// Industry classification.
    #[serde(rename = "Industry", default, deserialize_with = "flexible_string")]
    pub industry: Option<String>,
    /// Dealer name.
    #[serde(rename = "Dealer", default, deserialize_with = "flexible_string")]
    pub dealer: Option<String>,
    /// Equipment type.
    #[serde(rename = "Equipment_Type", default, deserialize_with = "flexible_string")]
    pub equipment_type: Option<String>,
    /// Lead source.
    #[serde(rename = "Lead_Source", default, deserialize_with = "flexible_string")]
    pub lead_source: Option<String>,
    /// Soft-delete flag: `1` disables the journey.
    #[serde(rename = "deletedAt", default, deserialize_with = "flexible_string")]
    pub deleted_at: Option<String>,
}

/// Parses the legacy currency value: a non-negative amount, with
/// unparseable input falling back to zero.
fn parse_value(raw: Option<&str>) -> f64 {
    let parsed: f64 = raw
        .map(|s| s.trim().replace(',', ""))
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    if parsed.is_finite() && parsed > 0.0 {
        parsed
    } else {
        0.0
    }
}

/// Normalizes an optional legacy datetime field.
fn parse_date(raw: Option<&str>) -> Option<PrimitiveDateTime> {
    raw.and_then(normalize_legacy_datetime)
}

/// Adapts a raw legacy row into a normalized [`Journey`].
///
/// Field fallbacks:
/// - `name`: project name, else target account, else `Journey {id}`;
/// - `stage`: classified from the free-text stage, preserving the label;
/// - `value`: non-negative, zero when unparseable;
/// - `priority`: normalized, defaulting to C;
/// - `confidence`: absent when the legacy field carries no signal;
/// - dates: absent for the `0000-00-00` sentinel and unparseable values;
/// - `updated_at`: action date, else creation date.
#[must_use]
pub fn adapt(raw: &LegacyJourneyRecord) -> Journey {
    let id: JourneyId = JourneyId::new(raw.id.clone().unwrap_or_default());

    let name: String = raw
        .project_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .or_else(|| {
            raw.target_account
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("Journey {id}"));

    let created_at: Option<PrimitiveDateTime> = parse_date(raw.create_dt.as_deref());
    let updated_at: Option<PrimitiveDateTime> =
        parse_date(raw.action_date.as_deref()).or(created_at);

    Journey {
        id,
        name,
        stage: StageClassification::from_label(raw.journey_stage.as_deref()),
        value: parse_value(raw.journey_value.as_deref()),
        priority: Priority::normalize(raw.priority.as_deref().unwrap_or_default()),
        confidence: raw
            .chance_to_secure_order
            .as_deref()
            .and_then(Confidence::parse_legacy),
        expected_decision_date: parse_date(raw.expected_decision_date.as_deref()),
        created_at,
        updated_at,
        customer_id: raw.company_id.clone(),
        company_name: raw
            .target_account
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        disabled: raw
            .deleted_at
            .as_deref()
            .is_some_and(|flag| flag.trim() == "1" || flag.trim() == "true"),
        quote_number: raw.quote_number.clone(),
        rsm: raw.rsm.clone(),
        industry: raw.industry.clone(),
        dealer: raw.dealer.clone(),
        equipment_type: raw.equipment_type.clone(),
        lead_source: raw.lead_source.clone(),
        journey_status: raw.journey_status.clone(),
    }
}
