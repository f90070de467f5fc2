// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of the filtered journey set.
//!
//! One table with a fixed 18-column header; the projected value column is
//! currency-formatted and joined contact/address data lands in multi-line
//! cells (embedded newlines inside quoted fields).

use std::io::Write;

use journey_board_domain::{Customer, Journey, Note};

use crate::client::JourneyContact;

/// The fixed export header row.
pub const EXPORT_HEADERS: [&str; 18] = [
    "Quote Number",
    "CreateDate",
    "ActionDate",
    "Confidence",
    "Est PO Date",
    "Stage",
    "RSM",
    "Industry",
    "Dealer",
    "Customer",
    "Equipment",
    "Lead Source",
    "Projected Value",
    "Journey Steps",
    "Contact Name",
    "Contact Email",
    "Contact Position",
    "Address",
];

/// One export row, pre-joined and pre-formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRow {
    /// The 18 cell values, in header order.
    pub cells: [String; 18],
}

/// Formats a currency amount: dollar sign, thousands separators, two
/// decimal places.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_currency(amount: f64) -> String {
    let negative: bool = amount < 0.0;
    let cents: u128 = (amount.abs() * 100.0).round() as u128;
    let whole: u128 = cents / 100;
    let fraction: u128 = cents % 100;

    let digits: String = whole.to_string();
    let mut grouped: String = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${grouped}.{fraction:02}")
    } else {
        format!("${grouped}.{fraction:02}")
    }
}

/// Formats an optional datetime cell as `YYYY-MM-DD`.
fn date_cell(value: Option<time::PrimitiveDateTime>) -> String {
    value.map_or_else(String::new, |dt| {
        format!(
            "{:04}-{:02}-{:02}",
            dt.year(),
            u8::from(dt.month()),
            dt.day()
        )
    })
}

/// Builds export rows from the filtered set and its joined lookups.
///
/// `customers` resolves company display names; `next_steps` fills the
/// Journey Steps column (one step per line); `contacts` fills the
/// contact and address columns (one contact per line).
#[must_use]
pub fn build_export_rows(
    journeys: &[Journey],
    customers: &[Customer],
    next_steps: &[Note],
    contacts: &[(journey_board_domain::JourneyId, JourneyContact)],
) -> Vec<ExportRow> {
    journeys
        .iter()
        .map(|journey| {
            let customer_name: String = journey
                .customer_id
                .as_deref()
                .filter(|id| !id.is_empty() && *id != "0")
                .and_then(|id| customers.iter().find(|c| c.id == id))
                .map_or_else(
                    || journey.company_name.clone().unwrap_or_default(),
                    |c| c.name.clone(),
                );

            let steps: String = next_steps
                .iter()
                .filter(|note| note.entity_id == journey.id)
                .map(|note| note.body.as_str())
                .collect::<Vec<&str>>()
                .join("\n");

            let journey_contacts: Vec<&JourneyContact> = contacts
                .iter()
                .filter(|(id, _)| *id == journey.id)
                .map(|(_, contact)| contact)
                .collect();
            let joined = |pick: fn(&JourneyContact) -> Option<&str>| -> String {
                journey_contacts
                    .iter()
                    .map(|c| pick(c).unwrap_or_default())
                    .collect::<Vec<&str>>()
                    .join("\n")
            };

            ExportRow {
                cells: [
                    journey.quote_number.clone().unwrap_or_default(),
                    date_cell(journey.created_at),
                    date_cell(journey.updated_at),
                    journey
                        .confidence
                        .map_or_else(String::new, |c| format!("{}%", c.value())),
                    date_cell(journey.expected_decision_date),
                    String::from(journey.stage.stage.label()),
                    journey.rsm.clone().unwrap_or_default(),
                    journey.industry.clone().unwrap_or_default(),
                    journey.dealer.clone().unwrap_or_default(),
                    customer_name,
                    journey.equipment_type.clone().unwrap_or_default(),
                    journey.lead_source.clone().unwrap_or_default(),
                    format_currency(journey.value),
                    steps,
                    joined(|c| c.name.as_deref()),
                    joined(|c| c.email.as_deref()),
                    joined(|c| c.position.as_deref()),
                    joined(|c| c.address.as_deref()),
                ],
            }
        })
        .collect()
}

/// Writes the header row and export rows as CSV.
///
/// # Errors
///
/// Returns an error if a record cannot be written.
pub fn write_csv<W: Write>(out: W, rows: &[ExportRow]) -> Result<(), csv::Error> {
    let mut writer: csv::Writer<W> = csv::Writer::from_writer(out);
    writer.write_record(EXPORT_HEADERS)?;
    for row in rows {
        writer.write_record(&row.cells)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
