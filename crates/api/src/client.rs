// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP client for the legacy CRM backend.
//!
//! Journeys are read from `/legacy/base/Journey` (paginated, sortable,
//! filterable through the JSON `filter` query parameter) and written back
//! with PATCH. Audit lines go to `/legacy/std/Journey_Log`; notes, next
//! steps, and last-activity stamps to `/core/notes`; tags to
//! `/core/tags`. Stage updates are written as the free-text label, never
//! the numeric id: the backend is label-authoritative.

use std::collections::BTreeMap;
use std::time::Duration;

use journey_board_audit::{ActivityStamp, StageChange, format_log_timestamp};
use journey_board_domain::{
    JourneyId, LegacyJourneyRecord, Note, NoteKind, SortDirection, SortField, Tag,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use time::OffsetDateTime;

use crate::conditions::ConditionTree;

/// Errors from the legacy backend client.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Transport(String),
    /// The request timed out.
    #[error("timeout")]
    Timeout,
    /// The backend answered with a non-success status.
    #[error("http {status}: {body}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },
    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
    /// A request component could not be serialized.
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// One page of raw journey rows with the server-reported pagination
/// facts.
#[derive(Debug, Clone, Default)]
pub struct JourneyPage {
    /// The raw rows.
    pub records: Vec<LegacyJourneyRecord>,
    /// Server-reported total row count (the page length when the server
    /// reports nothing).
    pub total: u64,
    /// Server-reported page count (1 when the server reports nothing).
    pub total_pages: u32,
}

/// Query parameters for a journey page fetch.
#[derive(Debug, Clone)]
pub struct JourneyQuery {
    /// Page number, 1-based.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Sort field.
    pub sort: SortField,
    /// Sort direction.
    pub order: SortDirection,
    /// Server-side filter conditions.
    pub conditions: ConditionTree,
}

impl JourneyQuery {
    /// Builds the query string pairs for `/legacy/base/Journey`.
    ///
    /// Sort fields travel as their legacy column names.
    ///
    /// # Errors
    ///
    /// Returns an error if the condition tree cannot be serialized.
    pub fn to_query_pairs(&self) -> Result<Vec<(String, String)>, ClientError> {
        let mut pairs: Vec<(String, String)> = vec![
            (String::from("page"), self.page.to_string()),
            (String::from("limit"), self.limit.to_string()),
            (String::from("sort"), String::from(sort_column(self.sort))),
            (String::from("order"), String::from(self.order.as_str())),
        ];
        if !self.conditions.is_empty() {
            let filter: String = self
                .conditions
                .to_query_value()
                .map_err(|e| ClientError::Serialize(e.to_string()))?;
            pairs.push((String::from("filter"), filter));
        }
        Ok(pairs)
    }
}

/// Maps a client sort field to its legacy sort column.
#[must_use]
pub const fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Name => "Project_Name",
        SortField::Value => "Journey_Value",
        SortField::Stage => "Journey_Stage",
        SortField::Confidence => "Chance_To_Secure_order",
        SortField::Priority => "Priority",
        SortField::CreatedAt => "CreateDT",
        SortField::UpdatedAt => "Action_Date",
        SortField::ExpectedDecisionDate => "Expected_Decision_Date",
    }
}

/// Paginated response envelope; the service also answers with a bare
/// array on unpaginated routes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JourneyListBody {
    Envelope {
        data: Vec<LegacyJourneyRecord>,
        #[serde(default)]
        total: Option<u64>,
        #[serde(rename = "totalPages", default)]
        total_pages: Option<u32>,
    },
    Bare(Vec<LegacyJourneyRecord>),
}

/// A journey contact row from `Journey_Contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyContact {
    /// Contact name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact position.
    #[serde(default)]
    pub position: Option<String>,
    /// Mailing address, possibly multi-line.
    #[serde(default)]
    pub address: Option<String>,
}

/// An RSM entry joined from the demographic and employee tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsmRecord {
    /// Display name.
    pub name: String,
    /// Employee number.
    pub emp_num: i64,
    /// Initials, the value journeys reference.
    pub initials: String,
}

/// The derived quote total with its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteValue {
    /// The quote total.
    pub total: f64,
    /// The line items.
    #[serde(default)]
    pub items: Vec<QuoteValueItem>,
}

/// One quote line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteValueItem {
    /// Line description.
    pub description: String,
    /// Line amount.
    pub amount: f64,
}

/// The legacy backend client.
#[derive(Debug, Clone)]
pub struct LegacyClient {
    http: Client,
    base_url: String,
}

impl LegacyClient {
    /// Request timeout for all legacy calls.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a client against a base URL (e.g.
    /// `http://localhost:8080/api`).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http: Client = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status: StatusCode = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body: String = response.text().await.unwrap_or_default();
            Err(ClientError::Http {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Fetches one page of journeys.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn fetch_journeys(&self, query: &JourneyQuery) -> Result<JourneyPage, ClientError> {
        let pairs: Vec<(String, String)> = query.to_query_pairs()?;
        let response = self
            .http
            .get(self.url("/legacy/base/Journey"))
            .query(&pairs)
            .send()
            .await?;
        let body: JourneyListBody = Self::check(response).await?.json().await?;

        Ok(match body {
            JourneyListBody::Envelope {
                data,
                total,
                total_pages,
            } => {
                let fallback_total: u64 = data.len() as u64;
                JourneyPage {
                    total: total.unwrap_or(fallback_total),
                    total_pages: total_pages.unwrap_or(1),
                    records: data,
                }
            }
            JourneyListBody::Bare(records) => JourneyPage {
                total: records.len() as u64,
                total_pages: 1,
                records,
            },
        })
    }

    /// Patches arbitrary journey fields.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn update_journey(
        &self,
        journey: &JourneyId,
        fields: &BTreeMap<String, Value>,
    ) -> Result<Value, ClientError> {
        let response = self
            .http
            .patch(self.url(&format!("/legacy/base/Journey/{journey}")))
            .json(fields)
            .send()
            .await?;
        let body: Value = Self::check(response).await?.json().await.unwrap_or(Value::Null);
        Ok(body)
    }

    /// Writes a journey's stage as its free-text label.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn update_stage(
        &self,
        journey: &JourneyId,
        stage_label: &str,
    ) -> Result<(), ClientError> {
        let mut fields: BTreeMap<String, Value> = BTreeMap::new();
        fields.insert(String::from("Journey_Stage"), json!(stage_label));
        self.update_journey(journey, &fields).await.map(|_| ())
    }

    /// Toggles the soft-delete flag.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn set_disabled(
        &self,
        journey: &JourneyId,
        disabled: bool,
    ) -> Result<(), ClientError> {
        let mut fields: BTreeMap<String, Value> = BTreeMap::new();
        fields.insert(String::from("deletedAt"), json!(i32::from(disabled)));
        self.update_journey(journey, &fields).await.map(|_| ())
    }

    /// Appends a stage-change line to the legacy journey log.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn append_log(
        &self,
        change: &StageChange,
        at: OffsetDateTime,
        initials: &str,
    ) -> Result<(), ClientError> {
        let body: Value = json!({
            "Jrn_ID": change.journey.value(),
            "Action": change.log_line(),
            "CreateDtTm": format_log_timestamp(at),
            "CreateInit": initials,
        });
        let response = self
            .http
            .post(self.url("/legacy/std/Journey_Log"))
            .json(&body)
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    /// Writes a last-activity stamp.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn post_activity_stamp(&self, stamp: &ActivityStamp) -> Result<(), ClientError> {
        let body: Value = json!({
            "body": stamp.body,
            "entityId": stamp.journey.value(),
            "entityType": "journey",
            "type": NoteKind::LastActivity.as_str(),
            "createdBy": stamp.created_by,
        });
        let response = self
            .http
            .post(self.url("/core/notes"))
            .json(&body)
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    /// Creates a note or next step.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn create_note(&self, note: &Note) -> Result<(), ClientError> {
        let body: Value = json!({
            "body": note.body,
            "entityId": note.entity_id.value(),
            "entityType": "journey",
            "type": note.kind.as_str(),
            "createdBy": note.created_by,
        });
        let response = self
            .http
            .post(self.url("/core/notes"))
            .json(&body)
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    /// Lists the notes of a kind for a journey.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn list_notes(
        &self,
        journey: &JourneyId,
        kind: NoteKind,
    ) -> Result<Vec<Note>, ClientError> {
        #[derive(Deserialize)]
        struct NoteBody {
            #[serde(default)]
            id: Option<String>,
            #[serde(default)]
            body: String,
            #[serde(rename = "createdBy", default)]
            created_by: Option<String>,
        }

        let response = self
            .http
            .get(self.url("/core/notes"))
            .query(&[
                ("entityType", "journey"),
                ("entityId", journey.value()),
                ("type", kind.as_str()),
            ])
            .send()
            .await?;
        let bodies: Vec<NoteBody> = Self::check(response).await?.json().await?;
        Ok(bodies
            .into_iter()
            .map(|b| Note {
                id: b.id,
                entity_id: journey.clone(),
                kind,
                body: b.body,
                created_by: b.created_by,
            })
            .collect())
    }

    /// Deletes a note by id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn delete_note(&self, note_id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/core/notes/{note_id}")))
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    /// Lists the tags attached to a journey.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn list_tags(&self, journey: &JourneyId) -> Result<Vec<Tag>, ClientError> {
        let response = self
            .http
            .get(self.url("/core/tags"))
            .query(&[("parentTable", "journey"), ("parentId", journey.value())])
            .send()
            .await?;
        let tags: Vec<Tag> = Self::check(response).await?.json().await?;
        Ok(tags)
    }

    /// Attaches a tag to a journey.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn create_tag(
        &self,
        journey: &JourneyId,
        description: &str,
    ) -> Result<(), ClientError> {
        let body: Value = json!({
            "parentTable": "journey",
            "parentId": journey.value(),
            "description": description,
        });
        let response = self
            .http
            .post(self.url("/core/tags"))
            .json(&body)
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    /// Removes a tag by id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn delete_tag(&self, tag_id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/core/tags/{tag_id}")))
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    /// Fetches the journey contacts for the export join.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn list_contacts(
        &self,
        journey: &JourneyId,
    ) -> Result<Vec<JourneyContact>, ClientError> {
        let response = self
            .http
            .get(self.url("/legacy/std/Journey_Contact"))
            .query(&[("Jrn_ID", journey.value())])
            .send()
            .await?;
        let contacts: Vec<JourneyContact> = Self::check(response).await?.json().await?;
        Ok(contacts)
    }

    /// Fetches the available RSMs: demographic descriptions joined to
    /// employee records.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn fetch_rsms(&self) -> Result<Vec<RsmRecord>, ClientError> {
        #[derive(Deserialize)]
        struct DemographicRow {
            #[serde(rename = "Description", default)]
            description: Option<String>,
        }
        #[derive(Deserialize)]
        struct EmployeeRow {
            #[serde(rename = "EmpFirstName", default)]
            first_name: Option<String>,
            #[serde(rename = "EmpLastName", default)]
            last_name: Option<String>,
            #[serde(rename = "EmpNum", default)]
            emp_num: Option<i64>,
            #[serde(rename = "EmpInitials", default)]
            initials: Option<String>,
        }
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum EmployeeBody {
            Envelope { data: Vec<EmployeeRow> },
            Bare(Vec<EmployeeRow>),
        }

        let response = self
            .http
            .get(self.url("/legacy/std/Demographic/filter/custom"))
            .query(&[
                ("filterField", "Category"),
                ("filterValue", "RSM"),
                ("Use_Status", "NOT:Historical"),
                ("fields", "Description"),
            ])
            .send()
            .await?;
        let rows: Vec<DemographicRow> = Self::check(response).await?.json().await?;
        let initials: Vec<String> = rows.into_iter().filter_map(|r| r.description).collect();
        if initials.is_empty() {
            return Ok(Vec::new());
        }

        let filter: Value = json!({
            "filters": [{
                "field": "EmpInitials",
                "operator": "in",
                "values": initials,
            }],
        });
        let filter_str: String =
            serde_json::to_string(&filter).map_err(|e| ClientError::Serialize(e.to_string()))?;
        let response = self
            .http
            .get(self.url("/legacy/std/Employee"))
            .query(&[
                ("filter", filter_str.as_str()),
                ("fields", "EmpFirstName,EmpLastName,EmpNum,EmpInitials"),
            ])
            .send()
            .await?;
        let body: EmployeeBody = Self::check(response).await?.json().await?;
        let employees: Vec<EmployeeRow> = match body {
            EmployeeBody::Envelope { data } => data,
            EmployeeBody::Bare(rows) => rows,
        };

        Ok(employees
            .into_iter()
            .filter_map(|e| {
                let initials: String = e.initials?;
                let emp_num: i64 = e.emp_num.unwrap_or(0);
                if emp_num <= 0 {
                    return None;
                }
                let name: String = format!(
                    "{} {}",
                    e.first_name.unwrap_or_default(),
                    e.last_name.unwrap_or_default()
                )
                .trim()
                .to_owned();
                Some(RsmRecord {
                    name: if name.is_empty() {
                        initials.clone()
                    } else {
                        name
                    },
                    emp_num,
                    initials,
                })
            })
            .collect())
    }

    /// Fetches the derived quote total and line items for a journey.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn quote_value(&self, journey: &JourneyId) -> Result<QuoteValue, ClientError> {
        let response = self
            .http
            .get(self.url("/legacy/quote-value"))
            .query(&[("journeyId", journey.value())])
            .send()
            .await?;
        let value: QuoteValue = Self::check(response).await?.json().await?;
        Ok(value)
    }
}
