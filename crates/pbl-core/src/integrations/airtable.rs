//! Airtable student roster sync.
//!
//! Records are read from `GET {api_url}/v0/{base_id}/{table}` a page at a
//! time; Airtable returns an `offset` cursor while more pages remain.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, SyncError};
use crate::model::{SkillField, SkillRatings, Student};
use crate::storage::{AirtableConfig, JsonStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One row as returned by the list-records endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AirtableRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ListRecordsResponse {
    #[serde(default)]
    records: Vec<AirtableRecord>,
    #[serde(default)]
    offset: Option<String>,
}

/// Counts reported after a sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub fetched: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

pub struct AirtableClient {
    http: Client,
    api_key: String,
    records_url: String,
}

impl AirtableClient {
    /// Build a client from resolved configuration.
    pub fn new(config: &AirtableConfig) -> Result<Self, SyncError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingKey("airtable.api_key".into()).into());
        }
        if config.base_id.trim().is_empty() {
            return Err(ConfigError::MissingKey("airtable.base_id".into()).into());
        }

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let records_url = format!(
            "{}/v0/{}/{}",
            config.api_url.trim_end_matches('/'),
            config.base_id.trim(),
            config.table_name.trim()
        );
        Ok(Self {
            http,
            api_key: config.api_key.trim().to_string(),
            records_url,
        })
    }

    /// Fetch every record in the table, following pagination.
    pub async fn fetch_records(&self) -> Result<Vec<AirtableRecord>, SyncError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self.http.get(&self.records_url).bearer_auth(&self.api_key);
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let resp = request.send().await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(SyncError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let page: ListRecordsResponse = resp.json().await?;
            debug!(records = page.records.len(), "fetched Airtable page");
            records.extend(page.records);

            match page.offset {
                Some(next) if !next.is_empty() => offset = Some(next),
                _ => break,
            }
        }

        Ok(records)
    }

    /// Fetch the roster and map it onto student profiles.
    pub async fn fetch_students(&self) -> Result<Vec<Student>, SyncError> {
        let records = self.fetch_records().await?;
        let total = records.len();
        let students: Vec<Student> = records
            .iter()
            .filter_map(|record| {
                let student = student_from_record(record);
                if student.is_none() {
                    warn!(record_id = %record.id, "skipping empty Airtable record");
                }
                student
            })
            .collect();
        debug!(total, mapped = students.len(), "mapped Airtable records");
        Ok(students)
    }
}

/// Pull the roster from Airtable and merge it into the local store.
pub async fn sync_students(
    client: &AirtableClient,
    store: &JsonStore,
) -> Result<SyncSummary, SyncError> {
    let students = client.fetch_students().await?;
    let fetched = students.len();
    let upsert = store.upsert_students(students)?;

    let summary = SyncSummary {
        fetched,
        inserted: upsert.inserted,
        updated: upsert.updated,
        unchanged: upsert.unchanged,
    };
    info!(
        fetched,
        inserted = summary.inserted,
        updated = summary.updated,
        unchanged = summary.unchanged,
        "Airtable sync complete"
    );
    Ok(summary)
}

/// Map one record to a student. Records with no fields at all are skipped.
pub fn student_from_record(record: &AirtableRecord) -> Option<Student> {
    let fields = &record.fields;
    if fields.is_empty() {
        return None;
    }

    let student_id = text(fields, "StudentId").unwrap_or_else(|| record.id.clone());
    let mut student = Student::new(student_id, text(fields, "Name").unwrap_or_default());
    student.mbti = text(fields, "MBTI").unwrap_or_default();
    student.skills = skills(fields);
    student.strengths = list(fields, "Strengths");
    student.weaknesses = list(fields, "Weaknesses");
    student.preferred_partners = list(fields, "PreferredPartners").into_iter().collect();
    student.avoided_partners = list(fields, "AvoidedPartners").into_iter().collect();
    student.team_id = text(fields, "TeamId");
    Some(student)
}

fn skill_column(field: SkillField) -> String {
    let name = field.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn skills(fields: &Map<String, Value>) -> SkillRatings {
    let mut ratings = SkillRatings::default();
    for field in SkillField::ALL {
        ratings.set(field, number(fields, &skill_column(field)));
    }
    ratings
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Single text value; linked-record arrays yield their first entry.
fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Array(items) => items.iter().find_map(scalar_text),
        other => scalar_text(other),
    }
}

/// Array field or comma-separated text.
fn list(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn number(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
