//! Homework records and the request bodies that create or change them.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::report::{GrammarReport, PlagiarismReport};
use super::wire;

/// Lifecycle of a homework assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HomeworkStatus {
    #[default]
    Draft,
    Submitted,
    Analyzed,
    Completed,
}

impl HomeworkStatus {
    /// Parse a status case-insensitively. Unrecognised values are `Draft`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "SUBMITTED" => HomeworkStatus::Submitted,
            "ANALYZED" => HomeworkStatus::Analyzed,
            "COMPLETED" => HomeworkStatus::Completed,
            _ => HomeworkStatus::Draft,
        }
    }

    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Draft => "DRAFT",
            HomeworkStatus::Submitted => "SUBMITTED",
            HomeworkStatus::Analyzed => "ANALYZED",
            HomeworkStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HomeworkStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HomeworkStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::from_wire).unwrap_or_default())
    }
}

/// A homework assignment as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homework {
    #[serde(deserialize_with = "wire::id::deserialize")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "wire::id::deserialize")]
    pub user_id: String,
    #[serde(default, with = "wire::timestamp_opt")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub status: HomeworkStatus,
    #[serde(with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "wire::timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub plagiarism_report: Option<PlagiarismReport>,
    #[serde(default)]
    pub grammar_report: Option<GrammarReport>,
    #[serde(default)]
    pub instructor_feedback: Option<String>,

    // Bookkeeping the backend includes alongside the core record.
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub is_submitted: Option<bool>,
    #[serde(default, with = "wire::timestamp_opt")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_plagiarism_report: Option<bool>,
    #[serde(default)]
    pub has_feedback: Option<bool>,
}

/// Deadline bucket accepted by the list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineFilter {
    /// Deadline already passed
    Before,
    /// Deadline still ahead
    After,
    /// Deadline falls on the current day
    Today,
}

impl DeadlineFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineFilter::Before => "before",
            DeadlineFilter::After => "after",
            DeadlineFilter::Today => "today",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "before" => Some(DeadlineFilter::Before),
            "after" => Some(DeadlineFilter::After),
            "today" => Some(DeadlineFilter::Today),
            _ => None,
        }
    }
}

/// Optional list filters, forwarded to the server as query parameters.
///
/// The client does no filtering of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeworkFilter {
    /// Sent verbatim as `status`
    pub status: Option<String>,
    /// Sent as `deadline`
    pub deadline: Option<DeadlineFilter>,
    /// Sent verbatim as `search`
    pub search: Option<String>,
}

impl HomeworkFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_deadline(mut self, deadline: DeadlineFilter) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Query parameters in `status`, `deadline`, `search` order, set ones only.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(status) = &self.status {
            query.push(("status".to_string(), status.clone()));
        }
        if let Some(deadline) = &self.deadline {
            query.push(("deadline".to_string(), deadline.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        query
    }
}

/// A new assignment to upload as multipart form data.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub title: String,
    pub description: String,
    /// ISO-8601 deadline, sent as text
    pub deadline: String,
    pub file_name: String,
    pub mime: String,
    pub content: Bytes,
}

impl UploadRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            deadline: deadline.into(),
            file_name: file_name.into(),
            mime: "application/octet-stream".to_string(),
            content: content.into(),
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }
}

/// Partial update of an assignment. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeworkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl HomeworkUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.deadline.is_none()
    }
}
