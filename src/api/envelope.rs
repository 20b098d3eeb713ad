//! The `{status, success, message, data, error}` wrapper every JSON
//! endpoint responds with.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// `status` is `"success"`/`"error"` on most endpoints and a boolean on
/// the list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StatusField {
    Flag(bool),
    Text(String),
}

impl StatusField {
    fn is_success(&self) -> bool {
        match self {
            StatusField::Flag(flag) => *flag,
            StatusField::Text(text) => text.eq_ignore_ascii_case("success"),
        }
    }
}

/// Response envelope around a payload of type `T`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<StatusField>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<Value>,
    /// Also treat `message == "Success"` as business success.
    #[serde(skip)]
    accept_success_message: bool,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode an envelope from a response body.
    ///
    /// An empty body decodes as an envelope with every field unset.
    pub fn from_slice(body: &[u8]) -> ApiResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::empty());
        }
        Ok(serde_json::from_slice(body)?)
    }
}

impl<T> Envelope<T> {
    fn empty() -> Self {
        Self {
            status: None,
            success: None,
            message: None,
            data: None,
            error: None,
            accept_success_message: false,
        }
    }

    /// Accept `message == "Success"` as a success indicator, as the list
    /// endpoint reports it.
    pub fn accepting_success_message(mut self) -> Self {
        self.accept_success_message = true;
        self
    }

    /// Whether the backend reported business success.
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
            || self.status.as_ref().is_some_and(StatusField::is_success)
            || (self.accept_success_message && self.message.as_deref() == Some("Success"))
    }

    /// The explicit `error` field as text, if present and non-empty.
    pub fn error_text(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::String(text) => non_empty(text),
            other => Some(other.to_string()),
        }
    }

    /// Failure message: `error`, then `message`, then `fallback`.
    pub fn failure_message(&self, fallback: &str) -> String {
        self.error_text()
            .or_else(|| self.message.as_deref().and_then(non_empty))
            .unwrap_or_else(|| fallback.to_string())
    }

    /// The payload on business success, otherwise a business error.
    pub fn into_result(self, fallback: &str) -> ApiResult<T> {
        if self.is_success() {
            if let Some(data) = self.data {
                return Ok(data);
            }
        }
        Err(ApiError::business(self.failure_message(fallback)))
    }

    /// Business success without requiring a payload, for endpoints like
    /// delete that answer with `data: null`.
    pub fn into_ack(self, fallback: &str) -> ApiResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApiError::business(self.failure_message(fallback)))
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
