//! User profile and profile update request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::wire;

/// Free-form per-user settings.
pub type Settings = Map<String, Value>;

/// The signed-in user as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "wire::id::deserialize")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, with = "wire::timestamp_opt")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, with = "wire::timestamp_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

/// Partial profile update. `None` fields are omitted from the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Change the password; the server checks `current` first.
    pub fn with_password_change(
        mut self,
        current: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        self.current_password = Some(current.into());
        self.new_password = Some(new.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.settings.is_none()
            && self.current_password.is_none()
            && self.new_password.is_none()
    }
}
