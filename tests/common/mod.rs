//! Shared fixtures for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! let creds = InMemoryCredentials::with_token("tok");
//! let api = api_for(&server, &creds);
//! ```

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use hwassist::adapters::{InMemoryCredentials, ReqwestHttpClient};
use hwassist::api::ApiClient;
use wiremock::MockServer;

/// A reqwest-backed client pointed at the mock server's `/api/` prefix.
pub fn api_for(server: &MockServer, credentials: &InMemoryCredentials) -> ApiClient {
    let http = ReqwestHttpClient::with_timeouts(Duration::from_secs(5), Duration::from_secs(5))
        .expect("client builds");
    ApiClient::new(
        Arc::new(http),
        Arc::new(credentials.clone()),
        format!("{}/api", server.uri()),
    )
}

/// A homework record as the backend serializes it.
pub fn homework_json(id: u64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{} description", title),
        "user_id": 7,
        "deadline": "2025-05-01T12:00:00",
        "file_url": format!("/uploads/{}.pdf", id),
        "file_type": "application/pdf",
        "status": status,
        "created_at": "2025-04-01T08:30:00",
        "updated_at": "2025-04-02T09:00:00",
        "plagiarism_report": null,
        "grammar_report": null,
        "instructor_feedback": null
    })
}

pub fn user_json() -> Value {
    json!({
        "id": 7,
        "email": "ada@example.com",
        "full_name": "Ada Lovelace",
        "is_active": true,
        "roles": ["student"]
    })
}

/// The `data` object of a successful login or register response.
pub fn auth_data_json(token: &str, first_login: Option<bool>) -> Value {
    let mut data = json!({
        "access_token": token,
        "user": user_json()
    });
    if let Some(flag) = first_login {
        data["is_first_login"] = json!(flag);
    }
    data
}

/// A success envelope around `data`.
pub fn ok(data: Value) -> Value {
    json!({"status": "success", "data": data})
}

/// A failure envelope with an `error` text.
pub fn failed(error: &str) -> Value {
    json!({"status": "error", "error": error})
}
