//! Typed client for the homework API.
//!
//! [`ApiClient`] owns the cross-cutting request behaviour: joining paths
//! onto the base URL, bearer-token decoration, optional connection-failure
//! masking, envelope decoding and error classification. Each endpoint is a
//! thin method on top returning an [`ApiResult`].

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::envelope::Envelope;
use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AuthData, GrammarReport, Homework, HomeworkFilter, HomeworkUpdate, LoginRequest,
    PlagiarismReport, ProfileUpdate, RegisterRequest, UploadRequest, User,
};
use crate::traits::{
    CredentialsProvider, FilePart, Headers, HttpClient, HttpError, MultipartForm, Response,
};

/// Paths sent without an `Authorization` header.
const PUBLIC_PATHS: &[&str] = &["auth/login", "auth/register"];

/// Fallback messages used when a failed envelope carries neither `error`
/// nor `message`.
pub mod fallback {
    pub const LOGIN: &str = "Login failed";
    pub const REGISTER: &str = "Registration failed";
    pub const LIST_HOMEWORK: &str = "Failed to load homework";
    pub const GET_HOMEWORK: &str = "Failed to load homework details";
    pub const UPLOAD_HOMEWORK: &str = "Failed to upload homework";
    pub const UPDATE_HOMEWORK: &str = "Failed to update homework";
    pub const SUBMIT_HOMEWORK: &str = "Failed to submit homework";
    pub const DELETE_HOMEWORK: &str = "Failed to delete homework";
    pub const GET_PROFILE: &str = "Failed to load profile";
    pub const UPDATE_PROFILE: &str = "Failed to update profile";
    pub const CHECK_PLAGIARISM: &str = "Failed to check plagiarism";
    pub const PLAGIARISM_REPORT: &str = "Failed to load plagiarism report";
    pub const ANALYZE: &str = "Failed to analyze homework";
    pub const FEEDBACK: &str = "Failed to load feedback";
}

/// One outgoing request, minus URL and headers.
enum Call {
    Get(Vec<(String, String)>),
    Post(Option<String>),
    Put(Option<String>),
    Delete,
    Multipart(MultipartForm),
}

impl Call {
    fn method(&self) -> &'static str {
        match self {
            Call::Get(_) => "GET",
            Call::Post(_) | Call::Multipart(_) => "POST",
            Call::Put(_) => "PUT",
            Call::Delete => "DELETE",
        }
    }
}

/// Client for the homework API.
///
/// Cheap to clone; clones share the transport and the credential store.
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialsProvider>,
    base_url: String,
    mask_connection_failures: bool,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("mask_connection_failures", &self.mask_connection_failures)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client over the given transport and credential store.
    pub fn new(
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialsProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            http,
            credentials,
            base_url,
            mask_connection_failures: false,
        }
    }

    /// Create a reqwest-backed client from configuration.
    pub fn from_config(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Result<Self, HttpError> {
        let http = ReqwestHttpClient::with_timeouts(config.connect_timeout, config.request_timeout)?;
        Ok(Self::new(Arc::new(http), credentials, config.base_url.clone())
            .with_mask_connection_failures(config.mask_connection_failures))
    }

    /// Replace connection-level failures with an empty `200 {}` response.
    pub fn with_mask_connection_failures(mut self, mask: bool) -> Self {
        self.mask_connection_failures = mask;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The credential store used for request decoration.
    pub fn credentials(&self) -> &Arc<dyn CredentialsProvider> {
        &self.credentials
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Headers for a request to `path`, with the bearer token when one is
    /// stored and the path is not public.
    async fn headers_for(&self, path: &str) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        if is_public(path) {
            return headers;
        }

        match self.credentials.load().await {
            Ok(Some(creds)) => {
                if let Some(token) = creds.token() {
                    tracing::trace!("Authorizing {} with token {}", path, creds.token_preview());
                    headers.insert("Authorization".to_string(), format!("Bearer {}", token));
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Could not read credentials, sending {} unauthenticated: {}", path, e);
            }
        }
        headers
    }

    /// Perform a request and classify transport-level outcomes.
    ///
    /// Non-2xx statuses become [`ApiError::Transport`]. Connection failures
    /// become [`ApiError::Network`] unless masking is on and `maskable` is set.
    async fn execute(&self, path: &str, call: Call, maskable: bool) -> ApiResult<Response> {
        let url = self.url(path);
        let headers = self.headers_for(path).await;
        let method = call.method();

        let result = match call {
            Call::Get(query) => self.http.get(&url, &query, &headers).await,
            Call::Post(body) => self.http.post(&url, body.as_deref(), &headers).await,
            Call::Put(body) => self.http.put(&url, body.as_deref(), &headers).await,
            Call::Delete => self.http.delete(&url, &headers).await,
            Call::Multipart(form) => self.http.post_multipart(&url, form, &headers).await,
        };

        match result {
            Ok(response) if response.is_success() => {
                tracing::debug!("{} {} -> {}", method, url, response.status);
                Ok(response)
            }
            Ok(response) => {
                tracing::debug!("{} {} -> {}", method, url, response.status);
                Err(ApiError::transport(response.status, response.text().ok()))
            }
            Err(e) if maskable && self.mask_connection_failures && e.is_connectivity() => {
                tracing::warn!("{} {} failed ({}), substituting empty response", method, url, e);
                Ok(Response::new(200, Bytes::from_static(b"{}")))
            }
            Err(e) => {
                tracing::debug!("{} {} failed: {}", method, url, e);
                Err(e.into())
            }
        }
    }

    async fn envelope<T: DeserializeOwned>(&self, path: &str, call: Call) -> ApiResult<Envelope<T>> {
        let response = self.execute(path, call, true).await?;
        Envelope::from_slice(&response.body)
    }

    async fn call<T: DeserializeOwned>(&self, path: &str, call: Call, fallback: &str) -> ApiResult<T> {
        self.envelope(path, call).await?.into_result(fallback)
    }

    // ---- auth ----

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthData> {
        let body = to_body(request)?;
        self.call("auth/login", Call::Post(Some(body)), fallback::LOGIN)
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthData> {
        let body = to_body(request)?;
        self.call("auth/register", Call::Post(Some(body)), fallback::REGISTER)
            .await
    }

    // ---- assignments ----

    /// List assignments. Filters go to the server as query parameters and
    /// the records come back in server order.
    pub async fn list_homework(&self, filter: &HomeworkFilter) -> ApiResult<Vec<Homework>> {
        self.envelope::<Vec<Homework>>("assignments", Call::Get(filter.to_query()))
            .await?
            .accepting_success_message()
            .into_result(fallback::LIST_HOMEWORK)
    }

    pub async fn get_homework(&self, id: &str) -> ApiResult<Homework> {
        self.call(&item_path("assignments", id), Call::Get(Vec::new()), fallback::GET_HOMEWORK)
            .await
    }

    /// Upload a new assignment as `title`, `description`, `deadline` text
    /// parts and a `file` part.
    pub async fn upload_homework(&self, request: UploadRequest) -> ApiResult<Homework> {
        let form = MultipartForm::new()
            .text("title", request.title)
            .text("description", request.description)
            .text("deadline", request.deadline)
            .file(FilePart {
                field: "file".to_string(),
                file_name: request.file_name,
                mime: request.mime,
                bytes: request.content,
            });
        self.call("assignments", Call::Multipart(form), fallback::UPLOAD_HOMEWORK)
            .await
    }

    /// Raw bytes of the file attached to an assignment.
    pub async fn download_file(&self, id: &str) -> ApiResult<Bytes> {
        let path = format!("{}/file", item_path("assignments", id));
        let response = self.execute(&path, Call::Get(Vec::new()), false).await?;
        Ok(response.body)
    }

    pub async fn update_homework(&self, id: &str, update: &HomeworkUpdate) -> ApiResult<Homework> {
        let body = to_body(update)?;
        self.call(
            &item_path("assignments", id),
            Call::Put(Some(body)),
            fallback::UPDATE_HOMEWORK,
        )
        .await
    }

    pub async fn submit_homework(&self, id: &str) -> ApiResult<Homework> {
        let path = format!("{}/submit", item_path("assignments", id));
        self.call(&path, Call::Put(None), fallback::SUBMIT_HOMEWORK)
            .await
    }

    /// Delete an assignment. The server answers with no payload.
    pub async fn delete_homework(&self, id: &str) -> ApiResult<()> {
        self.envelope::<serde_json::Value>(&item_path("assignments", id), Call::Delete)
            .await?
            .into_ack(fallback::DELETE_HOMEWORK)
    }

    // ---- profile ----

    pub async fn get_profile(&self) -> ApiResult<User> {
        self.call("users/me", Call::Get(Vec::new()), fallback::GET_PROFILE)
            .await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<User> {
        let body = to_body(update)?;
        self.call("users/me", Call::Put(Some(body)), fallback::UPDATE_PROFILE)
            .await
    }

    // ---- analysis ----

    /// Run a plagiarism check on an assignment.
    pub async fn check_plagiarism(&self, id: &str) -> ApiResult<PlagiarismReport> {
        self.call(
            &item_path("plagiarism/check", id),
            Call::Post(None),
            fallback::CHECK_PLAGIARISM,
        )
        .await
    }

    pub async fn plagiarism_report(&self, id: &str) -> ApiResult<PlagiarismReport> {
        self.call(
            &item_path("plagiarism/report", id),
            Call::Get(Vec::new()),
            fallback::PLAGIARISM_REPORT,
        )
        .await
    }

    /// Run grammar and style analysis on an assignment.
    pub async fn analyze(&self, id: &str) -> ApiResult<GrammarReport> {
        self.call(
            &item_path("feedback/analyze", id),
            Call::Post(None),
            fallback::ANALYZE,
        )
        .await
    }

    pub async fn feedback(&self, id: &str) -> ApiResult<GrammarReport> {
        self.call(&item_path("feedback", id), Call::Get(Vec::new()), fallback::FEEDBACK)
            .await
    }
}

fn is_public(path: &str) -> bool {
    let path = path.trim_start_matches('/');
    PUBLIC_PATHS.contains(&path)
}

fn item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}

fn to_body<T: Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string(value).map_err(|e| ApiError::Unknown(e.to_string()))
}
