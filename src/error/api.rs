//! The failure type carried by `Resource::Error`.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::{CredentialsError, HttpError};

/// Why an API operation failed.
///
/// `Display` renders the message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 2xx response whose envelope signalled failure or carried no payload.
    #[error("{message}")]
    Business { message: String },

    /// Non-2xx response. `body` holds the raw body text when it was readable.
    #[error("Failed with code: {status}{}", body_suffix(.body))]
    Transport { status: u16, body: Option<String> },

    /// The request could not complete.
    #[error("Network error: {0}")]
    Network(String),

    /// Any other failure.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(text) => format!(": {}", text),
        None => String::new(),
    }
}

impl ApiError {
    /// Business failure with the given message.
    pub fn business(message: impl Into<String>) -> Self {
        ApiError::Business {
            message: message.into(),
        }
    }

    /// Transport failure. Blank bodies are dropped.
    pub fn transport(status: u16, body: Option<String>) -> Self {
        ApiError::Transport {
            status,
            body: body.filter(|b| !b.trim().is_empty()),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Business { .. } => ErrorCategory::Business,
            ApiError::Transport { .. } => ErrorCategory::Transport,
            ApiError::Network(_) => ErrorCategory::Network,
            ApiError::Unknown(_) => ErrorCategory::Unknown,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Business { .. } => "E_API_BUSINESS",
            ApiError::Transport { status, .. } if *status == 401 => "E_API_UNAUTHORIZED",
            ApiError::Transport { .. } => "E_API_HTTP",
            ApiError::Network(_) => "E_API_NETWORK",
            ApiError::Unknown(_) => "E_API_UNKNOWN",
        }
    }

    /// The HTTP status, for transport errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the bearer token.
    pub fn requires_reauth(&self) -> bool {
        self.status() == Some(401)
    }

    /// The message shown to the operator.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        if err.is_connectivity() {
            ApiError::Network(err.message().to_string())
        } else {
            ApiError::Unknown(err.to_string())
        }
    }
}

impl From<CredentialsError> for ApiError {
    fn from(err: CredentialsError) -> Self {
        ApiError::Unknown(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Unknown(format!("Invalid response format: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_message_is_verbatim() {
        let err = ApiError::business("Invalid email or password");
        assert_eq!(err.to_string(), "Invalid email or password");
        assert_eq!(err.category(), ErrorCategory::Business);
    }

    #[test]
    fn test_transport_message_with_and_without_body() {
        assert_eq!(
            ApiError::transport(404, None).to_string(),
            "Failed with code: 404"
        );
        assert_eq!(
            ApiError::transport(400, Some(r#"{"message":"bad"}"#.to_string())).to_string(),
            r#"Failed with code: 400: {"message":"bad"}"#
        );
        assert_eq!(
            ApiError::transport(500, Some("  ".to_string())),
            ApiError::Transport {
                status: 500,
                body: None
            }
        );
    }

    #[test]
    fn test_http_error_classification() {
        let network: ApiError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert_eq!(network, ApiError::Network("refused".to_string()));
        assert_eq!(network.to_string(), "Network error: refused");

        let timeout: ApiError = HttpError::Timeout("30s".to_string()).into();
        assert_eq!(timeout.category(), ErrorCategory::Network);

        let unknown: ApiError = HttpError::InvalidUrl("nope".to_string()).into();
        assert_eq!(unknown.category(), ErrorCategory::Unknown);
        assert_eq!(unknown.to_string(), "Unknown error: Invalid URL: nope");
    }

    #[test]
    fn test_credentials_error_is_unknown() {
        let err: ApiError = CredentialsError::SaveFailed("disk full".to_string()).into();
        assert_eq!(err.category(), ErrorCategory::Unknown);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_reauth_and_codes() {
        let unauthorized = ApiError::transport(401, None);
        assert!(unauthorized.requires_reauth());
        assert_eq!(unauthorized.error_code(), "E_API_UNAUTHORIZED");
        assert!(!ApiError::transport(403, None).requires_reauth());
        assert_eq!(ApiError::Network("x".into()).error_code(), "E_API_NETWORK");
    }
}
