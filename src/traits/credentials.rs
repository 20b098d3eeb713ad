//! Credentials provider trait abstraction.
//!
//! Provides a trait-based abstraction for credentials storage and retrieval,
//! enabling dependency injection and mocking in tests.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::auth::Credentials;

/// Credentials operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// Failed to load credentials
    LoadFailed(String),
    /// Failed to save credentials
    SaveFailed(String),
    /// Failed to clear credentials
    ClearFailed(String),
    /// IO error
    Io(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::LoadFailed(msg) => write!(f, "Failed to load credentials: {}", msg),
            CredentialsError::SaveFailed(msg) => write!(f, "Failed to save credentials: {}", msg),
            CredentialsError::ClearFailed(msg) => {
                write!(f, "Failed to clear credentials: {}", msg)
            }
            CredentialsError::Io(msg) => write!(f, "IO error: {}", msg),
            CredentialsError::Other(msg) => write!(f, "Credentials error: {}", msg),
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Trait for credentials storage and retrieval.
///
/// The store holds a single value with last-write-wins semantics. Besides
/// the async load/save/clear operations it exposes a subscribable view so
/// callers can react to login and logout without polling.
///
/// # Example
///
/// ```ignore
/// use hwassist::traits::CredentialsProvider;
/// use hwassist::auth::Credentials;
///
/// async fn remember<P: CredentialsProvider>(provider: &P, token: &str) -> Result<(), CredentialsError> {
///     provider.save(&Credentials::with_token(token)).await
/// }
/// ```
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Load credentials from storage.
    ///
    /// # Returns
    /// - `Ok(Some(credentials))` if credentials exist and were loaded successfully
    /// - `Ok(None)` if no credentials are stored
    /// - `Err(error)` if loading failed
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError>;

    /// Save credentials to storage, replacing whatever was stored.
    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError>;

    /// Clear all stored credentials.
    async fn clear(&self) -> Result<(), CredentialsError>;

    /// Subscribe to the stored value.
    ///
    /// The receiver starts at the current value and observes every
    /// subsequent successful save or clear.
    fn watch(&self) -> watch::Receiver<Option<Credentials>>;
}
