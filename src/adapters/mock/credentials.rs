//! In-memory credentials provider for testing.
//!
//! Provides a credentials provider that stores credentials in memory,
//! suitable for testing without file system access.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::auth::credentials::Credentials;
use crate::traits::{CredentialsError, CredentialsProvider};

/// In-memory credentials provider for testing.
///
/// Clones share the same storage, so a test can keep a handle while the
/// code under test owns another.
///
/// # Example
///
/// ```ignore
/// use hwassist::adapters::mock::InMemoryCredentials;
/// use hwassist::traits::CredentialsProvider;
/// use hwassist::auth::Credentials;
///
/// let provider = InMemoryCredentials::new();
/// assert!(provider.load().await?.is_none());
///
/// provider.save(&Credentials::with_token("test-token")).await?;
/// assert_eq!(provider.get_credentials().unwrap().token(), Some("test-token"));
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryCredentials {
    /// Stored credentials, doubling as the subscription channel
    credentials: Arc<watch::Sender<Option<Credentials>>>,
    /// Whether save should fail
    save_should_fail: Arc<Mutex<bool>>,
    /// Whether load should fail
    load_should_fail: Arc<Mutex<bool>>,
    /// Whether clear should fail
    clear_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryCredentials {
    /// Create a new, empty in-memory credentials provider.
    pub fn new() -> Self {
        Self::from_initial(None)
    }

    /// Create a provider with initial credentials.
    pub fn with_credentials(creds: Credentials) -> Self {
        Self::from_initial(Some(creds))
    }

    /// Create a provider holding just a token.
    pub fn with_token(token: &str) -> Self {
        Self::with_credentials(Credentials::with_token(token))
    }

    fn from_initial(initial: Option<Credentials>) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            credentials: Arc::new(tx),
            save_should_fail: Arc::new(Mutex::new(false)),
            load_should_fail: Arc::new(Mutex::new(false)),
            clear_should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Get the current credentials synchronously.
    pub fn get_credentials(&self) -> Option<Credentials> {
        self.credentials.borrow().clone()
    }

    /// Set credentials synchronously.
    pub fn set_credentials(&self, creds: Option<Credentials>) {
        self.credentials.send_replace(creds);
    }
}

impl Default for InMemoryCredentials {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for InMemoryCredentials {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(CredentialsError::LoadFailed("Mock load failure".to_string()));
        }

        Ok(self.get_credentials())
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(CredentialsError::SaveFailed("Mock save failure".to_string()));
        }

        self.set_credentials(Some(creds.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(CredentialsError::ClearFailed("Mock clear failure".to_string()));
        }

        self.set_credentials(None);
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<Option<Credentials>> {
        self.credentials.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_empty() {
        let provider = InMemoryCredentials::new();
        assert!(provider.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_clear() {
        let provider = InMemoryCredentials::new();

        provider.save(&Credentials::with_token("test-token")).await.unwrap();
        let loaded = provider.load().await.unwrap().unwrap();
        assert_eq!(loaded.token(), Some("test-token"));

        provider.clear().await.unwrap();
        assert!(provider.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failures() {
        let provider = InMemoryCredentials::new();
        provider.set_load_should_fail(true);
        provider.set_save_should_fail(true);
        provider.set_clear_should_fail(true);

        assert!(matches!(
            provider.load().await,
            Err(CredentialsError::LoadFailed(_))
        ));
        assert!(matches!(
            provider.save(&Credentials::default()).await,
            Err(CredentialsError::SaveFailed(_))
        ));
        assert!(matches!(
            provider.clear().await,
            Err(CredentialsError::ClearFailed(_))
        ));
    }

    #[test]
    fn test_clone_shares_state() {
        let provider = InMemoryCredentials::with_token("shared-token");
        let cloned = provider.clone();

        assert_eq!(
            cloned.get_credentials().unwrap().token(),
            Some("shared-token")
        );

        provider.set_credentials(None);
        assert!(cloned.get_credentials().is_none());
    }

    #[tokio::test]
    async fn test_watch_sees_last_write() {
        let provider = InMemoryCredentials::new();
        let rx = provider.watch();

        provider.save(&Credentials::with_token("token-1")).await.unwrap();
        provider.save(&Credentials::with_token("token-2")).await.unwrap();

        assert_eq!(rx.borrow().as_ref().unwrap().token(), Some("token-2"));
    }
}
