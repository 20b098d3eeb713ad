//! File-based credentials provider adapter.
//!
//! This module provides a credentials provider implementation that uses
//! [`CredentialsManager`] for file-based storage.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::{watch, Mutex};

use crate::auth::credentials::{Credentials, CredentialsManager};
use crate::traits::{CredentialsError, CredentialsProvider};

/// File-based credentials provider.
///
/// File access runs on the blocking pool; writes are serialized so the file
/// and the subscription channel never disagree about the latest value.
///
/// Credentials are stored in `~/.hwassist/.credentials.json` unless an
/// explicit path is given.
///
/// # Example
///
/// ```ignore
/// use hwassist::adapters::FileCredentialsProvider;
/// use hwassist::traits::CredentialsProvider;
///
/// let provider = FileCredentialsProvider::new()?;
/// if let Some(creds) = provider.load().await? {
///     println!("token: {}", creds.token_preview());
/// }
/// ```
#[derive(Debug)]
pub struct FileCredentialsProvider {
    manager: CredentialsManager,
    current: watch::Sender<Option<Credentials>>,
    write_lock: Mutex<()>,
}

impl FileCredentialsProvider {
    /// Create a provider for the default location.
    ///
    /// # Returns
    /// The provider, or an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CredentialsError> {
        CredentialsManager::new()
            .map(Self::from_manager)
            .ok_or_else(|| {
                CredentialsError::Other("Failed to determine home directory".to_string())
            })
    }

    /// Create a provider for an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::from_manager(CredentialsManager::with_path(path))
    }

    fn from_manager(manager: CredentialsManager) -> Self {
        let initial = manager.load();
        let (current, _) = watch::channel(initial);
        Self {
            manager,
            current,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        self.manager.credentials_path()
    }
}

#[async_trait]
impl CredentialsProvider for FileCredentialsProvider {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || manager.load())
            .await
            .map_err(|e| CredentialsError::LoadFailed(e.to_string()))
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        let _guard = self.write_lock.lock().await;
        let manager = self.manager.clone();
        let to_write = creds.clone();
        tokio::task::spawn_blocking(move || manager.save(&to_write))
            .await
            .map_err(|e| CredentialsError::Io(e.to_string()))?
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;

        self.current.send_replace(Some(creds.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        let _guard = self.write_lock.lock().await;
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || manager.clear())
            .await
            .map_err(|e| CredentialsError::Io(e.to_string()))?
            .map_err(|e| CredentialsError::ClearFailed(e.to_string()))?;

        self.current.send_replace(None);
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<Option<Credentials>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn provider_in(temp_dir: &TempDir) -> FileCredentialsProvider {
        FileCredentialsProvider::with_path(temp_dir.path().join("creds.json"))
    }

    #[tokio::test]
    async fn test_load_empty() {
        let temp_dir = TempDir::new().unwrap();
        let provider = provider_in(&temp_dir);
        assert!(provider.load().await.unwrap().is_none());
        assert!(provider.watch().borrow().is_none());
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let provider = provider_in(&temp_dir);

        provider.save(&Credentials::with_token("tok1")).await.unwrap();
        let loaded = provider.load().await.unwrap().unwrap();
        assert_eq!(loaded.token(), Some("tok1"));

        provider.clear().await.unwrap();
        assert!(provider.load().await.unwrap().is_none());
        assert!(!provider.credentials_path().exists());
    }

    #[tokio::test]
    async fn test_survives_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        provider_in(&temp_dir)
            .save(&Credentials::with_token("persisted"))
            .await
            .unwrap();

        let reopened = provider_in(&temp_dir);
        let initial = reopened.watch().borrow().clone();
        assert_eq!(initial.unwrap().token(), Some("persisted"));
    }

    #[tokio::test]
    async fn test_watch_observes_changes() {
        let temp_dir = TempDir::new().unwrap();
        let provider = provider_in(&temp_dir);
        let mut rx = provider.watch();

        provider.save(&Credentials::with_token("tok")).await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().as_ref().unwrap().has_token());

        provider.clear().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }

    #[tokio::test]
    async fn test_save_failure_leaves_watch_untouched() {
        let temp_dir = TempDir::new().unwrap();
        // a directory where the file should be makes File::create fail
        let path = temp_dir.path().join("creds.json");
        std::fs::create_dir_all(&path).unwrap();
        let provider = FileCredentialsProvider::with_path(&path);

        let result = provider.save(&Credentials::with_token("tok")).await;
        assert!(matches!(result, Err(CredentialsError::SaveFailed(_))));
        assert!(provider.watch().borrow().is_none());
    }
}
