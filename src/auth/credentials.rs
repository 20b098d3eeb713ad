//! Credentials storage and management.
//!
//! This module provides functionality for storing and loading the bearer
//! token and first-login flag from `~/.hwassist/.credentials.json`.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".hwassist";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

fn default_first_login() -> bool {
    true
}

/// Locally persisted session state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    /// Opaque bearer token for API authentication.
    pub access_token: Option<String>,
    /// Whether the user has not completed a first session yet.
    #[serde(default = "default_first_login")]
    pub is_first_login: bool,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            access_token: None,
            is_first_login: default_first_login(),
        }
    }
}

impl Credentials {
    /// Create new empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credentials holding only a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// The token, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Check if the credentials carry a usable token.
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// A short prefix of the token, safe to put in logs.
    pub fn token_preview(&self) -> String {
        match self.token() {
            Some(token) if token.len() > 10 => {
                let end = token
                    .char_indices()
                    .nth(10)
                    .map(|(i, _)| i)
                    .unwrap_or(token.len());
                format!("{}...", &token[..end])
            }
            Some(_) => "<short token>".to_string(),
            None => "<none>".to_string(),
        }
    }
}

/// Manages credential storage and retrieval on disk.
#[derive(Debug, Clone)]
pub struct CredentialsManager {
    /// Path to the credentials file.
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a manager for the default location under the home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        let credentials_path = home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE);
        Some(Self { credentials_path })
    }

    /// Create a manager for an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: path.into(),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// Returns `None` if the file doesn't exist or can't be parsed.
    pub fn load(&self) -> Option<Credentials> {
        let file = File::open(&self.credentials_path).ok()?;
        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(creds) => Some(creds),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable credentials file {:?}: {}",
                    self.credentials_path,
                    e
                );
                None
            }
        }
    }

    /// Save credentials to the credentials file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, credentials: &Credentials) -> io::Result<()> {
        if let Some(parent) = self.credentials_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.credentials_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, credentials)?;
        writer.flush()
    }

    /// Remove the credentials file. Succeeds if it did not exist.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.credentials_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
