//! Sign-in state for the front end.

use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::slot::Slot;
use crate::models::AuthData;
use crate::repository::AuthRepository;
use crate::traits::CredentialsError;

/// Holds the `login` and `register` slots and a logged-in flag.
///
/// The flag starts from the credentials the store already knows about, so
/// a saved session reads as logged in before `check_logged_in` runs.
#[derive(Clone)]
pub struct AuthViewModel {
    repository: AuthRepository,
    pub login: Slot<AuthData>,
    pub register: Slot<AuthData>,
    logged_in: Arc<watch::Sender<bool>>,
}

impl AuthViewModel {
    pub fn new(repository: AuthRepository) -> Self {
        let (logged_in, _) = watch::channel(repository.logged_in_now());
        Self {
            repository,
            login: Slot::new(),
            register: Slot::new(),
            logged_in: Arc::new(logged_in),
        }
    }

    /// Current logged-in flag.
    pub fn is_logged_in(&self) -> bool {
        *self.logged_in.borrow()
    }

    /// Subscribe to the logged-in flag.
    pub fn watch_logged_in(&self) -> watch::Receiver<bool> {
        self.logged_in.subscribe()
    }

    /// Re-read the flag from the credential store.
    pub fn check_logged_in(&self) -> JoinHandle<bool> {
        let repository = self.repository.clone();
        let logged_in = self.logged_in.clone();
        tokio::spawn(async move {
            let value = repository.is_logged_in().await;
            logged_in.send_replace(value);
            value
        })
    }

    pub fn login(&self, email: impl Into<String>, password: impl Into<String>) -> JoinHandle<()> {
        let logged_in = self.logged_in.clone();
        let stream = self
            .repository
            .login(email, password)
            .inspect(move |item| {
                if item.is_success() {
                    logged_in.send_replace(true);
                }
            });
        self.login.spawn(Box::pin(stream))
    }

    pub fn register(
        &self,
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> JoinHandle<()> {
        let logged_in = self.logged_in.clone();
        let stream = self
            .repository
            .register(full_name, email, password)
            .inspect(move |item| {
                if item.is_success() {
                    logged_in.send_replace(true);
                }
            });
        self.register.spawn(Box::pin(stream))
    }

    /// Clear the stored session. The flag drops to `false` once the store
    /// has been cleared.
    pub fn logout(&self) -> JoinHandle<Result<(), CredentialsError>> {
        let repository = self.repository.clone();
        let logged_in = self.logged_in.clone();
        tokio::spawn(async move {
            repository.logout().await?;
            logged_in.send_replace(false);
            Ok(())
        })
    }
}
