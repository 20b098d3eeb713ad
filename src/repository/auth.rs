//! Sign-in, registration and session state.

use futures::stream::{self, Stream};
use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::Credentials;
use crate::error::ApiResult;
use crate::models::{AuthData, LoginRequest, RegisterRequest};
use crate::resource::{pipeline, ResourceStream};
use crate::traits::{CredentialsError, CredentialsProvider};

/// Authentication operations over the API and the credential store.
#[derive(Clone)]
pub struct AuthRepository {
    api: ApiClient,
    credentials: Arc<dyn CredentialsProvider>,
}

impl AuthRepository {
    /// Create a repository sharing the client's credential store.
    pub fn new(api: ApiClient) -> Self {
        let credentials = api.credentials().clone();
        Self { api, credentials }
    }

    /// Sign in. The returned token is stored before `Success` is yielded.
    pub fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> ResourceStream<AuthData> {
        let api = self.api.clone();
        let credentials = self.credentials.clone();
        let request = LoginRequest::new(email, password);
        pipeline(async move {
            let data = api.login(&request).await?;
            store_session(credentials.as_ref(), &data).await?;
            tracing::info!("Logged in as {}", data.user.email);
            Ok(data)
        })
    }

    /// Create an account and sign in with it.
    pub fn register(
        &self,
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> ResourceStream<AuthData> {
        let api = self.api.clone();
        let credentials = self.credentials.clone();
        let request = RegisterRequest::new(full_name, email, password);
        pipeline(async move {
            let data = api.register(&request).await?;
            store_session(credentials.as_ref(), &data).await?;
            tracing::info!("Registered {}", data.user.email);
            Ok(data)
        })
    }

    /// Forget the stored session. No request is sent to the server.
    pub async fn logout(&self) -> Result<(), CredentialsError> {
        self.credentials.clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Whether a token is stored. A failed read counts as logged out.
    pub async fn is_logged_in(&self) -> bool {
        match self.credentials.load().await {
            Ok(creds) => creds.as_ref().is_some_and(Credentials::has_token),
            Err(e) => {
                tracing::warn!("Could not read credentials: {}", e);
                false
            }
        }
    }

    /// Whether the store's last known credentials hold a token. Does not
    /// touch the backing store.
    pub fn logged_in_now(&self) -> bool {
        self.credentials
            .watch()
            .borrow()
            .as_ref()
            .is_some_and(Credentials::has_token)
    }

    /// The logged-in flag: the current value first, then every change.
    pub fn watch_logged_in(&self) -> impl Stream<Item = bool> + Send + 'static {
        let rx = self.credentials.watch();
        stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first {
                rx.changed().await.ok()?;
            }
            let logged_in = rx.borrow_and_update().as_ref().is_some_and(Credentials::has_token);
            Some((logged_in, (rx, false)))
        })
    }

    /// The stored first-login flag; `true` when nothing is stored.
    pub async fn is_first_login(&self) -> Result<bool, CredentialsError> {
        Ok(self
            .credentials
            .load()
            .await?
            .map_or(true, |creds| creds.is_first_login))
    }

    pub async fn set_first_login(&self, first_login: bool) -> Result<(), CredentialsError> {
        let mut creds = self.credentials.load().await?.unwrap_or_default();
        creds.is_first_login = first_login;
        self.credentials.save(&creds).await
    }
}

/// Persist the token from a successful sign-in, keeping the stored
/// first-login flag unless the server sent one.
async fn store_session(credentials: &dyn CredentialsProvider, data: &AuthData) -> ApiResult<()> {
    let mut creds = match credentials.load().await {
        Ok(existing) => existing.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Could not read credentials before saving: {}", e);
            Credentials::default()
        }
    };
    creds.access_token = Some(data.access_token.clone());
    if let Some(first_login) = data.is_first_login {
        creds.is_first_login = first_login;
    }
    credentials.save(&creds).await?;
    tracing::debug!("Stored token {}", creds.token_preview());
    Ok(())
}
