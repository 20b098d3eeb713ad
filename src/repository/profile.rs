//! Profile of the signed-in user.

use crate::api::ApiClient;
use crate::models::{ProfileUpdate, User};
use crate::resource::{pipeline, ResourceStream};

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    api: ApiClient,
}

impl ProfileRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn get_profile(&self) -> ResourceStream<User> {
        let api = self.api.clone();
        pipeline(async move { api.get_profile().await })
    }

    /// Apply a partial update and return the updated profile.
    pub fn update_profile(&self, update: ProfileUpdate) -> ResourceStream<User> {
        let api = self.api.clone();
        pipeline(async move { api.update_profile(&update).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryCredentials, MockHttpClient, MockResponse};
    use futures::StreamExt;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_profile_round_trip_through_pipeline() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(
            200,
            json!({
                "status": "success",
                "data": {"id": 3, "email": "ada@example.com", "full_name": "Ada",
                         "settings": {"notifications": true}}
            }),
        ));
        let api = ApiClient::new(
            Arc::new(http.clone()),
            Arc::new(InMemoryCredentials::with_token("t")),
            "http://api.test/api/",
        );
        let repo = ProfileRepository::new(api);

        let items: Vec<_> = repo.get_profile().collect().await;
        let user = items[1].data().unwrap();
        assert_eq!(user.full_name, "Ada");
        assert_eq!(
            user.settings.as_ref().and_then(|s| s.get("notifications")),
            Some(&json!(true))
        );
    }

    #[tokio::test]
    async fn test_update_failure_message() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(
            200,
            json!({"status": "error", "message": "Current password is incorrect"}),
        ));
        let api = ApiClient::new(
            Arc::new(http.clone()),
            Arc::new(InMemoryCredentials::new()),
            "http://api.test/api/",
        );

        let items: Vec<_> = ProfileRepository::new(api)
            .update_profile(ProfileUpdate::new().with_password_change("old", "new"))
            .collect()
            .await;
        assert_eq!(
            items[1].message().as_deref(),
            Some("Current password is incorrect")
        );
    }
}
