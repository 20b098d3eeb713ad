//! Assignment operations.

use bytes::Bytes;

use crate::api::ApiClient;
use crate::models::{Homework, HomeworkFilter, HomeworkUpdate, UploadRequest};
use crate::resource::{pipeline, ResourceStream};

/// Assignment listing, upload, editing and download.
#[derive(Debug, Clone)]
pub struct HomeworkRepository {
    api: ApiClient,
}

impl HomeworkRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Assignments matching `filter`, in the order the server returns them.
    pub fn list(&self, filter: HomeworkFilter) -> ResourceStream<Vec<Homework>> {
        let api = self.api.clone();
        pipeline(async move { api.list_homework(&filter).await })
    }

    pub fn get(&self, id: impl Into<String>) -> ResourceStream<Homework> {
        let api = self.api.clone();
        let id = id.into();
        pipeline(async move { api.get_homework(&id).await })
    }

    pub fn upload(&self, request: UploadRequest) -> ResourceStream<Homework> {
        let api = self.api.clone();
        pipeline(async move {
            tracing::debug!("Uploading {} ({} bytes)", request.file_name, request.content.len());
            api.upload_homework(request).await
        })
    }

    pub fn update(&self, id: impl Into<String>, update: HomeworkUpdate) -> ResourceStream<Homework> {
        let api = self.api.clone();
        let id = id.into();
        pipeline(async move { api.update_homework(&id, &update).await })
    }

    /// Mark an assignment as submitted.
    pub fn submit(&self, id: impl Into<String>) -> ResourceStream<Homework> {
        let api = self.api.clone();
        let id = id.into();
        pipeline(async move { api.submit_homework(&id).await })
    }

    /// Delete an assignment; `Success(true)` once the server confirms.
    pub fn delete(&self, id: impl Into<String>) -> ResourceStream<bool> {
        let api = self.api.clone();
        let id = id.into();
        pipeline(async move {
            api.delete_homework(&id).await?;
            Ok(true)
        })
    }

    /// The attached file's raw content.
    pub fn download(&self, id: impl Into<String>) -> ResourceStream<Bytes> {
        let api = self.api.clone();
        let id = id.into();
        pipeline(async move { api.download_file(&id).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryCredentials, MockHttpClient, MockResponse};
    use crate::resource::Resource;
    use futures::StreamExt;
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://api.test/api/";

    fn repo(http: &MockHttpClient) -> HomeworkRepository {
        let api = ApiClient::new(
            Arc::new(http.clone()),
            Arc::new(InMemoryCredentials::with_token("abc123")),
            BASE,
        );
        HomeworkRepository::new(api)
    }

    #[tokio::test]
    async fn test_delete_yields_true() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(
            200,
            json!({"success": true, "message": "Assignment deleted"}),
        ));

        let items: Vec<_> = repo(&http).delete("3").collect().await;
        assert_eq!(items, vec![Resource::Loading, Resource::Success(true)]);
    }

    #[tokio::test]
    async fn test_get_missing_payload_uses_fallback() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(200, json!({"success": false})));

        let items: Vec<_> = repo(&http).get("3").collect().await;
        assert_eq!(
            items[1].message().as_deref(),
            Some("Failed to load homework details")
        );
    }

    #[tokio::test]
    async fn test_download_error_status() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(
            404,
            json!({"status": "error", "message": "File not found"}),
        ));

        let items: Vec<_> = repo(&http).download("3").collect().await;
        let err = items[1].error().unwrap();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("File not found"));
    }
}
