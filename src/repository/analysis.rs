//! Plagiarism checks and grammar feedback for an assignment.

use crate::api::ApiClient;
use crate::models::{GrammarReport, PlagiarismReport};
use crate::resource::{pipeline, ResourceStream};

#[derive(Debug, Clone)]
pub struct AnalysisRepository {
    api: ApiClient,
}

impl AnalysisRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Start a plagiarism check and return the fresh report.
    pub fn check_plagiarism(&self, id: impl Into<String>) -> ResourceStream<PlagiarismReport> {
        let api = self.api.clone();
        let id = id.into();
        pipeline(async move { api.check_plagiarism(&id).await })
    }

    /// The most recent plagiarism report.
    pub fn plagiarism_report(&self, id: impl Into<String>) -> ResourceStream<PlagiarismReport> {
        let api = self.api.clone();
        let id = id.into();
        pipeline(async move { api.plagiarism_report(&id).await })
    }

    /// Run grammar analysis and return the fresh report.
    pub fn analyze(&self, id: impl Into<String>) -> ResourceStream<GrammarReport> {
        let api = self.api.clone();
        let id = id.into();
        pipeline(async move { api.analyze(&id).await })
    }

    /// The most recent grammar report.
    pub fn feedback(&self, id: impl Into<String>) -> ResourceStream<GrammarReport> {
        let api = self.api.clone();
        let id = id.into();
        pipeline(async move { api.feedback(&id).await })
    }
}
