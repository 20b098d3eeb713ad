//! Assignment state for the front end.

use bytes::Bytes;
use tokio::task::JoinHandle;

use super::slot::Slot;
use crate::models::{
    GrammarReport, Homework, HomeworkFilter, HomeworkUpdate, PlagiarismReport, UploadRequest,
};
use crate::repository::{AnalysisRepository, AuthRepository, HomeworkRepository};
use crate::traits::CredentialsError;

/// One slot per assignment operation. Slots are independent; nothing is
/// derived across them.
#[derive(Clone)]
pub struct HomeworkViewModel {
    homework: HomeworkRepository,
    analysis: AnalysisRepository,
    auth: AuthRepository,
    pub list: Slot<Vec<Homework>>,
    pub details: Slot<Homework>,
    pub upload: Slot<Homework>,
    pub update: Slot<Homework>,
    pub submit: Slot<Homework>,
    pub download: Slot<Bytes>,
    pub delete: Slot<bool>,
    pub plagiarism: Slot<PlagiarismReport>,
    pub feedback: Slot<GrammarReport>,
}

impl HomeworkViewModel {
    pub fn new(
        homework: HomeworkRepository,
        analysis: AnalysisRepository,
        auth: AuthRepository,
    ) -> Self {
        Self {
            homework,
            analysis,
            auth,
            list: Slot::new(),
            details: Slot::new(),
            upload: Slot::new(),
            update: Slot::new(),
            submit: Slot::new(),
            download: Slot::new(),
            delete: Slot::new(),
            plagiarism: Slot::new(),
            feedback: Slot::new(),
        }
    }

    pub fn load_homework(&self, filter: HomeworkFilter) -> JoinHandle<()> {
        self.list.spawn(self.homework.list(filter))
    }

    pub fn load_details(&self, id: impl Into<String>) -> JoinHandle<()> {
        self.details.spawn(self.homework.get(id))
    }

    pub fn upload_homework(&self, request: UploadRequest) -> JoinHandle<()> {
        self.upload.spawn(self.homework.upload(request))
    }

    pub fn update_homework(&self, id: impl Into<String>, update: HomeworkUpdate) -> JoinHandle<()> {
        self.update.spawn(self.homework.update(id, update))
    }

    pub fn submit_homework(&self, id: impl Into<String>) -> JoinHandle<()> {
        self.submit.spawn(self.homework.submit(id))
    }

    pub fn download_file(&self, id: impl Into<String>) -> JoinHandle<()> {
        self.download.spawn(self.homework.download(id))
    }

    pub fn delete_homework(&self, id: impl Into<String>) -> JoinHandle<()> {
        self.delete.spawn(self.homework.delete(id))
    }

    pub fn check_plagiarism(&self, id: impl Into<String>) -> JoinHandle<()> {
        self.plagiarism.spawn(self.analysis.check_plagiarism(id))
    }

    pub fn load_plagiarism_report(&self, id: impl Into<String>) -> JoinHandle<()> {
        self.plagiarism.spawn(self.analysis.plagiarism_report(id))
    }

    pub fn analyze(&self, id: impl Into<String>) -> JoinHandle<()> {
        self.feedback.spawn(self.analysis.analyze(id))
    }

    pub fn load_feedback(&self, id: impl Into<String>) -> JoinHandle<()> {
        self.feedback.spawn(self.analysis.feedback(id))
    }

    pub fn logout(&self) -> JoinHandle<Result<(), CredentialsError>> {
        let auth = self.auth.clone();
        tokio::spawn(async move { auth.logout().await })
    }
}
