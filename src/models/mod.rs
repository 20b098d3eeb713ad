//! Data exchanged with the homework API.

mod auth;
mod homework;
mod report;
mod user;
pub mod wire;

pub use auth::{AuthData, LoginRequest, RegisterRequest};
pub use homework::{
    DeadlineFilter, Homework, HomeworkFilter, HomeworkStatus, HomeworkUpdate, UploadRequest,
};
pub use report::{
    FlaggedSection, GrammarIssue, GrammarIssueType, GrammarReport, ImprovementSuggestion,
    PlagiarismReport, RewriteSuggestion,
};
pub use user::{ProfileUpdate, Settings, User};
