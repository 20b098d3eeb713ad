//! Repositories: one type per capability group, each operation exposed as
//! a [`ResourceStream`](crate::resource::ResourceStream).

mod analysis;
mod auth;
mod homework;
mod profile;

pub use analysis::AnalysisRepository;
pub use auth::AuthRepository;
pub use homework::HomeworkRepository;
pub use profile::ProfileRepository;
