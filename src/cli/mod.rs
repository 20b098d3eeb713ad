//! CLI front end for hwassist.
//!
//! Each command drives one view-model operation, waits for its task and
//! prints the slot's final state. A failed operation is reported as a
//! single `error: ...` line on stderr and a non-zero exit code.
//!
//! # Usage
//!
//! ```ignore
//! use hwassist::cli::{parse_args, run, Services};
//! use hwassist::config::ClientConfig;
//!
//! let command = parse_args(std::env::args())?;
//! let services = Services::from_config(&ClientConfig::from_env())?;
//! let code = run(command, &services).await?;
//! ```

pub mod args;
pub mod render;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, USAGE};
pub use version::VERSION;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::adapters::FileCredentialsProvider;
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::UploadRequest;
use crate::repository::{AnalysisRepository, AuthRepository, HomeworkRepository, ProfileRepository};
use crate::view_model::{AuthViewModel, HomeworkViewModel, ProfileViewModel, Slot, SlotState};

/// View models and repositories wired over one [`ApiClient`].
#[derive(Clone)]
pub struct Services {
    pub auth: AuthViewModel,
    pub homework: HomeworkViewModel,
    pub profile: ProfileViewModel,
    auth_repository: AuthRepository,
    credentials_path: Option<PathBuf>,
}

impl Services {
    /// Wire everything over an existing client.
    pub fn new(api: ApiClient) -> Self {
        let auth_repository = AuthRepository::new(api.clone());
        Self {
            auth: AuthViewModel::new(auth_repository.clone()),
            homework: HomeworkViewModel::new(
                HomeworkRepository::new(api.clone()),
                AnalysisRepository::new(api.clone()),
                auth_repository.clone(),
            ),
            profile: ProfileViewModel::new(ProfileRepository::new(api)),
            auth_repository,
            credentials_path: None,
        }
    }

    /// Build the reqwest client and file-backed credential store from
    /// configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let provider = match &config.credentials_path {
            Some(path) => FileCredentialsProvider::with_path(path.clone()),
            None => FileCredentialsProvider::new().wrap_err("Cannot locate the credentials file")?,
        };
        let credentials_path = provider.credentials_path().to_path_buf();
        let api = ApiClient::from_config(config, Arc::new(provider))
            .wrap_err("Failed to build the HTTP client")?;
        tracing::debug!("Using API at {}", api.base_url());

        let mut services = Self::new(api);
        services.credentials_path = Some(credentials_path);
        Ok(services)
    }
}

/// Run one command to completion.
pub async fn run(command: CliCommand, services: &Services) -> Result<ExitCode> {
    Ok(if execute(command, services).await? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run a command; `Ok(false)` when the API operation failed and was
/// reported on stderr.
async fn execute(command: CliCommand, services: &Services) -> Result<bool> {
    let homework = &services.homework;

    let succeeded = match command {
        CliCommand::Version => {
            println!("{}", version::version_line());
            true
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            true
        }
        CliCommand::Login { email, password } => {
            let handle = services.auth.login(email, password);
            report(settle(&services.auth.login, handle).await?, |data| {
                welcome(&data.user.full_name, &data.user.email, data.is_first_login)
            })
        }
        CliCommand::Register {
            full_name,
            email,
            password,
        } => {
            let handle = services.auth.register(full_name, email, password);
            report(settle(&services.auth.register, handle).await?, |data| {
                welcome(&data.user.full_name, &data.user.email, data.is_first_login)
            })
        }
        CliCommand::Logout => {
            services
                .auth
                .logout()
                .await
                .wrap_err("Logout task failed")?
                .wrap_err("Could not clear stored credentials")?;
            println!("Logged out.");
            true
        }
        CliCommand::Status => {
            let logged_in = services
                .auth
                .check_logged_in()
                .await
                .wrap_err("Status task failed")?;
            println!("logged in:   {}", if logged_in { "yes" } else { "no" });
            match services.auth_repository.is_first_login().await {
                Ok(first) => println!("first login: {}", if first { "yes" } else { "no" }),
                Err(e) => tracing::warn!("Could not read first-login flag: {}", e),
            }
            if let Some(path) = &services.credentials_path {
                println!("credentials: {}", path.display());
            }
            true
        }
        CliCommand::List(filter) => {
            let handle = homework.load_homework(filter);
            report(settle(&homework.list, handle).await?, |items| {
                render::homework_list(&items)
            })
        }
        CliCommand::Show { id } => {
            let handle = homework.load_details(id);
            report(settle(&homework.details, handle).await?, |hw| {
                render::homework_details(&hw)
            })
        }
        CliCommand::Upload {
            title,
            file,
            description,
            deadline,
        } => {
            let content = tokio::fs::read(&file)
                .await
                .wrap_err_with(|| format!("Cannot read {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload")
                .to_string();
            let request = UploadRequest::new(title, description, deadline, file_name, content)
                .with_mime(guess_mime(&file));
            let handle = homework.upload_homework(request);
            report(settle(&homework.upload, handle).await?, |hw| {
                format!("Uploaded homework #{}: {}", hw.id, hw.title)
            })
        }
        CliCommand::Update { id, update } => {
            if update.is_empty() {
                return Err(eyre!("Nothing to update; pass --title, --description or --deadline"));
            }
            let handle = homework.update_homework(id, update);
            report(settle(&homework.update, handle).await?, |hw| {
                render::homework_details(&hw)
            })
        }
        CliCommand::Submit { id } => {
            let handle = homework.submit_homework(id);
            report(settle(&homework.submit, handle).await?, |hw| {
                format!("Submitted homework #{} ({})", hw.id, hw.status)
            })
        }
        CliCommand::Delete { id } => {
            let handle = homework.delete_homework(id.clone());
            report(settle(&homework.delete, handle).await?, |_| {
                format!("Deleted homework #{}", id)
            })
        }
        CliCommand::Download { id, out } => {
            let handle = homework.download_file(id);
            match settle(&homework.download, handle).await? {
                Ok(bytes) => {
                    tokio::fs::write(&out, &bytes)
                        .await
                        .wrap_err_with(|| format!("Cannot write {}", out.display()))?;
                    println!("Saved {} bytes to {}", bytes.len(), out.display());
                    true
                }
                Err(err) => fail(&err),
            }
        }
        CliCommand::Profile => {
            let handle = services.profile.load_profile();
            report(settle(&services.profile.profile, handle).await?, |user| {
                render::user(&user)
            })
        }
        CliCommand::ProfileUpdate(update) => {
            if update.is_empty() {
                return Err(eyre!("Nothing to update"));
            }
            let handle = services.profile.update_profile(update);
            report(
                settle(&services.profile.profile_update, handle).await?,
                |user| render::user(&user),
            )
        }
        CliCommand::CheckPlagiarism { id } => {
            let handle = homework.check_plagiarism(id);
            report(settle(&homework.plagiarism, handle).await?, |r| {
                render::plagiarism(&r)
            })
        }
        CliCommand::Plagiarism { id } => {
            let handle = homework.load_plagiarism_report(id);
            report(settle(&homework.plagiarism, handle).await?, |r| {
                render::plagiarism(&r)
            })
        }
        CliCommand::Analyze { id } => {
            let handle = homework.analyze(id);
            report(settle(&homework.feedback, handle).await?, |r| {
                render::grammar(&r)
            })
        }
        CliCommand::Feedback { id } => {
            let handle = homework.load_feedback(id);
            report(settle(&homework.feedback, handle).await?, |r| {
                render::grammar(&r)
            })
        }
    };

    Ok(succeeded)
}

/// Wait for an operation's task and take the slot's final state.
///
/// A panicked task surfaces as an `Err`; an API failure as `Ok(Err(..))`.
async fn settle<T: Clone>(
    slot: &Slot<T>,
    handle: JoinHandle<()>,
) -> Result<std::result::Result<T, ApiError>> {
    handle.await.wrap_err("Operation task failed")?;
    match slot.get() {
        SlotState::Success(value) => Ok(Ok(value)),
        SlotState::Error(err) => Ok(Err(err)),
        SlotState::Idle | SlotState::Loading => Err(eyre!("Operation ended without a result")),
    }
}

fn report<T>(outcome: std::result::Result<T, ApiError>, show: impl FnOnce(T) -> String) -> bool {
    match outcome {
        Ok(value) => {
            println!("{}", show(value));
            true
        }
        Err(err) => fail(&err),
    }
}

fn fail(err: &ApiError) -> bool {
    tracing::debug!("{} ({})", err, err.error_code());
    eprintln!("{}", render::error_line(err));
    if err.requires_reauth() {
        eprintln!("hint: run `hwassist login <email> <password>`");
    }
    false
}

fn welcome(name: &str, email: &str, first_login: Option<bool>) -> String {
    let mut text = format!("Logged in as {} <{}>", name, email);
    if first_login == Some(true) {
        text.push_str("\nWelcome! This is your first login.");
    }
    text
}

fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "odt" => "application/vnd.oasis.opendocument.text",
        "rtf" => "application/rtf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        _ => "application/octet-stream",
    }
}
