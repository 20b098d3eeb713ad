//! Command-line argument parsing for hwassist.
//!
//! Turns `std::env::args()` into a [`CliCommand`]. Every command takes its
//! required values positionally and optional ones as `--flag value` or
//! `--flag=value`.

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{DeadlineFilter, HomeworkFilter, HomeworkUpdate, ProfileUpdate, Settings};

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    Login {
        email: String,
        password: String,
    },
    Register {
        full_name: String,
        email: String,
        password: String,
    },
    Logout,
    /// Show whether a session is stored
    Status,
    List(HomeworkFilter),
    Show {
        id: String,
    },
    Upload {
        title: String,
        file: PathBuf,
        description: String,
        deadline: String,
    },
    Update {
        id: String,
        update: HomeworkUpdate,
    },
    Submit {
        id: String,
    },
    Delete {
        id: String,
    },
    Download {
        id: String,
        out: PathBuf,
    },
    Profile,
    ProfileUpdate(ProfileUpdate),
    CheckPlagiarism {
        id: String,
    },
    Plagiarism {
        id: String,
    },
    Analyze {
        id: String,
    },
    Feedback {
        id: String,
    },
}

/// Why the command line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("{command}: missing <{name}>")]
    MissingArgument {
        command: &'static str,
        name: &'static str,
    },
    #[error("{command}: unexpected argument '{arg}'")]
    UnexpectedArgument { command: &'static str, arg: String },
    #[error("{command}: unknown option '{flag}'")]
    UnknownFlag { command: &'static str, flag: String },
    #[error("option '{0}' needs a value")]
    MissingValue(String),
    #[error("invalid value for '{flag}': {reason}")]
    InvalidValue { flag: &'static str, reason: String },
}

pub const USAGE: &str = "\
Usage: hwassist <command> [options]

Commands:
  login <email> <password>
  register <full-name> <email> <password>
  logout
  status
  list [--status S] [--deadline before|after|today] [--search TEXT]
  show <id>
  upload <title> <file> [--description D] [--deadline ISO-8601]
  update <id> [--title T] [--description D] [--deadline ISO-8601]
  submit <id>
  delete <id>
  download <id> <output-file>
  profile
  profile-update [--name N] [--email E] [--settings JSON]
                 [--password CURRENT --new-password NEW]
  check-plagiarism <id>
  plagiarism <id>
  analyze <id>
  feedback <id>

Options:
  -h, --help       Show this message
  -V, --version    Show version

Environment:
  HWASSIST_API_URL, HWASSIST_TIMEOUT_SECS, HWASSIST_MASK_CONNECTION_ERRORS,
  HWASSIST_CREDENTIALS, HWASSIST_LOG";

/// Positional arguments and `--flag` values of one command.
struct Parsed {
    command: &'static str,
    positionals: std::vec::IntoIter<String>,
    flags: HashMap<String, String>,
}

impl Parsed {
    fn split(
        command: &'static str,
        args: Vec<String>,
        allowed: &[&str],
    ) -> Result<Self, ArgsError> {
        let mut positionals = Vec::new();
        let mut flags = HashMap::new();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            if !arg.starts_with("--") {
                positionals.push(arg);
                continue;
            }
            let (name, inline) = match arg.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            if !allowed.contains(&name.as_str()) {
                return Err(ArgsError::UnknownFlag { command, flag: name });
            }
            let value = match inline {
                Some(value) => value,
                None => iter.next().ok_or_else(|| ArgsError::MissingValue(name.clone()))?,
            };
            flags.insert(name, value);
        }

        Ok(Self {
            command,
            positionals: positionals.into_iter(),
            flags,
        })
    }

    fn required(&mut self, name: &'static str) -> Result<String, ArgsError> {
        self.positionals.next().ok_or(ArgsError::MissingArgument {
            command: self.command,
            name,
        })
    }

    fn flag(&mut self, name: &str) -> Option<String> {
        self.flags.remove(name)
    }

    /// Fail on leftover positionals.
    fn finish(mut self) -> Result<(), ArgsError> {
        match self.positionals.next() {
            Some(arg) => Err(ArgsError::UnexpectedArgument {
                command: self.command,
                arg,
            }),
            None => Ok(()),
        }
    }
}

/// Parse command-line arguments and return the command to run.
///
/// No arguments at all means [`CliCommand::Help`].
///
/// # Examples
///
/// ```
/// use hwassist::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["hwassist".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args: Vec<String> = args.skip(1).collect();

    if args.iter().any(|a| a == "--version" || a == "-V") {
        return Ok(CliCommand::Version);
    }
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(CliCommand::Help);
    }

    let name = args.remove(0);
    match name.as_str() {
        "help" => Ok(CliCommand::Help),
        "login" => {
            let mut p = Parsed::split("login", args, &[])?;
            let command = CliCommand::Login {
                email: p.required("email")?,
                password: p.required("password")?,
            };
            p.finish()?;
            Ok(command)
        }
        "register" => {
            let mut p = Parsed::split("register", args, &[])?;
            let command = CliCommand::Register {
                full_name: p.required("full-name")?,
                email: p.required("email")?,
                password: p.required("password")?,
            };
            p.finish()?;
            Ok(command)
        }
        "logout" => no_args("logout", args, CliCommand::Logout),
        "status" => no_args("status", args, CliCommand::Status),
        "profile" => no_args("profile", args, CliCommand::Profile),
        "list" => {
            let mut p = Parsed::split("list", args, &["--status", "--deadline", "--search"])?;
            let mut filter = HomeworkFilter::new();
            filter.status = p.flag("--status");
            filter.search = p.flag("--search");
            if let Some(raw) = p.flag("--deadline") {
                filter.deadline = Some(DeadlineFilter::parse(&raw).ok_or_else(|| {
                    ArgsError::InvalidValue {
                        flag: "--deadline",
                        reason: format!("expected before, after or today, got '{}'", raw),
                    }
                })?);
            }
            p.finish()?;
            Ok(CliCommand::List(filter))
        }
        "show" => single_id("show", args).map(|id| CliCommand::Show { id }),
        "submit" => single_id("submit", args).map(|id| CliCommand::Submit { id }),
        "delete" => single_id("delete", args).map(|id| CliCommand::Delete { id }),
        "check-plagiarism" => {
            single_id("check-plagiarism", args).map(|id| CliCommand::CheckPlagiarism { id })
        }
        "plagiarism" => single_id("plagiarism", args).map(|id| CliCommand::Plagiarism { id }),
        "analyze" => single_id("analyze", args).map(|id| CliCommand::Analyze { id }),
        "feedback" => single_id("feedback", args).map(|id| CliCommand::Feedback { id }),
        "upload" => {
            let mut p = Parsed::split("upload", args, &["--description", "--deadline"])?;
            let command = CliCommand::Upload {
                title: p.required("title")?,
                file: PathBuf::from(p.required("file")?),
                description: p.flag("--description").unwrap_or_default(),
                deadline: p.flag("--deadline").unwrap_or_default(),
            };
            p.finish()?;
            Ok(command)
        }
        "update" => {
            let mut p = Parsed::split("update", args, &["--title", "--description", "--deadline"])?;
            let id = p.required("id")?;
            let update = HomeworkUpdate {
                title: p.flag("--title"),
                description: p.flag("--description"),
                deadline: p.flag("--deadline"),
            };
            p.finish()?;
            Ok(CliCommand::Update { id, update })
        }
        "download" => {
            let mut p = Parsed::split("download", args, &[])?;
            let command = CliCommand::Download {
                id: p.required("id")?,
                out: PathBuf::from(p.required("output-file")?),
            };
            p.finish()?;
            Ok(command)
        }
        "profile-update" => {
            let mut p = Parsed::split(
                "profile-update",
                args,
                &["--name", "--email", "--settings", "--password", "--new-password"],
            )?;
            let mut update = ProfileUpdate::new();
            update.name = p.flag("--name");
            update.email = p.flag("--email");
            if let Some(raw) = p.flag("--settings") {
                update.settings = Some(parse_settings(&raw)?);
            }
            match (p.flag("--password"), p.flag("--new-password")) {
                (Some(current), Some(new)) => {
                    update = update.with_password_change(current, new);
                }
                (None, None) => {}
                (Some(_), None) => {
                    return Err(ArgsError::InvalidValue {
                        flag: "--password",
                        reason: "--new-password is required too".to_string(),
                    })
                }
                (None, Some(_)) => {
                    return Err(ArgsError::InvalidValue {
                        flag: "--new-password",
                        reason: "--password (current password) is required too".to_string(),
                    })
                }
            }
            p.finish()?;
            Ok(CliCommand::ProfileUpdate(update))
        }
        other => Err(ArgsError::UnknownCommand(other.to_string())),
    }
}

fn no_args(
    command: &'static str,
    args: Vec<String>,
    result: CliCommand,
) -> Result<CliCommand, ArgsError> {
    Parsed::split(command, args, &[])?.finish()?;
    Ok(result)
}

fn single_id(command: &'static str, args: Vec<String>) -> Result<String, ArgsError> {
    let mut p = Parsed::split(command, args, &[])?;
    let id = p.required("id")?;
    p.finish()?;
    Ok(id)
}

/// Settings must be a JSON object.
fn parse_settings(raw: &str) -> Result<Settings, ArgsError> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(ArgsError::InvalidValue {
            flag: "--settings",
            reason: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(ArgsError::InvalidValue {
            flag: "--settings",
            reason: e.to_string(),
        }),
    }
}
