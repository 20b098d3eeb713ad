use hwassist::cli::{self, parse_args, CliCommand, Services, USAGE};
use hwassist::config::ClientConfig;

use color_eyre::Result;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log filter variable; falls back to `RUST_LOG`, then `warn`.
const LOG_ENV: &str = "HWASSIST_LOG";

fn init_logging() {
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            return Ok(ExitCode::from(2));
        }
    };

    // Version and help need no runtime or configuration
    if matches!(command, CliCommand::Version) {
        println!("{}", cli::version::version_line());
        return Ok(ExitCode::SUCCESS);
    }
    if matches!(command, CliCommand::Help) {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    color_eyre::install()?;
    init_logging();

    let config = ClientConfig::from_env();
    let services = Services::from_config(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(cli::run(command, &services))
}
