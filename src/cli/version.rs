//! Version command for hwassist.

/// The current version of hwassist, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The `--version` output.
pub fn version_line() -> String {
    format!("hwassist {}", VERSION)
}
