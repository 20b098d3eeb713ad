//! Local session state.
//!
//! The bearer token and first-login flag, and the file that persists them.

pub mod credentials;

pub use credentials::{Credentials, CredentialsManager};
