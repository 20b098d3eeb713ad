//! HTTP API surface: the response envelope and the typed client.

mod client;
mod envelope;

pub use client::{fallback, ApiClient};
pub use envelope::{Envelope, StatusField};
