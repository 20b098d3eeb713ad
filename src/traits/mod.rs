//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE, multipart)
//! - [`CredentialsProvider`] - Credentials storage, retrieval and subscription

pub mod credentials;
pub mod http;

pub use credentials::{CredentialsError, CredentialsProvider};
pub use http::{FilePart, Headers, HttpClient, HttpError, MultipartForm, Query, Response};
