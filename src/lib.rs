//! hwassist - client for the homework assistant API
//!
//! Every remote operation is exposed as a stream of [`resource::Resource`]
//! states (`Loading`, then `Success` or `Error`). Repositories wrap the
//! typed [`api::ApiClient`]; view models hold one observable slot per
//! operation; the `cli` module renders them in a terminal.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod resource;
pub mod traits;
pub mod view_model;
