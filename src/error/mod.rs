//! Error handling for API operations.
//!
//! Failures are reported through [`ApiError`], which mirrors the four ways
//! an operation can fail:
//!
//! | Category | Cause | Message |
//! |----------|-------|---------|
//! | Business | 2xx with a failure envelope | `error` field, else `message`, else a fallback |
//! | Transport | non-2xx status | `Failed with code: N[: body]` |
//! | Network | request never completed | `Network error: ...` |
//! | Unknown | anything else | `Unknown error: ...` |
//!
//! None of them is retried automatically; the operator re-triggers the
//! operation.

mod api;
mod category;

pub use api::ApiError;
pub use category::ErrorCategory;

/// Type alias for Results using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
