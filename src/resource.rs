//! Resource-state pipeline.
//!
//! Every remote operation is exposed as a stream of [`Resource`] values:
//! exactly one `Loading`, then exactly one `Success` or `Error`.

use futures::future::{self, Future, FutureExt};
use futures::stream::{self, Stream, StreamExt};
use std::pin::Pin;

use crate::error::{ApiError, ApiResult};

/// State of one asynchronous operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    /// The operation is in flight
    Loading,
    /// The operation produced a payload
    Success(T),
    /// The operation failed
    Error(ApiError),
}

impl<T> Resource<T> {
    /// Terminal state for an operation result.
    pub fn from_result(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => Resource::Success(data),
            Err(err) => Resource::Error(err),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Resource::Error(_))
    }

    /// Whether this is `Success` or `Error`.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Resource::Error(err) => Some(err),
            _ => None,
        }
    }

    /// The operator-facing message of an `Error`.
    pub fn message(&self) -> Option<String> {
        self.error().map(ApiError::message)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Resource::Loading => Resource::Loading,
            Resource::Success(data) => Resource::Success(f(data)),
            Resource::Error(err) => Resource::Error(err),
        }
    }
}

/// Boxed stream of resource states, as returned by the repositories.
pub type ResourceStream<T> = Pin<Box<dyn Stream<Item = Resource<T>> + Send>>;

/// Wrap an operation into `Loading` followed by its terminal state.
///
/// `Loading` is yielded before the operation is first polled.
pub fn pipeline<T, F>(operation: F) -> ResourceStream<T>
where
    T: Send + 'static,
    F: Future<Output = ApiResult<T>> + Send + 'static,
{
    Box::pin(
        stream::once(future::ready(Resource::Loading))
            .chain(stream::once(operation.map(Resource::from_result))),
    )
}
