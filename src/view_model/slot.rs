//! Observable per-operation state.

use futures::future::Future;
use futures::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ApiError;
use crate::resource::{Resource, ResourceStream};

/// Value held by a [`Slot`]: `Idle` until the operation first runs, then
/// whatever the latest invocation last emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState<T> {
    Idle,
    Loading,
    Success(T),
    Error(ApiError),
}

impl<T> Default for SlotState<T> {
    fn default() -> Self {
        SlotState::Idle
    }
}

impl<T> SlotState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, SlotState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SlotState::Loading)
    }

    /// Whether this is `Success` or `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SlotState::Success(_) | SlotState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            SlotState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            SlotState::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Resource<T>> for SlotState<T> {
    fn from(resource: Resource<T>) -> Self {
        match resource {
            Resource::Loading => SlotState::Loading,
            Resource::Success(data) => SlotState::Success(data),
            Resource::Error(err) => SlotState::Error(err),
        }
    }
}

struct SlotInner<T> {
    state: watch::Sender<SlotState<T>>,
    /// Ticket of the most recent invocation
    latest: AtomicU64,
}

/// One observable state cell per view-model operation.
///
/// Each invocation takes a ticket when it starts. Items from an invocation
/// whose ticket is no longer the latest are dropped, so a slow response
/// never overwrites the state of a newer call.
pub struct Slot<T> {
    inner: Arc<SlotInner<T>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("state", &*self.inner.state.borrow())
            .field("latest", &self.inner.latest.load(Ordering::SeqCst))
            .finish()
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slot<T> {
    /// Create an idle slot.
    pub fn new() -> Self {
        let (state, _) = watch::channel(SlotState::Idle);
        Self {
            inner: Arc::new(SlotInner {
                state,
                latest: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<SlotState<T>> {
        self.inner.state.subscribe()
    }

    fn begin(&self) -> u64 {
        self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Store `state` if `ticket` is still the latest invocation.
    fn publish(&self, ticket: u64, state: SlotState<T>) -> bool {
        let latest = &self.inner.latest;
        let mut pending = Some(state);
        self.inner.state.send_if_modified(|current| {
            if latest.load(Ordering::SeqCst) != ticket {
                return false;
            }
            match pending.take() {
                Some(next) => {
                    *current = next;
                    true
                }
                None => false,
            }
        })
    }
}

impl<T: Clone> Slot<T> {
    /// The current state.
    pub fn get(&self) -> SlotState<T> {
        self.inner.state.borrow().clone()
    }
}

impl<T: Send + Sync + 'static> Slot<T> {
    /// Forward every item of `stream` into the slot.
    ///
    /// The ticket is taken when `drive` is called, not when the returned
    /// future is first polled.
    pub fn drive(&self, stream: ResourceStream<T>) -> impl Future<Output = ()> + Send + 'static {
        let slot = self.clone();
        let ticket = self.begin();
        async move { slot.forward(ticket, stream).await }
    }

    /// Drive `stream` on its own task.
    pub fn spawn(&self, stream: ResourceStream<T>) -> JoinHandle<()> {
        tokio::spawn(self.drive(stream))
    }

    async fn forward(&self, ticket: u64, mut stream: ResourceStream<T>) {
        while let Some(item) = stream.next().await {
            if !self.publish(ticket, item.into()) {
                tracing::debug!("Dropping stale result for invocation {}", ticket);
            }
        }
    }
}
