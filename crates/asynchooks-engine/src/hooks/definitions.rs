//! Hook definitions: the registered binding, what a callback returns, and
//! the per-event partition handed to the runners.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use uuid::Uuid;

use asynchooks_core::{AppError, AppResult, HookMode};

use super::registry::HookHandler;

/// Message carried by the error raised when a callback returns no future.
pub const MALFORMED_HOOK_MESSAGE: &str = "callbacks must return a deferred future";

/// The asynchronous result of one hook invocation.
pub type HookFuture = BoxFuture<'static, AppResult<()>>;

/// Value produced by invoking a hook callback.
pub enum HookReturn {
    /// An awaitable result. The hook has finished once it resolves.
    Deferred(HookFuture),
    /// The callback produced nothing to wait on.
    Missing,
}

impl HookReturn {
    /// Wraps a future as a deferred result.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = AppResult<()>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    /// An already-resolved result.
    pub fn resolved() -> Self {
        Self::deferred(futures::future::ready(Ok(())))
    }

    /// An already-rejected result.
    pub fn rejected(error: AppError) -> Self {
        Self::deferred(futures::future::ready(Err(error)))
    }

    /// Returns the future, or a malformed-hook error if there is none.
    pub fn into_future(self) -> AppResult<HookFuture> {
        match self {
            Self::Deferred(future) => Ok(future),
            Self::Missing => Err(AppError::malformed_hook(MALFORMED_HOOK_MESSAGE)),
        }
    }
}

impl fmt::Debug for HookReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deferred(_) => f.write_str("Deferred(<future>)"),
            Self::Missing => f.write_str("Missing"),
        }
    }
}

/// A registered (event, callback, mode) binding. Immutable once built.
#[derive(Debug, Clone)]
pub struct Hook {
    id: Uuid,
    event: String,
    mode: HookMode,
    once: bool,
    handler: Arc<dyn HookHandler>,
}

impl Hook {
    /// Creates a hook that stays registered for the life of the engine.
    pub fn new(event: impl Into<String>, handler: Arc<dyn HookHandler>, mode: HookMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            event: event.into(),
            mode,
            once: false,
            handler,
        }
    }

    /// Creates a hook that is dropped after the first successful trigger that ran it.
    pub fn once(event: impl Into<String>, handler: Arc<dyn HookHandler>, mode: HookMode) -> Self {
        Self {
            once: true,
            ..Self::new(event, handler, mode)
        }
    }

    /// Unique identifier assigned at registration.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The event this hook is bound to.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The execution mode.
    pub fn mode(&self) -> HookMode {
        self.mode
    }

    /// Whether the hook is removed after its first successful trigger.
    pub fn is_once(&self) -> bool {
        self.once
    }

    /// Calls the callback. Does not await the returned future.
    pub fn invoke(&self) -> HookReturn {
        self.handler.invoke()
    }
}

/// Hooks bound to one event, split by mode, each in registration order.
#[derive(Debug, Clone, Default)]
pub struct HookPartition {
    /// Hooks started together and joined at the end.
    pub concurrent: Vec<Hook>,
    /// Hooks chained one after another.
    pub sequential: Vec<Hook>,
}

impl HookPartition {
    /// Returns whether neither partition has hooks.
    pub fn is_empty(&self) -> bool {
        self.concurrent.is_empty() && self.sequential.is_empty()
    }

    /// Total number of hooks across both partitions.
    pub fn len(&self) -> usize {
        self.concurrent.len() + self.sequential.len()
    }

    /// Ids of the run-once hooks in this partition.
    pub fn once_ids(&self) -> Vec<Uuid> {
        self.concurrent
            .iter()
            .chain(self.sequential.iter())
            .filter(|hook| hook.is_once())
            .map(Hook::id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asynchooks_core::ErrorKind;

    #[test]
    fn test_missing_return_is_malformed() {
        let err = HookReturn::Missing.into_future().err().expect("expected Err");
        assert_eq!(err.kind, ErrorKind::MalformedHook);
        assert_eq!(err.message, MALFORMED_HOOK_MESSAGE);
    }

    #[tokio::test]
    async fn test_rejected_return_resolves_to_error() {
        let future = HookReturn::rejected(AppError::hook_failed("nope"))
            .into_future()
            .expect("deferred");
        assert_eq!(future.await, Err(AppError::hook_failed("nope")));
    }

    #[tokio::test]
    async fn test_resolved_return() {
        let future = HookReturn::resolved().into_future().expect("deferred");
        assert!(future.await.is_ok());
    }
}
