//! Hook dispatcher — fires every hook bound to an event and joins the outcome.
//!
//! A trigger snapshots the registry, then runs both partitions at once:
//! - Sequential hooks are chained in registration order; the first failure
//!   stops the chain.
//! - Concurrent hooks are all started immediately and joined; the first
//!   failure observed wins.
//!
//! The trigger succeeds only when both partitions succeed. A failure is
//! reported to the [`ErrorSink`] and then returned unchanged.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error};
use uuid::Uuid;

use asynchooks_core::{AppError, AppResult, ErrorKind};

use super::concurrent::ConcurrentRunner;
use super::definitions::{HookFuture, HookReturn};
use super::registry::{HookHandler, HookRegistry};
use super::sequential::SequentialRunner;

/// Receives trigger failures before they are handed back to the caller.
pub trait ErrorSink: Send + Sync + std::fmt::Debug {
    /// Records a failed trigger of `event`.
    fn report(&self, event: &str, error: &AppError);
}

/// Reports failures as `tracing` error events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, event: &str, error: &AppError) {
        error!(
            event = %event,
            kind = %error.kind,
            error = %error,
            "Hook trigger failed"
        );
    }
}

/// Discards failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopErrorSink;

impl ErrorSink for NoopErrorSink {
    fn report(&self, _event: &str, _error: &AppError) {}
}

/// Summary of a successful trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    /// The event that was triggered.
    pub event: String,
    /// Number of concurrent hooks that ran.
    pub concurrent: usize,
    /// Number of sequential hooks that ran.
    pub sequential: usize,
    /// Run-once hooks removed after this trigger.
    pub retired: Vec<Uuid>,
}

/// Dispatches events to the hooks registered for them.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<HookRegistry>,
    sink: Arc<dyn ErrorSink>,
    sequential: SequentialRunner,
    concurrent: ConcurrentRunner,
}

impl Dispatcher {
    /// Creates a dispatcher that reports failures through `tracing`.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self::with_sink(registry, Arc::new(TracingErrorSink))
    }

    /// Creates a dispatcher with a custom failure sink.
    pub fn with_sink(registry: Arc<HookRegistry>, sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            registry,
            sink,
            sequential: SequentialRunner,
            concurrent: ConcurrentRunner,
        }
    }

    /// Triggers `event` and resolves once every hook bound to it resolved.
    pub async fn trigger(&self, event: &str) -> AppResult<()> {
        self.dispatch(event).await.map(|_| ())
    }

    /// Triggers `event` and returns what ran.
    ///
    /// Each call reads the registry afresh; concurrent calls for the same
    /// event run independently.
    pub async fn dispatch(&self, event: &str) -> AppResult<DispatchResult> {
        let partition = self.registry.hooks_for(event).await;

        let mut result = DispatchResult {
            event: event.to_string(),
            concurrent: partition.concurrent.len(),
            sequential: partition.sequential.len(),
            retired: Vec::new(),
        };

        if partition.is_empty() {
            debug!(event = %event, "No hooks registered, trigger resolved");
            return Ok(result);
        }

        debug!(
            event = %event,
            concurrent = result.concurrent,
            sequential = result.sequential,
            "Dispatching hooks"
        );

        let once_ids = partition.once_ids();
        let sequential = tokio::spawn(self.sequential.run(partition.sequential));
        let concurrent = tokio::spawn(self.concurrent.run(partition.concurrent));

        let outcome =
            futures::future::try_join(join_partition(sequential), join_partition(concurrent)).await;

        if let Err(e) = outcome {
            self.sink.report(event, &e);
            return Err(e);
        }

        if !once_ids.is_empty() {
            self.registry.remove(&once_ids).await;
            result.retired = once_ids;
        }

        debug!(event = %event, "Hook trigger resolved");
        Ok(result)
    }

    /// Returns a callable that triggers `event` each time it is called.
    pub fn as_continuation(&self, event: impl Into<String>) -> Continuation {
        Continuation {
            dispatcher: self.clone(),
            event: event.into(),
        }
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

async fn join_partition(handle: JoinHandle<AppResult<()>>) -> AppResult<()> {
    handle.await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, "hook partition task panicked", e)
    })?
}

/// A deferred trigger of one event, for use as a link in a larger chain.
///
/// Also usable as a hook, so one event can fire another.
#[derive(Debug, Clone)]
pub struct Continuation {
    dispatcher: Dispatcher,
    event: String,
}

impl Continuation {
    /// The event this continuation triggers.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Triggers the event and returns its outcome.
    pub fn call(&self) -> HookFuture {
        let dispatcher = self.dispatcher.clone();
        let event = self.event.clone();
        Box::pin(async move { dispatcher.trigger(&event).await })
    }
}

impl HookHandler for Continuation {
    fn invoke(&self) -> HookReturn {
        HookReturn::Deferred(self.call())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use asynchooks_core::HookMode;

    use super::*;
    use crate::hooks::definitions::Hook;
    use crate::traits::ClosureHandler;

    #[derive(Debug, Default)]
    struct RecordingSink {
        reports: Mutex<Vec<(String, AppError)>>,
    }

    impl ErrorSink for RecordingSink {
        fn report(&self, event: &str, error: &AppError) {
            self.reports
                .lock()
                .unwrap()
                .push((event.to_string(), error.clone()));
        }
    }

    fn counting(counter: &Arc<AtomicUsize>) -> Arc<dyn HookHandler> {
        let counter = counter.clone();
        ClosureHandler::wrap(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
    }

    #[tokio::test]
    async fn test_trigger_without_hooks_resolves() {
        let dispatcher = Dispatcher::new(Arc::new(HookRegistry::new()));
        let result = dispatcher.dispatch("nothing").await.expect("resolves");
        assert_eq!(result.concurrent, 0);
        assert_eq!(result.sequential, 0);
    }

    #[tokio::test]
    async fn test_failure_is_reported_then_returned() {
        let registry = Arc::new(HookRegistry::new());
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = Dispatcher::with_sink(registry.clone(), sink.clone());

        registry
            .register(Hook::new(
                "deploy",
                ClosureHandler::wrap(|| async { Err(AppError::hook_failed("E")) }),
                HookMode::Sequential,
            ))
            .await;

        let err = dispatcher.trigger("deploy").await.unwrap_err();
        assert_eq!(err, AppError::hook_failed("E"));

        let reports = sink.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, "deploy");
        assert_eq!(reports[0].1, err);
    }

    #[tokio::test]
    async fn test_success_is_not_reported() {
        let registry = Arc::new(HookRegistry::new());
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = Dispatcher::with_sink(registry.clone(), sink.clone());
        let counter = Arc::new(AtomicUsize::new(0));

        registry
            .register(Hook::new("build", counting(&counter), HookMode::Concurrent))
            .await;
        registry
            .register(Hook::new("build", counting(&counter), HookMode::Sequential))
            .await;

        let result = dispatcher.dispatch("build").await.expect("resolves");
        assert_eq!(result.concurrent, 1);
        assert_eq!(result.sequential, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(sink.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_once_hooks_retired_after_success() {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = Dispatcher::new(registry.clone());
        let counter = Arc::new(AtomicUsize::new(0));

        let once = Hook::once("boot", counting(&counter), HookMode::Concurrent);
        let once_id = once.id();
        registry.register(once).await;
        registry
            .register(Hook::new("boot", counting(&counter), HookMode::Concurrent))
            .await;

        let first = dispatcher.dispatch("boot").await.expect("resolves");
        assert_eq!(first.retired, vec![once_id]);
        let second = dispatcher.dispatch("boot").await.expect("resolves");
        assert!(second.retired.is_empty());

        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(registry.count_for("boot").await, 1);
    }

    #[tokio::test]
    async fn test_once_hooks_kept_after_failure() {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = Dispatcher::with_sink(registry.clone(), Arc::new(NoopErrorSink));
        let counter = Arc::new(AtomicUsize::new(0));

        registry
            .register(Hook::once("boot", counting(&counter), HookMode::Sequential))
            .await;
        registry
            .register(Hook::new(
                "boot",
                ClosureHandler::wrap(|| async { Err(AppError::hook_failed("not yet")) }),
                HookMode::Concurrent,
            ))
            .await;

        assert!(dispatcher.trigger("boot").await.is_err());
        assert_eq!(registry.count_for("boot").await, 2);
    }

    #[tokio::test]
    async fn test_continuation_triggers_event() {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = Dispatcher::new(registry.clone());
        let counter = Arc::new(AtomicUsize::new(0));

        registry
            .register(Hook::new("X", counting(&counter), HookMode::Sequential))
            .await;

        let continuation = dispatcher.as_continuation("X");
        assert_eq!(continuation.event(), "X");

        continuation.call().await.expect("resolves");
        continuation.call().await.expect("resolves");
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
