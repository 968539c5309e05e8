//! Engine facade — one registry and one dispatcher per application.

use std::future::Future;
use std::sync::Arc;

use asynchooks_core::config::hooks::HooksConfig;
use asynchooks_core::{AppResult, HookMode};

use crate::hooks::definitions::Hook;
use crate::hooks::dispatcher::{Continuation, Dispatcher, ErrorSink, NoopErrorSink};
use crate::hooks::registry::{HookHandler, HookRegistry};
use crate::traits::ClosureHandler;

/// The hook engine.
///
/// Build one per application and share it by cloning; clones see the same
/// registry.
#[derive(Debug, Clone)]
pub struct AsyncHooks {
    registry: Arc<HookRegistry>,
    dispatcher: Dispatcher,
    default_mode: HookMode,
}

impl AsyncHooks {
    /// Creates an engine that logs failed triggers through `tracing`.
    pub fn new() -> Self {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = Dispatcher::new(registry.clone());

        Self {
            registry,
            dispatcher,
            default_mode: HookMode::default(),
        }
    }

    /// Creates an engine that reports failed triggers to `sink`.
    pub fn with_sink(sink: Arc<dyn ErrorSink>) -> Self {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = Dispatcher::with_sink(registry.clone(), sink);

        Self {
            registry,
            dispatcher,
            default_mode: HookMode::default(),
        }
    }

    /// Creates an engine from configuration.
    pub fn from_config(config: &HooksConfig) -> Self {
        let engine = if config.log_trigger_failures {
            Self::new()
        } else {
            Self::with_sink(Arc::new(NoopErrorSink))
        };

        Self {
            default_mode: config.default_mode,
            ..engine
        }
    }

    /// Registers `callback` for `event` with the default mode.
    pub async fn on<F, Fut>(&self, event: &str, callback: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        self.on_with_mode(event, callback, self.default_mode).await;
    }

    /// Registers `callback` for `event` with an explicit mode.
    pub async fn on_with_mode<F, Fut>(&self, event: &str, callback: F, mode: HookMode)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        self.on_handler(event, ClosureHandler::wrap(callback), mode)
            .await;
    }

    /// Registers a handler for `event`.
    pub async fn on_handler(&self, event: &str, handler: Arc<dyn HookHandler>, mode: HookMode) {
        self.registry.register(Hook::new(event, handler, mode)).await;
    }

    /// Registers `callback` for `event` with the default mode, until the first
    /// trigger that succeeds.
    pub async fn once<F, Fut>(&self, event: &str, callback: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        self.once_with_mode(event, callback, self.default_mode).await;
    }

    /// Registers `callback` for `event` with an explicit mode, until the first
    /// trigger that succeeds.
    pub async fn once_with_mode<F, Fut>(&self, event: &str, callback: F, mode: HookMode)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        self.registry
            .register(Hook::once(event, ClosureHandler::wrap(callback), mode))
            .await;
    }

    /// Triggers `event`. Resolves once every hook bound to it resolved.
    pub async fn trigger(&self, event: &str) -> AppResult<()> {
        self.dispatcher.trigger(event).await
    }

    /// Returns a callable that triggers `event`, for use inside another chain.
    pub fn as_continuation(&self, event: impl Into<String>) -> Continuation {
        self.dispatcher.as_continuation(event)
    }

    /// Mode given to hooks registered through [`AsyncHooks::on`].
    pub fn default_mode(&self) -> HookMode {
        self.default_mode
    }

    /// Returns the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    /// Returns the dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl Default for AsyncHooks {
    fn default() -> Self {
        Self::new()
    }
}
