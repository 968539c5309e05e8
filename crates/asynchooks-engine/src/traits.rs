//! Closure adapters for [`HookHandler`].

use std::future::Future;
use std::sync::Arc;

use asynchooks_core::AppResult;

use crate::hooks::definitions::{HookFuture, HookReturn};
use crate::hooks::registry::HookHandler;

/// A hook built from a closure that returns a future.
///
/// The closure body runs when the hook is invoked; the future it returns is
/// what the engine waits on.
pub struct ClosureHandler {
    handler: Arc<dyn Fn() -> HookFuture + Send + Sync>,
}

impl std::fmt::Debug for ClosureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureHandler {
    /// Creates a new closure-based handler.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        Self {
            handler: Arc::new(move || -> HookFuture { Box::pin(handler()) }),
        }
    }

    /// Wraps the closure into an `Arc<dyn HookHandler>`.
    pub fn wrap<F, Fut>(handler: F) -> Arc<dyn HookHandler>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        Arc::new(Self::new(handler))
    }
}

impl HookHandler for ClosureHandler {
    fn invoke(&self) -> HookReturn {
        HookReturn::Deferred((self.handler)())
    }
}

/// A hook built from a closure that decides its own [`HookReturn`].
///
/// Useful for bridging callbacks that may have nothing to wait on.
pub struct ReturnHandler {
    handler: Arc<dyn Fn() -> HookReturn + Send + Sync>,
}

impl std::fmt::Debug for ReturnHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReturnHandler")
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ReturnHandler {
    /// Creates a new handler.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn() -> HookReturn + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Wraps the closure into an `Arc<dyn HookHandler>`.
    pub fn wrap<F>(handler: F) -> Arc<dyn HookHandler>
    where
        F: Fn() -> HookReturn + Send + Sync + 'static,
    {
        Arc::new(Self::new(handler))
    }
}

impl HookHandler for ReturnHandler {
    fn invoke(&self) -> HookReturn {
        (self.handler)()
    }
}
