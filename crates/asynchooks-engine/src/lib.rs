//! # asynchooks-engine
//!
//! Hook dispatch engine. Provides:
//!
//! - An append-only hook registry, partitioned per event by mode
//! - A sequential runner that chains hooks and stops on the first failure
//! - A concurrent runner that fans out every hook and joins them
//! - A dispatcher that runs both partitions at once and reports failures
//! - The `AsyncHooks` facade (`on`, `once`, `trigger`, `as_continuation`)

pub mod engine;
pub mod hooks;
pub mod traits;

pub use asynchooks_core::{AppError, AppResult, ErrorKind, HookMode};
pub use engine::AsyncHooks;
pub use hooks::definitions::{Hook, HookFuture, HookReturn};
pub use hooks::dispatcher::{
    Continuation, DispatchResult, Dispatcher, ErrorSink, NoopErrorSink, TracingErrorSink,
};
pub use hooks::registry::{HookHandler, HookRegistry};
pub use traits::{ClosureHandler, ReturnHandler};
