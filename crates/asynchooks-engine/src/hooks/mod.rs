//! Hook system — registry, runners, dispatcher, and hook definitions.

pub mod concurrent;
pub mod definitions;
pub mod dispatcher;
pub mod registry;
pub mod sequential;

pub use concurrent::ConcurrentRunner;
pub use definitions::{Hook, HookFuture, HookPartition, HookReturn};
pub use dispatcher::{
    Continuation, DispatchResult, Dispatcher, ErrorSink, NoopErrorSink, TracingErrorSink,
};
pub use registry::{HookHandler, HookRegistry};
pub use sequential::SequentialRunner;
