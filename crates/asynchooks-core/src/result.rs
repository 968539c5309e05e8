//! Convenience result type alias for asynchooks.

use crate::error::AppError;

/// A specialized `Result` type for hook operations.
///
/// Hook callbacks resolve to `AppResult<()>`, and so does every trigger.
pub type AppResult<T> = Result<T, AppError>;
