//! Concurrent runner — fan out every hook, join on all, first failure wins.
//!
//! Every callback is invoked back-to-back before anything is awaited. Each
//! returned future is spawned as its own task, so a hook that is still in
//! flight when a sibling fails keeps running to completion; its outcome is
//! simply no longer observed.

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tracing::{debug, warn};

use asynchooks_core::{AppError, AppResult, ErrorKind};

use super::definitions::Hook;

/// Runs hooks concurrently and joins them into one outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrentRunner;

impl ConcurrentRunner {
    /// Runs `hooks` concurrently. An empty list resolves immediately.
    pub async fn run(self, hooks: Vec<Hook>) -> AppResult<()> {
        if hooks.is_empty() {
            return Ok(());
        }

        let mut malformed: Option<AppError> = None;
        let mut tasks = FuturesUnordered::new();

        for hook in &hooks {
            match hook.invoke().into_future() {
                Ok(future) => tasks.push(tokio::spawn(future)),
                Err(e) => {
                    warn!(
                        event = %hook.event(),
                        hook_id = %hook.id(),
                        error = %e,
                        "Concurrent hook returned no future"
                    );
                    if malformed.is_none() {
                        malformed = Some(e);
                    }
                }
            }
        }

        debug!(spawned = tasks.len(), "Concurrent hooks started");

        if let Some(e) = malformed {
            return Err(e);
        }

        while let Some(joined) = tasks.next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(e),
                Err(join_err) => {
                    return Err(AppError::with_source(
                        ErrorKind::Internal,
                        "hook task panicked",
                        join_err,
                    ));
                }
            }
        }

        Ok(())
    }
}
