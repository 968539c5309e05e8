//! Sequential runner — one hook at a time, in registration order.

use tracing::{debug, warn};

use asynchooks_core::AppResult;

use super::definitions::Hook;

/// Runs hooks as a chain: each hook starts only after the previous one
/// resolved successfully. The first failure ends the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialRunner;

impl SequentialRunner {
    /// Runs `hooks` in order. An empty list resolves immediately.
    pub async fn run(self, hooks: Vec<Hook>) -> AppResult<()> {
        for (position, hook) in hooks.iter().enumerate() {
            debug!(
                event = %hook.event(),
                hook_id = %hook.id(),
                position,
                "Running sequential hook"
            );

            let future = hook.invoke().into_future().inspect_err(|e| {
                warn!(
                    event = %hook.event(),
                    hook_id = %hook.id(),
                    error = %e,
                    "Sequential hook returned no future"
                );
            })?;

            future.await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use asynchooks_core::{AppError, ErrorKind, HookMode};

    use super::*;
    use crate::hooks::definitions::HookReturn;
    use crate::traits::{ClosureHandler, ReturnHandler};

    fn logged(log: &Arc<Mutex<Vec<String>>>, name: &'static str, delay_ms: u64) -> Hook {
        let log = log.clone();
        Hook::new(
            "test",
            ClosureHandler::wrap(move || {
                let log = log.clone();
                log.lock().unwrap().push(format!("{name}:start"));
                async move {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    log.lock().unwrap().push(format!("{name}:end"));
                    Ok(())
                }
            }),
            HookMode::Sequential,
        )
    }

    #[tokio::test]
    async fn test_empty_chain_resolves() {
        assert!(SequentialRunner.run(Vec::new()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_hook_waits_for_previous() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let hooks = vec![
            logged(&log, "h1", 30),
            logged(&log, "h2", 10),
            logged(&log, "h3", 0),
        ];

        SequentialRunner.run(hooks).await.expect("chain succeeds");

        assert_eq!(
            *log.lock().unwrap(),
            vec!["h1:start", "h1:end", "h2:start", "h2:end", "h3:start", "h3:end"]
        );
    }

    #[tokio::test]
    async fn test_failure_short_circuits() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let failing = Hook::new(
            "test",
            ClosureHandler::wrap(|| async { Err(AppError::hook_failed("E")) }),
            HookMode::Sequential,
        );
        let hooks = vec![logged(&log, "h1", 0), failing, logged(&log, "h3", 0)];

        let err = SequentialRunner.run(hooks).await.unwrap_err();

        assert_eq!(err, AppError::hook_failed("E"));
        assert_eq!(*log.lock().unwrap(), vec!["h1:start", "h1:end"]);
    }

    #[tokio::test]
    async fn test_missing_future_fails_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let malformed = Hook::new(
            "test",
            ReturnHandler::wrap(|| HookReturn::Missing),
            HookMode::Sequential,
        );
        let hooks = vec![malformed, logged(&log, "h2", 0)];

        let err = SequentialRunner.run(hooks).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::MalformedHook);
        assert!(err.message.contains("callbacks must return a deferred future"));
        assert!(log.lock().unwrap().is_empty());
    }
}
