//! Hook registry — an append-only, registration-ordered list of hooks.

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use asynchooks_core::HookMode;

use super::definitions::{Hook, HookPartition, HookReturn};

/// Trait for hook callback implementations.
///
/// `invoke` must not block. It starts the work and hands back the future
/// that settles when the work is done.
pub trait HookHandler: Send + Sync + std::fmt::Debug {
    /// Calls the callback.
    fn invoke(&self) -> HookReturn;
}

/// Registry of hooks in registration order.
#[derive(Debug, Default)]
pub struct HookRegistry {
    hooks: RwLock<Vec<Hook>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hook. The callback is not invoked.
    pub async fn register(&self, hook: Hook) {
        info!(
            event = %hook.event(),
            hook_id = %hook.id(),
            mode = %hook.mode(),
            once = hook.is_once(),
            "Hook registered"
        );

        self.hooks.write().await.push(hook);
    }

    /// Returns the hooks bound to `event`, split by mode.
    pub async fn hooks_for(&self, event: &str) -> HookPartition {
        let hooks = self.hooks.read().await;
        let mut partition = HookPartition::default();

        for hook in hooks.iter().filter(|h| h.event() == event) {
            match hook.mode() {
                HookMode::Concurrent => partition.concurrent.push(hook.clone()),
                HookMode::Sequential => partition.sequential.push(hook.clone()),
            }
        }

        partition
    }

    /// Removes the hooks with the given ids. Returns how many were removed.
    pub async fn remove(&self, ids: &[Uuid]) -> usize {
        if ids.is_empty() {
            return 0;
        }

        let mut hooks = self.hooks.write().await;
        let before = hooks.len();
        hooks.retain(|h| !ids.contains(&h.id()));
        let removed = before - hooks.len();

        debug!(removed, "Run-once hooks removed");
        removed
    }

    /// Total number of registered hooks.
    pub async fn len(&self) -> usize {
        self.hooks.read().await.len()
    }

    /// Returns whether no hooks are registered.
    pub async fn is_empty(&self) -> bool {
        self.hooks.read().await.is_empty()
    }

    /// Number of hooks bound to `event`.
    pub async fn count_for(&self, event: &str) -> usize {
        let hooks = self.hooks.read().await;
        hooks.iter().filter(|h| h.event() == event).count()
    }

    /// Distinct event names, in order of first registration.
    pub async fn events(&self) -> Vec<String> {
        let hooks = self.hooks.read().await;
        let mut events: Vec<String> = Vec::new();
        for hook in hooks.iter() {
            if !events.iter().any(|e| e == hook.event()) {
                events.push(hook.event().to_string());
            }
        }
        events
    }
}
