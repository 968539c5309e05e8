//! Hook engine configuration.

use serde::{Deserialize, Serialize};

use crate::types::HookMode;

/// Settings applied when an engine is built from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Mode given to hooks registered without an explicit mode.
    #[serde(default)]
    pub default_mode: HookMode,
    /// Whether failed triggers are reported through `tracing`.
    #[serde(default = "default_true")]
    pub log_trigger_failures: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            default_mode: HookMode::default(),
            log_trigger_failures: true,
        }
    }
}

fn default_true() -> bool {
    true
}
