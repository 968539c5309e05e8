//! Shared domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Execution discipline of a hook within one trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookMode {
    /// Started immediately alongside the other concurrent hooks, joined at the end.
    #[default]
    Concurrent,
    /// Started only after the previous sequential hook succeeded.
    Sequential,
}

impl HookMode {
    /// Returns the string name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concurrent => "concurrent",
            Self::Sequential => "sequential",
        }
    }
}

impl fmt::Display for HookMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
