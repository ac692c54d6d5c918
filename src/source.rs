use serde::{Deserialize, Serialize};

/// One classification call's worth of identification strings, read from the
/// hosting environment (or supplied directly in tests and server-side code).
/// Never cached or mutated by the core; the default value is the inert
/// no-environment fallback (empty strings, no vendor, no chrome runtime).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    /// The raw user-agent-equivalent identifier string.
    pub user_agent: String,
    pub platform: String,
    pub app_name: String,
    pub vendor: Option<String>,
    /// Whether a native chrome runtime object is present; an absent signal
    /// degrades to false.
    pub has_chrome_runtime: bool,
}

impl EnvironmentSnapshot {
    /// Deterministic all-empty snapshot for non-browser contexts.
    pub fn inert() -> Self {
        Self::default()
    }
}

/// Injection seam for "read the current client's identification strings":
/// a real adapter reads the hosting environment at call time, tests supply
/// a snapshot directly.
pub trait IdentificationSource {
    fn snapshot(&self) -> EnvironmentSnapshot;
}

impl IdentificationSource for EnvironmentSnapshot {
    fn snapshot(&self) -> EnvironmentSnapshot {
        self.clone()
    }
}
