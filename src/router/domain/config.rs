//! Router configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for [`crate::router::services::CapabilityRouter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Default bound on handler execution, in milliseconds. `None` waits
    /// indefinitely.
    #[serde(default)]
    pub handler_timeout_ms: Option<u64>,
}

impl RouterConfig {
    /// Sets the default handler timeout.
    #[must_use]
    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the default handler timeout.
    #[must_use]
    pub fn handler_timeout(&self) -> Option<Duration> {
        self.handler_timeout_ms.map(Duration::from_millis)
    }
}
