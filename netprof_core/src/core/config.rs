use std::time::Duration;

use serde::Deserialize;

/// Bound applied to every daemon call unless configured otherwise.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(3);

/// Settings handed to the session manager at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed per-call timeout, shared by every operation.
    #[serde(rename = "rpc_timeout_ms", deserialize_with = "millis")]
    pub rpc_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
        }
    }
}

impl SessionConfig {
    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }
}

fn millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let ms = u64::deserialize(deserializer)?;
    if ms == 0 {
        return Err(serde::de::Error::custom("rpc_timeout_ms must be positive"));
    }
    Ok(Duration::from_millis(ms))
}
