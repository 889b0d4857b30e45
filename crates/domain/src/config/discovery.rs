use serde::{Deserialize, Serialize};

/// Timing knobs for the probe/announce/browse algorithms.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Probe rounds that must pass silently before a name is claimed.
    #[serde(default = "default_probe_rounds")]
    pub probe_rounds: u32,

    /// Upper bound of the random delay before each probe round, in ms.
    #[serde(default = "default_probe_jitter_ms")]
    pub probe_jitter_ms: u64,

    /// How long each probe round listens for a defending answer, in ms.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// How long a browse collects PTR answers before moving on, in ms.
    #[serde(default = "default_browse_window_ms")]
    pub browse_window_ms: u64,

    /// First-match-or-timeout window for single SRV/A queries, in ms.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// TTL stamped on announced records, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u32,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            probe_rounds: default_probe_rounds(),
            probe_jitter_ms: default_probe_jitter_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            browse_window_ms: default_browse_window_ms(),
            query_timeout_ms: default_query_timeout_ms(),
            default_ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_probe_rounds() -> u32 {
    3
}

fn default_probe_jitter_ms() -> u64 {
    250
}

fn default_probe_timeout_ms() -> u64 {
    250
}

fn default_browse_window_ms() -> u64 {
    1000
}

fn default_query_timeout_ms() -> u64 {
    500
}

fn default_ttl_secs() -> u32 {
    120
}
