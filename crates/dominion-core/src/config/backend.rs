//! Hosted session backend configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the hosted session backend's REST interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hosted backend, e.g. `https://project.example.co`.
    pub url: String,
    /// API key sent as both `apikey` and bearer authorization.
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    10
}
