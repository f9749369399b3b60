//! Dashboard API connection settings

use serde::{Deserialize, Serialize};

/// Where the dashboard backend lives and how to authenticate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the dashboard API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token (prefer the ROBONAV_TOKEN environment variable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Robot whose detections make up the catalog; all robots when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robot_id: Option<i64>,

    /// Read timeout per request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            robot_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
