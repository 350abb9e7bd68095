//! Local data layout configuration.

use serde::{Deserialize, Serialize};

/// Where the host keeps user files and retained versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root of the per-user data tree (`{root}/{user}/files`, `{root}/{user}/files_versions`).
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Whether the host retains file versions.
    #[serde(default = "default_true")]
    pub versions_enabled: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            versions_enabled: true,
        }
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_true() -> bool {
    true
}
