//! Viewer asset injection configuration.

use serde::{Deserialize, Serialize};

/// Controls which users get the viewer integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Application id that namespaces injected scripts and styles.
    #[serde(default = "default_app_id")]
    pub app_id: String,
    /// Groups allowed to use the integration. Empty means everyone.
    #[serde(default)]
    pub limit_groups: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            limit_groups: Vec::new(),
        }
    }
}

fn default_app_id() -> String {
    "docserv".to_string()
}
