//! Thumbnail preview configuration.

use serde::{Deserialize, Serialize};

/// Settings for the thumbnail-preview provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Whether previews are fetched from the document service at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Edge length used when the caller does not ask for a size.
    #[serde(default = "default_size")]
    pub default_size: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_size: default_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_size() -> u32 {
    256
}
