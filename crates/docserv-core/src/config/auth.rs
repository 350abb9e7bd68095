//! Callback link signing configuration.

use serde::{Deserialize, Serialize};

/// Placeholder secret shipped in the default configuration.
pub const DEFAULT_SECRET_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

/// Secret used by the keyed-hash service that signs callback links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for callback link tokens (HS256).
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
        }
    }
}

impl AuthConfig {
    /// Whether the secret is still the shipped placeholder.
    pub fn is_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}
