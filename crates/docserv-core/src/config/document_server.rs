//! Document service endpoints and credentials.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::result::AppResult;

/// Where the document service lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentServerConfig {
    /// Public document service URL, as browsers reach it.
    #[serde(default)]
    pub url: String,
    /// Address used by the host for server-to-server calls. Falls back to `url`.
    #[serde(default)]
    pub internal_url: Option<String>,
    /// Host base URL as the document service reaches it, when that differs
    /// from the public one.
    #[serde(default)]
    pub storage_url: Option<String>,
    /// Shared secret for signing requests to the document service.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Header carrying the request token.
    #[serde(default = "default_jwt_header")]
    pub jwt_header: String,
    /// Skip TLS certificate verification.
    #[serde(default)]
    pub verify_peer_off: bool,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Whether the last connectivity check succeeded.
    #[serde(default)]
    pub verified: bool,
}

impl Default for DocumentServerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            internal_url: None,
            storage_url: None,
            jwt_secret: None,
            jwt_header: default_jwt_header(),
            verify_peer_off: false,
            timeout_seconds: default_timeout(),
            verified: false,
        }
    }
}

impl DocumentServerConfig {
    /// Whether a document service URL has been configured at all.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Parsed public URL, as browsers reach the service.
    pub fn public_url(&self) -> AppResult<Url> {
        super::parse_base_url("document_server.url", &self.url)
    }

    /// Parsed server-to-server base URL. Falls back to the public URL.
    pub fn effective_internal_url(&self) -> AppResult<Url> {
        match self.internal_url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(internal) => super::parse_base_url("document_server.internal_url", internal),
            None => self.public_url(),
        }
    }

    /// Parsed storage URL override, if configured.
    pub fn effective_storage_url(&self) -> AppResult<Option<Url>> {
        self.storage_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(|u| super::parse_base_url("document_server.storage_url", u))
            .transpose()
    }

    /// Signing secret, if one is configured and non-empty.
    pub fn secret(&self) -> Option<&str> {
        self.jwt_secret.as_deref().filter(|s| !s.is_empty())
    }
}

fn default_jwt_header() -> String {
    "Authorization".to_string()
}

fn default_timeout() -> u64 {
    120
}
