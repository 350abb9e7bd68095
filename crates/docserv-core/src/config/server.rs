//! Host platform addressing.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::result::AppResult;

/// How the host platform is reached from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Absolute base URL of the host as end users see it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Route prefix under which the callback endpoints are mounted.
    #[serde(default = "default_app_route")]
    pub app_route: String,
    /// Installation identifier mixed into revision keys.
    #[serde(default = "default_instance_id")]
    pub instance_id: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            app_route: default_app_route(),
            instance_id: default_instance_id(),
        }
    }
}

impl ServerConfig {
    /// Parsed base URL, its path ending with `/`.
    pub fn public_url(&self) -> AppResult<Url> {
        super::parse_base_url("server.base_url", &self.base_url)
    }

    /// Non-empty path segments of the callback route prefix.
    pub fn route_segments(&self) -> impl Iterator<Item = &str> {
        self.app_route.split('/').filter(|segment| !segment.is_empty())
    }
}

fn default_base_url() -> String {
    "http://localhost/".to_string()
}

fn default_app_route() -> String {
    "/apps/docserv".to_string()
}

fn default_instance_id() -> String {
    "docserv".to_string()
}
