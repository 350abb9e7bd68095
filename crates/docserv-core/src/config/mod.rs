//! Application configuration schemas.
//!
//! All configuration structs are deserialized from a TOML file via the
//! `config` crate, overlaid with `DOCSERV__*` environment variables. Each
//! sub-module represents a logical configuration section.

pub mod auth;
pub mod document_server;
pub mod logging;
pub mod preview;
pub mod server;
pub mod storage;
pub mod viewer;

use serde::{Deserialize, Serialize};
use url::Url;

pub use self::auth::AuthConfig;
pub use self::document_server::DocumentServerConfig;
pub use self::logging::LoggingConfig;
pub use self::preview::PreviewConfig;
pub use self::server::ServerConfig;
pub use self::storage::StorageConfig;
pub use self::viewer::ViewerConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host platform addressing.
    #[serde(default)]
    pub server: ServerConfig,
    /// Keyed-hash secret for callback links.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Document service endpoints and credentials.
    #[serde(default)]
    pub document_server: DocumentServerConfig,
    /// Thumbnail preview settings.
    #[serde(default)]
    pub preview: PreviewConfig,
    /// Viewer asset injection settings.
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// Local data layout.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional; environment variables prefixed with `DOCSERV__`
    /// (e.g. `DOCSERV__DOCUMENT_SERVER__URL`) override file values.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("DOCSERV")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Parse a configured base URL.
///
/// The URL must be absolute `http` or `https`. The path is given a trailing
/// `/` so relative endpoints join below it.
pub fn parse_base_url(setting: &str, raw: &str) -> AppResult<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| AppError::configuration(format!("Invalid {setting} '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(AppError::configuration(format!(
            "{setting} must be an absolute http(s) URL, got '{raw}'"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    use super::*;

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url =
            parse_base_url("server.base_url", " https://cloud.example.com/nextcloud ").unwrap();
        assert_eq!(url.as_str(), "https://cloud.example.com/nextcloud/");

        let url = parse_base_url("server.base_url", "http://cloud.local").unwrap();
        assert_eq!(url.as_str(), "http://cloud.local/");
    }

    #[test]
    fn test_parse_base_url_rejects_relative_and_foreign_schemes() {
        let rejected = [
            "cloud.example.com",
            "/apps",
            "",
            "mailto:admin@example.com",
            "ftp://files",
        ];
        for raw in rejected {
            let err = parse_base_url("server.base_url", raw).unwrap_err();
            assert!(err.is(ErrorKind::Configuration), "{raw}");
        }
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[server\nbase_url = ").unwrap();

        let err = AppConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = AppConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.app_route, "/apps/docserv");
        assert_eq!(config.document_server.jwt_header, "Authorization");
        assert!(config.document_server.storage_url.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docserv.toml");
        std::fs::write(
            &path,
            r#"
[server]
base_url = "https://cloud.example.com"

[document_server]
url = "https://office.example.com"
storage_url = "http://cloud.internal/"
verified = true

[viewer]
limit_groups = ["editors"]
"#,
        )
        .unwrap();

        let config = AppConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.base_url, "https://cloud.example.com");
        assert_eq!(
            config.document_server.storage_url.as_deref(),
            Some("http://cloud.internal/")
        );
        assert!(config.document_server.verified);
        assert_eq!(config.viewer.limit_groups, vec!["editors".to_string()]);
        assert!(config.preview.enabled);
    }
}
