//! Signed callback URLs the document service fetches files from.
//!
//! Authorization travels inside the URL: the `doc` query parameter is a
//! keyed-hash token over the link payload, so the callback route needs no
//! session state.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use docserv_core::config::{DocumentServerConfig, ServerConfig};
use docserv_core::error::AppError;
use docserv_core::result::AppResult;
use docserv_core::traits::TokenSigner;
use docserv_core::types::{FileIdentity, LinkAction, SignedUrlRequest};

/// Query parameter carrying the token.
pub const TOKEN_PARAM: &str = "doc";

/// Builds and verifies callback links.
#[derive(Debug, Clone)]
pub struct SecureLinkBuilder {
    /// Keyed-hash service.
    signer: Arc<dyn TokenSigner>,
    /// Host base URL as end users see it.
    base_url: Url,
    /// Host base URL as the document service sees it.
    storage_url: Option<Url>,
    /// Path segments of the callback route prefix.
    route: Vec<String>,
}

impl SecureLinkBuilder {
    /// Creates a link builder from host and document service configuration.
    ///
    /// Fails when the host base URL or the storage URL override is not an
    /// absolute http(s) URL.
    pub fn new(
        server: &ServerConfig,
        document_server: &DocumentServerConfig,
        signer: Arc<dyn TokenSigner>,
    ) -> AppResult<Self> {
        Ok(Self {
            signer,
            base_url: server.public_url()?,
            storage_url: document_server.effective_storage_url()?,
            route: server.route_segments().map(String::from).collect(),
        })
    }

    /// URL from which the document service downloads `identity`.
    ///
    /// `acting_user` is embedded when present; a `version` of 0 means the
    /// live file.
    pub fn download_url(
        &self,
        identity: &FileIdentity,
        acting_user: Option<&str>,
        version: u32,
    ) -> AppResult<String> {
        let request = SignedUrlRequest::download(identity.file_id, acting_user, version);
        self.url_for(&request)
    }

    /// URL of the built-in empty document, used by the connectivity check.
    pub fn empty_file_url(&self) -> AppResult<String> {
        self.url_for(&SignedUrlRequest::empty())
    }

    /// Check a token taken from a callback request and recover its payload.
    pub fn verify(&self, token: &str) -> AppResult<SignedUrlRequest> {
        self.signer.verify(token)
    }

    /// Sign a payload and place it on its callback route.
    pub fn url_for(&self, request: &SignedUrlRequest) -> AppResult<String> {
        let token = self.signer.sign(request)?;

        let mut url = self.storage_url.as_ref().unwrap_or(&self.base_url).clone();
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("Callback origin cannot carry a path"))?
            .pop_if_empty()
            .extend(&self.route)
            .push(request.action.route());
        url.query_pairs_mut().append_pair(TOKEN_PARAM, &token);

        debug!(
            action = ?request.action,
            file_id = ?request.file_id,
            version = ?request.version,
            rewritten = self.storage_url.is_some(),
            "Built callback link"
        );
        Ok(url.into())
    }

    /// Route path (after the origin) serving an action.
    pub fn route_path(&self, action: LinkAction) -> String {
        let mut path = String::new();
        for segment in self.route.iter().map(String::as_str).chain([action.route()]) {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}

/// Pull the token out of a callback URL built by [`SecureLinkBuilder`].
pub fn token_from_url(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .query_pairs()
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use docserv_auth::Crypt;
    use docserv_core::config::AuthConfig;
    use docserv_core::error::ErrorKind;

    use super::*;

    fn identity(file_id: i64) -> FileIdentity {
        FileIdentity {
            file_id,
            path: "/alice/files/report.docx".to_string(),
            extension: "docx".to_string(),
            owner_id: "alice".to_string(),
        }
    }

    fn builder(storage_url: Option<&str>) -> SecureLinkBuilder {
        let server = ServerConfig {
            base_url: "https://cloud.example.com".to_string(),
            ..Default::default()
        };
        let document_server = DocumentServerConfig {
            storage_url: storage_url.map(String::from),
            ..Default::default()
        };
        let signer = Crypt::new(&AuthConfig {
            secret_key: "link-secret".to_string(),
        });
        SecureLinkBuilder::new(&server, &document_server, Arc::new(signer)).unwrap()
    }

    #[test]
    fn test_url_shape() {
        let url = builder(None)
            .download_url(&identity(42), Some("alice"), 0)
            .unwrap();
        assert!(url.starts_with("https://cloud.example.com/apps/docserv/download?doc="));
        assert!(!token_from_url(&url).unwrap().is_empty());
    }

    #[test]
    fn test_same_inputs_same_url() {
        let links = builder(None);
        let a = links.download_url(&identity(42), Some("alice"), 3).unwrap();
        let b = links.download_url(&identity(42), Some("alice"), 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_each_field_changes_token() {
        let links = builder(None);
        let base = links.download_url(&identity(42), Some("alice"), 3).unwrap();
        let variants = [
            links.download_url(&identity(43), Some("alice"), 3).unwrap(),
            links.download_url(&identity(42), Some("bob"), 3).unwrap(),
            links.download_url(&identity(42), None, 3).unwrap(),
            links.download_url(&identity(42), Some("alice"), 2).unwrap(),
            links.download_url(&identity(42), Some("alice"), 0).unwrap(),
        ];
        for variant in &variants {
            assert_ne!(token_from_url(&base), token_from_url(variant));
        }
    }

    #[test]
    fn test_no_concatenation_collisions() {
        // "1" + "23" and "12" + "3" must not collide.
        let links = builder(None);
        let a = links.download_url(&identity(1), Some("23"), 0).unwrap();
        let b = links.download_url(&identity(12), Some("3"), 0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_round_trip() {
        let links = builder(None);
        let url = links.download_url(&identity(42), Some("alice"), 2).unwrap();
        let payload = links.verify(&token_from_url(&url).unwrap()).unwrap();

        assert_eq!(payload.action, LinkAction::Download);
        assert_eq!(payload.file_id, Some(42));
        assert_eq!(payload.user_id.as_deref(), Some("alice"));
        assert_eq!(payload.version, Some(2));
    }

    #[test]
    fn test_version_zero_is_omitted() {
        let links = builder(None);
        let url = links.download_url(&identity(42), None, 0).unwrap();
        let payload = links.verify(&token_from_url(&url).unwrap()).unwrap();
        assert_eq!(payload.version, None);
        assert_eq!(payload.user_id, None);
    }

    #[test]
    fn test_storage_url_rewrites_origin() {
        let url = builder(Some("http://cloud.internal:8080"))
            .download_url(&identity(42), None, 0)
            .unwrap();
        assert!(url.starts_with("http://cloud.internal:8080/apps/docserv/download?doc="));
    }

    #[test]
    fn test_empty_file_url() {
        let links = builder(None);
        let url = links.empty_file_url().unwrap();
        assert!(url.starts_with("https://cloud.example.com/apps/docserv/empty?doc="));
        let payload = links.verify(&token_from_url(&url).unwrap()).unwrap();
        assert_eq!(payload.action, LinkAction::Empty);
    }

    #[test]
    fn test_foreign_token_rejected() {
        let other = SecureLinkBuilder::new(
            &ServerConfig::default(),
            &DocumentServerConfig::default(),
            Arc::new(Crypt::from_secret("another-secret")),
        )
        .unwrap();
        let url = other.download_url(&identity(42), None, 0).unwrap();
        let err = builder(None).verify(&token_from_url(&url).unwrap()).unwrap_err();
        assert!(err.is(ErrorKind::Authentication));
    }

    #[test]
    fn test_route_path() {
        assert_eq!(builder(None).route_path(LinkAction::Download), "/apps/docserv/download");
    }

    fn builder_for(base_url: &str, app_route: &str) -> AppResult<SecureLinkBuilder> {
        let server = ServerConfig {
            base_url: base_url.to_string(),
            app_route: app_route.to_string(),
            ..Default::default()
        };
        SecureLinkBuilder::new(
            &server,
            &DocumentServerConfig::default(),
            Arc::new(Crypt::from_secret("link-secret")),
        )
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let err = builder_for("cloud.example.com", "/apps/docserv").unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[test]
    fn test_invalid_storage_url_rejected() {
        let err = SecureLinkBuilder::new(
            &ServerConfig::default(),
            &DocumentServerConfig {
                storage_url: Some("cloud.internal".to_string()),
                ..Default::default()
            },
            Arc::new(Crypt::from_secret("link-secret")),
        )
        .unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[test]
    fn test_empty_route_has_no_double_slash() {
        let links = builder_for("https://cloud.example.com", "").unwrap();
        let url = links.download_url(&identity(42), None, 0).unwrap();
        assert!(url.starts_with("https://cloud.example.com/download?doc="));
        assert_eq!(links.route_path(LinkAction::Download), "/download");
    }

    #[test]
    fn test_base_path_is_kept() {
        let links = builder_for("https://example.com/nextcloud", "apps/docserv/").unwrap();
        let url = links.empty_file_url().unwrap();
        assert!(url.starts_with("https://example.com/nextcloud/apps/docserv/empty?doc="));
    }

    #[test]
    fn test_token_from_url_ignores_other_parameters() {
        assert_eq!(
            token_from_url("https://h/apps/x/download?lang=en&doc=abc.def&docx=1").as_deref(),
            Some("abc.def")
        );
        assert_eq!(token_from_url("https://h/apps/x/download"), None);
        assert_eq!(token_from_url("not a url"), None);
    }
}
