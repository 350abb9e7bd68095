//! Thumbnails rendered by the document service.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use docserv_core::config::PreviewConfig;
use docserv_core::result::AppResult;
use docserv_core::traits::ConversionClient;
use docserv_core::types::{ConversionRequest, ThumbnailOptions, VersionReference};

use crate::format;
use crate::link::SecureLinkBuilder;
use crate::version::VersionResolver;

/// Image format requested for thumbnails.
pub const THUMBNAIL_EXTENSION: &str = "jpeg";

/// A rendered thumbnail.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    /// Image bytes as returned by the document service.
    pub data: Bytes,
    /// MIME type.
    pub content_type: String,
    /// Requested bounding box width.
    pub width: u32,
    /// Requested bounding box height.
    pub height: u32,
}

/// Produces previews of office documents, including retained versions.
#[derive(Debug, Clone)]
pub struct PreviewService {
    /// Path resolution.
    resolver: VersionResolver,
    /// Callback link construction.
    links: SecureLinkBuilder,
    /// Document service.
    converter: Arc<dyn ConversionClient>,
    /// Preview settings.
    config: PreviewConfig,
}

impl PreviewService {
    /// Creates a new preview service.
    pub fn new(
        resolver: VersionResolver,
        links: SecureLinkBuilder,
        converter: Arc<dyn ConversionClient>,
        config: PreviewConfig,
    ) -> Self {
        Self {
            resolver,
            links,
            converter,
            config,
        }
    }

    /// Cheap format check: whether `path` names a previewable format.
    pub fn is_available(&self, path: &str) -> bool {
        let base = VersionReference::parse(path).base_path;
        self.config.enabled
            && format::extension_of(&base).is_some_and(|ext| format::is_supported(&ext))
    }

    /// Thumbnail of `path` fitted into `max_x` x `max_y`, or `None` when no
    /// preview can be produced. Zero sizes fall back to the configured default.
    pub async fn thumbnail(&self, path: &str, max_x: u32, max_y: u32) -> Option<Thumbnail> {
        match self.generate(path, max_x, max_y).await {
            Ok(thumbnail) => thumbnail,
            Err(e) => {
                warn!(path, error = %e, "Preview generation failed");
                None
            }
        }
    }

    /// Like [`PreviewService::thumbnail`], but transport failures are returned.
    pub async fn generate(
        &self,
        path: &str,
        max_x: u32,
        max_y: u32,
    ) -> AppResult<Option<Thumbnail>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let resolved = match self.resolver.resolve(path).await {
            Ok(resolved) => resolved,
            Err(reason) => {
                debug!(path, %reason, "No preview");
                return Ok(None);
            }
        };

        let width = if max_x == 0 { self.config.default_size } else { max_x };
        let height = if max_y == 0 { self.config.default_size } else { max_y };

        let url = self.links.download_url(
            &resolved.identity,
            Some(&resolved.identity.owner_id),
            resolved.version,
        )?;

        let request = ConversionRequest {
            url,
            from_extension: resolved.extension().to_string(),
            to_extension: THUMBNAIL_EXTENSION.to_string(),
            key: resolved.revision_key.clone(),
            title: resolved.identity.file_name().to_string(),
            thumbnail: Some(ThumbnailOptions::fit(width, height)),
        };

        let data = self.converter.convert(&request).await?;
        if data.is_empty() {
            warn!(path, "Document service returned an empty thumbnail");
            return Ok(None);
        }

        debug!(
            path,
            file_id = resolved.identity.file_id,
            version = resolved.version,
            bytes = data.len(),
            "Thumbnail generated"
        );

        Ok(Some(Thumbnail {
            data,
            content_type: format!("image/{THUMBNAIL_EXTENSION}"),
            width,
            height,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use docserv_auth::Crypt;
    use docserv_core::config::{DocumentServerConfig, ServerConfig};
    use docserv_core::error::AppError;
    use docserv_storage::LocalFileStore;

    use crate::link::token_from_url;

    use super::*;

    #[derive(Debug, Default)]
    struct RecordingConverter {
        requests: Mutex<Vec<ConversionRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl ConversionClient for RecordingConverter {
        async fn convert(&self, request: &ConversionRequest) -> AppResult<Bytes> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                Err(AppError::external_service("Conversion error"))
            } else {
                Ok(Bytes::from_static(b"\xFF\xD8\xFFjpeg"))
            }
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        service: PreviewService,
        converter: Arc<RecordingConverter>,
        links: SecureLinkBuilder,
    }

    fn fixture(fail: bool, enabled: bool) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let write = |rel: &str, content: &str| {
            let path = dir.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        };
        write("alice/files/report.docx", "live");
        write("alice/files/scan.pdf", "pdf");
        write("alice/files_versions/report.docx.v100", "old");
        write("alice/files_versions/report.docx.v200", "older");

        let store = Arc::new(LocalFileStore::new(dir.path()));
        let resolver = VersionResolver::new(
            store.clone(),
            Some(store as Arc<dyn docserv_core::traits::VersionHistory>),
            "inst",
        );
        let links = SecureLinkBuilder::new(
            &ServerConfig::default(),
            &DocumentServerConfig::default(),
            Arc::new(Crypt::from_secret("secret")),
        )
        .unwrap();
        let converter = Arc::new(RecordingConverter {
            fail,
            ..Default::default()
        });
        let service = PreviewService::new(
            resolver,
            links.clone(),
            converter.clone(),
            PreviewConfig {
                enabled,
                default_size: 256,
            },
        );

        Fixture {
            _dir: dir,
            service,
            converter,
            links,
        }
    }

    #[tokio::test]
    async fn test_thumbnail_of_live_file() {
        let f = fixture(false, true);
        let thumb = f
            .service
            .thumbnail("/alice/files/report.docx", 128, 64)
            .await
            .unwrap();

        assert_eq!(thumb.content_type, "image/jpeg");
        assert_eq!((thumb.width, thumb.height), (128, 64));

        let requests = f.converter.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.from_extension, "docx");
        assert_eq!(request.to_extension, "jpeg");
        assert_eq!(request.title, "report.docx");
        assert_eq!(request.thumbnail, Some(ThumbnailOptions::fit(128, 64)));

        let payload = f.links.verify(&token_from_url(&request.url).unwrap()).unwrap();
        assert_eq!(payload.user_id.as_deref(), Some("alice"));
        assert_eq!(payload.version, None);
    }

    #[tokio::test]
    async fn test_thumbnail_of_version_carries_ordinal() {
        let f = fixture(false, true);
        f.service
            .thumbnail("/alice/files_versions/report.docx.v200", 0, 0)
            .await
            .unwrap();

        let requests = f.converter.requests.lock().unwrap();
        let payload = f
            .links
            .verify(&token_from_url(&requests[0].url).unwrap())
            .unwrap();
        assert_eq!(payload.version, Some(2));
        assert_eq!(requests[0].thumbnail, Some(ThumbnailOptions::fit(256, 256)));
    }

    #[tokio::test]
    async fn test_unsupported_format_skips_conversion() {
        let f = fixture(false, true);
        assert!(f.service.thumbnail("/alice/files/scan.pdf", 64, 64).await.is_none());
        assert!(f.converter.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_conversion_failure_degrades() {
        let f = fixture(true, true);
        assert!(f.service.thumbnail("/alice/files/report.docx", 64, 64).await.is_none());
        assert!(f.service.generate("/alice/files/report.docx", 64, 64).await.is_err());
    }

    #[tokio::test]
    async fn test_disabled_previews() {
        let f = fixture(false, false);
        assert!(f.service.thumbnail("/alice/files/report.docx", 64, 64).await.is_none());
        assert!(!f.service.is_available("/alice/files/report.docx"));
    }

    #[test]
    fn test_is_available() {
        let f = fixture(false, true);
        assert!(f.service.is_available("/alice/files/report.docx"));
        assert!(f.service.is_available("/alice/files_versions/report.docx.v100"));
        assert!(!f.service.is_available("/alice/files/scan.pdf"));
    }
}
