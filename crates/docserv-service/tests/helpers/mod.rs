//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use docserv_auth::Crypt;
use docserv_core::config::AppConfig;
use docserv_core::traits::VersionHistory;
use docserv_service::{SecureLinkBuilder, VersionResolver};
use docserv_storage::LocalFileStore;

/// A data root on disk with the services wired over it.
pub struct TestEnv {
    /// Keeps the data root alive.
    pub dir: TempDir,
    /// Configuration the services were built from.
    pub config: AppConfig,
    /// Storage over `dir`.
    pub store: Arc<LocalFileStore>,
    /// Path resolution.
    pub resolver: VersionResolver,
    /// Callback links.
    pub links: SecureLinkBuilder,
}

impl TestEnv {
    /// Create an empty data root.
    pub fn new() -> Self {
        Self::with_versions(true)
    }

    /// Create an empty data root, optionally without version history.
    pub fn with_versions(versions_enabled: bool) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create data root");

        let mut config = AppConfig::default();
        config.server.base_url = "https://cloud.example.com/".to_string();
        config.server.instance_id = "itest".to_string();
        config.auth.secret_key = "integration-secret".to_string();
        config.storage.data_root = dir.path().to_string_lossy().into_owned();
        config.storage.versions_enabled = versions_enabled;

        let store = Arc::new(LocalFileStore::new(dir.path()));
        let history = versions_enabled.then(|| store.clone() as Arc<dyn VersionHistory>);
        let resolver = VersionResolver::new(store.clone(), history, &config.server.instance_id);
        let links = Self::links_for(&config);

        Self {
            dir,
            config,
            store,
            resolver,
            links,
        }
    }

    /// A link builder with the same configuration but its own signer.
    pub fn links_for(config: &AppConfig) -> SecureLinkBuilder {
        SecureLinkBuilder::new(
            &config.server,
            &config.document_server,
            Arc::new(Crypt::new(&config.auth)),
        )
        .expect("Failed to build link builder")
    }

    /// Write a file below the data root.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// The data root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
