//! Local filesystem data tree.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;

use docserv_core::error::{AppError, ErrorKind};
use docserv_core::result::AppResult;
use docserv_core::traits::storage::{FILES_FOLDER, VERSIONS_FOLDER};
use docserv_core::traits::{FileLookup, VersionHistory};
use docserv_core::types::{FileMeta, VersionDescriptor, VersionReference};

/// Host data tree on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    /// Directory containing one sub-directory per user.
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root: root_path.into(),
        }
    }

    /// Root directory of the data tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a tree path onto the filesystem, refusing to leave the root.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let clean = Path::new(path.trim_start_matches('/'));
        if clean
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(AppError::validation(format!("Path escapes data root: {path}")));
        }
        Ok(self.root.join(clean))
    }

    /// Read a file's content and fingerprint it.
    async fn etag(&self, full_path: &Path, path: &str) -> AppResult<String> {
        let data = fs::read(full_path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to read file: {path}"), e)
        })?;
        let digest = hex::encode(Sha256::digest(&data));
        Ok(digest[..32].to_string())
    }
}

#[async_trait]
impl FileLookup for LocalFileStore {
    async fn file_info(&self, path: &str) -> AppResult<Option<FileMeta>> {
        let full_path = self.resolve(path)?;

        let metadata = match fs::metadata(&full_path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to stat: {path}"),
                    e,
                ));
            }
        };

        if !metadata.is_file() {
            return Ok(None);
        }

        let normalized = format!("/{}", path.trim_start_matches('/'));
        let owner_id = normalized
            .split('/')
            .nth(1)
            .unwrap_or_default()
            .to_string();
        let name = normalized
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        let meta = FileMeta {
            id: file_id(&metadata, &normalized),
            etag: self.etag(&full_path, path).await?,
            path: normalized,
            name,
            owner_id,
            size: metadata.len(),
        };

        debug!(path = %meta.path, id = meta.id, "Looked up file");
        Ok(Some(meta))
    }
}

#[async_trait]
impl VersionHistory for LocalFileStore {
    async fn versions(&self, owner_id: &str, file: &FileMeta) -> AppResult<Vec<VersionDescriptor>> {
        let files_root = format!("/{owner_id}/{FILES_FOLDER}/");
        let relative = file.path.strip_prefix(&files_root).ok_or_else(|| {
            AppError::validation(format!("File is not in the user's file area: {}", file.path))
        })?;

        let relative_dir = relative.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        let version_dir = self.resolve(&format!("/{owner_id}/{VERSIONS_FOLDER}/{relative_dir}"))?;

        let mut entries = match fs::read_dir(&version_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to list versions of {}", file.path),
                    e,
                ));
            }
        };

        let mut versions = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let entry_name = entry.file_name().to_string_lossy().into_owned();
            let reference = VersionReference::parse(&entry_name);
            let Some(token) = reference.version_token else {
                continue;
            };
            if reference.base_path != file.name {
                continue;
            }
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            versions.push(VersionDescriptor {
                revision_id: token,
                size: metadata.len(),
            });
        }

        // Revision ids are timestamps; newest first.
        versions.sort_by(|a, b| {
            let a_num = a.revision_id.parse::<u64>().unwrap_or(0);
            let b_num = b.revision_id.parse::<u64>().unwrap_or(0);
            b_num.cmp(&a_num)
        });

        debug!(path = %file.path, count = versions.len(), "Listed versions");
        Ok(versions)
    }
}

#[cfg(unix)]
fn file_id(metadata: &std::fs::Metadata, _path: &str) -> i64 {
    use std::os::unix::fs::MetadataExt;
    (metadata.ino() & i64::MAX as u64) as i64
}

#[cfg(not(unix))]
fn file_id(_metadata: &std::fs::Metadata, path: &str) -> i64 {
    let digest = Sha256::digest(path.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(bytes) & i64::MAX as u64) as i64
}
