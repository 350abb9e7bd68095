//! Storage metadata lookup.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::FileMeta;

/// Name of the per-user folder holding live files.
pub const FILES_FOLDER: &str = "files";

/// Name of the per-user folder holding retained versions.
pub const VERSIONS_FOLDER: &str = "files_versions";

/// Read-only view of the host's file tree.
///
/// Paths are absolute within the data tree: `/{owner}/files/...` for live
/// files and `/{owner}/files_versions/...` for retained versions.
#[async_trait]
pub trait FileLookup: Send + Sync + std::fmt::Debug + 'static {
    /// Metadata for any path in the tree. `None` if nothing is there.
    async fn file_info(&self, path: &str) -> AppResult<Option<FileMeta>>;

    /// Metadata for a path relative to the owner's live file area.
    async fn user_file(&self, owner_id: &str, relative_path: &str) -> AppResult<Option<FileMeta>> {
        let path = format!(
            "/{owner_id}/{FILES_FOLDER}/{}",
            relative_path.trim_start_matches('/')
        );
        self.file_info(&path).await
    }
}

/// Root of the owner's version area, without a trailing slash.
pub fn version_area_root(owner_id: &str) -> String {
    format!("/{owner_id}/{VERSIONS_FOLDER}")
}

/// Path of `path` relative to the owner's version area, if it lies inside it.
pub fn relative_to_version_area<'a>(owner_id: &str, path: &'a str) -> Option<&'a str> {
    let root = version_area_root(owner_id);
    path.strip_prefix(root.as_str())
        .filter(|rest| rest.starts_with('/'))
}
