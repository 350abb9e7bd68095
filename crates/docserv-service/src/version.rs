//! Resolve a path, possibly pointing at a retained version, to the live file,
//! its version ordinal, and a revision key.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use docserv_core::error::AppError;
use docserv_core::traits::storage::relative_to_version_area;
use docserv_core::traits::{FileLookup, VersionHistory};
use docserv_core::types::{FileIdentity, FileMeta, RevisionKey, VersionReference};

use crate::format;

/// Why no preview or conversion can be produced for a path.
///
/// This is an expected outcome, not a fault; callers log it and degrade to
/// "no preview".
#[derive(Debug, Error)]
pub enum NotAvailable {
    /// Nothing exists at the path.
    #[error("No file at {path}")]
    FileMissing {
        /// The path that was looked up.
        path: String,
    },

    /// A version was requested but this installation keeps no history.
    #[error("Version history is not available")]
    VersioningUnavailable,

    /// A versioned path does not lie in its owner's version area.
    #[error("{path} is not a retained version")]
    NotInVersionArea {
        /// The path that was looked up.
        path: String,
    },

    /// The version token matches no retained version of the file.
    #[error("Version {token} of {path} is not retained")]
    UnknownVersion {
        /// Live file path.
        path: String,
        /// Requested revision token.
        token: String,
    },

    /// The file format cannot be previewed.
    #[error("Unsupported extension '{extension}'")]
    UnsupportedExtension {
        /// Lowercase extension, empty when the file has none.
        extension: String,
    },

    /// Metadata could not be read.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] AppError),
}

/// A path resolved to something the document service can be pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// The live file.
    pub identity: FileIdentity,
    /// Revision key of the requested content state.
    pub revision_key: RevisionKey,
    /// Version ordinal; 0 for the live file.
    ///
    /// Counts from 1 at the oldest retained version, so the newest version
    /// has the highest ordinal. The download callback must map ordinals back
    /// to versions in the same order.
    pub version: u32,
}

impl ResolvedFile {
    /// Lowercase extension of the file.
    pub fn extension(&self) -> &str {
        &self.identity.extension
    }
}

/// Maps paths to live files and version ordinals.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    /// Storage metadata lookup.
    files: Arc<dyn FileLookup>,
    /// Version history provider, when the host retains versions.
    history: Option<Arc<dyn VersionHistory>>,
    /// Installation id mixed into revision keys.
    instance_id: String,
}

impl VersionResolver {
    /// Creates a resolver.
    pub fn new(
        files: Arc<dyn FileLookup>,
        history: Option<Arc<dyn VersionHistory>>,
        instance_id: impl Into<String>,
    ) -> Self {
        Self {
            files,
            history,
            instance_id: instance_id.into(),
        }
    }

    /// Resolve a path to the live file, version ordinal and revision key.
    pub async fn resolve(&self, path: &str) -> Result<ResolvedFile, NotAvailable> {
        let info = self
            .files
            .file_info(path)
            .await?
            .ok_or_else(|| NotAvailable::FileMissing {
                path: path.to_string(),
            })?;

        let reference = VersionReference::parse(path);
        let (file, version, revision) = if reference.is_versioned() {
            let (file, version, token) = self.resolve_version(&info).await?;
            (file, version, Some(token))
        } else {
            (info, 0, None)
        };

        let extension = file.extension().unwrap_or_default();
        if !format::is_supported(&extension) {
            return Err(NotAvailable::UnsupportedExtension { extension });
        }

        let revision_key = match &revision {
            Some(token) => RevisionKey::for_version(&self.instance_id, file.id, token),
            None => RevisionKey::for_current(&self.instance_id, file.id, &file.etag),
        };

        debug!(
            path,
            file_id = file.id,
            version,
            key = %revision_key,
            "Resolved file"
        );

        Ok(ResolvedFile {
            identity: FileIdentity::from_meta(&file, extension),
            revision_key,
            version,
        })
    }

    /// Map a retained version back to its live file and count its ordinal.
    async fn resolve_version(
        &self,
        info: &FileMeta,
    ) -> Result<(FileMeta, u32, String), NotAvailable> {
        let history = self
            .history
            .as_ref()
            .ok_or(NotAvailable::VersioningUnavailable)?;

        let owner = info.owner_id.as_str();
        let not_in_area = || NotAvailable::NotInVersionArea {
            path: info.path.clone(),
        };

        let relative = relative_to_version_area(owner, &info.path).ok_or_else(not_in_area)?;
        let VersionReference {
            base_path,
            version_token,
        } = VersionReference::parse(relative);
        let token = version_token.ok_or_else(not_in_area)?;

        let source = self
            .files
            .user_file(owner, &base_path)
            .await?
            .ok_or_else(|| NotAvailable::FileMissing {
                path: base_path.clone(),
            })?;

        let versions = history.versions(owner, &source).await?;

        // History arrives newest first; ordinals count from the oldest.
        let ordinal = versions
            .iter()
            .rev()
            .position(|v| v.revision_id == token)
            .map(|index| index as u32 + 1)
            .ok_or_else(|| NotAvailable::UnknownVersion {
                path: source.path.clone(),
                token: token.clone(),
            })?;

        Ok((source, ordinal, token))
    }
}
