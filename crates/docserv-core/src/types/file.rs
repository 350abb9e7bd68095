//! File metadata and resolved file identity.

use serde::{Deserialize, Serialize};

/// Metadata reported by the storage lookup for a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Numeric file identifier, stable across content changes.
    pub id: i64,
    /// Absolute path within the host data tree (`/{owner}/files/...`).
    pub path: String,
    /// File name including extension.
    pub name: String,
    /// Owner user id.
    pub owner_id: String,
    /// Content fingerprint; changes whenever the content changes.
    pub etag: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileMeta {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name && !ext.is_empty())
            .map(|ext| ext.to_lowercase())
    }
}

/// The file a preview or link request is about, once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIdentity {
    /// Numeric file identifier.
    pub file_id: i64,
    /// Path of the live file.
    pub path: String,
    /// Lowercase extension without the dot.
    pub extension: String,
    /// Owner user id.
    pub owner_id: String,
}

impl FileIdentity {
    /// Build an identity from storage metadata and an already checked extension.
    pub fn from_meta(meta: &FileMeta, extension: impl Into<String>) -> Self {
        Self {
            file_id: meta.id,
            path: meta.path.clone(),
            extension: extension.into(),
            owner_id: meta.owner_id.clone(),
        }
    }

    /// File name component of the path.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str) -> FileMeta {
        FileMeta {
            id: 7,
            path: format!("/alice/files/{name}"),
            name: name.to_string(),
            owner_id: "alice".to_string(),
            etag: "e1".to_string(),
            size: 10,
        }
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(meta("Report.DOCX").extension().as_deref(), Some("docx"));
        assert_eq!(meta("README").extension(), None);
        assert_eq!(meta("trailing.").extension(), None);
    }

    #[test]
    fn test_identity_file_name() {
        let identity = FileIdentity::from_meta(&meta("report.docx"), "docx");
        assert_eq!(identity.file_name(), "report.docx");
        assert_eq!(identity.file_id, 7);
    }
}
