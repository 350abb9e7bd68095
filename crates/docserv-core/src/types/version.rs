//! Version-marker path convention and version history entries.
//!
//! Retained versions live next to each other in the owner's version area
//! under the live file name plus a `.v<revision>` suffix, for example
//! `/alice/files_versions/docs/report.docx.v1589478394`.

use serde::{Deserialize, Serialize};

/// Marker separating the base path from the revision token.
const VERSION_MARKER: &str = ".v";

/// A path split into its base part and an optional revision token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionReference {
    /// Path without the version marker.
    pub base_path: String,
    /// Revision token taken from the marker, if the path carries one.
    pub version_token: Option<String>,
}

impl VersionReference {
    /// Split a path on the trailing `.v<digits>` marker.
    ///
    /// Paths without a marker, with an empty base, or with a non-numeric
    /// token come back unchanged with no token.
    pub fn parse(path: &str) -> Self {
        if let Some((base, token)) = path.rsplit_once(VERSION_MARKER) {
            let base_name = base.rsplit('/').next().unwrap_or(base);
            if !base_name.is_empty()
                && !token.is_empty()
                && token.bytes().all(|b| b.is_ascii_digit())
            {
                return Self {
                    base_path: base.to_string(),
                    version_token: Some(token.to_string()),
                };
            }
        }

        Self {
            base_path: path.to_string(),
            version_token: None,
        }
    }

    /// Whether the path refers to a historical version.
    pub fn is_versioned(&self) -> bool {
        self.version_token.is_some()
    }
}

/// One retained version of a file, as reported by the history provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDescriptor {
    /// Storage revision identifier (the token used in version-area paths).
    pub revision_id: String,
    /// Size of the retained content in bytes.
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_has_no_token() {
        let r = VersionReference::parse("/alice/files/report.docx");
        assert_eq!(r.base_path, "/alice/files/report.docx");
        assert!(!r.is_versioned());
    }

    #[test]
    fn test_marker_is_split() {
        let r = VersionReference::parse("/alice/files_versions/report.docx.v1589478394");
        assert_eq!(r.base_path, "/alice/files_versions/report.docx");
        assert_eq!(r.version_token.as_deref(), Some("1589478394"));
    }

    #[test]
    fn test_non_numeric_token_is_ignored() {
        let r = VersionReference::parse("/alice/files/archive.vtx");
        assert!(!r.is_versioned());
        assert_eq!(r.base_path, "/alice/files/archive.vtx");
    }

    #[test]
    fn test_empty_base_is_ignored() {
        let r = VersionReference::parse("/alice/files/.v12");
        assert!(!r.is_versioned());
    }

    #[test]
    fn test_only_last_marker_counts() {
        let r = VersionReference::parse("notes.v2.docx.v42");
        assert_eq!(r.base_path, "notes.v2.docx");
        assert_eq!(r.version_token.as_deref(), Some("42"));
    }
}
