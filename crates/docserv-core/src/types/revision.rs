//! Revision keys handed to the document service for staleness detection.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Longest key the document service accepts in its revision field.
pub const MAX_REVISION_KEY_LEN: usize = 20;

/// Opaque identifier of one content state of a file.
///
/// Stable for unchanged content; paired with the file id downstream, so it
/// only needs to separate states of the same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionKey(String);

impl RevisionKey {
    /// Key for the live content of a file.
    pub fn for_current(instance_id: &str, file_id: i64, etag: &str) -> Self {
        Self::normalize(&format!("{instance_id}_{file_id}_{etag}"))
    }

    /// Key for a retained version of a file.
    pub fn for_version(instance_id: &str, file_id: i64, revision_id: &str) -> Self {
        Self::normalize(&format!("{instance_id}_{file_id}_v{revision_id}"))
    }

    /// Make an arbitrary fingerprint safe for the revision field.
    ///
    /// Long fingerprints are replaced by a digest prefix, characters outside
    /// `[0-9A-Za-z._=-]` become `_`, and the result is capped in length.
    pub fn normalize(fingerprint: &str) -> Self {
        let source = if fingerprint.len() > MAX_REVISION_KEY_LEN {
            hex::encode(Sha256::digest(fingerprint.as_bytes()))
        } else {
            fingerprint.to_string()
        };

        let key: String = source
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '=') {
                    c
                } else {
                    '_'
                }
            })
            .take(MAX_REVISION_KEY_LEN)
            .collect();

        Self(key)
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
