//! Payload of signed callback links.

use serde::{Deserialize, Serialize};

/// What the holder of a callback link may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkAction {
    /// Fetch the bytes of a file (or one of its versions).
    Download,
    /// Fetch the built-in empty document used by the connectivity check.
    Empty,
}

impl LinkAction {
    /// Callback route segment serving this action.
    pub fn route(&self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Empty => "empty",
        }
    }
}

/// Everything a callback link authorizes.
///
/// Field order is fixed and absent fields are skipped, so serialization is
/// deterministic and every authorizing field is covered by the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlRequest {
    /// Requested action.
    pub action: LinkAction,
    /// File being fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<i64>,
    /// User on whose behalf the file is fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// 1-based version ordinal; absent for the live file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl SignedUrlRequest {
    /// Download request for a file. A `version` of 0 means the live file.
    pub fn download(file_id: i64, user_id: Option<&str>, version: u32) -> Self {
        Self {
            action: LinkAction::Download,
            file_id: Some(file_id),
            user_id: user_id.map(String::from),
            version: (version > 0).then_some(version),
        }
    }

    /// Request for the empty test document.
    pub fn empty() -> Self {
        Self {
            action: LinkAction::Empty,
            file_id: None,
            user_id: None,
            version: None,
        }
    }
}
