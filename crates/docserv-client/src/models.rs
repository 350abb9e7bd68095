//! Wire shapes of the document service endpoints.

use serde::{Deserialize, Serialize};

use docserv_core::types::{ConversionRequest, ThumbnailOptions};

/// Body of a `ConvertService.ashx` request.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertBody {
    /// Always `false`: the integration waits for the result.
    #[serde(rename = "async")]
    pub is_async: bool,
    /// URL the service downloads the source from.
    pub url: String,
    /// Target extension.
    pub outputtype: String,
    /// Source extension.
    pub filetype: String,
    /// Document title.
    pub title: String,
    /// Revision key of the source content.
    pub key: String,
    /// Thumbnail options, for image targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ThumbnailOptions>,
}

impl From<&ConversionRequest> for ConvertBody {
    fn from(req: &ConversionRequest) -> Self {
        Self {
            is_async: false,
            url: req.url.clone(),
            outputtype: req.to_extension.trim_start_matches('.').to_string(),
            filetype: req.from_extension.trim_start_matches('.').to_string(),
            title: req.title.clone(),
            key: req.key.to_string(),
            thumbnail: req.thumbnail.clone(),
        }
    }
}

/// Response of `ConvertService.ashx`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    /// Whether the conversion finished.
    #[serde(default)]
    pub end_convert: bool,
    /// Where to download the result from.
    #[serde(default)]
    pub file_url: Option<String>,
    /// Progress percentage.
    #[serde(default)]
    pub percent: u32,
    /// Error code, when the conversion failed.
    #[serde(default)]
    pub error: Option<i32>,
}

/// Body of a `CommandService.ashx` request.
#[derive(Debug, Clone, Serialize)]
pub struct CommandBody {
    /// Command name.
    pub c: String,
}

/// Response of `CommandService.ashx`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandResponse {
    /// 0 on success, otherwise a command error code.
    #[serde(default)]
    pub error: i32,
    /// Service version, for the `version` command.
    #[serde(default)]
    pub version: Option<String>,
}
