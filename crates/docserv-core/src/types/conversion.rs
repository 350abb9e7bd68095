//! Requests sent to the document service's conversion endpoint.

use serde::{Deserialize, Serialize};

use super::revision::RevisionKey;

/// Thumbnail rendering options understood by the conversion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailOptions {
    /// Aspect mode; 1 keeps the page proportions inside the box.
    pub aspect: u8,
    /// Render only the first page.
    pub first: bool,
    /// Box width in pixels.
    pub width: u32,
    /// Box height in pixels.
    pub height: u32,
}

impl ThumbnailOptions {
    /// First page, proportions kept, fitted into `width` x `height`.
    pub fn fit(width: u32, height: u32) -> Self {
        Self {
            aspect: 1,
            first: true,
            width,
            height,
        }
    }
}

/// One conversion job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Signed URL the document service fetches the source from.
    pub url: String,
    /// Source extension without the dot.
    pub from_extension: String,
    /// Target extension without the dot.
    pub to_extension: String,
    /// Revision key of the source content.
    pub key: RevisionKey,
    /// Display title of the source document.
    pub title: String,
    /// Thumbnail options, when converting to an image.
    pub thumbnail: Option<ThumbnailOptions>,
}
