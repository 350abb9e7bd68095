//! Document conversion client.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::ConversionRequest;

/// Talks to the remote document service.
#[async_trait]
pub trait ConversionClient: Send + Sync + std::fmt::Debug + 'static {
    /// Convert the document behind `request.url` and return the result bytes.
    async fn convert(&self, request: &ConversionRequest) -> AppResult<Bytes>;
}
