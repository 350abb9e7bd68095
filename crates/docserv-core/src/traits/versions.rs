//! Version history provider.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{FileMeta, VersionDescriptor};

/// Lists the retained versions of a live file.
#[async_trait]
pub trait VersionHistory: Send + Sync + std::fmt::Debug + 'static {
    /// Versions of `file` owned by `owner_id`, newest first.
    async fn versions(&self, owner_id: &str, file: &FileMeta) -> AppResult<Vec<VersionDescriptor>>;
}
