//! Request-scoped domain types.
//!
//! Nothing in here is persisted; values are built fresh for each preview
//! or link request.

pub mod conversion;
pub mod file;
pub mod link;
pub mod revision;
pub mod version;

pub use conversion::{ConversionRequest, ThumbnailOptions};
pub use file::{FileIdentity, FileMeta};
pub use link::{LinkAction, SignedUrlRequest};
pub use revision::RevisionKey;
pub use version::{VersionDescriptor, VersionReference};
