//! # docserv-service
//!
//! The integration logic between the host platform and the document
//! service. All collaborators are passed in explicitly.
//!
//! ## Modules
//!
//! - `format`: which source formats can be previewed
//! - `version`: resolve a (possibly historical) path to a file, version ordinal and revision key
//! - `link`: signed callback URLs the document service fetches files from
//! - `preview`: thumbnails rendered by the document service
//! - `check`: end-to-end connectivity test against the document service
//! - `viewer`: assets and content-security-policy additions for the host viewer

pub mod check;
pub mod format;
pub mod link;
pub mod preview;
pub mod version;
pub mod viewer;

pub use check::{CheckReport, ConnectivityCheck};
pub use link::SecureLinkBuilder;
pub use preview::{PreviewService, Thumbnail};
pub use version::{NotAvailable, ResolvedFile, VersionResolver};
pub use viewer::{ViewerHook, ViewerInjection, ViewerUser};
