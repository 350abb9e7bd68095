//! Collaborator traits defined in `docserv-core` and implemented by other crates.
//!
//! Every collaborator is passed explicitly to the component that needs it;
//! nothing is looked up from a global container.

pub mod conversion;
pub mod signer;
pub mod storage;
pub mod versions;

pub use conversion::ConversionClient;
pub use signer::TokenSigner;
pub use storage::FileLookup;
pub use versions::VersionHistory;
