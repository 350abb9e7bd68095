//! # docserv-storage
//!
//! Filesystem-backed implementations of the storage metadata lookup and the
//! version history provider, over the host data layout
//! `{root}/{user}/files/...` and `{root}/{user}/files_versions/...`.

pub mod local;

pub use local::LocalFileStore;
