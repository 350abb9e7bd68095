//! # docserv-core
//!
//! Core crate for DocServ, the document-service integration layer.
//! Contains configuration schemas, collaborator traits, request-scoped
//! domain types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DocServ crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
