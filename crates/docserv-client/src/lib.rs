//! # docserv-client
//!
//! Thin HTTP client for the remote document service. Covers the three
//! endpoints the integration needs:
//!
//! - `healthcheck`: liveness check
//! - `coauthoring/CommandService.ashx`: command service (`version`)
//! - `ConvertService.ashx`: synchronous conversion, followed by a download
//!   of the produced file
//!
//! Request signing with the shared secret is applied automatically when the
//! document service is configured with one.

pub mod client;
pub mod error;
pub mod models;

pub use client::DocumentServiceClient;
pub use error::DocumentServiceError;
