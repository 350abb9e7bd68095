//! # docserv-auth
//!
//! Token handling for DocServ.
//!
//! ## Modules
//!
//! - `crypt`: keyed-hash tokens for callback links (HS256 over the link payload)
//! - `service_token`: signatures attached to requests sent to the document service

pub mod crypt;
pub mod service_token;

pub use crypt::Crypt;
pub use service_token::ServiceTokenEncoder;
