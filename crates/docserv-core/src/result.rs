//! Convenience result type alias for DocServ.

use crate::error::AppError;

/// A specialized `Result` type for DocServ operations.
pub type AppResult<T> = Result<T, AppError>;
