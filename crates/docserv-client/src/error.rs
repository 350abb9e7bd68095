//! Error type for document service calls.
//!
//! Transport failures, HTTP status failures and the numeric error codes the
//! document service reports are consolidated into [`DocumentServiceError`],
//! which maps onto `docserv_core::error::AppError`.

use docserv_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Unified error type for document service calls.
#[derive(Debug, Error)]
pub enum DocumentServiceError {
    /// The request could not be sent or the response could not be read.
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Endpoint that was called.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{url} answered with HTTP {status}")]
    Status {
        /// Endpoint that was called.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The conversion service reported an error code.
    #[error("Error occurred in the document service: {}", conversion_error_message(*.code))]
    Conversion {
        /// Numeric conversion error code (negative).
        code: i32,
    },

    /// The command service reported an error code.
    #[error("Error occurred in the document service: {}", command_error_message(*.code))]
    Command {
        /// Numeric command error code (positive).
        code: i32,
    },

    /// A synchronous conversion came back without a result.
    #[error("Conversion is not finished ({percent}%)")]
    Unfinished {
        /// Progress reported by the service.
        percent: u32,
    },

    /// The service answered with an empty body.
    #[error("Empty response from {url}")]
    EmptyResponse {
        /// Endpoint that was called.
        url: String,
    },

    /// The service answered with something that is not the expected JSON.
    #[error("Invalid response from {url}: {reason}")]
    InvalidResponse {
        /// Endpoint that was called.
        url: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The outgoing request could not be signed.
    #[error("Failed to sign request: {0}")]
    Signing(String),
}

/// Human-readable text for a conversion service error code.
pub fn conversion_error_message(code: i32) -> &'static str {
    match code {
        -1 => "Unknown error",
        -2 => "Timeout conversion error",
        -3 => "Conversion error",
        -4 => "Error while downloading the document file to be converted",
        -5 => "Incorrect password",
        -6 => "Error while accessing the conversion result database",
        -7 => "Input error",
        -8 => "Invalid token",
        _ => "Error occurred in the document service",
    }
}

/// Human-readable text for a command service error code.
pub fn command_error_message(code: i32) -> &'static str {
    match code {
        1 => "Document key is missing or no document with such key could be found",
        2 => "Callback url not correct",
        3 => "Internal server error",
        4 => "No changes were applied to the document before the forcesave command was received",
        5 => "Command not correct",
        6 => "Invalid token",
        _ => "Unknown error",
    }
}

impl From<DocumentServiceError> for AppError {
    fn from(err: DocumentServiceError) -> Self {
        let message = err.to_string();
        match err {
            DocumentServiceError::Signing(_) => AppError::internal(message),
            DocumentServiceError::Transport { source, .. } => {
                AppError::with_source(ErrorKind::ExternalService, message, source)
            }
            _ => AppError::external_service(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_codes() {
        let err = DocumentServiceError::Conversion { code: -4 };
        assert!(err.to_string().starts_with("Error occurred in the document service: "));
        assert!(err.to_string().ends_with(conversion_error_message(-4)));
        assert_eq!(conversion_error_message(-99), "Error occurred in the document service");
    }

    #[test]
    fn test_command_codes() {
        assert_eq!(command_error_message(6), "Invalid token");
        assert_eq!(command_error_message(42), "Unknown error");
    }

    #[test]
    fn test_maps_to_external_service() {
        let app: AppError = DocumentServiceError::Status {
            url: "http://ds/healthcheck".to_string(),
            status: 502,
        }
        .into();
        assert!(app.is(ErrorKind::ExternalService));
        assert!(app.message.contains("502"));
    }
}
