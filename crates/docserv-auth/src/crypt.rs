//! Keyed-hash tokens for callback links.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use docserv_core::config::AuthConfig;
use docserv_core::error::AppError;
use docserv_core::result::AppResult;
use docserv_core::traits::TokenSigner;
use docserv_core::types::SignedUrlRequest;

/// Signs and verifies callback link payloads with the installation secret.
///
/// Tokens carry no timestamps, so the same payload always produces the
/// same token.
#[derive(Clone)]
pub struct Crypt {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Validation rules (signature only).
    validation: Validation,
}

impl std::fmt::Debug for Crypt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crypt").finish_non_exhaustive()
    }
}

impl Crypt {
    /// Creates a signer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_secret(&config.secret_key)
    }

    /// Creates a signer from a raw secret.
    pub fn from_secret(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenSigner for Crypt {
    fn sign(&self, request: &SignedUrlRequest) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), request, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign link payload: {e}")))
    }

    fn verify(&self, token: &str) -> AppResult<SignedUrlRequest> {
        let data = decode::<SignedUrlRequest>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid link signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid link token format")
                }
                _ => AppError::authentication(format!("Link token validation failed: {e}")),
            })?;

        tracing::trace!(action = ?data.claims.action, "Verified link token");

        Ok(data.claims)
    }
}
