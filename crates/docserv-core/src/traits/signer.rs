//! Keyed-hash token service.

use crate::result::AppResult;
use crate::types::SignedUrlRequest;

/// Turns callback link payloads into opaque tokens and back.
///
/// Signing must be deterministic: the same payload always yields the same
/// token, and a token produced by [`TokenSigner::sign`] must always pass
/// [`TokenSigner::verify`] unmodified.
pub trait TokenSigner: Send + Sync + std::fmt::Debug + 'static {
    /// Produce the token for a payload.
    fn sign(&self, request: &SignedUrlRequest) -> AppResult<String>;

    /// Check a token and recover its payload.
    fn verify(&self, token: &str) -> AppResult<SignedUrlRequest>;
}
