//! Signatures attached to requests sent to the document service.
//!
//! When the document service is configured with a shared secret it expects
//! the JSON body to carry a `token` field signed over the body itself, and
//! a header token signed over `{"payload": body}`.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Value, json};

use docserv_core::error::AppError;
use docserv_core::result::AppResult;

/// Signs outgoing document service request bodies.
#[derive(Clone)]
pub struct ServiceTokenEncoder {
    /// HMAC key shared with the document service.
    encoding_key: EncodingKey,
    /// Same key, for checking tokens the service echoes back.
    decoding_key: DecodingKey,
    /// Name of the header carrying the bearer token.
    header_name: String,
}

impl std::fmt::Debug for ServiceTokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceTokenEncoder")
            .field("header_name", &self.header_name)
            .finish_non_exhaustive()
    }
}

impl ServiceTokenEncoder {
    /// Creates an encoder for the given secret and header name.
    pub fn new(secret: &str, header_name: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            header_name: header_name.to_string(),
        }
    }

    /// Name of the header the bearer token goes into.
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Token embedded in the request body.
    pub fn body_token(&self, body: &Value) -> AppResult<String> {
        self.encode_value(body)
    }

    /// Header value (`Bearer <token>`) wrapping the body as `payload`.
    pub fn header_value(&self, body: &Value) -> AppResult<String> {
        let token = self.encode_value(&json!({ "payload": body }))?;
        Ok(format!("Bearer {token}"))
    }

    /// Return `body` with its `token` field set.
    pub fn sign_body(&self, mut body: Value) -> AppResult<Value> {
        let token = self.body_token(&body)?;
        if let Value::Object(map) = &mut body {
            map.insert("token".to_string(), Value::String(token));
            Ok(body)
        } else {
            Err(AppError::validation("Request body must be a JSON object"))
        }
    }

    /// Decode a token signed with the shared secret.
    pub fn decode(&self, token: &str) -> AppResult<Value> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Value>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::authentication(format!("Invalid service token: {e}")))
    }

    fn encode_value(&self, value: &Value) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), value, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign service request: {e}")))
    }
}
