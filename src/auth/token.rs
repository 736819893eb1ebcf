//! HS256 token issuance and verification.
//!
//! Without a configured lifetime, tokens carry no `exp` and never expire.
//! With one, `exp` is set on issue and required on verify.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload carried by every issued token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Identity the token was issued to.
    pub email: String,
    /// Issued-at, UTC Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiry, UTC Unix seconds. Absent when tokens do not expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Signs and verifies tokens with one symmetric secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: Option<i64>,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_secs: Option<u64>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match ttl_secs {
            // `exp` required and checked with the default 60 s leeway
            Some(_) => validation.set_required_spec_claims(&["exp"]),
            None => {
                validation.set_required_spec_claims::<&str>(&[]);
                validation.validate_exp = false;
            }
        }

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs: ttl_secs.map(|ttl| i64::try_from(ttl).unwrap_or(i64::MAX)),
        }
    }

    /// Issue a token for `email`, valid for the configured lifetime if any.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            email: email.to_string(),
            iat: Some(now),
            exp: self.ttl_secs.map(|ttl| now.saturating_add(ttl)),
        };
        self.sign(&claims)
    }

    /// Sign an arbitrary claims payload.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Check the signature (and expiry when a lifetime is configured),
    /// returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::InvalidToken)
    }
}
