use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::TokenError;
use super::ALGORITHM;

/// A signed bearer token together with the claims it asserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Compact wire form, safe to send in an `Authorization: Bearer` header
    pub value: String,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Mints signed, expiring tokens bound to a subject.
///
/// Tokens are HS256 JWTs. The signing key is fixed for the lifetime of the
/// issuer; the service holds no record of what it issued.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    /// Create an issuer signing with `secret`.
    ///
    /// The secret should be at least 256 bits (32 bytes) for HS256.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
        }
    }

    /// Issue a token for `subject`, valid from `now` until `now + ttl`.
    ///
    /// Timestamps are truncated to whole seconds to match the claim encoding.
    ///
    /// # Panics
    /// Panics if `ttl` is not positive.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry is not a representable date, or claims could not be signed
    pub fn issue(
        &self,
        subject: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Token, TokenError> {
        assert!(ttl > Duration::zero(), "token ttl must be positive");

        let issued_at = now.trunc_subsecs(0);
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::EncodingFailed("token expiry is out of range".to_string())
        })?;
        let claims = Claims::new(subject, issued_at, expires_at);

        let value = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(Token {
            value,
            subject: claims.sub,
            issued_at,
            expires_at,
        })
    }
}
