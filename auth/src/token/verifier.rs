use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use super::ALGORITHM;

/// Validates tokens minted by a [`TokenIssuer`](super::TokenIssuer) sharing the same secret.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier checking signatures against `secret`.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against the caller-supplied clock in `verify_claims`.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify `token` at instant `now` and return the subject it is bound to.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match the claims, or unexpected algorithm
    /// * `Expired` - `now` is at or past the token's expiry
    /// * `Malformed` - Token cannot be split or decoded into its fields
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.verify_claims(token, now).map(|claims| claims.sub)
    }

    /// Verify `token` at instant `now` and return all of its claims.
    ///
    /// The signature is checked before any claim is read, so an
    /// attacker-supplied `exp` is never compared unless the signature binds it.
    pub fn verify_claims(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
