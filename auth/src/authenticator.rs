use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::password::HashingParams;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Token;
use crate::token::TokenError;
use crate::token::TokenIssuer;
use crate::token::TokenVerifier;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the process signing key (through its issuer and verifier) and the
/// configured token lifetime. Read-only after construction, so a single
/// instance can be shared across request tasks behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_verifier: TokenVerifier,
    token_ttl: Duration,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator with the default hashing work factor.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Panics
    /// Panics if `token_ttl` is not positive.
    pub fn new(token_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_hasher(token_secret, token_ttl, PasswordHasher::new())
    }

    /// Create a new authenticator with a custom hashing work factor.
    ///
    /// # Errors
    /// * `InvalidParams` - Argon2 rejected the hashing parameters
    pub fn with_hashing_params(
        token_secret: &[u8],
        token_ttl: Duration,
        params: HashingParams,
    ) -> Result<Self, PasswordError> {
        Ok(Self::with_hasher(
            token_secret,
            token_ttl,
            PasswordHasher::with_params(params)?,
        ))
    }

    fn with_hasher(token_secret: &[u8], token_ttl: Duration, password_hasher: PasswordHasher) -> Self {
        assert!(token_ttl > Duration::zero(), "token ttl must be positive");

        Self {
            password_hasher,
            token_issuer: TokenIssuer::new(token_secret),
            token_verifier: TokenVerifier::new(token_secret),
            token_ttl,
        }
    }

    /// Lifetime applied to every issued token.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash without issuing a token.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject` at `now`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<Token, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject, now)?)
    }

    /// Issue a token without password verification.
    ///
    /// Used once the caller has already established the subject's identity.
    pub fn issue_token(&self, subject: &str, now: DateTime<Utc>) -> Result<Token, TokenError> {
        self.token_issuer.issue(subject, now, self.token_ttl)
    }

    /// Validate a token at `now` and return its subject.
    ///
    /// # Errors
    /// * `TokenError` - Signature mismatch, expiry, or malformed token
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.token_verifier.verify(token, now)
    }
}
