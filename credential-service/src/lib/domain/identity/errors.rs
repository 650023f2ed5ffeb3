use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for IdentityKey validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityKeyError {
    #[error("Identity key must not be empty")]
    Empty,
}

/// Error for Secret validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Secret must not be empty")]
    Empty,
}

/// Top-level error for all identity-related operations
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid identity key: {0}")]
    InvalidKey(#[from] IdentityKeyError),

    #[error("Invalid secret: {0}")]
    InvalidSecret(#[from] SecretError),

    // Domain-level errors
    #[error("Identity already exists: {0}")]
    DuplicateIdentity(String),

    #[error("Unknown identity")]
    UnknownIdentity,

    #[error("Secret does not match")]
    BadSecret,

    #[error("Token rejected: {0}")]
    Token(#[from] TokenError),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl IdentityError {
    /// Failed login attempts, whichever half of the credential was wrong.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            IdentityError::UnknownIdentity | IdentityError::BadSecret
        )
    }
}

impl From<tokio::task::JoinError> for IdentityError {
    fn from(err: tokio::task::JoinError) -> Self {
        IdentityError::Unknown(format!("Hashing task failed: {}", err))
    }
}
