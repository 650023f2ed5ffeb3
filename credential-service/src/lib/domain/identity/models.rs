use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use zeroize::Zeroizing;

use crate::domain::identity::errors::IdentityKeyError;
use crate::domain::identity::errors::SecretError;

/// Identity aggregate entity.
///
/// Represents a registered user. Never mutated after registration.
#[derive(Clone)]
pub struct Identity {
    pub key: IdentityKey,
    /// Argon2id PHC string; never the plaintext secret
    pub credential_digest: String,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(key: IdentityKey, credential_digest: String) -> Self {
        Self {
            key,
            credential_digest,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("key", &self.key)
            .field("credential_digest", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Identity key value type
///
/// Unique, case-sensitive identifier of an identity (typically an email
/// address). Stored exactly as given; must contain a non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Create a new valid identity key.
    ///
    /// # Errors
    /// * `Empty` - Key is empty or whitespace only
    pub fn new(key: String) -> Result<Self, IdentityKeyError> {
        if key.trim().is_empty() {
            return Err(IdentityKeyError::Empty);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext secret, wiped from memory on drop.
///
/// `Debug` never prints the contents.
#[derive(Clone)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// # Errors
    /// * `Empty` - Secret is the empty string
    pub fn new(secret: String) -> Result<Self, SecretError> {
        let secret = Zeroizing::new(secret);
        if secret.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(secret))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Command to register a new identity
#[derive(Debug)]
pub struct RegisterCommand {
    pub key: IdentityKey,
    pub secret: Secret,
}

impl RegisterCommand {
    pub fn new(key: IdentityKey, secret: Secret) -> Self {
        Self { key, secret }
    }
}

/// Command to authenticate with a key and secret
#[derive(Debug)]
pub struct AuthenticateCommand {
    pub key: IdentityKey,
    pub secret: Secret,
}

impl AuthenticateCommand {
    pub fn new(key: IdentityKey, secret: Secret) -> Self {
        Self { key, secret }
    }
}
