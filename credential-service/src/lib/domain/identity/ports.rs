use async_trait::async_trait;
use auth::Token;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::AuthenticateCommand;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityKey;
use crate::domain::identity::models::RegisterCommand;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity with a hashed secret.
    ///
    /// # Arguments
    /// * `command` - Validated command containing key and secret
    ///
    /// # Returns
    /// Registered identity
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Key is already registered
    /// * `Password` - Hashing failed
    /// * `Registry` - Registry operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError>;

    /// Check a key and secret and issue a token on success.
    ///
    /// # Arguments
    /// * `command` - Validated command containing key and secret
    ///
    /// # Returns
    /// Token bound to the key, issued at the current wall-clock time
    ///
    /// # Errors
    /// * `UnknownIdentity` - No identity with this key
    /// * `BadSecret` - Secret does not match the stored digest
    /// * `Token` - Token signing failed
    async fn authenticate(&self, command: AuthenticateCommand) -> Result<Token, IdentityError>;

    /// Validate a presented bearer token at the current wall-clock time.
    ///
    /// # Returns
    /// Key of the identity the token is bound to
    ///
    /// # Errors
    /// * `Token` - Invalid signature, expired, or malformed
    fn verify_token(&self, token: &str) -> Result<IdentityKey, IdentityError>;
}

/// Storage for identities, keyed by identity key.
///
/// Implementations must make `create` an atomic insert-if-absent: of any
/// number of concurrent calls with the same key, at most one succeeds.
#[async_trait]
pub trait IdentityRegistry: Send + Sync + 'static {
    /// Insert a new identity unless its key is already taken.
    ///
    /// # Returns
    /// Created identity
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Key is already registered
    /// * `Registry` - Storage failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Look up an identity by key.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Registry` - Storage failed
    async fn find(&self, key: &IdentityKey) -> Result<Option<Identity>, IdentityError>;
}
