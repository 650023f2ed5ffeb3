use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Token;
use chrono::Utc;
use tokio::sync::OnceCell;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::AuthenticateCommand;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityKey;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::Secret;
use crate::domain::identity::ports::IdentityRegistry;
use crate::domain::identity::ports::IdentityServicePort;

const DECOY_SECRET: &str = "decoy-secret-for-unknown-identities";

/// Domain service implementation for identity operations.
///
/// Hashing and verification run on the blocking thread pool; the registry's
/// `create` is the only point where concurrent registrations are serialized.
pub struct IdentityService<IR>
where
    IR: IdentityRegistry,
{
    registry: Arc<IR>,
    authenticator: Arc<Authenticator>,
    decoy_digest: OnceCell<String>,
}

impl<IR> IdentityService<IR>
where
    IR: IdentityRegistry,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `registry` - Identity storage implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(registry: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            registry,
            authenticator,
            decoy_digest: OnceCell::new(),
        }
    }

    async fn hash_secret(&self, secret: Secret) -> Result<String, IdentityError> {
        let authenticator = Arc::clone(&self.authenticator);
        let digest =
            tokio::task::spawn_blocking(move || authenticator.hash_password(secret.expose()))
                .await??;
        Ok(digest)
    }

    /// Digest checked against when the key is unknown, so a miss costs as
    /// much as a wrong secret.
    async fn decoy_digest(&self) -> Result<&str, IdentityError> {
        self.decoy_digest
            .get_or_try_init(|| async move {
                let secret = Secret::new(DECOY_SECRET.to_string()).map_err(IdentityError::from)?;
                self.hash_secret(secret).await
            })
            .await
            .map(|digest| digest.as_str())
    }

    async fn burn_decoy_verification(&self, secret: Secret) {
        let digest = match self.decoy_digest().await {
            Ok(digest) => digest.to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to prepare decoy digest");
                return;
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        match tokio::task::spawn_blocking(move || {
            authenticator.verify_password(secret.expose(), &digest)
        })
        .await
        {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Decoy verification failed"),
            Err(e) => tracing::error!(error = %e, "Decoy verification task failed"),
        }
    }
}

#[async_trait]
impl<IR> IdentityServicePort for IdentityService<IR>
where
    IR: IdentityRegistry,
{
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError> {
        // Cheap early exit; `create` below is still the authoritative check.
        if self.registry.find(&command.key).await?.is_some() {
            return Err(IdentityError::DuplicateIdentity(command.key.to_string()));
        }

        let credential_digest = self.hash_secret(command.secret).await?;
        let identity = self
            .registry
            .create(Identity::new(command.key, credential_digest))
            .await?;

        tracing::info!(key = %identity.key, "Identity registered");

        Ok(identity)
    }

    async fn authenticate(&self, command: AuthenticateCommand) -> Result<Token, IdentityError> {
        let identity = match self.registry.find(&command.key).await? {
            Some(identity) => identity,
            None => {
                self.burn_decoy_verification(command.secret).await;
                return Err(IdentityError::UnknownIdentity);
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        let secret = command.secret;
        tokio::task::spawn_blocking(move || {
            authenticator.authenticate(
                secret.expose(),
                &identity.credential_digest,
                identity.key.as_str(),
                Utc::now(),
            )
        })
        .await?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => IdentityError::BadSecret,
            AuthenticationError::PasswordError(err) => IdentityError::Password(err),
            AuthenticationError::TokenError(err) => IdentityError::Token(err),
        })
    }

    fn verify_token(&self, token: &str) -> Result<IdentityKey, IdentityError> {
        let subject = self.authenticator.validate_token(token, Utc::now())?;

        IdentityKey::new(subject).map_err(|e| {
            IdentityError::Token(auth::TokenError::Malformed(format!("Invalid subject: {}", e)))
        })
    }
}
