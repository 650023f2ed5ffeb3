use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityKey;
use crate::domain::identity::ports::IdentityRegistry;

/// Process-local identity registry.
///
/// Starts empty and lives as long as the process. Writers hold the lock
/// across the existence check and the insert.
#[derive(Debug, Default)]
pub struct InMemoryIdentityRegistry {
    identities: RwLock<HashMap<IdentityKey, Identity>>,
}

impl InMemoryIdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.identities.read().await.is_empty()
    }
}

#[async_trait]
impl IdentityRegistry for InMemoryIdentityRegistry {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        match self.identities.write().await.entry(identity.key.clone()) {
            Entry::Occupied(entry) => Err(IdentityError::DuplicateIdentity(entry.key().to_string())),
            Entry::Vacant(entry) => Ok(entry.insert(identity).clone()),
        }
    }

    async fn find(&self, key: &IdentityKey) -> Result<Option<Identity>, IdentityError> {
        Ok(self.identities.read().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn identity(key: &str, digest: &str) -> Identity {
        Identity::new(IdentityKey::new(key.to_string()).unwrap(), digest.to_string())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let registry = InMemoryIdentityRegistry::new();
        assert!(registry.is_empty().await);

        registry.create(identity("a@b.com", "digest-1")).await.unwrap();

        let found = registry
            .find(&IdentityKey::new("a@b.com".to_string()).unwrap())
            .await
            .unwrap()
            .expect("identity should exist");
        assert_eq!(found.credential_digest, "digest-1");
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_missing_and_case_sensitivity() {
        let registry = InMemoryIdentityRegistry::new();
        registry.create(identity("a@b.com", "digest-1")).await.unwrap();

        let other_case = IdentityKey::new("A@B.com".to_string()).unwrap();
        assert!(registry.find(&other_case).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_does_not_overwrite() {
        let registry = InMemoryIdentityRegistry::new();
        registry.create(identity("a@b.com", "digest-1")).await.unwrap();

        let result = registry.create(identity("a@b.com", "digest-2")).await;
        assert!(matches!(result, Err(IdentityError::DuplicateIdentity(k)) if k == "a@b.com"));

        let stored = registry
            .find(&IdentityKey::new("a@b.com".to_string()).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.credential_digest, "digest-1");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_same_key_single_winner() {
        let registry = Arc::new(InMemoryIdentityRegistry::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    registry
                        .create(identity("a@b.com", &format!("digest-{}", i)))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(IdentityError::DuplicateIdentity(_)) => duplicates += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 31);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_distinct_keys() {
        let registry = Arc::new(InMemoryIdentityRegistry::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    registry
                        .create(identity(&format!("user{}@b.com", i), "digest"))
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(registry.len().await, 16);
    }
}
