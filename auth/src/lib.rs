//! Credential primitives
//!
//! Reusable building blocks for issuing and checking credentials:
//! - Password hashing (Argon2id, tunable work factor)
//! - Stateless bearer tokens (HS256 JWT) with issuance and verification
//! - Authentication coordination
//!
//! Services define their own ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenIssuer, TokenVerifier};
//! use chrono::{Duration, Utc};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let verifier = TokenVerifier::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let now = Utc::now();
//! let token = issuer.issue("a@b.com", now, Duration::hours(1)).unwrap();
//! assert_eq!(verifier.verify(&token.value, now).unwrap(), "a@b.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::{Duration, Utc};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let token = auth.authenticate("password123", &hash, "a@b.com", Utc::now()).unwrap();
//!
//! // Validate token
//! let subject = auth.validate_token(&token.value, Utc::now()).unwrap();
//! assert_eq!(subject, "a@b.com");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::Token;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenVerifier;
