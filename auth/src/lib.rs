//! Authentication utilities library
//!
//! Provides the credential and token primitives of forumhub:
//! - Password hashing (Argon2id, salted, tunable cost)
//! - Signed, time-bounded bearer tokens (HS256 JWT, issuer `forumhub`)
//! - Authentication coordination
//!
//! The library knows nothing about storage. Services look identities up
//! themselves and hand the stored hash to [`Authenticator::authenticate`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningSecret, TokenIssuer, TokenVerifier};
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let token = TokenIssuer::new(&secret).issue("ana@x.com").unwrap();
//! let subject = TokenVerifier::new(&secret).verify(token.as_str()).unwrap();
//! assert_eq!(subject, "ana@x.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningSecret};
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let token = auth.authenticate("password123", &hash, "ana@x.com").unwrap();
//!
//! // Later requests: validate token
//! assert_eq!(auth.validate_token(token.as_str()).unwrap(), "ana@x.com");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::SecretError;
pub use token::SigningSecret;
pub use token::Token;
pub use token::TokenClaims;
pub use token::TokenError;
pub use token::TokenInvalid;
pub use token::TokenIssuer;
pub use token::TokenVerifier;
