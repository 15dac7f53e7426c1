use chrono::DateTime;
use chrono::Utc;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::SigningSecret;
use crate::token::Token;
use crate::token::TokenError;
use crate::token::TokenInvalid;
use crate::token::TokenIssuer;
use crate::token::TokenVerifier;

/// Authentication coordinator combining password verification and token handling.
///
/// Provides high-level authentication operations by coordinating
/// password hashing, token issuance and token verification under one secret.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator with the default password cost.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_password_hasher(secret, PasswordHasher::new())
    }

    /// Create a new authenticator with a specific password hasher.
    pub fn with_password_hasher(secret: &SigningSecret, password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            issuer: TokenIssuer::new(secret),
            verifier: TokenVerifier::new(secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Email the token will assert
    ///
    /// # Returns
    /// Signed token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or hash is unreadable)
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<Token, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issuer.issue(subject)?)
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_token_at(&self, subject: &str, now: DateTime<Utc>) -> Result<Token, TokenError> {
        self.issuer.issue_at(subject, now)
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `TokenInvalid` - Malformed, bad signature, wrong issuer or expired
    pub fn validate_token(&self, token: &str) -> Result<String, TokenInvalid> {
        self.verifier.verify(token)
    }
}
