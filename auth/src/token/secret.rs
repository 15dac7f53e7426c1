use std::fmt;

use super::errors::SecretError;

/// Process-wide HMAC key shared by the issuer and the verifier.
///
/// Loaded once at startup and never mutated. `Debug` output is redacted.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap raw key material.
    ///
    /// # Errors
    /// * `Empty` - No key material was provided
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        assert_eq!(SigningSecret::new("").unwrap_err(), SecretError::Empty);
        assert_eq!(SigningSecret::new(Vec::new()).unwrap_err(), SecretError::Empty);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = SigningSecret::new("super-secret-value").unwrap();
        assert!(!format!("{:?}", secret).contains("super-secret-value"));
    }
}
