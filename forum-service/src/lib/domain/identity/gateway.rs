use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::ports::AuthenticationPort;
use crate::domain::identity::ports::CredentialStore;

/// Login and bearer-token authentication over a credential store.
///
/// An unknown email and a wrong password produce the same
/// `AuthenticationFailed`, so callers cannot probe which emails exist.
pub struct AuthenticationGateway<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<auth::Authenticator>,
}

impl<CS> AuthenticationGateway<CS>
where
    CS: CredentialStore,
{
    pub fn new(store: Arc<CS>, authenticator: Arc<auth::Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> AuthenticationPort for AuthenticationGateway<CS>
where
    CS: CredentialStore,
{
    async fn login(&self, email: &str, password: &str) -> Result<auth::Token, IdentityError> {
        // A malformed email cannot belong to anyone.
        let Ok(email) = EmailAddress::new(email.to_string()) else {
            return Err(IdentityError::AuthenticationFailed);
        };

        let Some(identity) = self.store.find_by_email(&email).await? else {
            tracing::debug!("Login rejected");
            return Err(IdentityError::AuthenticationFailed);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(
                &password,
                &identity.password_hash,
                identity.email.as_str(),
            )
        })
        .await
        .map_err(|e| IdentityError::Unknown(format!("Verification task failed: {}", e)))?;

        match outcome {
            Ok(token) => {
                tracing::info!(expires_at = %token.expires_at(), "Token issued");
                Ok(token)
            }
            Err(auth::AuthenticationError::InvalidCredentials) => {
                tracing::debug!("Login rejected");
                Err(IdentityError::AuthenticationFailed)
            }
            Err(auth::AuthenticationError::TokenError(e)) => Err(IdentityError::Token(e)),
        }
    }

    fn authenticate_token(&self, token: &str) -> Result<String, auth::TokenInvalid> {
        self.authenticator.validate_token(token)
    }
}
