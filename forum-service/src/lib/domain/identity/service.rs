use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::CreateIdentityCommand;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityChanges;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::UpdateIdentityCommand;
use crate::domain::identity::ports::CredentialStore;
use crate::domain::identity::ports::IdentityServicePort;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;

/// Domain service implementation for identity operations.
///
/// Concrete implementation of IdentityServicePort with dependency injection.
pub struct IdentityService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<auth::Authenticator>,
}

impl<CS> IdentityService<CS>
where
    CS: CredentialStore,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token facade
    pub fn new(store: Arc<CS>, authenticator: Arc<auth::Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }

    /// Hash on the blocking pool; Argon2 is deliberately slow.
    async fn hash_password(&self, password: Password) -> Result<String, IdentityError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| IdentityError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(IdentityError::from)
    }
}

#[async_trait]
impl<CS> IdentityServicePort for IdentityService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: CreateIdentityCommand) -> Result<Identity, IdentityError> {
        let password_hash = self.hash_password(command.password).await?;

        let identity = self
            .store
            .create(NewIdentity {
                display_name: command.display_name,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(identity_id = %identity.id, "Identity registered");

        Ok(identity)
    }

    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))
    }

    async fn get_identity_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Identity, IdentityError> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or(IdentityError::NotFound(email.to_string()))
    }

    async fn list_identities(
        &self,
        request: PageRequest,
    ) -> Result<Page<Identity>, IdentityError> {
        self.store.list(request).await
    }

    async fn update_identity(
        &self,
        id: &IdentityId,
        command: UpdateIdentityCommand,
    ) -> Result<Identity, IdentityError> {
        let password_hash = match command.password {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let changes = IdentityChanges {
            display_name: command.display_name,
            password_hash,
        };

        let identity = self.store.update(id, changes).await?;

        tracing::info!(identity_id = %identity.id, "Identity updated");

        Ok(identity)
    }

    async fn delete_identity(&self, id: &IdentityId) -> Result<(), IdentityError> {
        self.store.delete(id).await?;

        tracing::info!(identity_id = %id, "Identity deleted");

        Ok(())
    }
}
