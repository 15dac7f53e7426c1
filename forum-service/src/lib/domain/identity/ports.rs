use async_trait::async_trait;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::CreateIdentityCommand;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityChanges;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::UpdateIdentityCommand;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `command` - Validated command containing display name, email, and password
    ///
    /// # Returns
    /// Created identity entity
    ///
    /// # Errors
    /// * `CredentialConflict` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateIdentityCommand) -> Result<Identity, IdentityError>;

    /// Retrieve identity by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError>;

    /// Retrieve identity by email address.
    ///
    /// # Errors
    /// * `NotFound` - No identity with this email
    /// * `DatabaseError` - Database operation failed
    async fn get_identity_by_email(&self, email: &EmailAddress)
        -> Result<Identity, IdentityError>;

    /// List identities ordered by display name.
    async fn list_identities(&self, request: PageRequest)
        -> Result<Page<Identity>, IdentityError>;

    /// Update existing identity with optional fields.
    ///
    /// # Arguments
    /// * `id` - Identity ID to update
    /// * `command` - Command with optional display name and password
    ///
    /// # Returns
    /// Updated identity entity
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn update_identity(
        &self,
        id: &IdentityId,
        command: UpdateIdentityCommand,
    ) -> Result<Identity, IdentityError>;

    /// Delete existing identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_identity(&self, id: &IdentityId) -> Result<(), IdentityError>;
}

/// Port for login and per-request token authentication.
#[async_trait]
pub trait AuthenticationPort: Send + Sync + 'static {
    /// Exchange credentials for a signed token.
    ///
    /// # Arguments
    /// * `email` - Raw email as submitted
    /// * `password` - Raw plaintext password as submitted
    ///
    /// # Returns
    /// Token asserting the identity's email
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown email or wrong password (indistinguishable)
    /// * `Token` - Token generation failed
    /// * `DatabaseError` - Credential store failed
    async fn login(&self, email: &str, password: &str) -> Result<auth::Token, IdentityError>;

    /// Validate a bearer token and return the email it asserts.
    ///
    /// # Errors
    /// * `TokenInvalid` - Malformed, bad signature, wrong issuer or expired
    fn authenticate_token(&self, token: &str) -> Result<String, auth::TokenInvalid>;
}

/// Persistence operations for identity records.
///
/// Implementations enforce email uniqueness atomically inside `create`.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new identity, assigning its ID and creation time.
    ///
    /// # Arguments
    /// * `identity` - Display name, email and already hashed password
    ///
    /// # Returns
    /// Stored identity entity
    ///
    /// # Errors
    /// * `CredentialConflict` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, identity: NewIdentity) -> Result<Identity, IdentityError>;

    /// Retrieve identity by identifier.
    ///
    /// # Returns
    /// Optional identity entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve identity by exact (case-sensitive) email.
    ///
    /// # Returns
    /// Optional identity entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve one page of identities ordered by display name.
    async fn list(&self, request: PageRequest) -> Result<Page<Identity>, IdentityError>;

    /// Apply a partial update. Absent fields stay unchanged.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        id: &IdentityId,
        changes: IdentityChanges,
    ) -> Result<Identity, IdentityError>;

    /// Remove identity from storage.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityError>;
}
