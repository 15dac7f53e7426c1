use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityChanges;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::ports::CredentialStore;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;

const EMAIL_UNIQUE_CONSTRAINT: &str = "identities_email_key";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: Uuid,
    display_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl IdentityRow {
    fn into_identity(self) -> Result<Identity, IdentityError> {
        Ok(Identity {
            id: IdentityId(self.id),
            display_name: DisplayName::new(self.display_name)?,
            email: EmailAddress::new(self.email)?,
            password_hash: self.password_hash,
            created_at: self.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> IdentityError {
    IdentityError::DatabaseError(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO identities (id, display_name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, display_name, email, password_hash, created_at
            "#,
        )
        .bind(IdentityId::new().0)
        .bind(identity.display_name.as_str())
        .bind(identity.email.as_str())
        .bind(&identity.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return IdentityError::CredentialConflict(identity.email.to_string());
                }
            }
            database_error(e)
        })?;

        row.into_identity()
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, display_name, email, password_hash, created_at
            FROM identities
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(IdentityRow::into_identity)
        .transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Identity>, IdentityError> {
        sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, display_name, email, password_hash, created_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(IdentityRow::into_identity)
        .transpose()
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Identity>, IdentityError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM identities")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        let rows = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, display_name, email, password_hash, created_at
            FROM identities
            ORDER BY display_name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(request.size()))
        .bind(request.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let items = rows
            .into_iter()
            .map(IdentityRow::into_identity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, request, total.max(0) as u64))
    }

    async fn update(
        &self,
        id: &IdentityId,
        changes: IdentityChanges,
    ) -> Result<Identity, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            UPDATE identities
            SET display_name = COALESCE($2, display_name),
                password_hash = COALESCE($3, password_hash)
            WHERE id = $1
            RETURNING id, display_name, email, password_hash, created_at
            "#,
        )
        .bind(id.0)
        .bind(changes.display_name.as_ref().map(DisplayName::as_str))
        .bind(changes.password_hash.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(row) => row.into_identity(),
            None => Err(IdentityError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityError> {
        let result = sqlx::query(
            r#"
            DELETE FROM identities
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
