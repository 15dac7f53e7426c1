use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::Topic;
use crate::domain::topic::models::TopicId;
use crate::domain::topic::models::TopicStatus;
use crate::domain::topic::models::TopicTitle;
use crate::domain::topic::models::UpdateTopicCommand;
use crate::domain::topic::ports::TopicRepository;

const TITLE_MESSAGE_UNIQUE_INDEX: &str = "topics_title_message_key";

pub struct PostgresTopicRepository {
    pool: PgPool,
}

impl PostgresTopicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TopicRow {
    id: Uuid,
    title: String,
    message: String,
    author: String,
    course: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TopicRow {
    fn into_topic(self) -> Result<Topic, TopicError> {
        Ok(Topic {
            id: TopicId(self.id),
            title: TopicTitle::new(self.title)?,
            message: self.message,
            author: self.author,
            course: self.course,
            status: self.status.parse()?,
            created_at: self.created_at,
        })
    }
}

/// Map a write failure, recognising the (title, message) unique index.
fn write_error(e: sqlx::Error) -> TopicError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(TITLE_MESSAGE_UNIQUE_INDEX)
        {
            return TopicError::Duplicate;
        }
    }
    TopicError::DatabaseError(e.to_string())
}

fn query_error(e: sqlx::Error) -> TopicError {
    TopicError::DatabaseError(e.to_string())
}

#[async_trait]
impl TopicRepository for PostgresTopicRepository {
    async fn create(&self, topic: Topic) -> Result<Topic, TopicError> {
        sqlx::query(
            r#"
            INSERT INTO topics (id, title, message, author, course, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(topic.id.0)
        .bind(topic.title.as_str())
        .bind(&topic.message)
        .bind(&topic.author)
        .bind(&topic.course)
        .bind(topic.status.as_str())
        .bind(topic.created_at)
        .execute(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(topic)
    }

    async fn find_by_id(&self, id: &TopicId) -> Result<Option<Topic>, TopicError> {
        sqlx::query_as::<_, TopicRow>(
            r#"
            SELECT id, title, message, author, course, status, created_at
            FROM topics
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?
        .map(TopicRow::into_topic)
        .transpose()
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Topic>, TopicError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics")
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        let rows = sqlx::query_as::<_, TopicRow>(
            r#"
            SELECT id, title, message, author, course, status, created_at
            FROM topics
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(request.size()))
        .bind(request.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        let items = rows
            .into_iter()
            .map(TopicRow::into_topic)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, request, total.max(0) as u64))
    }

    async fn update(
        &self,
        id: &TopicId,
        changes: UpdateTopicCommand,
    ) -> Result<Topic, TopicError> {
        let row = sqlx::query_as::<_, TopicRow>(
            r#"
            UPDATE topics
            SET title = COALESCE($2, title),
                message = COALESCE($3, message),
                status = COALESCE($4, status)
            WHERE id = $1
            RETURNING id, title, message, author, course, status, created_at
            "#,
        )
        .bind(id.0)
        .bind(changes.title.as_ref().map(TopicTitle::as_str))
        .bind(changes.message.as_deref())
        .bind(changes.status.as_ref().map(TopicStatus::as_str))
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error)?;

        match row {
            Some(row) => row.into_topic(),
            None => Err(TopicError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &TopicId) -> Result<(), TopicError> {
        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(TopicError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
