use async_trait::async_trait;

use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::CreateTopicCommand;
use crate::domain::topic::models::Topic;
use crate::domain::topic::models::TopicId;
use crate::domain::topic::models::UpdateTopicCommand;

/// Port for topic domain service operations.
#[async_trait]
pub trait TopicServicePort: Send + Sync + 'static {
    /// Open a new topic in the `Unanswered` state.
    ///
    /// # Errors
    /// * `Duplicate` - A topic with the same title and message exists
    /// * `DatabaseError` - Database operation failed
    async fn create_topic(&self, command: CreateTopicCommand) -> Result<Topic, TopicError>;

    /// List topics oldest first.
    async fn list_topics(&self, request: PageRequest) -> Result<Page<Topic>, TopicError>;

    /// # Errors
    /// * `NotFound` - Topic does not exist
    async fn get_topic(&self, id: &TopicId) -> Result<Topic, TopicError>;

    /// # Errors
    /// * `NotFound` - Topic does not exist
    /// * `Duplicate` - The change collides with another topic
    async fn update_topic(
        &self,
        id: &TopicId,
        command: UpdateTopicCommand,
    ) -> Result<Topic, TopicError>;

    /// # Errors
    /// * `NotFound` - Topic does not exist
    async fn delete_topic(&self, id: &TopicId) -> Result<(), TopicError>;
}

/// Persistence operations for topics.
///
/// Implementations enforce (title, message) uniqueness atomically.
#[async_trait]
pub trait TopicRepository: Send + Sync + 'static {
    /// Persist a new topic.
    ///
    /// # Errors
    /// * `Duplicate` - A topic with the same title and message exists
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, topic: Topic) -> Result<Topic, TopicError>;

    async fn find_by_id(&self, id: &TopicId) -> Result<Option<Topic>, TopicError>;

    /// Retrieve one page of topics ordered by creation time.
    async fn list(&self, request: PageRequest) -> Result<Page<Topic>, TopicError>;

    /// Apply a partial update. Absent fields stay unchanged.
    ///
    /// # Errors
    /// * `NotFound` - Topic does not exist
    /// * `Duplicate` - The change collides with another topic
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: &TopicId, changes: UpdateTopicCommand)
        -> Result<Topic, TopicError>;

    /// # Errors
    /// * `NotFound` - Topic does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &TopicId) -> Result<(), TopicError>;
}
