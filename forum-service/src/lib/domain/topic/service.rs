use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::CreateTopicCommand;
use crate::domain::topic::models::Topic;
use crate::domain::topic::models::TopicId;
use crate::domain::topic::models::TopicStatus;
use crate::domain::topic::models::UpdateTopicCommand;
use crate::domain::topic::ports::TopicRepository;
use crate::domain::topic::ports::TopicServicePort;

/// Domain service implementation for topic operations.
pub struct TopicService<TR>
where
    TR: TopicRepository,
{
    repository: Arc<TR>,
}

impl<TR> TopicService<TR>
where
    TR: TopicRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TopicServicePort for TopicService<TR>
where
    TR: TopicRepository,
{
    async fn create_topic(&self, command: CreateTopicCommand) -> Result<Topic, TopicError> {
        let topic = Topic {
            id: TopicId::new(),
            title: command.title,
            message: command.message,
            author: command.author,
            course: command.course,
            status: TopicStatus::Unanswered,
            created_at: Utc::now(),
        };

        let created = self.repository.create(topic).await?;

        tracing::info!(topic_id = %created.id, "Topic created");

        Ok(created)
    }

    async fn list_topics(&self, request: PageRequest) -> Result<Page<Topic>, TopicError> {
        self.repository.list(request).await
    }

    async fn get_topic(&self, id: &TopicId) -> Result<Topic, TopicError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TopicError::NotFound(id.to_string()))
    }

    async fn update_topic(
        &self,
        id: &TopicId,
        command: UpdateTopicCommand,
    ) -> Result<Topic, TopicError> {
        let updated = self.repository.update(id, command).await?;

        tracing::info!(topic_id = %updated.id, status = %updated.status, "Topic updated");

        Ok(updated)
    }

    async fn delete_topic(&self, id: &TopicId) -> Result<(), TopicError> {
        self.repository.delete(id).await?;

        tracing::info!(topic_id = %id, "Topic deleted");

        Ok(())
    }
}
