use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityChanges;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::ports::CredentialStore;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::Topic;
use crate::domain::topic::models::TopicId;
use crate::domain::topic::models::UpdateTopicCommand;
use crate::domain::topic::ports::TopicRepository;

#[derive(Debug, Default)]
struct Identities {
    by_id: HashMap<IdentityId, Identity>,
    /// email -> id, the uniqueness index
    by_email: HashMap<EmailAddress, IdentityId>,
}

/// Credential store held in process memory.
///
/// Both maps sit behind one lock, so the uniqueness check and the insert in
/// `create` happen in a single critical section.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Identities>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let mut inner = self.inner.write().await;

        let id = IdentityId::new();
        match inner.by_email.entry(identity.email.clone()) {
            Entry::Occupied(_) => {
                return Err(IdentityError::CredentialConflict(identity.email.to_string()))
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let stored = Identity {
            id,
            display_name: identity.display_name,
            email: identity.email,
            password_hash: identity.password_hash,
            created_at: Utc::now(),
        };
        inner.by_id.insert(id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        Ok(self.inner.read().await.by_id.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Identity>, IdentityError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_email
            .get(email)
            .and_then(|id| inner.by_id.get(id))
            .cloned())
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Identity>, IdentityError> {
        let mut all: Vec<Identity> = self.inner.read().await.by_id.values().cloned().collect();
        all.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        Ok(Page::from_sorted(all, request))
    }

    async fn update(
        &self,
        id: &IdentityId,
        changes: IdentityChanges,
    ) -> Result<Identity, IdentityError> {
        let mut inner = self.inner.write().await;
        let identity = inner
            .by_id
            .get_mut(id)
            .ok_or(IdentityError::NotFound(id.to_string()))?;

        changes.apply_to(identity);

        Ok(identity.clone())
    }

    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityError> {
        let mut inner = self.inner.write().await;
        let removed = inner
            .by_id
            .remove(id)
            .ok_or(IdentityError::NotFound(id.to_string()))?;
        inner.by_email.remove(&removed.email);

        Ok(())
    }
}

/// Topic repository held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryTopicRepository {
    topics: RwLock<HashMap<TopicId, Topic>>,
}

impl InMemoryTopicRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TopicRepository for InMemoryTopicRepository {
    async fn create(&self, topic: Topic) -> Result<Topic, TopicError> {
        let mut topics = self.topics.write().await;

        if topics
            .values()
            .any(|existing| existing.duplicates(&topic.title, &topic.message))
        {
            return Err(TopicError::Duplicate);
        }

        topics.insert(topic.id, topic.clone());

        Ok(topic)
    }

    async fn find_by_id(&self, id: &TopicId) -> Result<Option<Topic>, TopicError> {
        Ok(self.topics.read().await.get(id).cloned())
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Topic>, TopicError> {
        let mut all: Vec<Topic> = self.topics.read().await.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        Ok(Page::from_sorted(all, request))
    }

    async fn update(
        &self,
        id: &TopicId,
        changes: UpdateTopicCommand,
    ) -> Result<Topic, TopicError> {
        let mut topics = self.topics.write().await;

        let mut updated = topics
            .get(id)
            .cloned()
            .ok_or(TopicError::NotFound(id.to_string()))?;
        changes.apply_to(&mut updated);

        if topics
            .values()
            .any(|other| other.id != *id && other.duplicates(&updated.title, &updated.message))
        {
            return Err(TopicError::Duplicate);
        }

        topics.insert(*id, updated.clone());

        Ok(updated)
    }

    async fn delete(&self, id: &TopicId) -> Result<(), TopicError> {
        self.topics
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(TopicError::NotFound(id.to_string()))
    }
}
