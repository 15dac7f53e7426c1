use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::topic::errors::TopicError;
use crate::domain::topic::errors::TopicFieldError;
use crate::domain::topic::errors::TopicIdError;
use crate::domain::topic::errors::TopicStatusError;
use crate::domain::topic::errors::TopicTitleError;

/// Forum discussion thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub id: TopicId,
    pub title: TopicTitle,
    pub message: String,
    pub author: String,
    pub course: String,
    pub status: TopicStatus,
    pub created_at: DateTime<Utc>,
}

impl Topic {
    /// True when a topic with this title and message would break uniqueness.
    pub fn duplicates(&self, title: &TopicTitle, message: &str) -> bool {
        self.title == *title && self.message == message
    }
}

/// Topic unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TopicId(pub Uuid);

impl TopicId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a topic ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TopicIdError> {
        Uuid::parse_str(s)
            .map(TopicId)
            .map_err(|e| TopicIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TopicId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Topic title, trimmed, 1 to 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTitle(String);

impl TopicTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, TopicTitleError> {
        let trimmed = title.trim();
        let length = trimmed.chars().count();
        if length == 0 {
            Err(TopicTitleError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(TopicTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicStatus {
    Open,
    Unanswered,
    Unsolved,
    Solved,
    Closed,
}

impl TopicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicStatus::Open => "OPEN",
            TopicStatus::Unanswered => "UNANSWERED",
            TopicStatus::Unsolved => "UNSOLVED",
            TopicStatus::Solved => "SOLVED",
            TopicStatus::Closed => "CLOSED",
        }
    }
}

impl FromStr for TopicStatus {
    type Err = TopicStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(TopicStatus::Open),
            "UNANSWERED" => Ok(TopicStatus::Unanswered),
            "UNSOLVED" => Ok(TopicStatus::Unsolved),
            "SOLVED" => Ok(TopicStatus::Solved),
            "CLOSED" => Ok(TopicStatus::Closed),
            other => Err(TopicStatusError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn required(field: &'static str, value: String) -> Result<String, TopicFieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(TopicFieldError::Blank(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Command to open a new topic with validated fields
#[derive(Debug, Clone)]
pub struct CreateTopicCommand {
    pub title: TopicTitle,
    pub message: String,
    pub author: String,
    pub course: String,
}

impl CreateTopicCommand {
    /// # Errors
    /// * `InvalidTitle` - Title blank or too long
    /// * `InvalidField` - Message, author or course blank
    pub fn new(
        title: String,
        message: String,
        author: String,
        course: String,
    ) -> Result<Self, TopicError> {
        Ok(Self {
            title: TopicTitle::new(title)?,
            message: required("message", message)?,
            author: required("author", author)?,
            course: required("course", course)?,
        })
    }
}

/// Partial topic update. Only provided fields will be updated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTopicCommand {
    pub title: Option<TopicTitle>,
    pub message: Option<String>,
    pub status: Option<TopicStatus>,
}

impl UpdateTopicCommand {
    /// Build an update from raw request fields; blank text means "not provided".
    ///
    /// # Errors
    /// * `InvalidTitle` - Title too long
    /// * `InvalidStatus` - Unknown status name
    pub fn new(
        title: Option<String>,
        message: Option<String>,
        status: Option<String>,
    ) -> Result<Self, TopicError> {
        let title = match title {
            Some(title) if !title.trim().is_empty() => Some(TopicTitle::new(title)?),
            _ => None,
        };
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        let status = status.map(|s| s.parse::<TopicStatus>()).transpose()?;

        Ok(Self {
            title,
            message,
            status,
        })
    }

    /// Apply the update to an in-memory topic.
    pub fn apply_to(self, topic: &mut Topic) {
        if let Some(title) = self.title {
            topic.title = title;
        }
        if let Some(message) = self.message {
            topic.message = message;
        }
        if let Some(status) = self.status {
            topic.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_validation() {
        assert_eq!(
            TopicTitle::new("  Lifetimes  ".to_string()).unwrap().as_str(),
            "Lifetimes"
        );
        assert_eq!(TopicTitle::new(" ".to_string()), Err(TopicTitleError::Blank));
        assert!(matches!(
            TopicTitle::new("t".repeat(201)),
            Err(TopicTitleError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_status_parse() {
        for status in [
            TopicStatus::Open,
            TopicStatus::Unanswered,
            TopicStatus::Unsolved,
            TopicStatus::Solved,
            TopicStatus::Closed,
        ] {
            assert_eq!(status.as_str().parse::<TopicStatus>(), Ok(status));
        }
        assert!("solved".parse::<TopicStatus>().is_err());
    }

    #[test]
    fn test_status_serde_matches_as_str() {
        let json = serde_json::to_string(&TopicStatus::Unanswered).unwrap();
        assert_eq!(json, "\"UNANSWERED\"");
    }

    #[test]
    fn test_create_command_requires_fields() {
        let result = CreateTopicCommand::new(
            "Borrow checker".to_string(),
            "  ".to_string(),
            "ana@x.com".to_string(),
            "Rust".to_string(),
        );
        assert!(matches!(
            result,
            Err(TopicError::InvalidField(TopicFieldError::Blank("message")))
        ));
    }

    #[test]
    fn test_update_command_blank_is_absent() {
        let command =
            UpdateTopicCommand::new(Some(" ".to_string()), Some("".to_string()), None).unwrap();
        assert_eq!(command, UpdateTopicCommand::default());

        let result = UpdateTopicCommand::new(None, None, Some("ARCHIVED".to_string()));
        assert!(matches!(result, Err(TopicError::InvalidStatus(_))));
    }

    #[test]
    fn test_update_apply() {
        let mut topic = Topic {
            id: TopicId::new(),
            title: TopicTitle::new("Old".to_string()).unwrap(),
            message: "Body".to_string(),
            author: "ana@x.com".to_string(),
            course: "Rust".to_string(),
            status: TopicStatus::Unanswered,
            created_at: Utc::now(),
        };

        UpdateTopicCommand::new(None, None, Some("SOLVED".to_string()))
            .unwrap()
            .apply_to(&mut topic);

        assert_eq!(topic.title.as_str(), "Old");
        assert_eq!(topic.status, TopicStatus::Solved);
    }
}
