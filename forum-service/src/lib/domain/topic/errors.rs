use thiserror::Error;

/// Error for TopicId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TopicIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for TopicTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TopicTitleError {
    #[error("Title must not be blank")]
    Blank,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for required free-text topic fields
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TopicFieldError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
}

/// Error for TopicStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TopicStatusError {
    #[error("Unknown topic status: {0}")]
    Unknown(String),
}

/// Top-level error for all topic-related operations
#[derive(Debug, Clone, Error)]
pub enum TopicError {
    #[error("Invalid topic ID: {0}")]
    InvalidTopicId(#[from] TopicIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TopicTitleError),

    #[error("Invalid field: {0}")]
    InvalidField(#[from] TopicFieldError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] TopicStatusError),

    #[error("A topic with the same title and message already exists")]
    Duplicate,

    #[error("Topic not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
