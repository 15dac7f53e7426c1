use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::Topic;
use crate::domain::topic::models::TopicStatus;

pub mod authenticate;
pub mod create_identity;
pub mod create_topic;
pub mod delete_identity;
pub mod delete_topic;
pub mod get_identity;
pub mod get_topic;
pub mod list_identities;
pub mod list_topics;
pub mod update_identity;
pub mod update_topic;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// Log the real cause and hide it from the client.
    fn internal(err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "Request failed");
        ApiError::InternalServerError("Internal server error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotFound(_) => ApiError::NotFound(err.to_string()),
            IdentityError::CredentialConflict(_) => ApiError::Conflict(err.to_string()),
            IdentityError::AuthenticationFailed => ApiError::Unauthorized(err.to_string()),
            IdentityError::InvalidIdentityId(_) => ApiError::BadRequest(err.to_string()),
            IdentityError::InvalidDisplayName(_)
            | IdentityError::InvalidEmail(_)
            | IdentityError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            IdentityError::Password(_)
            | IdentityError::Token(_)
            | IdentityError::DatabaseError(_)
            | IdentityError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<TopicError> for ApiError {
    fn from(err: TopicError) -> Self {
        match err {
            TopicError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TopicError::Duplicate | TopicError::InvalidTopicId(_) => {
                ApiError::BadRequest(err.to_string())
            }
            TopicError::InvalidTitle(_)
            | TopicError::InvalidField(_)
            | TopicError::InvalidStatus(_) => ApiError::UnprocessableEntity(err.to_string()),
            TopicError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of an identity. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Identity> for IdentityData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            display_name: identity.display_name.as_str().to_string(),
            email: identity.email.as_str().to_string(),
            created_at: identity.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicData {
    pub id: String,
    pub title: String,
    pub message: String,
    pub author: String,
    pub course: String,
    pub status: TopicStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Topic> for TopicData {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id.to_string(),
            title: topic.title.as_str().to_string(),
            message: topic.message.clone(),
            author: topic.author.clone(),
            course: topic.course.clone(),
            status: topic.status,
            created_at: topic.created_at,
        }
    }
}

/// `?page=&size=` query parameters shared by listing endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        PageRequest::new(query.page, query.size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageData<T: Serialize + PartialEq> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T: Serialize + PartialEq> PageData<T> {
    pub fn from_page<U>(page: Page<U>, f: impl FnMut(&U) -> T) -> Self {
        Self {
            items: page.items.iter().map(f).collect(),
            page: page.page,
            size: page.size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::errors::PasswordPolicyError;
    use crate::domain::topic::models::TopicId;
    use crate::domain::topic::models::TopicTitle;

    #[test]
    fn test_identity_error_status_mapping() {
        assert!(matches!(
            ApiError::from(IdentityError::CredentialConflict("ana@x.com".to_string())),
            ApiError::Conflict(_)
        ));
        assert_eq!(
            ApiError::from(IdentityError::AuthenticationFailed),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
        assert!(matches!(
            ApiError::from(IdentityError::InvalidPassword(PasswordPolicyError::TooShort {
                min: 6,
                actual: 2
            })),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_internal_errors_are_hidden() {
        let err = ApiError::from(IdentityError::DatabaseError(
            "relation identities does not exist".to_string(),
        ));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_duplicate_topic_is_bad_request() {
        assert!(matches!(
            ApiError::from(TopicError::Duplicate),
            ApiError::BadRequest(_)
        ));
    }

    #[test]
    fn test_topic_data_status_wire_format() {
        let topic = Topic {
            id: TopicId::new(),
            title: TopicTitle::new("Lifetimes".to_string()).unwrap(),
            message: "Help".to_string(),
            author: "ana@x.com".to_string(),
            course: "Rust".to_string(),
            status: TopicStatus::Unanswered,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(TopicData::from(&topic)).unwrap();
        assert_eq!(json["status"], "UNANSWERED");
        assert_eq!(json["title"], "Lifetimes");
    }
}
