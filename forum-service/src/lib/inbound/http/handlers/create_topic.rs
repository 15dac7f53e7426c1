use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TopicData;
use crate::domain::topic::models::CreateTopicCommand;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn create_topic(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedIdentity>,
    Json(body): Json<CreateTopicRequest>,
) -> Result<ApiSuccess<TopicData>, ApiError> {
    let author = body.author.unwrap_or(caller.email);
    let command = CreateTopicCommand::new(body.title, body.message, author, body.course)?;

    state
        .topic_service
        .create_topic(command)
        .await
        .map_err(ApiError::from)
        .map(|ref topic| ApiSuccess::new(StatusCode::CREATED, topic.into()))
}

/// HTTP request body for opening a topic (raw JSON)
///
/// `author` defaults to the caller's email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTopicRequest {
    title: String,
    message: String,
    author: Option<String>,
    course: String,
}
