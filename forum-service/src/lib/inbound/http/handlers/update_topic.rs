use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TopicData;
use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::TopicId;
use crate::domain::topic::models::UpdateTopicCommand;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateTopicRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
}

pub async fn update_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTopicRequest>,
) -> Result<ApiSuccess<TopicData>, ApiError> {
    let topic_id = TopicId::from_string(&id).map_err(TopicError::from)?;
    let command = UpdateTopicCommand::new(req.title, req.message, req.status)?;

    state
        .topic_service
        .update_topic(&topic_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref topic| ApiSuccess::new(StatusCode::OK, topic.into()))
}
