use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::TopicData;
use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::TopicId;
use crate::inbound::http::router::AppState;

pub async fn get_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> Result<ApiSuccess<TopicData>, ApiError> {
    let topic_id = TopicId::from_string(&topic_id).map_err(TopicError::from)?;

    state
        .topic_service
        .get_topic(&topic_id)
        .await
        .map_err(ApiError::from)
        .map(|ref topic| ApiSuccess::new(StatusCode::OK, topic.into()))
}
