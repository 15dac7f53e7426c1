use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::TopicId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let topic_id = TopicId::from_string(&id).map_err(TopicError::from)?;

    state
        .topic_service
        .delete_topic(&topic_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
