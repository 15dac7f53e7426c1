use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::PageData;
use super::PageQuery;
use super::TopicData;
use crate::inbound::http::router::AppState;

/// Topics oldest first.
pub async fn list_topics(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<PageData<TopicData>>, ApiError> {
    state
        .topic_service
        .list_topics(query.into())
        .await
        .map_err(ApiError::from)
        .map(|page| {
            let data = PageData::from_page(page, |topic| TopicData::from(topic));
            ApiSuccess::new(StatusCode::OK, data)
        })
}
