use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::IdentityData;
use super::PageData;
use super::PageQuery;
use crate::inbound::http::router::AppState;

/// Identities ordered by display name.
pub async fn list_identities(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<PageData<IdentityData>>, ApiError> {
    state
        .identity_service
        .list_identities(query.into())
        .await
        .map_err(ApiError::from)
        .map(|page| {
            let data = PageData::from_page(page, |identity| IdentityData::from(identity));
            ApiSuccess::new(StatusCode::OK, data)
        })
}
