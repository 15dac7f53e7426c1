use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::IdentityData;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::UpdateIdentityCommand;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an identity (raw JSON)
///
/// Email is immutable; blank fields are ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateIdentityRequest {
    pub display_name: Option<String>,
    pub password: Option<String>,
}

pub async fn update_identity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateIdentityRequest>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    let identity_id = IdentityId::from_string(&id).map_err(IdentityError::from)?;
    let command = UpdateIdentityCommand::new(req.display_name, req.password)?;

    state
        .identity_service
        .update_identity(&identity_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}
