use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::IdentityData;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::CreateIdentityCommand;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Password;
use crate::inbound::http::router::AppState;

pub async fn create_identity(
    State(state): State<AppState>,
    Json(body): Json<CreateIdentityRequest>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    state
        .identity_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::CREATED, identity.into()))
}

/// HTTP request body for registering an identity (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateIdentityRequest {
    display_name: String,
    email: String,
    password: String,
}

impl CreateIdentityRequest {
    fn try_into_command(self) -> Result<CreateIdentityCommand, IdentityError> {
        let display_name = DisplayName::new(self.display_name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(CreateIdentityCommand::new(display_name, email, password))
    }
}
