use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange email and password for a bearer token.
///
/// Unknown email and wrong password both answer 401 with the same body.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    state
        .authentication
        .login(&body.email, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|ref token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub token: String,
    pub token_type: String,
    /// RFC 3339 in the issuer's fixed zone, e.g. `2025-03-10T21:30:00-03:00`
    pub expires_at: String,
}

impl From<&auth::Token> for AuthenticateResponseData {
    fn from(token: &auth::Token) -> Self {
        Self {
            token: token.as_str().to_string(),
            token_type: "Bearer".to_string(),
            expires_at: token.expires_at().to_rfc3339(),
        }
    }
}
