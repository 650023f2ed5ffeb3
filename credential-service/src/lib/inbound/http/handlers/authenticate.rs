use auth::Token;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequestBody;
use crate::domain::identity::models::AuthenticateCommand;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let Json(body) = body?;
    let (key, secret) = body.try_into_parts()?;

    let token = state
        .identity_service
        .authenticate(AuthenticateCommand::new(key, secret))
        .await
        .map_err(|e| {
            if e.is_authentication_failure() {
                tracing::warn!("Authentication failed");
            }
            ApiError::from(e)
        })?;

    Ok(ApiSuccess::new(StatusCode::OK, (&token).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

impl From<&Token> for AuthenticateResponseData {
    fn from(token: &Token) -> Self {
        Self {
            token: token.value.clone(),
            token_type: "Bearer",
            expires_at: token.expires_at,
        }
    }
}
