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
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = body?;
    let (key, secret) = body.try_into_parts()?;

    state
        .identity_service
        .register(RegisterCommand::new(key, secret))
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::CREATED, identity.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub key: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Identity> for RegisterResponseData {
    fn from(identity: &Identity) -> Self {
        Self {
            key: identity.key.as_str().to_string(),
            message: "Identity registered".to_string(),
            created_at: identity.created_at,
        }
    }
}
