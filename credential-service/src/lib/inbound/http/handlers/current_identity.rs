use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;

/// Echo the identity the presented bearer token is bound to.
pub async fn current_identity(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<CurrentIdentityResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentIdentityResponseData {
            key: identity.key.as_str().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentIdentityResponseData {
    pub key: String,
}
