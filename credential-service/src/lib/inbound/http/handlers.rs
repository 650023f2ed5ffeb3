use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::errors::IdentityKeyError;
use crate::domain::identity::errors::SecretError;
use crate::domain::identity::models::IdentityKey;
use crate::domain::identity::models::Secret;

pub mod authenticate;
pub mod current_identity;
pub mod register;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    InvalidInput(String),
    DuplicateIdentity(String),
    /// Unknown key and wrong secret render identically.
    InvalidCredentials,
    InvalidToken(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidInput(_)
            | ApiError::DuplicateIdentity(_)
            | ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "internal_error",
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::DuplicateIdentity(_) => "duplicate_identity",
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::InvalidToken(_) => "invalid_token",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                "An internal error occurred".to_string()
            }
            ApiError::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
            ApiError::InvalidInput(msg)
            | ApiError::DuplicateIdentity(msg)
            | ApiError::InvalidToken(msg) => msg,
        };

        (status, Json(ApiErrorData { code, message })).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidKey(_) | IdentityError::InvalidSecret(_) => {
                ApiError::InvalidInput(err.to_string())
            }
            IdentityError::DuplicateIdentity(_) => ApiError::DuplicateIdentity(err.to_string()),
            IdentityError::UnknownIdentity | IdentityError::BadSecret => {
                ApiError::InvalidCredentials
            }
            IdentityError::Token(_) => ApiError::InvalidToken("Invalid or expired token".to_string()),
            IdentityError::Password(_) | IdentityError::Registry(_) | IdentityError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub code: &'static str,
    pub message: String,
}

/// HTTP request body carrying a key and a secret (raw JSON).
///
/// Accepts the mobile client's `email`/`password` names as well.
/// Missing fields deserialize as empty and are rejected as invalid input.
#[derive(Clone, Deserialize)]
pub struct CredentialsRequestBody {
    #[serde(default, alias = "email")]
    key: String,
    #[serde(default, alias = "password")]
    secret: String,
}

#[derive(Debug, Clone, Error)]
pub enum ParseCredentialsError {
    #[error("Invalid key: {0}")]
    Key(#[from] IdentityKeyError),

    #[error("Invalid secret: {0}")]
    Secret(#[from] SecretError),
}

impl CredentialsRequestBody {
    fn try_into_parts(self) -> Result<(IdentityKey, Secret), ParseCredentialsError> {
        let secret = Secret::new(self.secret)?;
        let key = IdentityKey::new(self.key)?;
        Ok((key, secret))
    }
}

impl From<ParseCredentialsError> for ApiError {
    fn from(err: ParseCredentialsError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}
