use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::identity::models::IdentityKey;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub key: IdentityKey,
}

/// Middleware that validates bearer tokens and adds the bound identity to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let key = state.identity_service.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthenticatedIdentity { key });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::InvalidToken("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::InvalidToken("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::InvalidToken(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
