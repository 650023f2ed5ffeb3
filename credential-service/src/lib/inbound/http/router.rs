use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::current_identity::current_identity;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::identity::service::IdentityService;
use crate::outbound::repositories::InMemoryIdentityRegistry;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<IdentityService<InMemoryIdentityRegistry>>,
}

pub fn create_router(identity_service: Arc<IdentityService<InMemoryIdentityRegistry>>) -> Router {
    let state = AppState { identity_service };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/authenticate", post(authenticate))
        // Paths used by the mobile client
        .route("/signup", post(register))
        .route("/login", post(authenticate));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(current_identity))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of spans: Authorization carries bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::Authenticator;
    use auth::HashingParams;
    use axum::http::header;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::json;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        let authenticator = Authenticator::with_hashing_params(
            b"test-secret-key-for-token-signing-at-least-32-bytes",
            chrono::Duration::hours(1),
            HashingParams {
                memory_cost_kib: 8,
                time_cost: 1,
                parallelism: 1,
            },
        )
        .unwrap();

        create_router(Arc::new(IdentityService::new(
            Arc::new(InMemoryIdentityRegistry::new()),
            Arc::new(authenticator),
        )))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_rejects_empty_secret() {
        let response = router()
            .oneshot(post_json(
                "/api/auth/register",
                json!({ "key": "a@b.com", "secret": "" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "invalid_input");
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "invalid_input");
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let request = Request::builder()
            .uri("/api/auth/me")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "invalid_token");
    }

    #[tokio::test]
    async fn test_me_rejects_non_bearer_scheme() {
        let request = Request::builder()
            .uri("/api/auth/me")
            .header(header::AUTHORIZATION, "Basic YTpi")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
