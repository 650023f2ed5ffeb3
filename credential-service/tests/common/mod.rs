use std::sync::Arc;

use auth::Authenticator;
use auth::HashingParams;
use credential_service::domain::identity::service::IdentityService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::InMemoryIdentityRegistry;

pub const TOKEN_SECRET: &[u8] = b"test-secret-key-for-token-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Shares the server's signing key and ttl
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Minimal work factor keeps the suite fast
        let authenticator = Arc::new(
            Authenticator::with_hashing_params(
                TOKEN_SECRET,
                chrono::Duration::hours(1),
                HashingParams {
                    memory_cost_kib: 8,
                    time_cost: 1,
                    parallelism: 1,
                },
            )
            .expect("Failed to create authenticator"),
        );

        let identity_registry = Arc::new(InMemoryIdentityRegistry::new());
        let identity_service = Arc::new(IdentityService::new(
            identity_registry,
            Arc::clone(&authenticator),
        ));

        let router = create_router(identity_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a key/secret pair and return the response
    pub async fn register(&self, key: &str, secret: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&serde_json::json!({ "key": key, "secret": secret }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Authenticate a key/secret pair and return the response
    pub async fn authenticate(&self, key: &str, secret: &str) -> reqwest::Response {
        self.post("/api/auth/authenticate")
            .json(&serde_json::json!({ "key": key, "secret": secret }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
