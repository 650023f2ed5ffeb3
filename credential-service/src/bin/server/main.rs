use std::sync::Arc;

use auth::Authenticator;
use credential_service::config::Config;
use credential_service::domain::identity::service::IdentityService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::InMemoryIdentityRegistry;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Refusing to start: invalid configuration");
        e
    })?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.token.ttl_seconds,
        hashing_memory_cost_kib = config.hashing.memory_cost_kib,
        hashing_time_cost = config.hashing.time_cost,
        hashing_parallelism = config.hashing.parallelism,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::with_hashing_params(
        config.token.secret.as_bytes(),
        config.token.ttl(),
        config.hashing.into(),
    )?);
    let identity_registry = Arc::new(InMemoryIdentityRegistry::new());

    let identity_service = Arc::new(IdentityService::new(identity_registry, authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(identity_service);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
