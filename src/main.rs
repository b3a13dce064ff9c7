use discovery_searcher::access::ClaimsVerifier;
use discovery_searcher::backend::{ElasticClient, SearchExecutor, TracingSink};
use discovery_searcher::config::Config;
use discovery_searcher::content::CortezaApiClient;
use discovery_searcher::gateway::{AppState, SearchPipeline, router};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting discovery searcher on {}", config.http_addr);
    tracing::info!("Search backend: {}", config.es_address());
    tracing::info!("Content API: {} (auth {})", config.api_url, config.auth_url);
    tracing::info!(
        anonymous_index = config.profile.anonymous_index.prefix(),
        identifier_key = config.profile.identifier_key.as_str(),
        fallback_fields = config.profile.fallback_fields,
        "Search profile"
    );

    // 1. Outbound clients:
    let backend = Arc::new(ElasticClient::new(
        config.es_address(),
        config.request_timeout,
    )?);
    let content = Arc::new(CortezaApiClient::new(
        &config.api_url,
        &config.auth_url,
        &config.client_key,
        &config.client_secret,
        config.request_timeout,
    )?);

    // 2. Token verification:
    let verifier = Arc::new(ClaimsVerifier::new(config.jwt_secret.as_deref()));
    if !verifier.is_enabled() {
        tracing::warn!("No JWT secret configured, every request is served as anonymous");
    }

    // 3. Pipeline and router:
    let executor = SearchExecutor::new(backend, Arc::new(TracingSink));
    let pipeline = SearchPipeline::new(executor, content, config.profile.clone());
    let app = router(AppState {
        pipeline: Arc::new(pipeline),
        verifier,
        request_timeout: config.request_timeout,
    });

    // 4. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    tracing::info!("HTTP server listening on {}", config.http_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
