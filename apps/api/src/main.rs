use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screener::config::Config;
use screener::routes::build_router;
use screener::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; bad values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Build app state; scoring parameters are validated here, before serving
    let state = AppState::new(config.clone())?;
    info!(
        "Scoring engine ready: K={} title/body={}/{} alpha={} idf={:?} keywords={}",
        config.scoring.shared_token_threshold,
        config.scoring.part_weights.title,
        config.scoring.part_weights.body,
        config.scoring.keyword_alpha,
        config.scoring.idf_scheme,
        config.scoring.keywords.len()
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
