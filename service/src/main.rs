#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::net::SocketAddr;

use anyhow::Context;
use memoria_civica_api::{build_catalog, build_info::BuildInfo, config::Config, http};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    let filter = EnvFilter::try_new(&config.logging.level)
        .with_context(|| format!("invalid logging.level '{}'", config.logging.level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Init banner so container logs clearly show startup
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "memoria-civica-api starting up"
    );

    let build_info = BuildInfo::from_env();
    tracing::info!(
        version = %build_info.version,
        git_sha = %build_info.git_sha,
        build_time = %build_info.build_time,
        "resolved build metadata"
    );

    let catalog = build_catalog(&config.fixtures);
    tracing::info!(
        seed = config.fixtures.seed,
        deputados = catalog.fixtures().deputados.len(),
        votacoes = catalog.fixtures().votacoes.len(),
        votos_cache_capacity = config.fixtures.votos_cache_capacity,
        "fixtures loaded"
    );

    let app = http::app(&config, catalog, build_info);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.host))?;
    tracing::info!("Starting server at http://{}/api/v1", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
