use anyhow::Context;
use tracing_subscriber::EnvFilter;

use fangate_core::config::{
    expand_path, BackendConfig, Config, LookupConfig, SearchConfig, ServerConfig,
};
use fangate_gateway::query_store::QueryStore;
use fangate_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let server: ServerConfig = config.section("server")?;
    let backend: BackendConfig = config.section("backend")?;
    let search: SearchConfig = config.section("search")?;
    let lookup: LookupConfig = config.section("lookup")?;

    let query_store = match &lookup.queries_file {
        Some(raw) => {
            let path = expand_path(raw);
            let store = QueryStore::load(&path)
                .with_context(|| format!("Failed to load stored queries from {}", path.display()))?;
            tracing::info!(queries = store.len(), path = %path.display(), "stored queries loaded");
            Some(store)
        }
        None => None,
    };

    let state = AppState::new(&backend, &search, query_store)?;
    tracing::info!(
        backend_url = %backend.url,
        collections = search.collections.len(),
        timeout_secs = backend.timeout_secs,
        embeds_queries = backend.embeds_queries,
        "gateway starting"
    );

    let app = fangate_gateway::router(state);
    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
