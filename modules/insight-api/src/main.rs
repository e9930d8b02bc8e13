use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use insight_api::{build_router, AppState};
use insight_common::Config;
use insight_store::{JsonFileStore, SnapshotStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("insight=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let source = Arc::new(JsonFileStore::new(config.insights_path.clone()));
    let snapshots = Arc::new(SnapshotStore::load(source).await);
    snapshots.spawn_reload_loop(Duration::from_secs(config.cache_reload_secs));

    let state = Arc::new(AppState { snapshots });
    let app = build_router(state, &config.allowed_origins);

    let addr = config.bind_addr();
    info!("Insights API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
