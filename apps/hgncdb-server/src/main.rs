//! hgncdb server binary.
//!
//! # Environment Variables
//!
//! - `REDIS_IP`: store host (required unless `store.backend = "memory"`)
//! - `RUST_ENV`: selects `config.<env>.toml` (default: dev)
//! - `HGNCDB_*`: overrides any config key, `__` separating sections
//!   (e.g. `HGNCDB_SERVER__PORT=8080`)
//! - `RUST_LOG`: log filter (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hgncdb_chart::SvgBarChart;
use hgncdb_core::config::Config;
use hgncdb_fetch::HttpFetcher;
use hgncdb_server::{create_router, serve, AppState};
use hgncdb_store::Stores;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().context("loading configuration")?;
    let settings = config.settings()?;
    tracing::info!(env = config.env_name(), backend = ?settings.store.backend, "configuration loaded");

    // A store we cannot reach is fatal; there is no local fallback.
    let stores = Stores::connect(&settings.store).await.context("connecting to the store")?;

    let state = AppState {
        stores,
        source: Arc::new(HttpFetcher::new(&settings.upstream)?),
        renderer: Arc::new(SvgBarChart::new(&settings.chart)),
        aggregation: settings.aggregation.clone(),
    };

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", settings.server.host, settings.server.port))?;
    serve(create_router(state), addr).await?;
    Ok(())
}
