//! HTTP surface over the cached HGNC dataset.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use hgncdb_core::config::AggregationSettings;
use hgncdb_core::traits::{ChartRenderer, DatasetSource};
use hgncdb_query::{Aggregator, GeneQueries};
use hgncdb_store::Stores;

pub mod error;
pub mod handlers;
pub mod shutdown;

pub use error::ApiError;

/// Everything a handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub source: Arc<dyn DatasetSource>,
    pub renderer: Arc<dyn ChartRenderer>,
    pub aggregation: AggregationSettings,
}

impl AppState {
    pub fn queries(&self) -> GeneQueries {
        GeneQueries::new(self.stores.records.clone())
    }

    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.stores.records.clone())
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/data",
            get(handlers::data::list_data)
                .post(handlers::data::load_data)
                .delete(handlers::data::delete_data),
        )
        .route("/genes", get(handlers::genes::list_genes))
        .route("/genes/:id", get(handlers::genes::get_gene))
        .route("/locus/:id", get(handlers::genes::get_locus))
        .route("/when/:id", get(handlers::genes::get_dates))
        .route("/locusdata", get(handlers::genes::locus_counts))
        .route(
            "/image",
            get(handlers::image::get_image)
                .post(handlers::image::create_image)
                .delete(handlers::image::delete_image),
        )
        .route("/imagedata", get(handlers::image::get_image_data))
        .route("/help", get(handlers::help::help))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until SIGINT/SIGTERM, letting in-flight requests finish.
pub async fn serve(router: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "hgncdb listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let signal = shutdown::shutdown_signal().await;
            tracing::info!(%signal, "shutting down");
        })
        .await?;
    tracing::info!("server stopped");
    Ok(())
}
