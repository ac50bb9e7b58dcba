//! REST API over the session's consumption table.
//!
//! Provides two GET endpoints:
//! - `/analysis`: annotated records, peak hours and savings summary
//! - `/export`: the annotated table as a downloadable XLSX workbook

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::table::Table;
use crate::tariff::Tariff;

pub use types::{AnalysisQuery, ErrorResponse};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the table is loaded and wrapped in `Arc`.
/// Every request recomputes the analysis from it, so no locks are needed.
pub struct AppState {
    /// Source table for this session (sample or loaded file).
    pub table: Table,
    /// Tariff used when a request does not name one.
    pub default_tariff: Tariff,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analysis", get(handlers::get_analysis))
        .route("/export", get(handlers::get_export))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
