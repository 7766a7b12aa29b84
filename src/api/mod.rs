//! HTTP reporting surface for the observability core.
//!
//! Pull-based and read-only: handlers render the current store state and
//! never fail, so a scrape can never disturb a running test.

pub mod health;
pub mod metrics;

use axum::{Extension, Router};
use paywatch_core::TestObservability;
use tower_http::trace::TraceLayer;

pub use health::health_routes;
pub use metrics::metrics_routes;

/// Create the router with all reporting endpoints.
pub fn api_router(observability: TestObservability) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(metrics_routes())
        .layer(Extension(observability))
        .layer(TraceLayer::new_for_http())
}
