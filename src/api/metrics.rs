//! Metrics exposition and dashboard endpoints.

use axum::http::header;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::{Extension, Router};
use paywatch_core::{DashboardSnapshot, MetricsReport, TestObservability};

/// Routes: `GET /metrics` (Prometheus text), `GET /metrics/report`
/// (raw JSON snapshot), `GET /dashboard` (derived values).
pub fn metrics_routes() -> Router {
    Router::new()
        .route("/metrics", get(export_metrics))
        .route("/metrics/report", get(metrics_report))
        .route("/dashboard", get(dashboard))
}

async fn export_metrics(
    Extension(observability): Extension<TestObservability>,
) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        observability.export_metrics(),
    )
}

async fn metrics_report(
    Extension(observability): Extension<TestObservability>,
) -> Json<MetricsReport> {
    Json(observability.all_metrics())
}

async fn dashboard(
    Extension(observability): Extension<TestObservability>,
) -> Json<DashboardSnapshot> {
    Json(observability.dashboard())
}
