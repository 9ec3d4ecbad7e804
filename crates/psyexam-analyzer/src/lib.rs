//! psyexam-analyzer
//!
//! The scoring service. It reads stored results from the shared database,
//! scores them with the analyzer registered for the exam, and keeps one
//! analysis record per result.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use state::AnalyzerState;

/// Build the service router. Browsers may call it only from
/// `allowed_origin`, with credentials.
pub fn app(state: AnalyzerState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(routes::health::banner))
        .route("/health", get(routes::health::health_check))
        .route("/api/analyzers", get(routes::analyzers::list_analyzers))
        .route("/api/analyzers/{id}", get(routes::analyzers::get_analyzer_detail))
        .route("/api/analyze/{result_id}", post(routes::analysis::analyze_result))
        .route(
            "/api/analysis-results/{id}",
            get(routes::analysis::patient_analyses).delete(routes::analysis::delete_analysis),
        )
        .layer(axum_mw::from_fn(middleware::audit_log))
        .layer(cors)
        .with_state(state)
}
