use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderValue;
use tracing_subscriber::EnvFilter;

use psyexam_analyzer::state::AnalyzerState;
use psyexam_storage::db::Database;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bind = env::var("ANALYZER_BIND").unwrap_or_else(|_| "0.0.0.0:8110".to_string());
    let database_path =
        PathBuf::from(env::var("PSYEXAM_DATABASE").unwrap_or_else(|_| "psyexam.db".to_string()));
    let allowed_origin = env::var("ANALYZER_ALLOWED_ORIGIN")
        .unwrap_or_else(|_| "http://localhost:3010".to_string());
    let origin = HeaderValue::from_str(&allowed_origin)
        .map_err(|e| eyre::eyre!("invalid ANALYZER_ALLOWED_ORIGIN {allowed_origin:?}: {e}"))?;

    let state = AnalyzerState {
        db: Arc::new(Database::open(&database_path)?),
    };

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, origin = %allowed_origin, "analysis service listening");
    axum::serve(listener, psyexam_analyzer::app(state, origin)).await?;
    Ok(())
}
