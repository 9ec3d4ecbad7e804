use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use psyexam_analysis::client::{AnalysisClient, DEFAULT_TIMEOUT_SECS};
use psyexam_auth::session::SessionKeys;
use psyexam_server::config::ServerConfig;
use psyexam_server::seed::seed_admin;
use psyexam_server::state::AppState;
use psyexam_storage::db::Database;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServerConfig::from_env();

    let db = Database::open(&config.database_path)?;
    if let Some(password) = &config.admin_password {
        seed_admin(&db, password)?;
    }

    let state = AppState {
        db: Arc::new(db),
        sessions: SessionKeys::new(config.session_secret.as_bytes()),
        cookies: config.cookie.clone(),
        analysis: AnalysisClient::new(&config.analyzer_url, DEFAULT_TIMEOUT_SECS)?,
        exams_dir: config.exams_dir.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(
        bind = %config.bind,
        analyzer = %config.analyzer_url,
        exams_dir = %config.exams_dir.display(),
        "psyexam server listening"
    );
    axum::serve(listener, psyexam_server::app(state)).await?;
    Ok(())
}
