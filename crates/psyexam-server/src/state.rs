use std::path::PathBuf;
use std::sync::Arc;

use psyexam_analysis::client::AnalysisClient;
use psyexam_auth::session::{CookieSettings, SessionKeys};
use psyexam_storage::db::Database;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub sessions: SessionKeys,
    pub cookies: CookieSettings,
    pub analysis: AnalysisClient,
    /// Directory holding the `<exam name>.json` questionnaire definitions.
    pub exams_dir: PathBuf,
}
