use std::sync::Arc;

use psyexam_storage::db::Database;

#[derive(Clone)]
pub struct AnalyzerState {
    pub db: Arc<Database>,
}
