use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use psyexam_instruments::scoring::Domain;
use psyexam_instruments::{all_analyzers, get_analyzer};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct AnalyzerSummary {
    id: String,
    name: String,
}

#[derive(Serialize)]
pub struct AnalyzerDetail {
    id: String,
    name: String,
    item_count: usize,
    domains: Vec<Domain>,
}

pub async fn list_analyzers() -> Json<Vec<AnalyzerSummary>> {
    let analyzers = all_analyzers()
        .iter()
        .map(|a| AnalyzerSummary {
            id: a.id().to_string(),
            name: a.name().to_string(),
        })
        .collect();
    Json(analyzers)
}

/// `id` may be given as an exam name ("PHQ-9") or a registry key ("phq_9").
pub async fn get_analyzer_detail(Path(id): Path<String>) -> Result<Json<AnalyzerDetail>, ApiError> {
    let analyzer =
        get_analyzer(&id).ok_or_else(|| ApiError::NotFound(format!("analyzer not found: {id}")))?;

    Ok(Json(AnalyzerDetail {
        id: analyzer.id().to_string(),
        name: analyzer.name().to_string(),
        item_count: analyzer.item_count(),
        domains: analyzer.domains().to_vec(),
    }))
}
