use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use psyexam_core::models::analysis::{AnalysisRecord, PatientAnalysis};
use psyexam_instruments::get_analyzer;
use psyexam_storage::{analyses, patients, results};

use crate::error::ApiError;
use crate::state::AnalyzerState;

#[derive(Serialize)]
pub struct PatientAnalyses {
    analysis_results: Vec<PatientAnalysis>,
}

/// Score a stored result. A result is analyzed once; later requests get
/// the stored record back.
pub async fn analyze_result(
    State(state): State<AnalyzerState>,
    Path(result_id): Path<i64>,
) -> Result<(StatusCode, Json<AnalysisRecord>), ApiError> {
    let conn = state.db.conn()?;
    let stored = results::get_result_with_exam(&conn, result_id)?
        .ok_or_else(|| ApiError::NotFound("result not found".to_string()))?;

    if let Some(existing) = analyses::find_for_result(&conn, result_id)? {
        tracing::info!(result_id, analysis_id = existing.id, "analysis already stored");
        return Ok((StatusCode::CREATED, Json(existing)));
    }

    let analyzer = get_analyzer(&stored.exam.name).ok_or_else(|| {
        ApiError::BadRequest(format!("no analyzer for exam '{}'", stored.exam.name))
    })?;
    let analysis = analyzer.analyze(&stored.result.items);

    let record = analyses::insert_analysis(
        &conn,
        result_id,
        stored.result.patient_id,
        stored.exam.id,
        &analysis,
    )?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn patient_analyses(
    State(state): State<AnalyzerState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<PatientAnalyses>, ApiError> {
    let conn = state.db.conn()?;
    patients::require_patient(&conn, patient_id)?;
    Ok(Json(PatientAnalyses {
        analysis_results: analyses::list_for_patient(&conn, patient_id)?,
    }))
}

pub async fn delete_analysis(
    State(state): State<AnalyzerState>,
    Path(analysis_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = state.db.conn()?;
    if !analyses::delete_analysis(&conn, analysis_id)? {
        return Err(ApiError::NotFound("analysis not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
