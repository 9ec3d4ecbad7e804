//! A doctor's worklist for one patient: results, pending exams, charts,
//! and analysis.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use psyexam_core::models::analysis::{AnalysisRecord, PatientAnalysis};
use psyexam_core::models::exam::Exam;
use psyexam_core::models::patient::Patient;
use psyexam_core::models::result::ResultWithExam;
use psyexam_core::models::stacked_exam::StackedExam;
use psyexam_storage::{patients, results, stacked_exams};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct PatientOverview {
    patient: Patient,
    results: Vec<ResultWithExam>,
    stacked_exams: Vec<StackedExam>,
    /// Exams that are not currently pending for the patient.
    available_exams: Vec<Exam>,
}

#[derive(Deserialize)]
pub struct StackForm {
    exam_id: i64,
}

#[derive(Serialize)]
pub struct Stacked {
    added: usize,
}

#[derive(Serialize)]
pub struct ChartPoint {
    result_id: i64,
    taken_at: jiff::Timestamp,
    total: i64,
}

#[derive(Serialize)]
pub struct ExamChart {
    exam: Exam,
    /// Reference line drawn across the chart.
    cutoff: i64,
    points: Vec<ChartPoint>,
}

#[derive(Serialize)]
pub struct PatientAnalyses {
    analysis_results: Vec<PatientAnalysis>,
}

pub async fn overview(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<PatientOverview>, ApiError> {
    let conn = state.db.conn()?;
    let patient = patients::require_patient(&conn, patient_id)?;
    Ok(Json(PatientOverview {
        results: results::list_for_patient(&conn, patient_id)?,
        stacked_exams: stacked_exams::list_for_patient(&conn, patient_id)?,
        available_exams: stacked_exams::available_exams(&conn, patient_id)?,
        patient,
    }))
}

pub async fn stack_exam(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
    Json(form): Json<StackForm>,
) -> Result<Json<Stacked>, ApiError> {
    let conn = state.db.conn()?;
    let added = stacked_exams::stack_exam(&conn, patient_id, form.exam_id)?;
    Ok(Json(Stacked {
        added: usize::from(added),
    }))
}

pub async fn unstack_exam(
    State(state): State<AppState>,
    Path((patient_id, exam_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let conn = state.db.conn()?;
    stacked_exams::unstack_exam(&conn, patient_id, exam_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn stack_exam_set(
    State(state): State<AppState>,
    Path((patient_id, exam_set_id)): Path<(i64, i64)>,
) -> Result<Json<Stacked>, ApiError> {
    let conn = state.db.conn()?;
    let added = stacked_exams::stack_exam_set(&conn, patient_id, exam_set_id)?;
    Ok(Json(Stacked { added }))
}

/// Result totals over time, one series per exam.
pub async fn charts(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Vec<ExamChart>>, ApiError> {
    let conn = state.db.conn()?;
    patients::require_patient(&conn, patient_id)?;

    let mut charts: BTreeMap<i64, ExamChart> = BTreeMap::new();
    for ResultWithExam { result, exam } in results::list_for_patient(&conn, patient_id)? {
        let chart = charts.entry(exam.id).or_insert_with(|| ExamChart {
            cutoff: exam.cutoff,
            exam,
            points: Vec::new(),
        });
        chart.points.push(ChartPoint {
            result_id: result.id,
            taken_at: result.created_at,
            total: result.total(),
        });
    }
    Ok(Json(charts.into_values().collect()))
}

pub async fn analyze_result(
    State(state): State<AppState>,
    Path(result_id): Path<i64>,
) -> Result<(StatusCode, Json<AnalysisRecord>), ApiError> {
    {
        let conn = state.db.conn()?;
        if results::get_result(&conn, result_id)?.is_none() {
            return Err(ApiError::NotFound("result not found".to_string()));
        }
    }
    let record = state.analysis.analyze_result(result_id).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn patient_analyses(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<PatientAnalyses>, ApiError> {
    {
        let conn = state.db.conn()?;
        patients::require_patient(&conn, patient_id)?;
    }
    let analysis_results = state.analysis.patient_analyses(patient_id).await?;
    Ok(Json(PatientAnalyses { analysis_results }))
}
