//! Exam taking on the clinic kiosk. These routes are public: the patient
//! fills in questionnaires the doctor stacked for them.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use psyexam_core::models::exam::Exam;
use psyexam_core::models::patient::Patient;
use psyexam_core::models::result::{ExamResult, NewExamResult};
use psyexam_core::models::stacked_exam::StackedExam;
use psyexam_core::paths;
use psyexam_instruments::answers::collect_answers;
use psyexam_instruments::definition::{load_definition, ExamDefinition};
use psyexam_storage::{exams, patients, results, stacked_exams};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct PendingExams {
    patient: Patient,
    stacked_exams: Vec<StackedExam>,
}

#[derive(Serialize)]
pub struct ExamForm {
    exam: Exam,
    patient_id: i64,
    definition: ExamDefinition,
}

#[derive(Deserialize)]
pub struct Submission {
    /// Answers keyed `item0`, `item1`, ...
    answers: HashMap<String, i64>,
    #[serde(default)]
    free_texts: Vec<String>,
}

#[derive(Serialize)]
pub struct Submitted {
    result: ExamResult,
    next: String,
}

pub async fn pending_exams(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<PendingExams>, ApiError> {
    let conn = state.db.conn()?;
    let patient = patients::require_patient(&conn, patient_id)?;
    Ok(Json(PendingExams {
        stacked_exams: stacked_exams::list_for_patient(&conn, patient_id)?,
        patient,
    }))
}

fn exam_for_patient(state: &AppState, exam_id: i64, patient_id: i64) -> Result<Exam, ApiError> {
    let conn = state.db.conn()?;
    let exam = exams::require_exam(&conn, exam_id)?;
    patients::require_patient(&conn, patient_id)?;
    Ok(exam)
}

async fn definition_for(state: &AppState, exam: &Exam) -> Result<ExamDefinition, ApiError> {
    let exams_dir = state.exams_dir.clone();
    let name = exam.name.clone();
    let definition = tokio::task::spawn_blocking(move || load_definition(&exams_dir, &name)).await??;
    Ok(definition)
}

pub async fn exam_form(
    State(state): State<AppState>,
    Path((exam_id, patient_id)): Path<(i64, i64)>,
) -> Result<Json<ExamForm>, ApiError> {
    let exam = exam_for_patient(&state, exam_id, patient_id)?;
    let definition = definition_for(&state, &exam).await?;
    Ok(Json(ExamForm {
        exam,
        patient_id,
        definition,
    }))
}

pub async fn submit_exam(
    State(state): State<AppState>,
    Path((exam_id, patient_id)): Path<(i64, i64)>,
    Json(submission): Json<Submission>,
) -> Result<(StatusCode, Json<Submitted>), ApiError> {
    let exam = exam_for_patient(&state, exam_id, patient_id)?;
    let definition = definition_for(&state, &exam).await?;
    let sheet = collect_answers(&definition, &submission.answers, &submission.free_texts)?;

    let conn = state.db.conn()?;
    let result = results::record_result(
        &conn,
        &NewExamResult {
            patient_id,
            exam_id,
            items: sheet.items,
            free_texts: sheet.free_texts,
        },
    )?;
    Ok((
        StatusCode::CREATED,
        Json(Submitted {
            result,
            next: paths::patient_success(patient_id),
        }),
    ))
}
