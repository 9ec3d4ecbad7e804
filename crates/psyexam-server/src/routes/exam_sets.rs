use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use psyexam_core::models::exam::Exam;
use psyexam_core::models::exam_set::ExamSet;
use psyexam_storage::{exam_sets, exams};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ExamSetOverview {
    exam_sets: Vec<ExamSet>,
    /// Every exam, by name, for the "add exam" picker.
    exams: Vec<Exam>,
}

#[derive(Deserialize)]
pub struct ExamSetForm {
    #[serde(default)]
    name: String,
    description: Option<String>,
}

#[derive(Deserialize)]
pub struct AddExamForm {
    exam_id: i64,
}

#[derive(Serialize)]
pub struct Added {
    added: bool,
}

pub async fn list_exam_sets(
    State(state): State<AppState>,
) -> Result<Json<ExamSetOverview>, ApiError> {
    let conn = state.db.conn()?;
    let mut all_exams = exams::list_exams(&conn)?;
    all_exams.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(ExamSetOverview {
        exam_sets: exam_sets::list_exam_sets(&conn)?,
        exams: all_exams,
    }))
}

pub async fn create_exam_set(
    State(state): State<AppState>,
    Json(form): Json<ExamSetForm>,
) -> Result<(StatusCode, Json<ExamSet>), ApiError> {
    if form.name.trim().is_empty() {
        return Err(ApiError::field("name", "exam set name is required"));
    }
    let conn = state.db.conn()?;
    let set = exam_sets::create_exam_set(&conn, &form.name, form.description.as_deref())?;
    Ok((StatusCode::CREATED, Json(set)))
}

pub async fn delete_exam_set(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = state.db.conn()?;
    if !exam_sets::delete_exam_set(&conn, id)? {
        return Err(ApiError::NotFound("exam set not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Adding an exam that is already in the set leaves the set unchanged.
pub async fn add_exam(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<AddExamForm>,
) -> Result<Json<Added>, ApiError> {
    let conn = state.db.conn()?;
    let added = exam_sets::add_exam(&conn, id, form.exam_id)?;
    Ok(Json(Added { added }))
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = state.db.conn()?;
    if !exam_sets::remove_item(&conn, item_id)? {
        return Err(ApiError::NotFound("exam set item not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
