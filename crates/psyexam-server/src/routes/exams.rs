use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use psyexam_core::models::exam::{Exam, NewExam};
use psyexam_storage::exams;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_exams(State(state): State<AppState>) -> Result<Json<Vec<Exam>>, ApiError> {
    let conn = state.db.conn()?;
    Ok(Json(exams::list_exams(&conn)?))
}

pub async fn create_exam(
    State(state): State<AppState>,
    Json(new): Json<NewExam>,
) -> Result<(StatusCode, Json<Exam>), ApiError> {
    new.validate()?;
    let conn = state.db.conn()?;
    let exam = exams::create_exam(&conn, &new)?;
    Ok((StatusCode::CREATED, Json(exam)))
}

pub async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = state.db.conn()?;
    if !exams::delete_exam(&conn, id)? {
        return Err(ApiError::NotFound("exam not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
