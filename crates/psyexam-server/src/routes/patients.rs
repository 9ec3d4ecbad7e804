use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use psyexam_core::error::CoreError;
use psyexam_core::models::patient::{parse_birthdate, NewPatient, Patient};
use psyexam_core::paths;
use psyexam_storage::patients;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PatientForm {
    id: i64,
    initial: String,
    /// `YYYY-MM-DD`
    birthdate: String,
    sex: i32,
}

impl PatientForm {
    fn parse(self) -> Result<NewPatient, CoreError> {
        let new = NewPatient {
            id: self.id,
            initial: self.initial,
            birthdate: parse_birthdate(&self.birthdate)?,
            sex: self.sex,
        };
        new.validate()?;
        Ok(new)
    }
}

#[derive(Serialize)]
pub struct PatientLookup {
    patient: Patient,
    next: String,
}

pub async fn list_patients(State(state): State<AppState>) -> Result<Json<Vec<Patient>>, ApiError> {
    let conn = state.db.conn()?;
    Ok(Json(patients::list_patients(&conn)?))
}

pub async fn create_patient(
    State(state): State<AppState>,
    Json(form): Json<PatientForm>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let new = form.parse()?;
    let conn = state.db.conn()?;
    let patient = patients::create_patient(&conn, &new)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// Look a patient up by chart number and point at their worklist.
pub async fn find_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PatientLookup>, ApiError> {
    let conn = state.db.conn()?;
    let patient = patients::require_patient(&conn, id)?;
    Ok(Json(PatientLookup {
        next: paths::doctor_patient(patient.id),
        patient,
    }))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = state.db.conn()?;
    if !patients::delete_patient(&conn, id)? {
        return Err(ApiError::NotFound("patient not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
