use rusqlite::{params, Connection, OptionalExtension, Row};

use psyexam_core::models::patient::{NewPatient, Patient};

use crate::error::StorageError;
use crate::rows;

const COLUMNS: &str = "id, initial, birthdate, sex, created_at";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        initial: row.get(1)?,
        birthdate: rows::date(row, 2)?,
        sex: row.get(3)?,
        created_at: rows::timestamp(row, 4)?,
    })
}

/// Register a patient under the clinic's own id.
pub fn create_patient(conn: &Connection, new: &NewPatient) -> Result<Patient, StorageError> {
    if get_patient(conn, new.id)?.is_some() {
        return Err(StorageError::conflict("id", "patient id already in use"));
    }

    let now = rows::now();
    conn.execute(
        "INSERT INTO patients (id, initial, birthdate, sex, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        params![
            new.id,
            new.initial.trim(),
            new.birthdate.to_string(),
            new.sex,
            now
        ],
    )?;
    tracing::info!(patient_id = new.id, "patient created");

    get_patient(conn, new.id)?.ok_or(StorageError::not_found("patient", new.id))
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, StorageError> {
    let patient = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM patients WHERE id = ?1"),
            params![id],
            patient_from_row,
        )
        .optional()?;
    Ok(patient)
}

/// Fetch a patient that must exist.
pub fn require_patient(conn: &Connection, id: i64) -> Result<Patient, StorageError> {
    get_patient(conn, id)?.ok_or(StorageError::not_found("patient", id))
}

/// All patients, most recently registered first.
pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM patients ORDER BY created_at DESC, id DESC"
    ))?;
    let patients = stmt
        .query_map([], patient_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(patients)
}

/// Delete a patient with all results, stacked exams, and analyses.
/// Returns `false` when the patient does not exist.
pub fn delete_patient(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let changed = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    if changed > 0 {
        tracing::info!(patient_id = id, "patient deleted");
    }
    Ok(changed > 0)
}
