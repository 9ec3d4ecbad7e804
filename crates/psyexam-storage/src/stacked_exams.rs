use rusqlite::{params, Connection};

use psyexam_core::models::exam::Exam;
use psyexam_core::models::stacked_exam::StackedExam;

use crate::error::StorageError;
use crate::{exam_sets, exams, patients, rows};

/// Exams waiting to be taken by a patient, in the order they were stacked.
pub fn list_for_patient(conn: &Connection, patient_id: i64) -> Result<Vec<StackedExam>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.patient_id, e.id, e.name, e.cutoff
         FROM stacked_exams s JOIN exams e ON e.id = s.exam_id
         WHERE s.patient_id = ?1
         ORDER BY s.id",
    )?;
    let stacked = stmt
        .query_map(params![patient_id], |row| {
            Ok(StackedExam {
                id: row.get(0)?,
                patient_id: row.get(1)?,
                exam: rows::exam(row, 2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(stacked)
}

/// Exams that could still be stacked for a patient.
pub fn available_exams(conn: &Connection, patient_id: i64) -> Result<Vec<Exam>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, cutoff FROM exams
         WHERE id NOT IN (SELECT exam_id FROM stacked_exams WHERE patient_id = ?1)
         ORDER BY id",
    )?;
    let exams = stmt
        .query_map(params![patient_id], |row| rows::exam(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(exams)
}

/// Schedule an exam for a patient. Returns whether it was newly stacked.
pub fn stack_exam(conn: &Connection, patient_id: i64, exam_id: i64) -> Result<bool, StorageError> {
    patients::require_patient(conn, patient_id)?;
    exams::require_exam(conn, exam_id)?;

    let changed = conn.execute(
        "INSERT OR IGNORE INTO stacked_exams (patient_id, exam_id, created_at) VALUES (?1, ?2, ?3)",
        params![patient_id, exam_id, rows::now()],
    )?;
    if changed > 0 {
        tracing::info!(patient_id, exam_id, "exam stacked");
    }
    Ok(changed > 0)
}

/// Schedule every exam of a set that is not already pending.
/// Returns how many exams were newly stacked.
pub fn stack_exam_set(
    conn: &Connection,
    patient_id: i64,
    exam_set_id: i64,
) -> Result<usize, StorageError> {
    patients::require_patient(conn, patient_id)?;
    if exam_sets::get_exam_set(conn, exam_set_id)?.is_none() {
        return Err(StorageError::not_found("exam set", exam_set_id));
    }

    let added = conn.execute(
        "INSERT OR IGNORE INTO stacked_exams (patient_id, exam_id, created_at)
         SELECT ?1, exam_id, ?3 FROM exam_set_items WHERE exam_set_id = ?2 ORDER BY id",
        params![patient_id, exam_set_id, rows::now()],
    )?;
    tracing::info!(patient_id, exam_set_id, added, "exam set stacked");
    Ok(added)
}

/// Drop every pending entry of an exam for a patient.
pub fn unstack_exam(conn: &Connection, patient_id: i64, exam_id: i64) -> Result<usize, StorageError> {
    let removed = conn.execute(
        "DELETE FROM stacked_exams WHERE patient_id = ?1 AND exam_id = ?2",
        params![patient_id, exam_id],
    )?;
    Ok(removed)
}
