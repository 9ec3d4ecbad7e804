use rusqlite::{params, Connection, OptionalExtension};

use psyexam_core::models::exam::{Exam, NewExam};

use crate::error::StorageError;
use crate::rows;

pub fn create_exam(conn: &Connection, new: &NewExam) -> Result<Exam, StorageError> {
    let name = new.name.trim();
    let now = rows::now();
    conn.execute(
        "INSERT INTO exams (name, cutoff, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
        params![name, new.cutoff, now],
    )
    .map_err(|e| {
        if rows::is_constraint_violation(&e) {
            StorageError::conflict("name", format!("exam '{name}' already exists"))
        } else {
            e.into()
        }
    })?;

    let id = conn.last_insert_rowid();
    tracing::info!(exam_id = id, name, "exam created");
    Ok(Exam {
        id,
        name: name.to_string(),
        cutoff: new.cutoff,
    })
}

pub fn get_exam(conn: &Connection, id: i64) -> Result<Option<Exam>, StorageError> {
    let exam = conn
        .query_row(
            "SELECT id, name, cutoff FROM exams WHERE id = ?1",
            params![id],
            |row| rows::exam(row, 0),
        )
        .optional()?;
    Ok(exam)
}

/// Fetch an exam that must exist.
pub fn require_exam(conn: &Connection, id: i64) -> Result<Exam, StorageError> {
    get_exam(conn, id)?.ok_or(StorageError::not_found("exam", id))
}

/// All exams in creation order.
pub fn list_exams(conn: &Connection) -> Result<Vec<Exam>, StorageError> {
    let mut stmt = conn.prepare("SELECT id, name, cutoff FROM exams ORDER BY id")?;
    let exams = stmt
        .query_map([], |row| rows::exam(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(exams)
}

/// Delete an exam with everything that references it.
/// Returns `false` when the exam does not exist.
pub fn delete_exam(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let changed = conn.execute("DELETE FROM exams WHERE id = ?1", params![id])?;
    if changed > 0 {
        tracing::info!(exam_id = id, "exam deleted");
    }
    Ok(changed > 0)
}
