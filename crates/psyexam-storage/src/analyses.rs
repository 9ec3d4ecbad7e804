use rusqlite::{params, Connection, OptionalExtension, Row};

use psyexam_core::models::analysis::{Analysis, AnalysisRecord, PatientAnalysis};

use crate::error::StorageError;
use crate::rows;

const COLUMNS: &str = "a.id, a.result_id, a.patient_id, a.exam_id, a.total_score, a.details, \
    a.interpretation, a.severity, a.created_at, a.updated_at";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<AnalysisRecord> {
    Ok(AnalysisRecord {
        id: row.get(0)?,
        result_id: row.get(1)?,
        patient_id: row.get(2)?,
        exam_id: row.get(3)?,
        total_score: row.get(4)?,
        details: rows::json(row, 5)?,
        interpretation: row.get(6)?,
        severity: row.get(7)?,
        created_at: rows::timestamp(row, 8)?,
        updated_at: rows::timestamp(row, 9)?,
    })
}

/// The analysis already stored for a result, if any.
pub fn find_for_result(
    conn: &Connection,
    result_id: i64,
) -> Result<Option<AnalysisRecord>, StorageError> {
    let record = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM analysis_results a WHERE a.result_id = ?1"),
            params![result_id],
            record_from_row,
        )
        .optional()?;
    Ok(record)
}

/// Persist the analysis of one result. A result can be analyzed only once.
pub fn insert_analysis(
    conn: &Connection,
    result_id: i64,
    patient_id: i64,
    exam_id: i64,
    analysis: &Analysis,
) -> Result<AnalysisRecord, StorageError> {
    let now = rows::now();
    let details = serde_json::to_string(&analysis.details)?;
    conn.execute(
        "INSERT INTO analysis_results
             (result_id, patient_id, exam_id, total_score, details, interpretation, severity,
              created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
        params![
            result_id,
            patient_id,
            exam_id,
            analysis.total_score,
            details,
            analysis.interpretation,
            analysis.severity,
            now
        ],
    )
    .map_err(|e| {
        if rows::is_constraint_violation(&e) {
            StorageError::conflict("result_id", "result has already been analyzed")
        } else {
            e.into()
        }
    })?;

    let id = conn.last_insert_rowid();
    tracing::info!(analysis_id = id, result_id, total_score = analysis.total_score, "analysis stored");
    find_for_result(conn, result_id)?.ok_or(StorageError::not_found("analysis", id))
}

/// A patient's analyses labelled with their exam, newest first.
pub fn list_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<PatientAnalysis>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS}, e.name
         FROM analysis_results a JOIN exams e ON e.id = a.exam_id
         WHERE a.patient_id = ?1
         ORDER BY a.created_at DESC, a.id DESC"
    ))?;
    let analyses = stmt
        .query_map(params![patient_id], |row| {
            Ok(PatientAnalysis {
                record: record_from_row(row)?,
                exam_name: row.get(10)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(analyses)
}

/// Returns `false` when the analysis does not exist.
pub fn delete_analysis(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let changed = conn.execute("DELETE FROM analysis_results WHERE id = ?1", params![id])?;
    if changed > 0 {
        tracing::info!(analysis_id = id, "analysis deleted");
    }
    Ok(changed > 0)
}
