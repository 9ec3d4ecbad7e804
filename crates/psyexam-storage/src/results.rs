use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use psyexam_core::models::result::{
    ExamResult, NewExamResult, ResultWithExam, FREE_TEXT_SLOTS, ITEM_SLOTS,
};

use crate::error::StorageError;
use crate::{exams, patients, rows};

const COLUMNS: &str = "r.id, r.patient_id, r.exam_id, \
    r.item0, r.item1, r.item2, r.item3, r.item4, r.item5, r.item6, r.item7, r.item8, r.item9, \
    r.free0, r.free1, r.free2, r.free3, r.free4, r.created_at";

/// Column index of `created_at` in [`COLUMNS`]; exam columns follow it.
const CREATED_AT: usize = 3 + ITEM_SLOTS + FREE_TEXT_SLOTS;

fn result_from_row(row: &Row<'_>) -> rusqlite::Result<ExamResult> {
    let items = (0..ITEM_SLOTS)
        .map(|slot| row.get::<_, Option<i64>>(3 + slot))
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let free_texts = (0..FREE_TEXT_SLOTS)
        .map(|slot| row.get::<_, Option<String>>(3 + ITEM_SLOTS + slot))
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ExamResult {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        exam_id: row.get(2)?,
        items,
        free_texts,
        created_at: rows::timestamp(row, CREATED_AT)?,
    })
}

fn insert(conn: &Connection, new: &NewExamResult) -> Result<ExamResult, StorageError> {
    let now = rows::now();
    let mut values: Vec<rusqlite::types::Value> = vec![new.patient_id.into(), new.exam_id.into()];
    values.extend(new.items.iter().map(|item| (*item).into()));
    values.extend(new.free_texts.iter().map(|text| text.clone().into()));
    values.push(now.clone().into());
    values.push(now.into());

    let placeholders = (1..=values.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    conn.execute(
        &format!(
            "INSERT INTO results (patient_id, exam_id, \
             item0, item1, item2, item3, item4, item5, item6, item7, item8, item9, \
             free0, free1, free2, free3, free4, created_at, updated_at) \
             VALUES ({placeholders})"
        ),
        params_from_iter(values),
    )?;

    let id = conn.last_insert_rowid();
    get_result(conn, id)?.ok_or(StorageError::not_found("result", id))
}

/// Store a completed exam and clear it from the patient's pending list.
/// Both happen in one transaction.
pub fn record_result(conn: &Connection, new: &NewExamResult) -> Result<ExamResult, StorageError> {
    patients::require_patient(conn, new.patient_id)?;
    exams::require_exam(conn, new.exam_id)?;

    let tx = conn.unchecked_transaction()?;
    let result = insert(&tx, new)?;
    let unstacked = tx.execute(
        "DELETE FROM stacked_exams WHERE patient_id = ?1 AND exam_id = ?2",
        params![new.patient_id, new.exam_id],
    )?;
    tx.commit()?;

    tracing::info!(
        result_id = result.id,
        patient_id = new.patient_id,
        exam_id = new.exam_id,
        unstacked,
        "result recorded"
    );
    Ok(result)
}

pub fn get_result(conn: &Connection, id: i64) -> Result<Option<ExamResult>, StorageError> {
    let result = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM results r WHERE r.id = ?1"),
            params![id],
            result_from_row,
        )
        .optional()?;
    Ok(result)
}

/// A result together with its exam.
pub fn get_result_with_exam(
    conn: &Connection,
    id: i64,
) -> Result<Option<ResultWithExam>, StorageError> {
    let result = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS}, e.id, e.name, e.cutoff
                 FROM results r JOIN exams e ON e.id = r.exam_id
                 WHERE r.id = ?1"
            ),
            params![id],
            with_exam_from_row,
        )
        .optional()?;
    Ok(result)
}

fn with_exam_from_row(row: &Row<'_>) -> rusqlite::Result<ResultWithExam> {
    Ok(ResultWithExam {
        result: result_from_row(row)?,
        exam: rows::exam(row, CREATED_AT + 1)?,
    })
}

/// A patient's results with their exams, oldest first.
pub fn list_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<ResultWithExam>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS}, e.id, e.name, e.cutoff
         FROM results r JOIN exams e ON e.id = r.exam_id
         WHERE r.patient_id = ?1
         ORDER BY r.created_at, r.id"
    ))?;
    let results = stmt
        .query_map(params![patient_id], with_exam_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(results)
}
