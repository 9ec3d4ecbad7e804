//! Column conversions shared by the repository modules.

use rusqlite::types::Type;
use rusqlite::{ErrorCode, Row};

use psyexam_core::models::exam::Exam;

pub(crate) fn now() -> String {
    jiff::Timestamp::now().to_string()
}

pub(crate) fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<jiff::Timestamp> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn date(row: &Row<'_>, idx: usize) -> rusqlite::Result<jiff::civil::Date> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn json(row: &Row<'_>, idx: usize) -> rusqlite::Result<serde_json::Value> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read an exam from three consecutive columns: id, name, cutoff.
pub(crate) fn exam(row: &Row<'_>, first: usize) -> rusqlite::Result<Exam> {
    Ok(Exam {
        id: row.get(first)?,
        name: row.get(first + 1)?,
        cutoff: row.get(first + 2)?,
    })
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}
