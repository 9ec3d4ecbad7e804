use std::collections::BTreeMap;

use rusqlite::{params, Connection, OptionalExtension};

use psyexam_core::models::exam_set::{ExamSet, ExamSetItem};

use crate::error::StorageError;
use crate::exams;
use crate::rows;

pub fn create_exam_set(
    conn: &Connection,
    name: &str,
    description: Option<&str>,
) -> Result<ExamSet, StorageError> {
    let name = name.trim();
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    conn.execute(
        "INSERT INTO exam_sets (name, description, created_at) VALUES (?1, ?2, ?3)",
        params![name, description, rows::now()],
    )?;

    let id = conn.last_insert_rowid();
    tracing::info!(exam_set_id = id, name, "exam set created");
    Ok(ExamSet {
        id,
        name: name.to_string(),
        description: description.map(str::to_string),
        items: Vec::new(),
    })
}

/// All exam sets ordered by name, each with its items.
pub fn list_exam_sets(conn: &Connection) -> Result<Vec<ExamSet>, StorageError> {
    let mut stmt =
        conn.prepare("SELECT id, name, description FROM exam_sets ORDER BY name, id")?;
    let mut sets = stmt
        .query_map([], |row| {
            Ok(ExamSet {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                items: Vec::new(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut items_by_set: BTreeMap<i64, Vec<ExamSetItem>> = BTreeMap::new();
    for item in all_items(conn)? {
        items_by_set.entry(item.exam_set_id).or_default().push(item);
    }
    for set in &mut sets {
        set.items = items_by_set.remove(&set.id).unwrap_or_default();
    }
    Ok(sets)
}

pub fn get_exam_set(conn: &Connection, id: i64) -> Result<Option<ExamSet>, StorageError> {
    let set = conn
        .query_row(
            "SELECT id, name, description FROM exam_sets WHERE id = ?1",
            params![id],
            |row| {
                Ok(ExamSet {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    items: Vec::new(),
                })
            },
        )
        .optional()?;

    let Some(mut set) = set else {
        return Ok(None);
    };
    set.items = all_items(conn)?
        .into_iter()
        .filter(|item| item.exam_set_id == id)
        .collect();
    Ok(Some(set))
}

fn all_items(conn: &Connection) -> Result<Vec<ExamSetItem>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT i.id, i.exam_set_id, e.id, e.name, e.cutoff
         FROM exam_set_items i JOIN exams e ON e.id = i.exam_id
         ORDER BY i.exam_set_id, i.id",
    )?;
    let items = stmt
        .query_map([], |row| {
            Ok(ExamSetItem {
                id: row.get(0)?,
                exam_set_id: row.get(1)?,
                exam: rows::exam(row, 2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

/// Delete a set and its items. Returns `false` when the set does not exist.
pub fn delete_exam_set(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let changed = conn.execute("DELETE FROM exam_sets WHERE id = ?1", params![id])?;
    if changed > 0 {
        tracing::info!(exam_set_id = id, "exam set deleted");
    }
    Ok(changed > 0)
}

/// Add an exam to a set. A pair that is already present is left alone;
/// returns whether a new item was created.
pub fn add_exam(conn: &Connection, exam_set_id: i64, exam_id: i64) -> Result<bool, StorageError> {
    if get_exam_set(conn, exam_set_id)?.is_none() {
        return Err(StorageError::not_found("exam set", exam_set_id));
    }
    exams::require_exam(conn, exam_id)?;

    let changed = conn.execute(
        "INSERT OR IGNORE INTO exam_set_items (exam_set_id, exam_id) VALUES (?1, ?2)",
        params![exam_set_id, exam_id],
    )?;
    Ok(changed > 0)
}

/// Remove one item from its set. Returns `false` when the item does not exist.
pub fn remove_item(conn: &Connection, item_id: i64) -> Result<bool, StorageError> {
    let changed = conn.execute("DELETE FROM exam_set_items WHERE id = ?1", params![item_id])?;
    Ok(changed > 0)
}
