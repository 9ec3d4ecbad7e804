use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::exam::Exam;

/// Number of scalar answer slots on a result row.
pub const ITEM_SLOTS: usize = 10;

/// Number of free-text answer slots on a result row.
pub const FREE_TEXT_SLOTS: usize = 5;

pub const MAX_FREE_TEXT_LEN: usize = 2000;

/// One patient's completed answer set for one exam.
///
/// `items` always holds [`ITEM_SLOTS`] entries and `free_texts` always holds
/// [`FREE_TEXT_SLOTS`]; slots beyond the questionnaire's length are `None`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExamResult {
    pub id: i64,
    pub patient_id: i64,
    pub exam_id: i64,
    pub items: Vec<Option<i64>>,
    pub free_texts: Vec<Option<String>>,
    pub created_at: jiff::Timestamp,
}

impl ExamResult {
    /// Sum of the answered items.
    pub fn total(&self) -> i64 {
        self.items.iter().flatten().sum()
    }
}

/// A result joined with the exam it answers.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultWithExam {
    #[serde(flatten)]
    pub result: ExamResult,
    pub exam: Exam,
}

/// Fields required to insert a result row.
#[derive(Debug, Clone)]
pub struct NewExamResult {
    pub patient_id: i64,
    pub exam_id: i64,
    pub items: [Option<i64>; ITEM_SLOTS],
    pub free_texts: [Option<String>; FREE_TEXT_SLOTS],
}
