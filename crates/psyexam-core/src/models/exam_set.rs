use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::exam::Exam;

/// A named bundle of exams that can be stacked onto a patient at once.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExamSet {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<ExamSetItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExamSetItem {
    pub id: i64,
    pub exam_set_id: i64,
    pub exam: Exam,
}
