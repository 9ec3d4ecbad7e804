use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::exam::Exam;

/// An exam scheduled for a patient and not yet completed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StackedExam {
    pub id: i64,
    pub patient_id: i64,
    pub exam: Exam,
}
