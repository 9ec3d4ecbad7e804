use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A questionnaire known to the clinic. The questions themselves live in a
/// JSON definition file named after the exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Exam {
    pub id: i64,
    pub name: String,
    pub cutoff: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewExam {
    pub name: String,
    pub cutoff: i64,
}

impl NewExam {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::invalid("name", "exam name is required"));
        }
        Ok(())
    }
}
