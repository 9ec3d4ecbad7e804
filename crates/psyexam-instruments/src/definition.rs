use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use psyexam_core::models::result::ITEM_SLOTS;
use psyexam_core::paths;

use crate::error::InstrumentError;

/// A questionnaire as shown to the patient. Every question shares the same
/// answer options.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExamDefinition {
    pub title: String,
    pub instruction: String,
    pub questions: Vec<Question>,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub value: i64,
    pub label: String,
}

impl ExamDefinition {
    pub fn validate(&self) -> Result<(), InstrumentError> {
        if self.questions.is_empty() {
            return Err(InstrumentError::InvalidDefinition(
                "definition has no questions".to_string(),
            ));
        }
        if self.questions.len() > ITEM_SLOTS {
            return Err(InstrumentError::InvalidDefinition(format!(
                "definition has {} questions; at most {ITEM_SLOTS} are supported",
                self.questions.len()
            )));
        }
        if self.options.is_empty() {
            return Err(InstrumentError::InvalidDefinition(
                "definition has no answer options".to_string(),
            ));
        }
        Ok(())
    }

    pub fn accepts(&self, value: i64) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// Resolve the definition file for an exam inside `exams_dir`.
///
/// Exam names become file names, so anything that could escape the
/// directory is refused.
pub fn definition_path(exams_dir: &Path, exam_name: &str) -> Result<PathBuf, InstrumentError> {
    let name = exam_name.trim();
    if name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.contains("..")
    {
        return Err(InstrumentError::InvalidExamName(exam_name.to_string()));
    }
    Ok(exams_dir.join(paths::exam_definition_file(name)))
}

/// Load and validate the questionnaire definition for an exam.
pub fn load_definition(exams_dir: &Path, exam_name: &str) -> Result<ExamDefinition, InstrumentError> {
    let path = definition_path(exams_dir, exam_name)?;
    let contents = std::fs::read_to_string(&path).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "exam definition not readable");
        InstrumentError::DefinitionIo {
            path: path.clone(),
            source,
        }
    })?;
    let definition: ExamDefinition = serde_json::from_str(&contents)?;
    definition.validate()?;
    Ok(definition)
}
