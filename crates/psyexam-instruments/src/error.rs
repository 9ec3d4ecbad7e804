use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("invalid exam name: {0}")]
    InvalidExamName(String),

    #[error("exam definition not readable at {path}: {source}")]
    DefinitionIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("exam definition is malformed: {0}")]
    DefinitionParse(#[from] serde_json::Error),

    #[error("exam definition is invalid: {0}")]
    InvalidDefinition(String),

    #[error("please answer all required questions (missing: {missing:?})")]
    Unanswered { missing: Vec<usize> },

    #[error("answer {value} to question {item} is not one of the offered options")]
    InvalidOption { item: usize, value: i64 },

    #[error("unknown answer field: {0}")]
    UnknownField(String),

    #[error("at most {max} free-text answers are accepted")]
    TooManyFreeTexts { max: usize },

    #[error("free-text answer {index} exceeds {max} characters")]
    FreeTextTooLong { index: usize, max: usize },
}
