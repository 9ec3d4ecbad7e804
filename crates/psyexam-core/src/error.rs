use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid date: {0}")]
    InvalidDate(#[from] jiff::Error),
}

impl CoreError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
