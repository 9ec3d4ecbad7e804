use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("invalid session: {0}")]
    InvalidSession(#[from] jsonwebtoken::errors::Error),

    #[error("invalid form: {}", summarize(.0))]
    Validation(BTreeMap<String, String>),
}

fn summarize(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}
