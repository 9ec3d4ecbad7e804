use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{message}")]
    Conflict { field: &'static str, message: String },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("migration v{version} failed: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StorageError::NotFound { entity, id }
    }

    pub fn conflict(field: &'static str, message: impl Into<String>) -> Self {
        StorageError::Conflict {
            field,
            message: message.into(),
        }
    }
}
