use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use psyexam_analysis::error::AnalysisError;
use psyexam_auth::error::AuthError;
use psyexam_auth::gate::Denied;
use psyexam_core::error::CoreError;
use psyexam_instruments::error::InstrumentError;
use psyexam_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Form errors keyed by field name.
    Fields(BTreeMap<String, String>),
    Denied(Denied),
    /// The scoring service failed or could not be reached.
    BadGateway(String),
    Internal(String),
}

impl ApiError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        ApiError::Fields(BTreeMap::from([(field.to_string(), message.into())]))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_to: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, String>>,
}

impl ErrorBody {
    fn message(error: String) -> Self {
        Self {
            error,
            code: None,
            redirect_to: None,
            fields: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            ApiError::Fields(fields) => {
                let error = fields.values().cloned().collect::<Vec<_>>().join("; ");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        fields: Some(fields),
                        ..ErrorBody::message(error)
                    },
                )
            }
            ApiError::Denied(denied) => {
                let status = match denied {
                    Denied::LoginRequired => StatusCode::UNAUTHORIZED,
                    Denied::ApprovalPending | Denied::AdminRequired => StatusCode::FORBIDDEN,
                };
                (
                    status,
                    ErrorBody {
                        code: Some(denied.code()),
                        redirect_to: Some(denied.redirect_to()),
                        ..ErrorBody::message(denied.to_string())
                    },
                )
            }
            ApiError::BadGateway(msg) => {
                tracing::error!("scoring service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody::message("analysis service unavailable".to_string()),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("internal server error".to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<Denied> for ApiError {
    fn from(denied: Denied) -> Self {
        ApiError::Denied(denied)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { entity, .. } => ApiError::NotFound(format!("{entity} not found")),
            StorageError::Conflict { field, message } => ApiError::field(field, message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidField { field, message } => ApiError::field(&field, message),
            CoreError::InvalidDate(e) => {
                tracing::debug!(error = %e, "birthdate rejected");
                ApiError::field("birthdate", "birthdate must be YYYY-MM-DD")
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => ApiError::BadRequest(e.to_string()),
            AuthError::Validation(fields) => ApiError::Fields(fields),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<InstrumentError> for ApiError {
    fn from(e: InstrumentError) -> Self {
        match e {
            InstrumentError::InvalidExamName(_)
            | InstrumentError::DefinitionIo { .. }
            | InstrumentError::DefinitionParse(_)
            | InstrumentError::InvalidDefinition(_) => {
                tracing::warn!(error = %e, "exam definition unavailable");
                ApiError::NotFound("exam configuration not found".to_string())
            }
            InstrumentError::Unanswered { .. } => {
                ApiError::BadRequest("please answer all required questions".to_string())
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        ApiError::BadGateway(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("blocking task failed: {e}"))
    }
}
