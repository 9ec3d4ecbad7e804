use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot reach scoring service at {0}")]
    Connection(String),

    #[error("scoring service timed out after {0}s")]
    Timeout(u64),

    #[error("scoring service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("unexpected scoring service response: {0}")]
    ResponseParse(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}
