use astra::Response;
use thiserror::Error;

/// Errors surfaced by the command surface. Validation, range, not-found and
/// duplicate failures are terminal for the operation that raised them and
/// leave the store untouched; storage errors propagate unchanged from the
/// database layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("date range error: {0}")]
    Range(String),
    #[error("not found")]
    NotFound,
    #[error("duplicate entry: {0}")]
    Duplicate(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("spreadsheet error: {0}")]
    Xlsx(String),
    #[error("internal server error")]
    Internal,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, AppError>;

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}
