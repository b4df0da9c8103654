use astra::Response;
// errors.rs
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, validation, missing records) or downstream layers (DB, xlsx).
#[derive(Debug, Error)]
pub enum ServerError {
    /// A submission is missing a required field or refers to something that doesn't exist.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// A multi-step write stopped after some of its steps. The transaction is rolled back.
    #[error("Partial failure: {0}")]
    PartialFailure(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn not_found(what: &str) -> Self {
        ServerError::NotFound(format!("{what} not found"))
    }

    pub fn status(&self) -> u16 {
        match self {
            ServerError::Validation(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::NotFound(_) => 404,
            ServerError::PartialFailure(_)
            | ServerError::DbError(_)
            | ServerError::XlsxError(_)
            | ServerError::InternalError => 500,
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
