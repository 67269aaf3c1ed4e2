//! Errors raised by storage backends and the data-access layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{collection} record '{id}' not found")]
    NotFound { collection: &'static str, id: String },

    #[error("{collection} record '{id}' already exists")]
    Conflict { collection: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Invalid(String),

    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether retrying the same operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unreachable(_))
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        StoreError::Invalid(message.into())
    }
}

#[cfg(feature = "mongo")]
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match *err.kind {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Unreachable(err.to_string()),
            _ => StoreError::Backend(err.to_string()),
        }
    }
}
