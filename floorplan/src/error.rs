use thiserror::Error;

/// Failures of the fallible boundaries: document load, config and the strict
/// `try_*` mutations. Pointer handling never returns these.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid document: {reason}")]
    InvalidDocument { reason: String },

    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("invalid argument '{param}': {reason}")]
    InvalidArgument { param: &'static str, reason: String },
}

impl EditorError {
    pub fn code(&self) -> &'static str {
        match self {
            EditorError::Json(_) => "json",
            EditorError::InvalidDocument { .. } => "invalid_document",
            EditorError::InvalidConfig { .. } => "invalid_config",
            EditorError::NotFound { .. } => "not_found",
            EditorError::InvalidArgument { .. } => "invalid_argument",
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: impl std::fmt::Display) -> Self {
        EditorError::NotFound { kind, id: id.to_string() }
    }

    pub(crate) fn invalid_argument(param: &'static str, reason: impl Into<String>) -> Self {
        EditorError::InvalidArgument { param, reason: reason.into() }
    }

    pub(crate) fn invalid_document(reason: impl Into<String>) -> Self {
        EditorError::InvalidDocument { reason: reason.into() }
    }
}
