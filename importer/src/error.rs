use crate::storage::StorageError;
use shared_types::ExtractionError;

/// Every failure an import operation can surface to the user. None of them
/// are fatal; each maps to a transient notification.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Session expired")]
    AuthExpired,

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    #[error("No contacts to export")]
    EmptyExport,

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

impl From<config::ConfigError> for ImportError {
    fn from(e: config::ConfigError) -> Self {
        ImportError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
