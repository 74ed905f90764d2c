//! Error types for the record pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level code outside the fixed severity set
    #[error("Level \"{code}\" is not defined, use one of: 100, 200, 250, 300, 400, 500, 550, 600")]
    InvalidLevel { code: i64 },

    /// Level name that does not resolve to a severity
    #[error("Level \"{name}\" is not defined")]
    InvalidLevelName { name: String },

    /// Value of the wrong shape supplied for a writable field
    #[error("Invalid argument for '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// Write or delete attempted through the map-like record view
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    /// Key that is not part of the record
    #[error("Unknown record field '{field}'")]
    UnknownField { field: String },

    /// Failure reported by a handler
    #[error("Handler '{handler}' failed: {message}")]
    HandlerError { handler: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(code: impl Into<i64>) -> Self {
        LoggerError::InvalidLevel { code: code.into() }
    }

    /// Create an invalid argument error for a field
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(operation: impl Into<String>) -> Self {
        LoggerError::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Create an unknown field error
    pub fn unknown_field(field: impl Into<String>) -> Self {
        LoggerError::UnknownField {
            field: field.into(),
        }
    }

    /// Create a handler error
    pub fn handler(handler: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HandlerError {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
