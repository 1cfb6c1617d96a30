//! Error types module
//!
//! `UploadError` covers everything that can go wrong between dispatching an
//! upload and reading the redirect target. `ConfigError` covers an invalid
//! configuration document, reported when the controller is bound or the
//! transport is built.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like an unexpected response shape
    Debug,
    /// Warning level - for recoverable issues like a refused connection
    Warn,
}

/// Describes how an error should be reported.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether submitting the same form again could succeed
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Form selector must not be empty")]
    EmptySelector,

    #[error("Upload path must start with '/': {0}")]
    RelativeUploadPath(String),

    #[error("Base URL must use http or https: {0}")]
    UnsupportedBaseUrl(String),

    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Request could not be sent or no response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with a non-2xx status.
    #[error("Upload rejected with status {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx body did not match the redirect contract.
    #[error("Response decoding failed: {0}")]
    Decode(String),
}

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            UploadError::Transport(_) => "TRANSPORT_ERROR",
            UploadError::Status { .. } => "UPLOAD_REJECTED",
            UploadError::Decode(_) => "DECODE_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            UploadError::Transport(_) => true,
            UploadError::Status { status, .. } => *status >= 500,
            UploadError::Decode(_) => false,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            UploadError::Transport(_) | UploadError::Status { .. } => LogLevel::Warn,
            UploadError::Decode(_) => LogLevel::Debug,
        }
    }
}
