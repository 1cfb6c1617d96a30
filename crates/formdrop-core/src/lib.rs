//! formdrop core library
//!
//! Form snapshots, the redirect response contract, configuration and error
//! types shared by the transport and the page-side controller.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{ControllerConfig, PageConfig, TransportConfig};
pub use error::{ConfigError, ErrorMetadata, LogLevel, UploadError};
pub use models::{FileBlob, FormEntry, FormSnapshot, FormValue, RedirectResponse};
