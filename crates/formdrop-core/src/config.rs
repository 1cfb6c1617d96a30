//! Configuration module
//!
//! The hosting page hands over one flat document. It splits into the part the
//! controller reads (which form, whether to lock) and the part the transport
//! reads (where to post, how long to wait).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_FORM_SELECTOR: &str = ".file-form";
const DEFAULT_UPLOAD_PATH: &str = "/upload";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Settings read by the page-side controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Selector of the form the controller binds to.
    pub form_selector: String,
    /// Ignore submits while a previous upload is still pending.
    pub lock_while_in_flight: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            form_selector: DEFAULT_FORM_SELECTOR.to_string(),
            lock_while_in_flight: false,
        }
    }
}

impl ControllerConfig {
    pub fn with_lock_while_in_flight(mut self, lock: bool) -> Self {
        self.lock_while_in_flight = lock;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.form_selector.trim().is_empty() {
            return Err(ConfigError::EmptySelector);
        }
        Ok(())
    }
}

/// Settings read by the HTTP transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Origin of the hosting page.
    pub base_url: String,
    /// Path the payload is posted to, relative to `base_url`.
    pub upload_path: String,
    /// `None` waits for the server indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl TransportConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.upload_path.starts_with('/') {
            return Err(ConfigError::RelativeUploadPath(self.upload_path.clone()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::UnsupportedBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }

    /// Absolute URL the upload is posted to.
    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.upload_path)
    }
}

/// The whole configuration document as handed over by the hosting page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(flatten)]
    pub controller: ControllerConfig,
    #[serde(flatten)]
    pub transport: TransportConfig,
}

impl PageConfig {
    /// Parse a JSON configuration document. Missing keys take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.controller.validate()?;
        config.transport.validate()?;
        Ok(config)
    }
}
