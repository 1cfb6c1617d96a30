//! HTTP transport for formdrop uploads.
//!
//! Posts a form snapshot as multipart/form-data to the configured endpoint and
//! reads the `redirect_url` contract from a 2xx answer.

pub mod payload;
pub mod transport;

pub use payload::UploadPayload;
pub use transport::UploadTransport;

use anyhow::{Context, Result};
use async_trait::async_trait;
use formdrop_core::{RedirectResponse, TransportConfig, UploadError};
use reqwest::Client;
use std::time::Duration;

/// reqwest-backed transport posting to a single upload URL.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    upload_url: String,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        config.validate().context("Invalid transport configuration")?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            upload_url: config.upload_url(),
        })
    }
}

#[async_trait(?Send)]
impl UploadTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.upload_url
    }

    async fn upload(&self, payload: UploadPayload) -> Result<RedirectResponse, UploadError> {
        let response = self
            .client
            .post(&self.upload_url)
            .multipart(payload.into_form())
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(url = %self.upload_url, status = %status, "Upload response received");
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UploadError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        RedirectResponse::from_slice(&bytes).map_err(|e| UploadError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdrop_core::FormSnapshot;

    #[test]
    fn new_rejects_invalid_config() {
        let config = TransportConfig::default().with_base_url("localhost:8000");
        assert!(HttpTransport::new(&config).is_err());
    }

    #[test]
    fn new_targets_configured_upload_url() {
        let config = TransportConfig::default().with_base_url("http://127.0.0.1:8080/");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.endpoint(), "http://127.0.0.1:8080/upload");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = TransportConfig::default().with_base_url(format!("http://127.0.0.1:{}", port));
        let transport = HttpTransport::new(&config).unwrap();
        let payload = UploadPayload::from_snapshot(&FormSnapshot::new().text("a", "1"));

        let err = transport.upload(payload).await.unwrap_err();
        assert!(matches!(err, UploadError::Transport(_)));
    }
}
