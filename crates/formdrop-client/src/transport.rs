//! Transport abstraction
//!
//! The controller only needs one thing from the network: post a payload and
//! get the redirect target back.

use async_trait::async_trait;
use formdrop_core::{RedirectResponse, UploadError};

use crate::payload::UploadPayload;

/// Sends an upload payload and decodes the redirect contract.
///
/// Futures are not required to be `Send`: the controller runs on a single
/// cooperative event loop.
#[async_trait(?Send)]
pub trait UploadTransport {
    /// Where uploads go, for logging.
    fn endpoint(&self) -> &str;

    async fn upload(&self, payload: UploadPayload) -> Result<RedirectResponse, UploadError>;
}
