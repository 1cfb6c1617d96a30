use serde::{Deserialize, Serialize};

/// Body the upload endpoint answers with on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectResponse {
    /// Where the page navigates next, as given by the server.
    pub redirect_url: String,
}

impl RedirectResponse {
    /// Parse a response body. Extra fields are ignored; a missing or
    /// non-string `redirect_url` is an error.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
