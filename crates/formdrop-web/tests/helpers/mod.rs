//! Stub upload endpoint for integration tests.
//!
//! Serves `POST /upload` on an ephemeral local port, decodes the body with
//! axum's multipart extractor and answers with a scripted reply.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use formdrop_web::TransportConfig;
use tokio::net::TcpListener;

/// One decoded multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedField {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub content_type: String,
    pub fields: Vec<ReceivedField>,
}

#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl StubReply {
    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    /// Hold the reply back for `delay` after the upload is read.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn redirect(url: &str) -> Self {
        Self::json(StatusCode::OK, serde_json::json!({ "redirect_url": url }))
    }
}

#[derive(Clone, Default)]
struct StubState {
    replies: Arc<Mutex<VecDeque<StubReply>>>,
    received: Arc<Mutex<Vec<ReceivedUpload>>>,
}

pub struct StubServer {
    base_url: String,
    state: StubState,
}

impl StubServer {
    /// Start the stub; replies are handed out in order, one per request.
    pub async fn start(replies: Vec<StubReply>) -> anyhow::Result<Self> {
        let state = StubState {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            received: Arc::default(),
        };
        let app = Router::new()
            .route("/upload", post(receive_upload))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            state,
        })
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::default().with_base_url(self.base_url.clone())
    }

    pub fn received(&self) -> Vec<ReceivedUpload> {
        self.state.received.lock().unwrap().clone()
    }
}

async fn receive_upload(
    State(state): State<StubState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut fields = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    [(header::CONTENT_TYPE, "text/plain")],
                    format!("Invalid multipart data: {}", e),
                )
            }
        };
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let field_content_type = field.content_type().map(str::to_string);
        let data = match field.bytes().await {
            Ok(data) => data.to_vec(),
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    [(header::CONTENT_TYPE, "text/plain")],
                    format!("Failed to read field: {}", e),
                )
            }
        };
        fields.push(ReceivedField {
            name,
            file_name,
            content_type: field_content_type,
            data,
        });
    }

    state.received.lock().unwrap().push(ReceivedUpload {
        content_type,
        fields,
    });

    let reply = state
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| StubReply::redirect("/media/wait"));

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}
