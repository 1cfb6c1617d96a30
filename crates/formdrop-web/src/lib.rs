//! Page-side upload controller.
//!
//! Intercepts the submit of the page's upload form, posts the form as
//! multipart/form-data and, when the server answers with a `redirect_url`,
//! replaces the current page with it.
//!
//! ```ignore
//! let PageConfig { controller, transport } = PageConfig::from_json(raw)?;
//! let transport = HttpTransport::new(&transport)?;
//! if let Some(controller) = UploadFormController::bind(&document, controller, transport, history)? {
//!     let pending = controller.handle_submit(&event);
//!     spawn_local(async move { pending.await; });
//! }
//! ```

pub mod controller;
pub mod dom;
pub mod memory;
pub mod telemetry;

pub use controller::{PendingSubmit, SubmitOutcome, SubmitState, UploadFormController};
pub use dom::{Document, FormElement, Navigator, SubmitEvent};
pub use memory::{MemoryDocument, MemoryForm, MemoryHistory, MemorySubmitEvent};
pub use telemetry::init_tracing;

pub use formdrop_client::{HttpTransport, UploadPayload, UploadTransport};
pub use formdrop_core::{
    ConfigError, ControllerConfig, FileBlob, FormSnapshot, PageConfig, RedirectResponse,
    TransportConfig, UploadError,
};
