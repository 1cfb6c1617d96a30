//! Data models
//!
//! What the controller reads from the page (`form`) and what it expects back
//! from the server (`redirect`).

mod form;
mod redirect;

pub use form::{FileBlob, FormEntry, FormSnapshot, FormValue};
pub use redirect::RedirectResponse;
