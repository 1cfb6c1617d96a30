//! Upload payload
//!
//! A form snapshot packed into a `reqwest::multipart::Form`: one text part per
//! text control, one file part (filename + content type + bytes) per selected
//! file, in document order. The form is built in full before the request is
//! dispatched; reqwest writes the boundary and the matching `Content-Type`.

use formdrop_core::{FileBlob, FormSnapshot, FormValue};
use reqwest::multipart::{Form, Part};

const FALLBACK_FILE_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug)]
pub struct UploadPayload {
    form: Form,
    parts: usize,
    file_bytes: usize,
}

impl UploadPayload {
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        let mut form = Form::new();
        let mut file_bytes = 0;

        for entry in snapshot.entries() {
            form = match &entry.value {
                FormValue::Text(text) => form.text(entry.name.clone(), text.clone()),
                FormValue::File(file) => {
                    file_bytes += file.data.len();
                    form.part(entry.name.clone(), file_part(file))
                }
            };
        }

        Self {
            form,
            parts: snapshot.len(),
            file_bytes,
        }
    }

    pub fn boundary(&self) -> &str {
        self.form.boundary()
    }

    /// Number of parts (form entries) in the body.
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// Total size of the file contents carried.
    pub fn file_bytes(&self) -> usize {
        self.file_bytes
    }

    pub fn into_form(self) -> Form {
        self.form
    }
}

fn file_part(file: &FileBlob) -> Part {
    let part = || Part::bytes(file.data.to_vec()).file_name(file.filename.clone());

    match part().mime_str(file.effective_content_type()) {
        Ok(part) => part,
        Err(e) => {
            tracing::debug!(
                filename = %file.filename,
                content_type = %file.content_type,
                error = %e,
                "Unparseable file content type, sending as octet-stream"
            );
            part()
                .mime_str(FALLBACK_FILE_CONTENT_TYPE)
                .unwrap_or_else(|_| part())
        }
    }
}
