use bytes::Bytes;

const DEFAULT_FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// Selected file of a file input, read in full at submit time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileBlob {
    pub filename: String,
    /// MIME type reported by the page; empty when unknown.
    pub content_type: String,
    pub data: Bytes,
}

impl FileBlob {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// What a file input with nothing selected contributes to a submission.
    pub fn empty() -> Self {
        Self::new("", "", Bytes::new())
    }

    /// Content type to put on the wire.
    pub fn effective_content_type(&self) -> &str {
        if self.content_type.is_empty() {
            DEFAULT_FILE_CONTENT_TYPE
        } else {
            &self.content_type
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FileBlob),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormEntry {
    pub name: String,
    pub value: FormValue,
}

/// Field values of a form at one instant, in document order.
///
/// Names may repeat (a `multiple` file input contributes one entry per file).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    entries: Vec<FormEntry>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, FormValue::Text(value.into()));
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: FileBlob) -> Self {
        self.push(name, FormValue::File(file));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: FormValue) {
        self.entries.push(FormEntry {
            name: name.into(),
            value,
        });
    }

    pub fn entries(&self) -> &[FormEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<FormEntry> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = FormEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
