//! In-memory page host
//!
//! A minimal page model implementing the [`crate::dom`] seams: forms with
//! classes and field values, submit events that perform the page's own
//! GET submission unless prevented, and a session history with push, replace
//! and back. Used to host the controller outside a browser and in tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formdrop_core::{FileBlob, FormEntry, FormSnapshot, FormValue};

use crate::dom::{Document, FormElement, Navigator, SubmitEvent};

#[derive(Debug, Default)]
pub struct MemorySubmitEvent {
    default_prevented: Cell<bool>,
}

impl MemorySubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmitEvent for MemorySubmitEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

#[derive(Debug)]
struct FormState {
    id: Option<String>,
    classes: Vec<String>,
    action: String,
    entries: Vec<FormEntry>,
}

/// Shared handle to a form; clones see the same fields.
#[derive(Debug, Clone)]
pub struct MemoryForm {
    state: Rc<RefCell<FormState>>,
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryForm {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FormState {
                id: None,
                classes: Vec::new(),
                action: "/".to_string(),
                entries: Vec::new(),
            })),
        }
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.state.borrow_mut().classes.push(class.into());
        self
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.state.borrow_mut().id = Some(id.into());
        self
    }

    /// Target of the page's own (unsuppressed) submission.
    pub fn with_action(self, action: impl Into<String>) -> Self {
        self.state.borrow_mut().action = action.into();
        self
    }

    /// Set a text control, adding it after existing controls if new.
    pub fn set_text(&self, name: &str, value: impl Into<String>) {
        let value = FormValue::Text(value.into());
        let mut state = self.state.borrow_mut();
        match state.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.value = value,
            None => state.entries.push(FormEntry {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Set the selection of a file input. An empty selection still
    /// contributes one empty file entry, as browsers do.
    pub fn select_files(&self, name: &str, files: Vec<FileBlob>) {
        let files = if files.is_empty() {
            vec![FileBlob::empty()]
        } else {
            files
        };
        let replacement = files.into_iter().map(|file| FormEntry {
            name: name.to_string(),
            value: FormValue::File(file),
        });

        let mut state = self.state.borrow_mut();
        let position = state
            .entries
            .iter()
            .position(|e| e.name == name)
            .unwrap_or(state.entries.len());
        state.entries.retain(|e| e.name != name);
        let position = position.min(state.entries.len());
        state.entries.splice(position..position, replacement);
    }

    fn matches(&self, selector: &str) -> bool {
        let state = self.state.borrow();
        if let Some(class) = selector.strip_prefix('.') {
            state.classes.iter().any(|c| c == class)
        } else if let Some(id) = selector.strip_prefix('#') {
            state.id.as_deref() == Some(id)
        } else {
            selector == "form"
        }
    }

    /// URL the page itself would load for this form: a GET to the action
    /// with the fields as query string, file inputs contributing filenames.
    pub fn default_submission_url(&self) -> String {
        let state = self.state.borrow();
        let query: Vec<String> = state
            .entries
            .iter()
            .map(|entry| {
                let value = match &entry.value {
                    FormValue::Text(text) => text.as_str(),
                    FormValue::File(file) => file.filename.as_str(),
                };
                format!(
                    "{}={}",
                    urlencoding::encode(&entry.name),
                    urlencoding::encode(value)
                )
            })
            .collect();
        format!("{}?{}", state.action, query.join("&"))
    }

    /// Fire a submit event at this form: run `listener`, then perform the
    /// page's own submission into `history` unless the listener prevented it.
    pub fn dispatch_submit<R>(
        &self,
        history: &MemoryHistory,
        listener: impl FnOnce(&MemorySubmitEvent) -> R,
    ) -> R {
        let event = MemorySubmitEvent::new();
        let result = listener(&event);
        if !event.default_prevented() {
            history.push(self.default_submission_url());
        }
        result
    }
}

impl FormElement for MemoryForm {
    fn snapshot(&self) -> FormSnapshot {
        self.state.borrow().entries.iter().cloned().collect()
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryDocument {
    forms: Vec<MemoryForm>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form: MemoryForm) -> Self {
        self.forms.push(form);
        self
    }
}

impl Document for MemoryDocument {
    type Form = MemoryForm;

    fn query_selector(&self, selector: &str) -> Option<MemoryForm> {
        let selector = selector.trim();
        self.forms.iter().find(|f| f.matches(selector)).cloned()
    }
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
    index: usize,
}

/// Session history of one tab. Clones share the same history.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    state: Rc<RefCell<HistoryState>>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(HistoryState {
                entries: vec![initial.into()],
                index: 0,
            })),
        }
    }

    pub fn location(&self) -> String {
        let state = self.state.borrow();
        state.entries[state.index].clone()
    }

    /// Navigate to `url` as a new entry, dropping any forward entries.
    pub fn push(&self, url: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        let keep = state.index + 1;
        state.entries.truncate(keep);
        state.entries.push(url.into());
        state.index = keep;
    }

    pub fn replace(&self, url: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        let index = state.index;
        state.entries[index] = url.into();
    }

    pub fn can_go_back(&self) -> bool {
        self.state.borrow().index > 0
    }

    /// Step back one entry. Returns false at the start of history.
    pub fn back(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.index == 0 {
            return false;
        }
        state.index -= 1;
        true
    }

    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }
}

impl Navigator for MemoryHistory {
    fn replace(&self, url: &str) {
        MemoryHistory::replace(self, url);
    }
}
