//! Page abstraction
//!
//! The controller never touches a concrete page. The hosting page hands it
//! these seams: a document to look the form up in, the form itself, the submit
//! event, and the navigator used for the final redirect.

use formdrop_core::FormSnapshot;

/// The submit event raised by the bound form.
pub trait SubmitEvent {
    /// Cancel the page's own submission (navigation/reload).
    fn prevent_default(&self);

    fn default_prevented(&self) -> bool;
}

/// Read access to a form's current field values.
pub trait FormElement {
    /// Every successful control with its current value, file inputs with the
    /// selected files' bytes, in document order.
    fn snapshot(&self) -> FormSnapshot;
}

pub trait Document {
    type Form: FormElement;

    /// First form matching `selector`, if any.
    fn query_selector(&self, selector: &str) -> Option<Self::Form>;
}

pub trait Navigator {
    /// Navigate to `url`, overwriting the current history entry.
    fn replace(&self, url: &str);
}
