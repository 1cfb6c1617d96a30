//! Upload form controller
//!
//! Binds to the page's upload form and turns each submit into an asynchronous
//! multipart upload followed by a history-replacing redirect.
//!
//! `handle_submit` does its synchronous work (suppress the default submission,
//! snapshot and encode the form) before returning. The returned future is the
//! continuation: it waits for the server and performs the redirect. Hosts
//! schedule it on their event loop. Failures never leave the continuation; they
//! resolve to [`SubmitOutcome::Failed`] and are logged.

use std::cell::Cell;
use std::rc::Rc;

use formdrop_client::{UploadPayload, UploadTransport};
use formdrop_core::{ConfigError, ControllerConfig, ErrorMetadata, LogLevel, UploadError};
use futures::future::{self, LocalBoxFuture};

use crate::dom::{Document, FormElement, Navigator, SubmitEvent};

/// Continuation of a submit, to be driven by the host's event loop.
pub type PendingSubmit = LocalBoxFuture<'static, SubmitOutcome>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Navigated,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The page was sent to this URL.
    Navigated(String),
    /// Nothing happened on the page; the form can be submitted again.
    Failed(UploadError),
    /// An upload was already in flight and the in-flight lock is on.
    Suppressed,
}

impl SubmitOutcome {
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Navigated(url) => Some(url),
            _ => None,
        }
    }
}

struct ControllerInner<F, T, N> {
    config: ControllerConfig,
    form: F,
    transport: T,
    navigator: N,
    in_flight: Cell<usize>,
    navigated: Cell<bool>,
}

/// Releases one in-flight slot when the upload settles or is dropped.
struct InFlightGuard<F, T, N> {
    inner: Rc<ControllerInner<F, T, N>>,
}

impl<F, T, N> InFlightGuard<F, T, N> {
    fn acquire(inner: &Rc<ControllerInner<F, T, N>>) -> Self {
        inner.in_flight.set(inner.in_flight.get() + 1);
        Self {
            inner: Rc::clone(inner),
        }
    }
}

impl<F, T, N> Drop for InFlightGuard<F, T, N> {
    fn drop(&mut self) {
        let count = self.inner.in_flight.get();
        self.inner.in_flight.set(count.saturating_sub(1));
    }
}

/// Controller bound to one upload form.
pub struct UploadFormController<F, T, N> {
    inner: Rc<ControllerInner<F, T, N>>,
}

impl<F, T, N> Clone for UploadFormController<F, T, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<F, T, N> UploadFormController<F, T, N>
where
    F: FormElement + 'static,
    T: UploadTransport + 'static,
    N: Navigator + 'static,
{
    /// Look up the form named by `config.form_selector` and bind to it.
    ///
    /// Called by the hosting page once its markup is attached. Returns
    /// `Ok(None)` when the page has no such form; that is not an error.
    pub fn bind<D>(
        document: &D,
        config: ControllerConfig,
        transport: T,
        navigator: N,
    ) -> Result<Option<Self>, ConfigError>
    where
        D: Document<Form = F>,
    {
        config.validate()?;

        let Some(form) = document.query_selector(&config.form_selector) else {
            tracing::debug!(
                selector = %config.form_selector,
                "No upload form on page, controller not bound"
            );
            return Ok(None);
        };

        tracing::debug!(
            selector = %config.form_selector,
            endpoint = %transport.endpoint(),
            "Upload form bound"
        );

        Ok(Some(Self {
            inner: Rc::new(ControllerInner {
                config,
                form,
                transport,
                navigator,
                in_flight: Cell::new(0),
                navigated: Cell::new(false),
            }),
        }))
    }

    /// Handle a submit event raised by the bound form.
    pub fn handle_submit<E>(&self, event: &E) -> PendingSubmit
    where
        E: SubmitEvent + ?Sized,
    {
        event.prevent_default();

        if self.inner.config.lock_while_in_flight && self.inner.in_flight.get() > 0 {
            tracing::debug!(
                in_flight = self.inner.in_flight.get(),
                "Upload already in flight, submit ignored"
            );
            return Box::pin(future::ready(SubmitOutcome::Suppressed));
        }

        let snapshot = self.inner.form.snapshot();
        let payload = UploadPayload::from_snapshot(&snapshot);
        tracing::debug!(
            url = %self.inner.transport.endpoint(),
            fields = payload.parts(),
            file_bytes = payload.file_bytes(),
            "Dispatching upload"
        );

        let guard = InFlightGuard::acquire(&self.inner);
        let inner = Rc::clone(&self.inner);

        Box::pin(async move {
            let result = inner.transport.upload(payload).await;
            drop(guard);

            match result {
                Ok(response) => {
                    tracing::info!(redirect_url = %response.redirect_url, "Upload accepted, redirecting");
                    inner.navigator.replace(&response.redirect_url);
                    inner.navigated.set(true);
                    SubmitOutcome::Navigated(response.redirect_url)
                }
                Err(err) => {
                    log_upload_error(&err);
                    SubmitOutcome::Failed(err)
                }
            }
        })
    }

    pub fn state(&self) -> SubmitState {
        if self.inner.navigated.get() {
            SubmitState::Navigated
        } else if self.inner.in_flight.get() > 0 {
            SubmitState::Submitting
        } else {
            SubmitState::Idle
        }
    }

    /// Uploads dispatched and not yet settled.
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.get()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }
}

fn log_upload_error(err: &UploadError) {
    match err.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %err, code = err.error_code(), "Upload failed")
        }
        LogLevel::Warn => {
            tracing::warn!(error = %err, code = err.error_code(), "Upload failed")
        }
    }
}
