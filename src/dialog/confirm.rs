// SPDX-License-Identifier: MPL-2.0
//! Yes/no confirmation dialogs.
//!
//! [`Confirmation`] wraps the dialog manager for the most common dialog of
//! all: a prompt with accept and reject buttons. The prompt text travels
//! to the confirmation view as a [`ConfirmPrompt`] payload; the accept and
//! reject callbacks run off the dialog's close result.

use crate::dialog::config::DialogConfig;
use crate::dialog::handle::DialogRef;
use crate::dialog::manager::DialogManager;
use crate::host::{ComponentSpec, InstantiateError, RenderHost};
use crate::notify::Severity;
use crate::payload::Payload;

/// Prompt delivered to the confirmation view as dialog data.
///
/// The view downcasts the dialog payload to this type and renders the
/// message with the two labeled buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    /// Question shown to the user.
    pub message: String,
    /// Severity driving the prompt's styling.
    pub severity: Severity,
    /// Label of the accepting button.
    pub accept_label: String,
    /// Label of the rejecting button.
    pub reject_label: String,
}

/// Builder for a confirmation dialog.
///
/// Defaults: header `"Confirmation"`, [`Severity::Warning`], labels
/// `"Yes"`/`"No"`, no callbacks.
pub struct Confirmation {
    message: String,
    header: String,
    severity: Severity,
    accept_label: String,
    reject_label: String,
    on_accept: Option<Box<dyn FnOnce()>>,
    on_reject: Option<Box<dyn FnOnce()>>,
}

impl Confirmation {
    /// Starts a confirmation with the question to ask.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            header: "Confirmation".to_string(),
            severity: Severity::Warning,
            accept_label: "Yes".to_string(),
            reject_label: "No".to_string(),
            on_accept: None,
            on_reject: None,
        }
    }

    /// Sets the dialog header.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Sets the prompt severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the accepting button's label.
    #[must_use]
    pub fn accept_label(mut self, label: impl Into<String>) -> Self {
        self.accept_label = label.into();
        self
    }

    /// Sets the rejecting button's label.
    #[must_use]
    pub fn reject_label(mut self, label: impl Into<String>) -> Self {
        self.reject_label = label.into();
        self
    }

    /// Runs when the user accepts. At most one invocation, ever.
    #[must_use]
    pub fn on_accept(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_accept = Some(Box::new(callback));
        self
    }

    /// Runs when the user rejects. At most one invocation, ever.
    #[must_use]
    pub fn on_reject(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_reject = Some(Box::new(callback));
        self
    }

    /// Opens the confirmation dialog on the manager.
    ///
    /// The view is expected to close the dialog with a `bool` result:
    /// `true` runs the accept callback, `false` the reject callback. A
    /// plain dismissal (or any non-`bool` result) runs neither.
    ///
    /// # Errors
    ///
    /// Returns the host's [`InstantiateError`] when the confirmation view
    /// cannot be created.
    pub fn open<H: RenderHost + 'static>(
        self,
        manager: &DialogManager<H>,
    ) -> Result<DialogRef, InstantiateError> {
        let Self {
            message,
            header,
            severity,
            accept_label,
            reject_label,
            on_accept,
            on_reject,
        } = self;
        let prompt = ConfirmPrompt {
            message,
            severity,
            accept_label,
            reject_label,
        };
        let config = DialogConfig {
            header: Some(header),
            data: Some(Payload::new(prompt)),
            ..DialogConfig::default()
        };

        let handle = manager.open(&ComponentSpec::confirm(), config)?;
        handle.on_close(move |result| {
            match result.and_then(|payload| payload.downcast_ref::<bool>().copied()) {
                Some(true) => {
                    if let Some(accept) = on_accept {
                        accept();
                    }
                }
                Some(false) => {
                    if let Some(reject) = on_reject {
                        reject();
                    }
                }
                None => {}
            }
        });
        Ok(handle)
    }
}
