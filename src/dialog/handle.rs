// SPDX-License-Identifier: MPL-2.0
//! Caller-side dialog reference.
//!
//! A [`DialogRef`] is what `DialogManager::open` returns and what content
//! components receive through their `DialogAware::set_handle` hook. It can
//! close the dialog, optionally with a result value, and it exposes the
//! one-shot close notification.

use crate::dialog::completion::{self, CompletionChannel, CompletionSender};
use crate::payload::Payload;
use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of one open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId(u64);

impl DialogId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog#{}", self.0)
    }
}

/// Manager-side contract the reference closes through.
///
/// `begin_close` tears the dialog down when it is still open and hands
/// back the completion sender; the caller fires it after releasing its
/// borrow of the controller, so completion callbacks may re-enter the
/// manager.
pub(crate) trait DialogController {
    fn begin_close(&mut self, id: DialogId) -> Option<CompletionSender>;
}

/// Handle to one dialog, clonable and cheap.
///
/// Every clone addresses the same dialog and shares the same completion
/// channel. The link to the manager is weak: a reference that outlives its
/// manager degrades to a silent no-op.
#[derive(Clone)]
pub struct DialogRef {
    id: DialogId,
    controller: Option<Weak<RefCell<dyn DialogController>>>,
    completion: CompletionChannel,
}

impl DialogRef {
    pub(crate) fn connected(
        id: DialogId,
        controller: Weak<RefCell<dyn DialogController>>,
        completion: CompletionChannel,
    ) -> Self {
        Self {
            id,
            controller: Some(controller),
            completion,
        }
    }

    /// Creates a placeholder handle that is not connected to any dialog.
    ///
    /// Content components may store one of these until the manager
    /// connects a real handle. Closing a detached handle logs a warning
    /// and does nothing; its close notification never fires.
    #[must_use]
    pub fn detached() -> Self {
        let (_sender, completion) = completion::channel();
        Self {
            id: DialogId::next(),
            controller: None,
            completion,
        }
    }

    /// Closes the dialog without a result.
    ///
    /// Closing an already-closed dialog is a silent no-op, so racing
    /// dismissal paths need no coordination.
    pub fn close(&self) {
        self.finish(None);
    }

    /// Closes the dialog and delivers `result` to the close subscribers.
    pub fn close_with(&self, result: Payload) {
        self.finish(Some(result));
    }

    /// Subscribes to the close notification.
    ///
    /// The callback runs exactly once, with the result value passed to
    /// [`close_with`](Self::close_with) or `None` for a plain close or
    /// dismissal. Subscribing after the dialog closed yields nothing;
    /// subscribe on the reference as soon as it is obtained.
    pub fn on_close(&self, callback: impl FnOnce(Option<Payload>) + 'static) {
        self.completion.subscribe(callback);
    }

    /// Whether the dialog has already closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.completion.is_fired()
    }

    /// Whether this is a placeholder with no dialog behind it.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.controller.is_none()
    }

    /// The dialog's identifier.
    #[must_use]
    pub fn id(&self) -> DialogId {
        self.id
    }

    fn finish(&self, result: Option<Payload>) {
        let Some(controller) = &self.controller else {
            log::warn!("{} is a detached dialog handle; close ignored", self.id);
            return;
        };
        let Some(controller) = controller.upgrade() else {
            // Manager already gone; nothing left to close.
            return;
        };
        let sender = controller.borrow_mut().begin_close(self.id);
        if let Some(sender) = sender {
            sender.fire(result);
        }
    }
}

impl fmt::Debug for DialogRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogRef")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .field("detached", &self.is_detached())
            .finish()
    }
}
