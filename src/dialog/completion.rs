// SPDX-License-Identifier: MPL-2.0
//! Single-fire completion channel backing `DialogRef::on_close`.
//!
//! The channel holds callbacks while pending and delivers exactly one
//! value. The sender half is consumed by `fire`, so a second emission is
//! impossible by construction; subscribing after the fire yields nothing.

use crate::payload::Payload;
use std::cell::RefCell;
use std::rc::Rc;

type Callback = Box<dyn FnOnce(Option<Payload>)>;

enum State {
    Pending(Vec<Callback>),
    Fired,
}

/// Creates a connected sender/channel pair.
pub(crate) fn channel() -> (CompletionSender, CompletionChannel) {
    let state = Rc::new(RefCell::new(State::Pending(Vec::new())));
    (
        CompletionSender {
            state: Rc::clone(&state),
        },
        CompletionChannel { state },
    )
}

/// Owning half that delivers the completion value.
pub(crate) struct CompletionSender {
    state: Rc<RefCell<State>>,
}

impl CompletionSender {
    /// Delivers `result` to every pending subscriber, in subscription
    /// order, and closes the channel. Consumes the sender.
    ///
    /// The state flips to fired before any callback runs, so callbacks
    /// observing the channel (or subscribing to it) see it closed.
    pub(crate) fn fire(self, result: Option<Payload>) {
        let callbacks = match std::mem::replace(&mut *self.state.borrow_mut(), State::Fired) {
            State::Pending(callbacks) => callbacks,
            State::Fired => return,
        };
        for callback in callbacks {
            callback(result.clone());
        }
    }
}

/// Subscribing half, shared by every clone of a dialog reference.
#[derive(Clone)]
pub(crate) struct CompletionChannel {
    state: Rc<RefCell<State>>,
}

impl CompletionChannel {
    /// Registers a callback for the completion value. After the channel
    /// fired, the callback is dropped without running; there is no replay.
    pub(crate) fn subscribe(&self, callback: impl FnOnce(Option<Payload>) + 'static) {
        match &mut *self.state.borrow_mut() {
            State::Pending(callbacks) => callbacks.push(Box::new(callback)),
            State::Fired => {}
        }
    }

    pub(crate) fn is_fired(&self) -> bool {
        matches!(*self.state.borrow(), State::Fired)
    }
}
