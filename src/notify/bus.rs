// SPDX-License-Identifier: MPL-2.0
//! Synchronous publish/subscribe channel for whisper traffic.
//!
//! The bus carries two kinds of events: whisper deliveries and clear
//! commands. Fan-out is synchronous and ordered: the subscriber list is
//! snapshotted per event and every snapshotted subscriber runs, in
//! subscription order, before the outermost call returns. An event
//! published from inside a handler is queued and goes out once the
//! fan-out in flight has finished, so every subscriber observes events
//! in the same order. Nothing is replayed; a subscriber registered after
//! an event was published never sees it.

use crate::notify::whisper::Whisper;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type MessageHandler = Rc<RefCell<dyn FnMut(&Whisper)>>;
type ClearHandler = Rc<RefCell<dyn FnMut(Option<&str>)>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Messages,
    Clears,
}

enum Pending {
    Whisper(Whisper),
    Clear(Option<String>),
}

#[derive(Default)]
struct BusState {
    next_token: u64,
    messages: Vec<(u64, MessageHandler)>,
    clears: Vec<(u64, ClearHandler)>,
    pending: VecDeque<Pending>,
    dispatching: bool,
}

impl BusState {
    fn remove(&mut self, channel: Channel, token: u64) {
        match channel {
            Channel::Messages => self.messages.retain(|(t, _)| *t != token),
            Channel::Clears => self.clears.retain(|(t, _)| *t != token),
        }
    }
}

/// Cheaply clonable handle to a shared whisper bus.
///
/// All clones publish to and subscribe on the same channel. The bus is
/// single-threaded; handlers run on the caller's stack.
#[derive(Clone, Default)]
pub struct MessageBus {
    state: Rc<RefCell<BusState>>,
}

impl MessageBus {
    /// Creates a new bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a whisper to every current message subscriber.
    ///
    /// With no subscribers the whisper is dropped silently. Publishing
    /// from inside a handler queues the whisper; it goes out once the
    /// fan-out in flight has finished.
    pub fn publish(&self, whisper: Whisper) {
        self.dispatch(Pending::Whisper(whisper));
    }

    /// Publishes a batch of whispers, preserving their order.
    pub fn publish_all(&self, whispers: Vec<Whisper>) {
        for whisper in whispers {
            self.publish(whisper);
        }
    }

    /// Broadcasts a clear command.
    ///
    /// `Some(key)` asks surfaces to drop messages carrying that key;
    /// `None` asks each surface to drop everything it holds. Like
    /// [`publish`](Self::publish), safe to call from inside a handler.
    pub fn clear(&self, key: Option<&str>) {
        self.dispatch(Pending::Clear(key.map(str::to_owned)));
    }

    /// Registers a whisper handler. The subscription lives until the
    /// returned guard is dropped.
    pub fn subscribe_messages<F>(&self, handler: F) -> BusSubscription
    where
        F: FnMut(&Whisper) + 'static,
    {
        let mut state = self.state.borrow_mut();
        let token = state.next_token;
        state.next_token += 1;
        state.messages.push((token, Rc::new(RefCell::new(handler))));
        BusSubscription {
            bus: Rc::downgrade(&self.state),
            channel: Channel::Messages,
            token,
        }
    }

    /// Registers a clear-command handler. The subscription lives until the
    /// returned guard is dropped.
    pub fn subscribe_clears<F>(&self, handler: F) -> BusSubscription
    where
        F: FnMut(Option<&str>) + 'static,
    {
        let mut state = self.state.borrow_mut();
        let token = state.next_token;
        state.next_token += 1;
        state.clears.push((token, Rc::new(RefCell::new(handler))));
        BusSubscription {
            bus: Rc::downgrade(&self.state),
            channel: Channel::Clears,
            token,
        }
    }

    /// Number of registered whisper handlers.
    #[must_use]
    pub fn message_subscriber_count(&self) -> usize {
        self.state.borrow().messages.len()
    }

    /// Number of registered clear handlers.
    #[must_use]
    pub fn clear_subscriber_count(&self) -> usize {
        self.state.borrow().clears.len()
    }

    /// Queues `event` and, unless a fan-out higher on the stack is
    /// already draining the queue, delivers queued events until none
    /// remain.
    fn dispatch(&self, event: Pending) {
        {
            let mut state = self.state.borrow_mut();
            state.pending.push_back(event);
            if state.dispatching {
                return;
            }
            state.dispatching = true;
        }
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let next = state.pending.pop_front();
                if next.is_none() {
                    state.dispatching = false;
                }
                next
            };
            match next {
                Some(Pending::Whisper(whisper)) => self.fan_out_whisper(&whisper),
                Some(Pending::Clear(key)) => self.fan_out_clear(key.as_deref()),
                None => break,
            }
        }
    }

    fn fan_out_whisper(&self, whisper: &Whisper) {
        // Snapshot before invoking so handlers may subscribe or
        // unsubscribe without the bus state being borrowed.
        let handlers: Vec<MessageHandler> = {
            let state = self.state.borrow();
            state.messages.iter().map(|(_, h)| Rc::clone(h)).collect()
        };
        for handler in handlers {
            (handler.borrow_mut())(whisper);
        }
    }

    fn fan_out_clear(&self, key: Option<&str>) {
        let handlers: Vec<ClearHandler> = {
            let state = self.state.borrow();
            state.clears.iter().map(|(_, h)| Rc::clone(h)).collect()
        };
        for handler in handlers {
            (handler.borrow_mut())(key);
        }
    }
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MessageBus")
            .field("message_subscribers", &state.messages.len())
            .field("clear_subscribers", &state.clears.len())
            .finish()
    }
}

/// Guard for an active bus subscription; dropping it unsubscribes.
#[must_use = "dropping the subscription guard unsubscribes immediately"]
pub struct BusSubscription {
    bus: Weak<RefCell<BusState>>,
    channel: Channel,
    token: u64,
}

impl Drop for BusSubscription {
    fn drop(&mut self) {
        if let Some(state) = self.bus.upgrade() {
            state.borrow_mut().remove(self.channel, self.token);
        }
    }
}

impl std::fmt::Debug for BusSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusSubscription")
            .field("channel", &self.channel)
            .field("token", &self.token)
            .finish()
    }
}
