// SPDX-License-Identifier: MPL-2.0
//! Per-surface whisper store with routing, de-duplication, and expiry.
//!
//! A [`NotificationSurface`] represents one display area (a screen corner,
//! a panel) and holds the ordered list of whispers currently shown there.
//! It subscribes to a [`MessageBus`] on attach and reacts to deliveries and
//! clear commands; the host is expected to render `active()` and to drive
//! expiry through `tick` or `expire_due`.

use crate::notify::bus::{BusSubscription, MessageBus};
use crate::notify::whisper::{MessageId, Whisper};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Anchor position of a surface within its viewport.
///
/// Purely advisory: the crate never positions anything itself, but hosts
/// and the configuration layer need a shared vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
    Center,
}

/// Configuration of a single notification surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceOptions {
    /// Routing filter: a keyed surface displays only whispers carrying
    /// exactly this key; an unkeyed surface displays only unkeyed whispers.
    pub key: Option<String>,
    /// Silently drop an incoming whisper when an active one already shows
    /// the same summary, detail, and severity.
    pub prevent_duplicates: bool,
    /// Replace an active whisper with the same summary, detail, and
    /// severity instead of showing both; the newcomer displays last.
    /// Ignored while `prevent_duplicates` is also set.
    pub prevent_open_duplicates: bool,
    /// Anchor position for the host's renderer.
    pub position: Position,
}

impl SurfaceOptions {
    /// Options for a surface that displays only whispers with `key`.
    #[must_use]
    pub fn keyed(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }
}

/// One active whisper plus its precomputed expiry deadline.
#[derive(Debug, Clone)]
struct ActiveWhisper {
    whisper: Whisper,
    /// Computed once when the whisper is appended; never rescheduled.
    expires_at: Option<Instant>,
}

#[derive(Debug)]
struct SurfaceState {
    options: SurfaceOptions,
    /// Insertion order is display order, most recent last.
    active: Vec<ActiveWhisper>,
}

impl SurfaceState {
    fn new(options: SurfaceOptions) -> Self {
        Self {
            options,
            active: Vec::new(),
        }
    }

    fn accepts(&self, whisper: &Whisper) -> bool {
        match (self.options.key.as_deref(), whisper.key()) {
            (Some(mine), Some(theirs)) => mine == theirs,
            (None, None) => true,
            _ => false,
        }
    }

    fn deliver(&mut self, whisper: &Whisper, now: Instant) {
        if !self.accepts(whisper) {
            return;
        }
        if self.options.prevent_duplicates {
            if self
                .active
                .iter()
                .any(|entry| entry.whisper.is_duplicate_of(whisper))
            {
                return;
            }
        } else if self.options.prevent_open_duplicates {
            self.active
                .retain(|entry| !entry.whisper.is_duplicate_of(whisper));
        }
        let expires_at = if whisper.is_sticky() {
            None
        } else {
            Some(now + Duration::from_millis(whisper.life_ms()))
        };
        self.active.push(ActiveWhisper {
            whisper: whisper.clone(),
            expires_at,
        });
    }

    fn clear_scope(&mut self, key: Option<&str>) {
        match key {
            Some(key) => self.active.retain(|entry| entry.whisper.key() != Some(key)),
            None => self.active.clear(),
        }
    }

    fn remove(&mut self, id: &MessageId) {
        self.active.retain(|entry| entry.whisper.id() != id);
    }

    fn expire_due(&mut self, now: Instant) -> Vec<MessageId> {
        let mut expired = Vec::new();
        self.active.retain(|entry| match entry.expires_at {
            Some(deadline) if deadline <= now => {
                expired.push(entry.whisper.id().clone());
                false
            }
            _ => true,
        });
        expired
    }

    fn next_expiry(&self) -> Option<Instant> {
        self.active
            .iter()
            .filter_map(|entry| entry.expires_at)
            .min()
    }
}

/// A display surface attached to a [`MessageBus`].
///
/// Dropping the surface detaches it from the bus; whispers published
/// afterwards are no longer delivered to it.
#[derive(Debug)]
pub struct NotificationSurface {
    state: Rc<RefCell<SurfaceState>>,
    _messages: BusSubscription,
    _clears: BusSubscription,
}

impl NotificationSurface {
    /// Attaches a new surface to the bus with the given options.
    #[must_use]
    pub fn attach(bus: &MessageBus, options: SurfaceOptions) -> Self {
        let state = Rc::new(RefCell::new(SurfaceState::new(options)));
        let messages = {
            let state = Rc::clone(&state);
            bus.subscribe_messages(move |whisper| {
                state.borrow_mut().deliver(whisper, Instant::now());
            })
        };
        let clears = {
            let state = Rc::clone(&state);
            bus.subscribe_clears(move |key| state.borrow_mut().clear_scope(key))
        };
        Self {
            state,
            _messages: messages,
            _clears: clears,
        }
    }

    /// Replaces the surface options. Affects subsequent deliveries only;
    /// whispers already active stay as they are.
    pub fn configure(&self, options: SurfaceOptions) {
        self.state.borrow_mut().options = options;
    }

    /// Removes one whisper by id. Removing an id that is not active is a
    /// no-op, so racing dismissal paths stay safe.
    pub fn remove(&self, id: &MessageId) {
        self.state.borrow_mut().remove(id);
    }

    /// Removes every active whisper on this surface.
    pub fn remove_all(&self) {
        self.state.borrow_mut().active.clear();
    }

    /// Removes every whisper whose deadline has passed and returns their
    /// ids. Display order of the survivors is preserved.
    pub fn expire_due(&self, now: Instant) -> Vec<MessageId> {
        self.state.borrow_mut().expire_due(now)
    }

    /// Convenience form of [`expire_due`](Self::expire_due) against the
    /// current instant; hosts call this from their periodic tick.
    pub fn tick(&self) -> Vec<MessageId> {
        self.expire_due(Instant::now())
    }

    /// Earliest pending deadline, if any whisper can still expire. Hosts
    /// that schedule wake-ups precisely can sleep until this instant.
    #[must_use]
    pub fn next_expiry(&self) -> Option<Instant> {
        self.state.borrow().next_expiry()
    }

    /// Snapshot of the active whispers in display order.
    #[must_use]
    pub fn active(&self) -> Vec<Whisper> {
        self.state
            .borrow()
            .active
            .iter()
            .map(|entry| entry.whisper.clone())
            .collect()
    }

    /// Whether a whisper with the given id is active.
    #[must_use]
    pub fn contains(&self, id: &MessageId) -> bool {
        self.state
            .borrow()
            .active
            .iter()
            .any(|entry| entry.whisper.id() == id)
    }

    /// Number of active whispers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().active.len()
    }

    /// Whether the surface currently shows nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().active.is_empty()
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> SurfaceOptions {
        self.state.borrow().options.clone()
    }

    /// Anchor position from the current options.
    #[must_use]
    pub fn position(&self) -> Position {
        self.state.borrow().options.position
    }
}
