// SPDX-License-Identifier: MPL-2.0
//! Core whisper data structures.
//!
//! This module defines the [`Whisper`] message struct, its [`Severity`]
//! levels, and the [`MessageId`] identity used for removal and expiry.

use crate::config::DEFAULT_LIFE_MS;
use crate::payload::Payload;
use std::fmt;

/// Unique identifier for a whisper message.
///
/// Generated ids combine the process id with a monotonically increasing
/// counter, so they stay unique for the lifetime of the process and remain
/// readable in logs. Callers may supply their own id instead when they need
/// to address a message from elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Creates a new unique message id.
    #[must_use]
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("{:x}-{}", std::process::id(), n))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Severity level of a whisper, driving visual styling on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully.
    Success,
    /// Informational message.
    #[default]
    Info,
    /// Warning that doesn't block operation.
    Warning,
    /// Error or destructive outcome requiring attention.
    Danger,
}

impl Severity {
    /// Returns the canonical lowercase name, suitable for style lookups.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient notification message.
///
/// Whispers are plain data: the bus routes them, a surface stores them, and
/// the host renders them. Display duration, grouping key, and dismissal
/// behavior all travel with the message itself.
#[derive(Debug, Clone)]
pub struct Whisper {
    /// Identity used for removal and expiry.
    id: MessageId,
    /// Severity level (visual styling is the host's concern).
    severity: Severity,
    /// Short headline text.
    summary: String,
    /// Optional longer body text.
    detail: Option<String>,
    /// Routing group; keyed surfaces only accept matching keys.
    key: Option<String>,
    /// Display duration in milliseconds; `0` means the message never expires.
    life_ms: u64,
    /// Sticky messages never expire regardless of `life_ms`.
    sticky: bool,
    /// Whether the host should offer a dismiss affordance.
    closable: bool,
    /// Opaque caller data carried to the rendering side.
    data: Option<Payload>,
}

impl Whisper {
    /// Creates a new whisper with the given severity and summary.
    ///
    /// Remaining fields take their documented defaults: a generated id,
    /// a 3000 ms life, closable, no detail, no key, no data.
    pub fn new(severity: Severity, summary: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            severity,
            summary: summary.into(),
            detail: None,
            key: None,
            life_ms: DEFAULT_LIFE_MS,
            sticky: false,
            closable: true,
            data: None,
        }
    }

    /// Creates a success whisper.
    pub fn success(summary: impl Into<String>) -> Self {
        Self::new(Severity::Success, summary)
    }

    /// Creates an info whisper.
    pub fn info(summary: impl Into<String>) -> Self {
        Self::new(Severity::Info, summary)
    }

    /// Creates a warning whisper.
    pub fn warning(summary: impl Into<String>) -> Self {
        Self::new(Severity::Warning, summary)
    }

    /// Creates a danger whisper.
    pub fn danger(summary: impl Into<String>) -> Self {
        Self::new(Severity::Danger, summary)
    }

    /// Sets the longer body text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the routing key. Only surfaces configured with the same key
    /// will display this whisper.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the display duration in milliseconds. `0` disables expiry.
    #[must_use]
    pub fn with_life_ms(mut self, life_ms: u64) -> Self {
        self.life_ms = life_ms;
        self
    }

    /// Marks the whisper as sticky: it never expires on its own.
    #[must_use]
    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    /// Sets whether the host should offer a dismiss affordance.
    #[must_use]
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Attaches opaque caller data.
    #[must_use]
    pub fn data(mut self, data: Payload) -> Self {
        self.data = Some(data);
        self
    }

    /// Replaces the generated id with a caller-supplied one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<MessageId>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns the message id.
    #[must_use]
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the severity level.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the headline text.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the body text, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the routing key, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the display duration in milliseconds.
    #[must_use]
    pub fn life_ms(&self) -> u64 {
        self.life_ms
    }

    /// Returns whether this whisper is exempt from auto-expiry, either
    /// because it was marked sticky or because its life is zero.
    #[must_use]
    pub fn is_sticky(&self) -> bool {
        self.sticky || self.life_ms == 0
    }

    /// Returns whether the host should offer a dismiss affordance.
    #[must_use]
    pub fn is_closable(&self) -> bool {
        self.closable
    }

    /// Returns the opaque caller data, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&Payload> {
        self.data.as_ref()
    }

    /// Returns whether `other` is a semantic duplicate of this whisper.
    ///
    /// Duplicate detection compares only the `(summary, detail, severity)`
    /// triple; id, key, and life never participate.
    #[must_use]
    pub fn is_duplicate_of(&self, other: &Whisper) -> bool {
        self.summary == other.summary
            && self.detail == other.detail
            && self.severity == other.severity
    }
}
