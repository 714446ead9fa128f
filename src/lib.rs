// SPDX-License-Identifier: MPL-2.0
//! `whisperbox` provides renderer-agnostic overlay services: transient
//! notifications ("whispers") routed over a message bus, and dynamically
//! opened dialogs with responsive sizing and one-shot close results.
//!
//! All rendering goes through the [`host::RenderHost`] port, so the same
//! service layer drives any UI toolkit; [`host::HeadlessHost`] backs the
//! test suite and serves as a reference adapter.
//!
//! # Examples
//!
//! ```
//! use whisperbox::{MessageBus, NotificationSurface, SurfaceOptions, Whisper};
//!
//! let bus = MessageBus::new();
//! let surface = NotificationSurface::attach(&bus, SurfaceOptions::default());
//!
//! bus.publish(Whisper::success("Saved").with_detail("All changes written"));
//! assert_eq!(surface.len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/whisperbox/0.2.0")]

pub mod config;
pub mod dialog;
pub mod error;
pub mod host;
pub mod layout_lock;
pub mod notify;
pub mod payload;

pub use dialog::{Confirmation, DialogConfig, DialogManager, DialogRef};
pub use error::{Error, Result};
pub use notify::{MessageBus, NotificationSurface, Severity, SurfaceOptions, Whisper};
pub use payload::Payload;
