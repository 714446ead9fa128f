// SPDX-License-Identifier: MPL-2.0
//! Whisper notification routing.
//!
//! Three pieces cooperate here: [`Whisper`] is the message, [`MessageBus`]
//! carries it, and [`NotificationSurface`] stores what one display area
//! currently shows. Publishing and display are fully decoupled: producers
//! only ever talk to the bus.

mod bus;
mod surface;
mod whisper;

pub use bus::{BusSubscription, MessageBus};
pub use surface::{NotificationSurface, Position, SurfaceOptions};
pub use whisper::{MessageId, Severity, Whisper};
