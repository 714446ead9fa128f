// SPDX-License-Identifier: MPL-2.0
//! Dynamic dialog services.
//!
//! [`DialogManager`] opens any host-instantiable component inside a
//! wrapper chrome and hands back a [`DialogRef`] for closing and close
//! notification. [`Confirmation`] builds on it for yes/no prompts.

mod chrome;
mod completion;
mod config;
mod confirm;
mod handle;
mod manager;

pub use chrome::DialogChrome;
pub use config::{Breakpoints, DialogConfig, DialogSize};
pub use confirm::{ConfirmPrompt, Confirmation};
pub use handle::{DialogId, DialogRef};
pub use manager::DialogManager;
