// SPDX-License-Identifier: MPL-2.0

//! Persistent defaults for the overlay services, loaded from and saved to
//! an `overlays.toml` file in the host application's config directory.
//!
//! The file is optional. A missing file yields [`OverlayConfig::default`],
//! and an unreadable one falls back to defaults rather than failing the
//! host application at startup.
//!
//! # Examples
//!
//! ```no_run
//! use whisperbox::config::{self, OverlayConfig};
//!
//! // Load the stored defaults, or built-ins when no file exists.
//! let mut config = config::load("MyApp").unwrap_or_default();
//!
//! // Keep whispers on screen a little longer.
//! config.notifications.life_ms = 5000;
//!
//! config::save(&config, "MyApp").expect("failed to save config");
//! ```

use crate::dialog::DialogConfig;
use crate::error::Result;
use crate::notify::{Position, SurfaceOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;

pub use defaults::*;

const CONFIG_FILE: &str = "overlays.toml";

// =============================================================================
// Notification Section
// =============================================================================

/// Defaults applied to notification surfaces and the whispers shown on them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationDefaults {
    /// Display lifetime for non-sticky whispers, in milliseconds.
    pub life_ms: u64,
    /// Corner or edge of the viewport a surface anchors to.
    pub position: Position,
    /// Silently drop an incoming whisper when an active one already shows
    /// the same summary, detail, and severity.
    pub prevent_duplicates: bool,
    /// Replace an active whisper with the same summary, detail, and
    /// severity instead of showing both; the newcomer displays last.
    /// Ignored while `prevent_duplicates` is also set.
    pub prevent_open_duplicates: bool,
    /// Interval between expiry sweeps, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            life_ms: DEFAULT_LIFE_MS,
            position: Position::default(),
            prevent_duplicates: false,
            prevent_open_duplicates: false,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl NotificationDefaults {
    /// Builds [`SurfaceOptions`] for an unkeyed surface from these defaults.
    ///
    /// Keyed surfaces can chain the key on afterwards:
    ///
    /// ```
    /// use whisperbox::config::NotificationDefaults;
    ///
    /// let defaults = NotificationDefaults::default();
    /// let options = whisperbox::notify::SurfaceOptions {
    ///     key: Some("uploads".to_string()),
    ///     ..defaults.surface_options()
    /// };
    /// assert_eq!(options.key.as_deref(), Some("uploads"));
    /// ```
    pub fn surface_options(&self) -> SurfaceOptions {
        SurfaceOptions {
            key: None,
            prevent_duplicates: self.prevent_duplicates,
            prevent_open_duplicates: self.prevent_open_duplicates,
            position: self.position,
        }
    }

    /// Sweep interval as a [`Duration`], for hosts driving surfaces on a timer.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

// =============================================================================
// Dialog Section
// =============================================================================

/// Defaults applied to dynamically opened dialogs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DialogDefaults {
    /// Base width of the dialog wrapper.
    pub width: String,
    /// Whether dialogs show a close affordance.
    pub closable: bool,
    /// Whether dialogs block interaction with the rest of the layout.
    pub modal: bool,
    /// Whether pressing Escape dismisses the dialog.
    pub close_on_escape: bool,
    /// Whether clicking the modal mask dismisses the dialog.
    pub dismissable_mask: bool,
}

impl Default for DialogDefaults {
    fn default() -> Self {
        Self {
            width: DEFAULT_DIALOG_WIDTH.to_string(),
            closable: true,
            modal: true,
            close_on_escape: true,
            dismissable_mask: false,
        }
    }
}

impl DialogDefaults {
    /// Builds a [`DialogConfig`] from these defaults.
    ///
    /// Per-dialog fields such as `header`, `breakpoints` and `data` start
    /// unset; callers fill them in with struct update syntax.
    pub fn dialog_config(&self) -> DialogConfig {
        DialogConfig {
            width: self.width.clone(),
            closable: self.closable,
            modal: self.modal,
            close_on_escape: self.close_on_escape,
            dismissable_mask: self.dismissable_mask,
            ..DialogConfig::default()
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Overlay configuration with one section per service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OverlayConfig {
    /// Notification surface defaults.
    #[serde(default)]
    pub notifications: NotificationDefaults,

    /// Dynamic dialog defaults.
    #[serde(default)]
    pub dialog: DialogDefaults,
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path for the given application name, if the
/// platform exposes a config directory.
pub fn default_path(app_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(app_name);
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

pub fn load(app_name: &str) -> Result<OverlayConfig> {
    if let Some(path) = default_path(app_name) {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(OverlayConfig::default())
}

pub fn save(config: &OverlayConfig, app_name: &str) -> Result<()> {
    if let Some(path) = default_path(app_name) {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<OverlayConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &OverlayConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
