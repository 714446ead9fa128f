// SPDX-License-Identifier: MPL-2.0

//! Default values for overlay configuration.
//!
//! Single source of truth for every tunable default. Consumers that build
//! [`SurfaceOptions`](crate::notify::SurfaceOptions) or
//! [`DialogConfig`](crate::dialog::DialogConfig) by hand fall back to the
//! same constants the config loader uses.

// =============================================================================
// Notification Defaults
// =============================================================================

/// Display lifetime of a non-sticky whisper, in milliseconds.
pub const DEFAULT_LIFE_MS: u64 = 3000;

/// Interval between expiry sweeps, in milliseconds.
///
/// Hosts that drive surfaces with [`tick`](crate::notify::NotificationSurface::tick)
/// should call it at least this often for timely removal.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

// =============================================================================
// Dialog Defaults
// =============================================================================

/// Initial width of a dialog wrapper when the config does not set one.
pub const DEFAULT_DIALOG_WIDTH: &str = "300px";

// =============================================================================
// Compile-Time Validation
// =============================================================================

// Compile-time validation of configuration constants.
const _: () = {
    assert!(DEFAULT_LIFE_MS > 0, "whisper lifetime must be positive");
    assert!(
        DEFAULT_TICK_INTERVAL_MS > 0,
        "tick interval must be positive"
    );
    assert!(
        DEFAULT_TICK_INTERVAL_MS <= DEFAULT_LIFE_MS,
        "tick interval must not exceed the whisper lifetime"
    );
    assert!(
        !DEFAULT_DIALOG_WIDTH.is_empty(),
        "dialog width must be non-empty"
    );
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whisper_lifetime_is_three_seconds() {
        assert_eq!(DEFAULT_LIFE_MS, 3000);
    }

    #[test]
    fn tick_interval_divides_the_lifetime_evenly() {
        assert_eq!(DEFAULT_LIFE_MS % DEFAULT_TICK_INTERVAL_MS, 0);
    }

    #[test]
    fn dialog_width_is_a_css_length() {
        assert_eq!(DEFAULT_DIALOG_WIDTH, "300px");
    }
}
