// SPDX-License-Identifier: MPL-2.0
//! Render host port definition.
//!
//! This module defines the [`RenderHost`] trait, the seam between the
//! overlay services and whatever actually draws them. The dialog manager
//! drives view lifecycles exclusively through this trait; adapters
//! implement it for a concrete UI stack. The crate ships one adapter,
//! [`HeadlessHost`], which renders nothing and records everything.

mod headless;

pub use headless::{ConfirmView, HeadlessHost, HostOp};

use crate::dialog::{DialogConfig, DialogRef};
use crate::payload::Payload;
use std::fmt;

// =============================================================================
// ComponentSpec
// =============================================================================

/// Names a view component the host knows how to instantiate.
///
/// The crate reserves two well-known specs: [`ComponentSpec::chrome`] for
/// the dialog wrapper and [`ComponentSpec::confirm`] for the built-in
/// confirmation view. Everything else is application-defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentSpec {
    name: String,
}

impl ComponentSpec {
    /// Creates a spec for an application-defined component.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The dialog wrapper chrome component.
    #[must_use]
    pub fn chrome() -> Self {
        Self::new("whisperbox/dialog-chrome")
    }

    /// The built-in confirmation view component.
    #[must_use]
    pub fn confirm() -> Self {
        Self::new("whisperbox/confirm")
    }

    /// Returns the component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ComponentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// ViewHandle
// =============================================================================

/// Opaque identifier for a live view instance, minted by the host.
///
/// The dialog manager owns the handles it receives from `instantiate` and
/// guarantees it never uses one again after passing it to `destroy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(u64);

impl ViewHandle {
    /// Wraps a raw host-side id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw host-side id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

// =============================================================================
// InstantiateError
// =============================================================================

/// Errors that can occur while instantiating a view component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstantiateError {
    /// The host has no component registered under this name.
    UnknownComponent(String),

    /// The component exists but its construction failed.
    CreationFailed(String),
}

impl fmt::Display for InstantiateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstantiateError::UnknownComponent(name) => {
                write!(f, "Unknown component: {name}")
            }
            InstantiateError::CreationFailed(msg) => {
                write!(f, "Component creation failed: {msg}")
            }
        }
    }
}

impl std::error::Error for InstantiateError {}

// =============================================================================
// DialogAware
// =============================================================================

/// Capability interface for content components that want dialog context.
///
/// The manager probes the content view once, right before its first render
/// pass, and calls the setters on components that opt in. All methods have
/// no-op defaults so an implementation picks only what it needs.
pub trait DialogAware {
    /// Receives the dialog's configuration.
    fn set_config(&mut self, _config: &DialogConfig) {}

    /// Receives a handle to the dialog the component is hosted in,
    /// letting the component close itself.
    fn set_handle(&mut self, _handle: DialogRef) {}

    /// Receives the opaque data attached to the dialog configuration.
    /// Called only when data is present.
    fn set_data(&mut self, _data: Payload) {}
}

// =============================================================================
// ViewBacking
// =============================================================================

/// Backing object of an instantiated view.
///
/// Hosts that construct real widgets may ignore this; [`HeadlessHost`]
/// builds its views from registered factories returning these.
pub trait ViewBacking {
    /// Returns the dialog capability if the component opts in.
    fn as_dialog_aware(&mut self) -> Option<&mut dyn DialogAware> {
        None
    }
}

// =============================================================================
// RenderHost Trait
// =============================================================================

/// Port for the rendering environment the overlays live in.
///
/// The dialog manager calls these methods in a fixed order while opening
/// (`instantiate` ×2, `attach`, `render`, `mount`, `reparent`) and closing
/// (`detach`, `unmount`, `destroy`). Everything is synchronous and runs on
/// the UI thread; implementations must not call back into the manager from
/// within these methods. Completion callbacks are the supported re-entry
/// point.
///
/// Lifecycle methods take handles the host itself minted; a handle that is
/// no longer live may be ignored.
///
/// # Example
///
/// ```ignore
/// use whisperbox::host::{ComponentSpec, RenderHost};
///
/// fn open_settings(host: &mut impl RenderHost) {
///     match host.instantiate(&ComponentSpec::new("settings-panel")) {
///         Ok(view) => {
///             host.attach(view);
///             host.render(view);
///         }
///         Err(e) => log::warn!("settings panel unavailable: {e}"),
///     }
/// }
/// ```
pub trait RenderHost {
    /// Creates a detached view instance for the component spec.
    ///
    /// # Errors
    ///
    /// Returns an [`InstantiateError`] if the component is unknown or its
    /// construction fails. No view exists on error.
    fn instantiate(&mut self, spec: &ComponentSpec) -> Result<ViewHandle, InstantiateError>;

    /// Adds the view to the set of views receiving render passes.
    fn attach(&mut self, view: ViewHandle);

    /// Runs one synchronous render pass over the view.
    fn render(&mut self, view: ViewHandle);

    /// Inserts the view's root node into the render surface.
    fn mount(&mut self, view: ViewHandle);

    /// Moves `child`'s root node under `parent`'s content slot.
    fn reparent(&mut self, child: ViewHandle, parent: ViewHandle);

    /// Removes the view from the set of views receiving render passes.
    fn detach(&mut self, view: ViewHandle);

    /// Removes the view's root node from the render surface.
    fn unmount(&mut self, view: ViewHandle);

    /// Destroys the view instance. The handle must not be used afterwards.
    fn destroy(&mut self, view: ViewHandle);

    /// Returns the dialog capability of the view's backing object, if the
    /// component implements [`DialogAware`].
    fn dialog_aware(&mut self, view: ViewHandle) -> Option<&mut dyn DialogAware>;

    /// Current viewport width in logical pixels, for breakpoint
    /// resolution.
    fn viewport_width(&self) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantiate_error_display() {
        let err = InstantiateError::UnknownComponent("settings-panel".to_string());
        assert_eq!(format!("{err}"), "Unknown component: settings-panel");

        let err = InstantiateError::CreationFailed("missing input".to_string());
        assert!(format!("{err}").contains("missing input"));
    }

    #[test]
    fn well_known_specs_are_distinct() {
        assert_ne!(ComponentSpec::chrome(), ComponentSpec::confirm());
        assert_eq!(ComponentSpec::chrome(), ComponentSpec::chrome());
    }

    #[test]
    fn view_handle_round_trips_its_raw_id() {
        let handle = ViewHandle::new(42);
        assert_eq!(handle.raw(), 42);
        assert_eq!(format!("{handle}"), "view#42");
    }

    #[test]
    fn dialog_aware_defaults_are_no_ops() {
        struct Minimal;
        impl DialogAware for Minimal {}

        let mut minimal = Minimal;
        minimal.set_config(&DialogConfig::default());
        minimal.set_handle(DialogRef::detached());
        minimal.set_data(Payload::new(1u8));
    }
}
