// SPDX-License-Identifier: MPL-2.0
//! In-memory render host adapter.
//!
//! [`HeadlessHost`] implements [`RenderHost`] without drawing anything: it
//! mints view handles from registered component factories, tracks the
//! attach/mount/parent state of every live view, and records each lifecycle
//! call in an op log. The crate's own tests run on it, and downstream
//! applications can use it to test their overlay flows without a real UI
//! stack.

use super::{ComponentSpec, DialogAware, InstantiateError, RenderHost, ViewBacking, ViewHandle};
use crate::dialog::DialogRef;
use crate::payload::Payload;
use std::collections::HashMap;

/// One recorded lifecycle call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOp {
    /// A view was created for the named component.
    Instantiate { spec: String, view: ViewHandle },
    /// The view joined the render set.
    Attach(ViewHandle),
    /// One render pass ran over the view.
    Render(ViewHandle),
    /// The view's root entered the render surface.
    Mount(ViewHandle),
    /// The child's root moved under the parent's content slot.
    Reparent { child: ViewHandle, parent: ViewHandle },
    /// The view left the render set.
    Detach(ViewHandle),
    /// The view's root left the render surface.
    Unmount(ViewHandle),
    /// The view was destroyed.
    Destroy(ViewHandle),
    /// The view was probed for the dialog capability.
    Probe(ViewHandle),
}

/// Built-in backing for the confirmation component.
///
/// Holds exactly what a real confirmation renderer would need: the dialog
/// handle for closing and the prompt payload attached by the confirmation
/// helper. Also serves as the reference [`DialogAware`] implementation.
#[derive(Default)]
pub struct ConfirmView {
    handle: Option<DialogRef>,
    prompt: Option<Payload>,
}

impl ConfirmView {
    /// The dialog handle, once the manager has connected one.
    #[must_use]
    pub fn handle(&self) -> Option<&DialogRef> {
        self.handle.as_ref()
    }

    /// The prompt payload attached to the dialog configuration.
    #[must_use]
    pub fn prompt(&self) -> Option<&Payload> {
        self.prompt.as_ref()
    }
}

impl DialogAware for ConfirmView {
    fn set_handle(&mut self, handle: DialogRef) {
        self.handle = Some(handle);
    }

    fn set_data(&mut self, data: Payload) {
        self.prompt = Some(data);
    }
}

impl ViewBacking for ConfirmView {
    fn as_dialog_aware(&mut self) -> Option<&mut dyn DialogAware> {
        Some(self)
    }
}

enum Factory {
    /// Produces a backing with no capabilities.
    Inert,
    /// Produces the built-in [`ConfirmView`].
    Confirm,
    /// Produces whatever the registered closure builds.
    Custom(Box<dyn Fn() -> Box<dyn ViewBacking>>),
    /// Always fails with the stored message.
    Fails(String),
}

enum Backing {
    Inert,
    Confirm(ConfirmView),
    Custom(Box<dyn ViewBacking>),
}

impl Backing {
    fn as_dialog_aware(&mut self) -> Option<&mut dyn DialogAware> {
        match self {
            Backing::Inert => None,
            Backing::Confirm(view) => Some(view),
            Backing::Custom(backing) => backing.as_dialog_aware(),
        }
    }
}

struct ViewEntry {
    spec: String,
    backing: Backing,
    attached: bool,
    mounted: bool,
    parent: Option<ViewHandle>,
}

/// A [`RenderHost`] that renders nothing and records everything.
pub struct HeadlessHost {
    factories: HashMap<String, Factory>,
    views: HashMap<u64, ViewEntry>,
    next_view: u64,
    ops: Vec<HostOp>,
    viewport_width: f32,
}

impl HeadlessHost {
    /// Creates a host with the two well-known components preregistered
    /// and a 1024 px viewport.
    #[must_use]
    pub fn new() -> Self {
        let mut factories = HashMap::new();
        factories.insert(ComponentSpec::chrome().name().to_string(), Factory::Inert);
        factories.insert(ComponentSpec::confirm().name().to_string(), Factory::Confirm);
        Self {
            factories,
            views: HashMap::new(),
            next_view: 1,
            ops: Vec::new(),
            viewport_width: 1024.0,
        }
    }

    /// Registers a component built by `factory`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn ViewBacking> + 'static,
    {
        self.factories
            .insert(name.into(), Factory::Custom(Box::new(factory)));
    }

    /// Registers a component whose views have no capabilities. Enough for
    /// content that only needs to exist.
    pub fn register_inert(&mut self, name: impl Into<String>) {
        self.factories.insert(name.into(), Factory::Inert);
    }

    /// Registers a component whose instantiation always fails.
    pub fn register_failing(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.factories
            .insert(name.into(), Factory::Fails(message.into()));
    }

    /// Sets the viewport width reported to breakpoint resolution.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// The recorded lifecycle calls, oldest first.
    #[must_use]
    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    /// Discards the recorded lifecycle calls.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of live (not yet destroyed) views.
    #[must_use]
    pub fn live_view_count(&self) -> usize {
        self.views.len()
    }

    /// Live views instantiated for the given component, in creation order.
    #[must_use]
    pub fn views_for(&self, spec: &ComponentSpec) -> Vec<ViewHandle> {
        let mut handles: Vec<u64> = self
            .views
            .iter()
            .filter(|(_, entry)| entry.spec == spec.name())
            .map(|(raw, _)| *raw)
            .collect();
        handles.sort_unstable();
        handles.into_iter().map(ViewHandle::new).collect()
    }

    /// Component name the view was instantiated for.
    #[must_use]
    pub fn spec_of(&self, view: ViewHandle) -> Option<&str> {
        self.views.get(&view.raw()).map(|entry| entry.spec.as_str())
    }

    /// Whether the view is currently in the render set.
    #[must_use]
    pub fn is_attached(&self, view: ViewHandle) -> bool {
        self.views
            .get(&view.raw())
            .is_some_and(|entry| entry.attached)
    }

    /// Whether the view's root is currently in the render surface.
    #[must_use]
    pub fn is_mounted(&self, view: ViewHandle) -> bool {
        self.views
            .get(&view.raw())
            .is_some_and(|entry| entry.mounted)
    }

    /// Parent the view was last reparented under.
    #[must_use]
    pub fn parent_of(&self, view: ViewHandle) -> Option<ViewHandle> {
        self.views.get(&view.raw()).and_then(|entry| entry.parent)
    }

    /// The built-in confirmation backing of the view, when the view was
    /// instantiated from [`ComponentSpec::confirm`].
    #[must_use]
    pub fn confirm_view(&self, view: ViewHandle) -> Option<&ConfirmView> {
        match self.views.get(&view.raw())?.backing {
            Backing::Confirm(ref confirm) => Some(confirm),
            _ => None,
        }
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("live_views", &self.views.len())
            .field("recorded_ops", &self.ops.len())
            .field("viewport_width", &self.viewport_width)
            .finish()
    }
}

impl RenderHost for HeadlessHost {
    fn instantiate(&mut self, spec: &ComponentSpec) -> Result<ViewHandle, InstantiateError> {
        let factory = self
            .factories
            .get(spec.name())
            .ok_or_else(|| InstantiateError::UnknownComponent(spec.name().to_string()))?;
        let backing = match factory {
            Factory::Inert => Backing::Inert,
            Factory::Confirm => Backing::Confirm(ConfirmView::default()),
            Factory::Custom(build) => Backing::Custom(build()),
            Factory::Fails(message) => {
                return Err(InstantiateError::CreationFailed(message.clone()))
            }
        };
        let view = ViewHandle::new(self.next_view);
        self.next_view += 1;
        self.views.insert(
            view.raw(),
            ViewEntry {
                spec: spec.name().to_string(),
                backing,
                attached: false,
                mounted: false,
                parent: None,
            },
        );
        self.ops.push(HostOp::Instantiate {
            spec: spec.name().to_string(),
            view,
        });
        Ok(view)
    }

    fn attach(&mut self, view: ViewHandle) {
        if let Some(entry) = self.views.get_mut(&view.raw()) {
            entry.attached = true;
            self.ops.push(HostOp::Attach(view));
        }
    }

    fn render(&mut self, view: ViewHandle) {
        if self.views.contains_key(&view.raw()) {
            self.ops.push(HostOp::Render(view));
        }
    }

    fn mount(&mut self, view: ViewHandle) {
        if let Some(entry) = self.views.get_mut(&view.raw()) {
            entry.mounted = true;
            self.ops.push(HostOp::Mount(view));
        }
    }

    fn reparent(&mut self, child: ViewHandle, parent: ViewHandle) {
        if !self.views.contains_key(&parent.raw()) {
            return;
        }
        if let Some(entry) = self.views.get_mut(&child.raw()) {
            entry.parent = Some(parent);
            self.ops.push(HostOp::Reparent { child, parent });
        }
    }

    fn detach(&mut self, view: ViewHandle) {
        if let Some(entry) = self.views.get_mut(&view.raw()) {
            entry.attached = false;
            self.ops.push(HostOp::Detach(view));
        }
    }

    fn unmount(&mut self, view: ViewHandle) {
        if let Some(entry) = self.views.get_mut(&view.raw()) {
            entry.mounted = false;
            self.ops.push(HostOp::Unmount(view));
        }
    }

    fn destroy(&mut self, view: ViewHandle) {
        if self.views.remove(&view.raw()).is_some() {
            self.ops.push(HostOp::Destroy(view));
        }
    }

    fn dialog_aware(&mut self, view: ViewHandle) -> Option<&mut dyn DialogAware> {
        if !self.views.contains_key(&view.raw()) {
            return None;
        }
        self.ops.push(HostOp::Probe(view));
        self.views
            .get_mut(&view.raw())
            .and_then(|entry| entry.backing.as_dialog_aware())
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogConfig;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn well_known_components_are_preregistered() {
        let mut host = HeadlessHost::new();
        assert!(host.instantiate(&ComponentSpec::chrome()).is_ok());
        assert!(host.instantiate(&ComponentSpec::confirm()).is_ok());
    }

    #[test]
    fn unknown_components_fail_instantiation() {
        let mut host = HeadlessHost::new();
        let err = host
            .instantiate(&ComponentSpec::new("nonexistent"))
            .unwrap_err();
        assert_eq!(
            err,
            InstantiateError::UnknownComponent("nonexistent".to_string())
        );
        assert_eq!(host.live_view_count(), 0);
    }

    #[test]
    fn failing_factories_report_creation_failed() {
        let mut host = HeadlessHost::new();
        host.register_failing("broken", "missing input");
        let err = host.instantiate(&ComponentSpec::new("broken")).unwrap_err();
        assert_eq!(
            err,
            InstantiateError::CreationFailed("missing input".to_string())
        );
    }

    #[test]
    fn op_log_records_the_lifecycle_in_call_order() {
        let mut host = HeadlessHost::new();
        host.register_inert("panel");
        let spec = ComponentSpec::new("panel");
        let view = host.instantiate(&spec).unwrap();

        host.attach(view);
        host.render(view);
        host.mount(view);
        host.detach(view);
        host.unmount(view);
        host.destroy(view);

        assert_eq!(
            host.ops(),
            &[
                HostOp::Instantiate {
                    spec: "panel".to_string(),
                    view
                },
                HostOp::Attach(view),
                HostOp::Render(view),
                HostOp::Mount(view),
                HostOp::Detach(view),
                HostOp::Unmount(view),
                HostOp::Destroy(view),
            ]
        );
        assert_eq!(host.live_view_count(), 0);
    }

    #[test]
    fn destroyed_views_ignore_further_calls() {
        let mut host = HeadlessHost::new();
        host.register_inert("panel");
        let view = host.instantiate(&ComponentSpec::new("panel")).unwrap();
        host.destroy(view);

        let ops_before = host.ops().len();
        host.attach(view);
        host.render(view);
        host.destroy(view);
        assert_eq!(host.ops().len(), ops_before);
    }

    #[test]
    fn reparent_links_child_under_parent() {
        let mut host = HeadlessHost::new();
        host.register_inert("panel");
        let parent = host.instantiate(&ComponentSpec::new("panel")).unwrap();
        let child = host.instantiate(&ComponentSpec::new("panel")).unwrap();

        host.reparent(child, parent);
        assert_eq!(host.parent_of(child), Some(parent));
        assert_eq!(host.parent_of(parent), None);
    }

    #[test]
    fn attach_and_mount_state_is_tracked() {
        let mut host = HeadlessHost::new();
        host.register_inert("panel");
        let view = host.instantiate(&ComponentSpec::new("panel")).unwrap();
        assert!(!host.is_attached(view));
        assert!(!host.is_mounted(view));

        host.attach(view);
        host.mount(view);
        assert!(host.is_attached(view));
        assert!(host.is_mounted(view));

        host.detach(view);
        host.unmount(view);
        assert!(!host.is_attached(view));
        assert!(!host.is_mounted(view));
    }

    #[test]
    fn views_for_lists_live_views_in_creation_order() {
        let mut host = HeadlessHost::new();
        host.register_inert("panel");
        let spec = ComponentSpec::new("panel");
        let first = host.instantiate(&spec).unwrap();
        let second = host.instantiate(&spec).unwrap();
        let _chrome = host.instantiate(&ComponentSpec::chrome()).unwrap();

        assert_eq!(host.views_for(&spec), vec![first, second]);
        host.destroy(first);
        assert_eq!(host.views_for(&spec), vec![second]);
    }

    #[test]
    fn custom_backings_expose_their_capability() {
        struct Aware {
            configs_seen: Rc<Cell<u32>>,
        }
        impl DialogAware for Aware {
            fn set_config(&mut self, _config: &DialogConfig) {
                self.configs_seen.set(self.configs_seen.get() + 1);
            }
        }
        impl ViewBacking for Aware {
            fn as_dialog_aware(&mut self) -> Option<&mut dyn DialogAware> {
                Some(self)
            }
        }

        let mut host = HeadlessHost::new();
        let configs_seen = Rc::new(Cell::new(0));
        {
            let configs_seen = Rc::clone(&configs_seen);
            host.register("aware-panel", move || {
                Box::new(Aware {
                    configs_seen: Rc::clone(&configs_seen),
                })
            });
        }

        let view = host.instantiate(&ComponentSpec::new("aware-panel")).unwrap();
        let aware = host.dialog_aware(view).expect("capability present");
        aware.set_config(&DialogConfig::default());
        assert_eq!(configs_seen.get(), 1);
        assert_eq!(host.ops().last(), Some(&HostOp::Probe(view)));
    }

    #[test]
    fn inert_backings_have_no_capability() {
        let mut host = HeadlessHost::new();
        let view = host.instantiate(&ComponentSpec::chrome()).unwrap();
        assert!(host.dialog_aware(view).is_none());
    }

    #[test]
    fn viewport_width_is_settable() {
        let mut host = HeadlessHost::new();
        assert_eq!(host.viewport_width(), 1024.0);
        host.set_viewport_width(720.0);
        assert_eq!(host.viewport_width(), 720.0);
    }
}
