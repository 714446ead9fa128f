// SPDX-License-Identifier: MPL-2.0
//! Dynamic dialog lifecycle manager.
//!
//! [`DialogManager`] opens a dialog for any component the host can
//! instantiate: it creates the wrapper chrome and the content view, injects
//! dialog context into content that wants it, walks both views through the
//! host's attach/render/mount steps, and tears everything down
//! deterministically on close. Callers hold a [`DialogRef`] and never touch
//! views directly.

use crate::dialog::chrome::DialogChrome;
use crate::dialog::completion::{self, CompletionSender};
use crate::dialog::config::DialogConfig;
use crate::dialog::handle::{DialogController, DialogId, DialogRef};
use crate::host::{ComponentSpec, InstantiateError, RenderHost, ViewHandle};
use crate::layout_lock::{create_layout_lock, LayoutLockGuard, SharedLayoutLock};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct DialogEntry {
    id: DialogId,
    wrapper: ViewHandle,
    content: ViewHandle,
    chrome: DialogChrome,
    sender: Option<CompletionSender>,
    lock_guard: Option<LayoutLockGuard>,
    /// Set while teardown runs; a second close trigger in that window is
    /// a no-op.
    closing: bool,
}

struct ManagerInner<H> {
    host: H,
    layout_lock: SharedLayoutLock,
    dialogs: Vec<DialogEntry>,
}

impl<H: RenderHost> ManagerInner<H> {
    fn begin_close(&mut self, id: DialogId) -> Option<CompletionSender> {
        let index = self.dialogs.iter().position(|entry| entry.id == id)?;
        if self.dialogs[index].closing {
            return None;
        }
        self.dialogs[index].closing = true;
        self.dialogs[index].chrome.set_visible(false);
        // Dropping the guard releases the layout lock.
        self.dialogs[index].lock_guard.take();

        let wrapper = self.dialogs[index].wrapper;
        let content = self.dialogs[index].content;
        self.host.detach(wrapper);
        self.host.detach(content);
        self.host.unmount(wrapper);
        self.host.destroy(content);
        self.host.destroy(wrapper);

        let mut entry = self.dialogs.remove(index);
        log::debug!("{id} closed");
        entry.sender.take()
    }
}

impl<H: RenderHost + 'static> DialogController for ManagerInner<H> {
    fn begin_close(&mut self, id: DialogId) -> Option<CompletionSender> {
        ManagerInner::begin_close(self, id)
    }
}

/// Opens and closes dialogs over a [`RenderHost`].
///
/// The manager is a cheap handle; clones share the same dialog set, host,
/// and layout lock. All methods are synchronous and must be called from
/// the UI thread.
pub struct DialogManager<H> {
    inner: Rc<RefCell<ManagerInner<H>>>,
}

impl<H> Clone for DialogManager<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: RenderHost + 'static> DialogManager<H> {
    /// Creates a manager with its own layout lock.
    pub fn new(host: H) -> Self {
        Self::with_layout_lock(host, create_layout_lock())
    }

    /// Creates a manager sharing an application-provided layout lock, so
    /// other overlay systems can hold it too.
    pub fn with_layout_lock(host: H, layout_lock: SharedLayoutLock) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ManagerInner {
                host,
                layout_lock,
                dialogs: Vec::new(),
            })),
        }
    }

    /// Opens a dialog hosting the component named by `spec`.
    ///
    /// The wrapper chrome and the content view are instantiated detached;
    /// content that implements `DialogAware` receives the config, a
    /// connected handle, and the config data before its first render pass.
    /// Both views are then attached and rendered once, the wrapper is
    /// mounted and shown (acquiring the layout lock when modal, resolving
    /// breakpoints against the current viewport), and the content view is
    /// reparented into the wrapper's content slot.
    ///
    /// # Errors
    ///
    /// Returns the host's [`InstantiateError`] when a view cannot be
    /// created. A content failure destroys the already-created wrapper:
    /// nothing stays attached and no reference is produced.
    pub fn open(
        &self,
        spec: &ComponentSpec,
        config: DialogConfig,
    ) -> Result<DialogRef, InstantiateError> {
        let id = DialogId::next();
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;

        let wrapper = inner.host.instantiate(&ComponentSpec::chrome())?;
        let content = match inner.host.instantiate(spec) {
            Ok(view) => view,
            Err(err) => {
                inner.host.destroy(wrapper);
                return Err(err);
            }
        };

        let mut chrome = DialogChrome::from_config(&config);
        let (sender, channel) = completion::channel();
        let handle = DialogRef::connected(id, self.controller_link(), channel);

        if let Some(aware) = inner.host.dialog_aware(content) {
            aware.set_config(&config);
            aware.set_handle(handle.clone());
            if let Some(data) = config.data.clone() {
                aware.set_data(data);
            }
        }

        inner.host.attach(wrapper);
        inner.host.attach(content);
        inner.host.render(wrapper);
        inner.host.render(content);
        inner.host.mount(wrapper);

        chrome.set_visible(true);
        let lock_guard = chrome
            .is_modal()
            .then(|| inner.layout_lock.clone().acquire());
        chrome.apply_viewport(inner.host.viewport_width());

        inner.host.reparent(content, wrapper);

        inner.dialogs.push(DialogEntry {
            id,
            wrapper,
            content,
            chrome,
            sender: Some(sender),
            lock_guard,
            closing: false,
        });
        log::debug!("{id} opened ({spec})");
        Ok(handle)
    }

    /// Reports a user dismissal: Escape, a mask click, or the close
    /// button. Closes the dialog without a result; a dialog that is
    /// already closing or closed is left alone.
    pub fn dismiss(&self, id: DialogId) {
        let sender = self.inner.borrow_mut().begin_close(id);
        if let Some(sender) = sender {
            sender.fire(None);
        }
    }

    /// Re-resolves breakpoints for every open dialog against the host's
    /// current viewport width.
    pub fn handle_resize(&self) {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        let width = inner.host.viewport_width();
        for entry in &mut inner.dialogs {
            entry.chrome.apply_viewport(width);
        }
    }

    /// Number of open dialogs.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.inner.borrow().dialogs.len()
    }

    /// Whether the dialog is still open.
    #[must_use]
    pub fn is_open(&self, id: DialogId) -> bool {
        self.inner
            .borrow()
            .dialogs
            .iter()
            .any(|entry| entry.id == id && !entry.closing)
    }

    /// Snapshot of the dialog's wrapper state, for the host to render.
    #[must_use]
    pub fn chrome(&self, id: DialogId) -> Option<DialogChrome> {
        self.inner
            .borrow()
            .dialogs
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.chrome.clone())
    }

    /// The layout lock dialogs hold while modal and visible.
    #[must_use]
    pub fn layout_lock(&self) -> SharedLayoutLock {
        Rc::clone(&self.inner.borrow().layout_lock)
    }

    /// Runs `f` with a shared borrow of the host.
    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&self.inner.borrow().host)
    }

    /// Runs `f` with an exclusive borrow of the host.
    pub fn with_host_mut<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.inner.borrow_mut().host)
    }

    fn controller_link(&self) -> Weak<RefCell<dyn DialogController>> {
        let erased: Rc<RefCell<dyn DialogController>> = self.inner.clone();
        Rc::downgrade(&erased)
    }
}

impl<H> std::fmt::Debug for DialogManager<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogManager")
            .field("open_dialogs", &self.inner.borrow().dialogs.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::config::{Breakpoints, DialogSize};
    use crate::host::{DialogAware, HeadlessHost, HostOp, ViewBacking};
    use crate::payload::Payload;
    use std::cell::Cell;

    fn manager_with_panel() -> DialogManager<HeadlessHost> {
        let mut host = HeadlessHost::new();
        host.register_inert("panel");
        DialogManager::new(host)
    }

    fn panel() -> ComponentSpec {
        ComponentSpec::new("panel")
    }

    #[test]
    fn open_runs_the_lifecycle_in_order() {
        let manager = manager_with_panel();
        let handle = manager.open(&panel(), DialogConfig::default()).unwrap();

        let (wrapper, content) = manager.with_host(|host| {
            (
                host.views_for(&ComponentSpec::chrome())[0],
                host.views_for(&panel())[0],
            )
        });
        manager.with_host(|host| {
            assert_eq!(
                host.ops(),
                &[
                    HostOp::Instantiate {
                        spec: ComponentSpec::chrome().name().to_string(),
                        view: wrapper
                    },
                    HostOp::Instantiate {
                        spec: "panel".to_string(),
                        view: content
                    },
                    HostOp::Probe(content),
                    HostOp::Attach(wrapper),
                    HostOp::Attach(content),
                    HostOp::Render(wrapper),
                    HostOp::Render(content),
                    HostOp::Mount(wrapper),
                    HostOp::Reparent {
                        child: content,
                        parent: wrapper
                    },
                ]
            );
            assert_eq!(host.parent_of(content), Some(wrapper));
        });
        assert!(manager.is_open(handle.id()));
        assert_eq!(manager.open_count(), 1);
    }

    #[test]
    fn close_tears_down_in_reverse_order() {
        let manager = manager_with_panel();
        let handle = manager.open(&panel(), DialogConfig::default()).unwrap();
        let (wrapper, content) = manager.with_host(|host| {
            (
                host.views_for(&ComponentSpec::chrome())[0],
                host.views_for(&panel())[0],
            )
        });
        manager.with_host_mut(HeadlessHost::clear_ops);

        handle.close();

        manager.with_host(|host| {
            assert_eq!(
                host.ops(),
                &[
                    HostOp::Detach(wrapper),
                    HostOp::Detach(content),
                    HostOp::Unmount(wrapper),
                    HostOp::Destroy(content),
                    HostOp::Destroy(wrapper),
                ]
            );
            assert_eq!(host.live_view_count(), 0);
        });
        assert!(handle.is_closed());
        assert!(!manager.is_open(handle.id()));
        assert_eq!(manager.open_count(), 0);
    }

    #[test]
    fn content_failure_destroys_the_wrapper() {
        let manager = manager_with_panel();
        let err = manager
            .open(&ComponentSpec::new("unregistered"), DialogConfig::default())
            .unwrap_err();

        assert_eq!(
            err,
            InstantiateError::UnknownComponent("unregistered".to_string())
        );
        manager.with_host(|host| {
            assert_eq!(host.live_view_count(), 0);
            assert!(matches!(host.ops().last(), Some(HostOp::Destroy(_))));
        });
        assert_eq!(manager.open_count(), 0);
    }

    #[test]
    fn modal_dialogs_hold_the_layout_lock_while_visible() {
        let manager = manager_with_panel();
        let lock = manager.layout_lock();
        assert!(!lock.is_locked());

        let handle = manager.open(&panel(), DialogConfig::default()).unwrap();
        assert!(lock.is_locked());

        handle.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn non_modal_dialogs_skip_the_layout_lock() {
        let manager = manager_with_panel();
        let _handle = manager
            .open(
                &panel(),
                DialogConfig {
                    modal: false,
                    ..DialogConfig::default()
                },
            )
            .unwrap();
        assert!(!manager.layout_lock().is_locked());
    }

    #[test]
    fn overlapping_modals_release_the_lock_only_when_both_close() {
        let manager = manager_with_panel();
        let first = manager.open(&panel(), DialogConfig::default()).unwrap();
        let second = manager.open(&panel(), DialogConfig::default()).unwrap();
        let lock = manager.layout_lock();
        assert_eq!(lock.holders(), 2);

        first.close();
        assert!(lock.is_locked());
        second.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn close_with_delivers_the_result_to_subscribers() {
        let manager = manager_with_panel();
        let handle = manager.open(&panel(), DialogConfig::default()).unwrap();
        let received = Rc::new(Cell::new(0i32));
        {
            let received = Rc::clone(&received);
            handle.on_close(move |result| {
                if let Some(value) = result.and_then(|p| p.downcast_ref::<i32>().copied()) {
                    received.set(value);
                }
            });
        }

        handle.close_with(Payload::new(42i32));
        assert_eq!(received.get(), 42);
    }

    #[test]
    fn dismiss_closes_without_a_result() {
        let manager = manager_with_panel();
        let handle = manager.open(&panel(), DialogConfig::default()).unwrap();
        let got_none = Rc::new(Cell::new(false));
        {
            let got_none = Rc::clone(&got_none);
            handle.on_close(move |result| got_none.set(result.is_none()));
        }

        manager.dismiss(handle.id());
        assert!(got_none.get());
        assert!(!manager.is_open(handle.id()));

        // Racing dismissals are silent.
        manager.dismiss(handle.id());
    }

    #[test]
    fn handles_outliving_the_manager_are_inert() {
        let manager = manager_with_panel();
        let handle = manager.open(&panel(), DialogConfig::default()).unwrap();
        drop(manager);

        handle.close();
        assert!(!handle.is_closed());
    }

    #[test]
    fn breakpoints_are_resolved_when_the_dialog_is_shown() {
        let mut host = HeadlessHost::new();
        host.register_inert("panel");
        host.set_viewport_width(700.0);
        let manager = DialogManager::new(host);

        let handle = manager
            .open(
                &panel(),
                DialogConfig {
                    width: "900px".to_string(),
                    breakpoints: Some(
                        Breakpoints::new()
                            .up_to(960, DialogSize::width("720px"))
                            .up_to(640, DialogSize::width("576px")),
                    ),
                    ..DialogConfig::default()
                },
            )
            .unwrap();

        let chrome = manager.chrome(handle.id()).unwrap();
        assert!(chrome.is_visible());
        assert_eq!(chrome.width(), "720px");
    }

    #[test]
    fn resize_recomputes_every_open_dialog() {
        let mut host = HeadlessHost::new();
        host.register_inert("panel");
        host.set_viewport_width(600.0);
        let manager = DialogManager::new(host);
        let handle = manager
            .open(
                &panel(),
                DialogConfig {
                    width: "900px".to_string(),
                    breakpoints: Some(Breakpoints::new().up_to(640, DialogSize::width("576px"))),
                    ..DialogConfig::default()
                },
            )
            .unwrap();
        assert_eq!(manager.chrome(handle.id()).unwrap().width(), "576px");

        manager.with_host_mut(|host| host.set_viewport_width(1400.0));
        manager.handle_resize();
        assert_eq!(manager.chrome(handle.id()).unwrap().width(), "900px");
    }

    #[test]
    fn dialog_aware_content_receives_context_before_first_render() {
        #[derive(Default)]
        struct Probe {
            header: Option<String>,
            data: Option<i32>,
            handle: Option<DialogRef>,
        }
        #[derive(Clone, Default)]
        struct SharedProbe(Rc<RefCell<Probe>>);
        impl DialogAware for SharedProbe {
            fn set_config(&mut self, config: &DialogConfig) {
                self.0.borrow_mut().header = config.header.clone();
            }
            fn set_handle(&mut self, handle: DialogRef) {
                self.0.borrow_mut().handle = Some(handle);
            }
            fn set_data(&mut self, data: Payload) {
                self.0.borrow_mut().data = data.downcast_ref::<i32>().copied();
            }
        }
        impl ViewBacking for SharedProbe {
            fn as_dialog_aware(&mut self) -> Option<&mut dyn DialogAware> {
                Some(self)
            }
        }

        let probe = SharedProbe::default();
        let mut host = HeadlessHost::new();
        {
            let probe = probe.clone();
            host.register("aware-panel", move || Box::new(probe.clone()));
        }
        let manager = DialogManager::new(host);

        let handle = manager
            .open(
                &ComponentSpec::new("aware-panel"),
                DialogConfig {
                    header: Some("Settings".to_string()),
                    data: Some(Payload::new(7i32)),
                    ..DialogConfig::default()
                },
            )
            .unwrap();

        {
            let seen = probe.0.borrow();
            assert_eq!(seen.header.as_deref(), Some("Settings"));
            assert_eq!(seen.data, Some(7));
            assert!(seen.handle.is_some());
            assert_eq!(seen.handle.as_ref().unwrap().id(), handle.id());
        }

        // The injected handle is live: content can close its own dialog.
        let injected = probe.0.borrow().handle.clone().unwrap();
        injected.close();
        assert!(handle.is_closed());
    }

    #[test]
    fn completion_callbacks_can_reenter_the_manager() {
        let manager = manager_with_panel();
        let handle = manager.open(&panel(), DialogConfig::default()).unwrap();
        let reopened = Rc::new(RefCell::new(None));
        {
            let manager = manager.clone();
            let reopened = Rc::clone(&reopened);
            handle.on_close(move |_| {
                let next = manager.open(&panel(), DialogConfig::default()).unwrap();
                *reopened.borrow_mut() = Some(next);
            });
        }

        handle.close();
        let next = reopened.borrow().clone().unwrap();
        assert!(manager.is_open(next.id()));
        assert_eq!(manager.open_count(), 1);
    }

    #[test]
    fn chrome_is_gone_after_close() {
        let manager = manager_with_panel();
        let handle = manager.open(&panel(), DialogConfig::default()).unwrap();
        assert!(manager.chrome(handle.id()).is_some());

        handle.close();
        assert!(manager.chrome(handle.id()).is_none());
    }
}
