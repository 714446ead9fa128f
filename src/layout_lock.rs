// SPDX-License-Identifier: MPL-2.0
//! Reference-counted scroll/layout lock.
//!
//! While any modal overlay is visible the host should freeze background
//! scrolling. A single boolean breaks down as soon as two modals overlap,
//! so the lock counts holders: each visible modal holds a
//! [`LayoutLockGuard`], and the host consults [`LayoutLock::is_locked`]
//! when deciding whether to freeze. The lock unfreezes only when the last
//! guard drops.

use std::cell::Cell;
use std::rc::Rc;

/// Shared handle to a layout lock.
pub type SharedLayoutLock = Rc<LayoutLock>;

/// Creates a fresh, unlocked layout lock.
#[must_use]
pub fn create_layout_lock() -> SharedLayoutLock {
    Rc::new(LayoutLock::new())
}

/// Counting lock over the host's background layout.
#[derive(Debug, Default)]
pub struct LayoutLock {
    holders: Cell<u32>,
}

impl LayoutLock {
    /// Creates an unlocked lock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a hold on the lock, released when the returned guard drops.
    ///
    /// Consumes an `Rc` clone: `lock.clone().acquire()`.
    #[must_use]
    pub fn acquire(self: Rc<Self>) -> LayoutLockGuard {
        self.holders.set(self.holders.get() + 1);
        LayoutLockGuard { lock: self }
    }

    /// Whether at least one guard currently holds the lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    /// Number of outstanding guards.
    #[must_use]
    pub fn holders(&self) -> u32 {
        self.holders.get()
    }
}

/// Hold on a [`LayoutLock`]; dropping it releases the hold.
#[derive(Debug)]
#[must_use = "dropping the guard releases the layout lock"]
pub struct LayoutLockGuard {
    lock: SharedLayoutLock,
}

impl Drop for LayoutLockGuard {
    fn drop(&mut self) {
        let holders = self.lock.holders.get();
        debug_assert!(holders > 0, "layout lock released more often than held");
        self.lock.holders.set(holders.saturating_sub(1));
    }
}
