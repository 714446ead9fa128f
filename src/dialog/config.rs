// SPDX-License-Identifier: MPL-2.0
//! Dialog configuration descriptor and responsive size overrides.

use crate::payload::Payload;
use std::collections::BTreeMap;

/// Size override applied when a breakpoint matches.
///
/// `height: None` means the dialog height is unset while the entry is
/// active, even when the base configuration carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSize {
    /// CSS-style width string, e.g. `"720px"` or `"75vw"`.
    pub width: String,
    /// Optional CSS-style height string.
    pub height: Option<String>,
}

impl DialogSize {
    /// A size with the given width and no height.
    pub fn width(width: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            height: None,
        }
    }

    /// Adds a height to the size.
    #[must_use]
    pub fn height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }
}

/// Ordered viewport-width thresholds mapping to size overrides.
///
/// An entry at threshold `T` applies while the viewport is at most `T`
/// logical pixels wide; when several entries apply, the smallest wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakpoints {
    thresholds: BTreeMap<u32, DialogSize>,
}

impl Breakpoints {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry that applies while the viewport width is at most
    /// `max_width_px`, replacing any previous entry at that threshold.
    #[must_use]
    pub fn up_to(mut self, max_width_px: u32, size: DialogSize) -> Self {
        self.thresholds.insert(max_width_px, size);
        self
    }

    /// Resolves the override for a viewport width: the entry with the
    /// smallest threshold that is still `>=` the width. A threshold equal
    /// to the width matches. Returns `None` when every threshold is below
    /// the width, meaning the base configuration applies.
    #[must_use]
    pub fn resolve(&self, viewport_width: f32) -> Option<&DialogSize> {
        let width = viewport_width.ceil() as u32;
        self.thresholds.range(width..).next().map(|(_, size)| size)
    }

    /// Whether the set holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }
}

/// Immutable description of the dialog being opened.
///
/// Passed to `DialogManager::open` by value; the manager derives its
/// wrapper state from it and stores nothing else. Unknown-to-the-wrapper
/// concerns (e.g. `data`) pass through to the content component.
#[derive(Debug, Clone)]
pub struct DialogConfig {
    /// Title text of the wrapper's header bar. `None` hides the bar.
    pub header: Option<String>,
    /// Base dialog width; CSS-style string.
    pub width: String,
    /// Base dialog height; `None` lets the content size itself.
    pub height: Option<String>,
    /// Style string the host applies to the content slot.
    pub content_style: Option<String>,
    /// Responsive size overrides by maximum viewport width.
    pub breakpoints: Option<Breakpoints>,
    /// Whether the wrapper offers a close affordance.
    pub closable: bool,
    /// Whether the dialog blocks interaction with the page behind it and
    /// holds the layout lock while visible.
    pub modal: bool,
    /// Whether the Escape key dismisses the dialog.
    pub close_on_escape: bool,
    /// Whether clicking the modal mask dismisses the dialog.
    pub dismissable_mask: bool,
    /// Opaque data handed to the content component when it implements
    /// `DialogAware`.
    pub data: Option<Payload>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            header: None,
            width: crate::config::DEFAULT_DIALOG_WIDTH.to_string(),
            height: None,
            content_style: None,
            breakpoints: None,
            closable: true,
            modal: true,
            close_on_escape: true,
            dismissable_mask: false,
            data: None,
        }
    }
}
