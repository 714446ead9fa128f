// SPDX-License-Identifier: MPL-2.0
//! Wrapper chrome state.
//!
//! [`DialogChrome`] is what the host renders around the content view:
//! header, effective size, visibility, and the interaction flags. The
//! manager owns one per open dialog and recomputes the effective size
//! whenever the viewport changes.

use crate::dialog::config::{Breakpoints, DialogConfig};

/// Render state of one dialog wrapper.
#[derive(Debug, Clone)]
pub struct DialogChrome {
    header: Option<String>,
    content_style: Option<String>,
    closable: bool,
    modal: bool,
    close_on_escape: bool,
    dismissable_mask: bool,
    base_width: String,
    base_height: Option<String>,
    breakpoints: Option<Breakpoints>,
    visible: bool,
    /// Effective size after breakpoint resolution.
    width: String,
    height: Option<String>,
}

impl DialogChrome {
    pub(crate) fn from_config(config: &DialogConfig) -> Self {
        Self {
            header: config.header.clone(),
            content_style: config.content_style.clone(),
            closable: config.closable,
            modal: config.modal,
            close_on_escape: config.close_on_escape,
            dismissable_mask: config.dismissable_mask,
            base_width: config.width.clone(),
            base_height: config.height.clone(),
            breakpoints: config.breakpoints.clone(),
            visible: false,
            width: config.width.clone(),
            height: config.height.clone(),
        }
    }

    /// Recomputes the effective size for the given viewport width. With no
    /// breakpoints configured the base size stays in effect; with
    /// breakpoints, a matching entry overrides the size (its missing height
    /// unsets the height) and no match restores the base.
    pub(crate) fn apply_viewport(&mut self, viewport_width: f32) {
        let Some(breakpoints) = &self.breakpoints else {
            return;
        };
        match breakpoints.resolve(viewport_width) {
            Some(size) => {
                self.width = size.width.clone();
                self.height = size.height.clone();
            }
            None => {
                self.width = self.base_width.clone();
                self.height = self.base_height.clone();
            }
        }
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Header bar title, if the dialog has one.
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Style string for the content slot.
    #[must_use]
    pub fn content_style(&self) -> Option<&str> {
        self.content_style.as_deref()
    }

    /// Effective width after breakpoint resolution.
    #[must_use]
    pub fn width(&self) -> &str {
        &self.width
    }

    /// Effective height after breakpoint resolution.
    #[must_use]
    pub fn height(&self) -> Option<&str> {
        self.height.as_deref()
    }

    /// Whether the wrapper is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the wrapper offers a close affordance.
    #[must_use]
    pub fn is_closable(&self) -> bool {
        self.closable
    }

    /// Whether the dialog blocks the page behind it.
    #[must_use]
    pub fn is_modal(&self) -> bool {
        self.modal
    }

    /// Whether the Escape key should dismiss the dialog.
    #[must_use]
    pub fn closes_on_escape(&self) -> bool {
        self.close_on_escape
    }

    /// Whether clicking the modal mask should dismiss the dialog.
    #[must_use]
    pub fn has_dismissable_mask(&self) -> bool {
        self.dismissable_mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::config::DialogSize;

    fn config_with_breakpoints() -> DialogConfig {
        DialogConfig {
            width: "900px".to_string(),
            height: Some("600px".to_string()),
            breakpoints: Some(
                Breakpoints::new()
                    .up_to(960, DialogSize::width("720px"))
                    .up_to(640, DialogSize::width("576px").height("90vh")),
            ),
            ..DialogConfig::default()
        }
    }

    #[test]
    fn starts_hidden_with_the_base_size() {
        let chrome = DialogChrome::from_config(&config_with_breakpoints());
        assert!(!chrome.is_visible());
        assert_eq!(chrome.width(), "900px");
        assert_eq!(chrome.height(), Some("600px"));
    }

    #[test]
    fn matching_entry_without_height_unsets_the_height() {
        let mut chrome = DialogChrome::from_config(&config_with_breakpoints());
        chrome.apply_viewport(700.0);
        assert_eq!(chrome.width(), "720px");
        assert_eq!(chrome.height(), None);
    }

    #[test]
    fn matching_entry_with_height_overrides_both() {
        let mut chrome = DialogChrome::from_config(&config_with_breakpoints());
        chrome.apply_viewport(600.0);
        assert_eq!(chrome.width(), "576px");
        assert_eq!(chrome.height(), Some("90vh"));
    }

    #[test]
    fn no_match_restores_the_base_size() {
        let mut chrome = DialogChrome::from_config(&config_with_breakpoints());
        chrome.apply_viewport(700.0);
        chrome.apply_viewport(1400.0);
        assert_eq!(chrome.width(), "900px");
        assert_eq!(chrome.height(), Some("600px"));
    }

    #[test]
    fn without_breakpoints_the_viewport_is_ignored() {
        let mut chrome = DialogChrome::from_config(&DialogConfig::default());
        chrome.apply_viewport(320.0);
        assert_eq!(chrome.width(), "300px");
        assert_eq!(chrome.height(), None);
    }

    #[test]
    fn interaction_flags_come_from_the_config() {
        let chrome = DialogChrome::from_config(&DialogConfig {
            closable: false,
            modal: false,
            close_on_escape: false,
            dismissable_mask: true,
            ..DialogConfig::default()
        });
        assert!(!chrome.is_closable());
        assert!(!chrome.is_modal());
        assert!(!chrome.closes_on_escape());
        assert!(chrome.has_dismissable_mask());
    }
}
