//! The slot dialog content is mounted into.

use std::cell::RefCell;
use std::rc::Rc;

use super::element::Element;
use super::focus::FocusableSet;

/// Default width limit of a dialog, in terminal columns.
pub const DEFAULT_MAX_WIDTH: u16 = 60;

/// Everything the host needs to present one dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogContent {
    pub title: Option<String>,
    pub root: Element,
    pub max_width: u16,
}

impl DialogContent {
    pub const fn new(root: Element) -> Self {
        Self {
            title: None,
            root,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width;
        self
    }
}

/// Shared handle to the host's content slot.
///
/// The host creates the node and keeps it for its whole lifetime; the dialog
/// service receives clones of the handle and mounts or unmounts content
/// through them. Clones refer to the same slot.
#[derive(Debug, Clone, Default)]
pub struct MountNode {
    slot: Rc<RefCell<Option<DialogContent>>>,
}

impl MountNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `content`, replacing whatever was mounted before.
    pub fn mount(&self, content: DialogContent) -> Option<DialogContent> {
        self.slot.borrow_mut().replace(content)
    }

    pub fn unmount(&self) -> Option<DialogContent> {
        self.slot.borrow_mut().take()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.borrow().is_none()
    }

    pub fn with_content<R>(&self, f: impl FnOnce(&DialogContent) -> R) -> Option<R> {
        self.slot.borrow().as_ref().map(f)
    }

    pub fn with_content_mut<R>(&self, f: impl FnOnce(&mut DialogContent) -> R) -> Option<R> {
        self.slot.borrow_mut().as_mut().map(f)
    }

    /// Focusable descendants of the mounted content, empty when nothing is mounted.
    pub fn focusables(&self) -> FocusableSet {
        self.with_content(|content| FocusableSet::collect(&content.root))
            .unwrap_or_default()
    }

    /// Whether both handles refer to the same slot.
    pub fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}
