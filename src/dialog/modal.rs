//! Standard dialog chrome.
//!
//! A [`Modal`] lays out an optional close button, a description, the caller's
//! content and a row of action buttons, and produces the [`DialogContent`] the
//! host presents. Modals are blocking: the only ways out are the close button,
//! the dismiss key, a backdrop click, or one of the actions.

use super::element::{Element, ElementId};
use super::mount::{DEFAULT_MAX_WIDTH, DialogContent};

pub const CLOSE_BUTTON_ID: &str = "modal-close";
pub const DESCRIPTION_ID: &str = "modal-description";
pub const CONTENT_ID: &str = "modal-content";
pub const ACTIONS_ID: &str = "modal-actions";

#[derive(Debug, Clone)]
pub struct Modal {
    title: String,
    description: Option<String>,
    max_width: u16,
    close_button: bool,
    content: Vec<Element>,
    actions: Vec<Element>,
}

impl Modal {
    pub const fn new() -> Self {
        Self {
            title: String::new(),
            description: None,
            max_width: DEFAULT_MAX_WIDTH,
            close_button: true,
            content: Vec::new(),
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width;
        self
    }

    #[must_use]
    pub const fn without_close_button(mut self) -> Self {
        self.close_button = false;
        self
    }

    #[must_use]
    pub fn content(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.content.extend(children);
        self
    }

    #[must_use]
    pub fn actions(mut self, buttons: impl IntoIterator<Item = Element>) -> Self {
        self.actions.extend(buttons);
        self
    }

    /// Whether `id` is the element that cancels a modal.
    pub fn is_cancel(id: &ElementId) -> bool {
        id.as_str() == CLOSE_BUTTON_ID
    }

    pub fn build(self) -> DialogContent {
        let mut children = Vec::with_capacity(4);
        if self.close_button {
            children.push(Element::button(CLOSE_BUTTON_ID, "Close"));
        }
        if let Some(description) = self.description.filter(|text| !text.is_empty()) {
            children.push(Element::text(DESCRIPTION_ID, description));
        }
        children.push(Element::group(CONTENT_ID, self.content));
        children.push(Element::group(ACTIONS_ID, self.actions));

        let content = DialogContent::new(Element::group("modal", children))
            .with_max_width(self.max_width);
        if self.title.is_empty() {
            content
        } else {
            content.with_title(self.title)
        }
    }
}

impl Default for Modal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::focus::FocusableSet;

    fn ids(element: &Element) -> Vec<&str> {
        element.children().iter().map(|child| child.id().as_str()).collect()
    }

    #[test]
    fn test_full_layout() {
        let content = Modal::new()
            .with_title("Open a bot")
            .with_description("Pick a bot file to open.")
            .content([Element::input("path", "Path")])
            .actions([Element::button("cancel", "Cancel"), Element::button("open", "Open")])
            .build();

        assert_eq!(content.title.as_deref(), Some("Open a bot"));
        assert_eq!(content.max_width, DEFAULT_MAX_WIDTH);
        assert_eq!(
            ids(&content.root),
            vec![CLOSE_BUTTON_ID, DESCRIPTION_ID, CONTENT_ID, ACTIONS_ID]
        );
    }

    #[test]
    fn test_focus_order_starts_at_close_button() {
        let content = Modal::new()
            .content([Element::input("path", "Path")])
            .actions([Element::button("open", "Open")])
            .build();

        let focusables = FocusableSet::collect(&content.root);
        assert_eq!(focusables.initial().map(ElementId::as_str), Some(CLOSE_BUTTON_ID));
        assert_eq!(focusables.last_enabled().map(ElementId::as_str), Some("open"));
    }

    #[test]
    fn test_empty_title_and_description_are_dropped() {
        let content = Modal::new()
            .with_title("")
            .with_description("")
            .without_close_button()
            .build();

        assert_eq!(content.title, None);
        assert_eq!(ids(&content.root), vec![CONTENT_ID, ACTIONS_ID]);
        assert!(FocusableSet::collect(&content.root).is_empty());
    }

    #[test]
    fn test_modal_and_plain_content_share_the_default_width() {
        let plain = DialogContent::new(Element::group("root", []));
        assert_eq!(Modal::new().build().max_width, plain.max_width);
    }

    #[test]
    fn test_custom_width() {
        let content = Modal::new().with_max_width(40).build();
        assert_eq!(content.max_width, 40);
    }

    #[test]
    fn test_is_cancel() {
        assert!(Modal::is_cancel(&ElementId::new(CLOSE_BUTTON_ID)));
        assert!(!Modal::is_cancel(&ElementId::new("ok")));
    }
}
