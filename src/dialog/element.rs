//! Retained element tree that dialog content is built from.
//!
//! The tree plays the role a document subtree plays in a browser: the overlay
//! host never interprets the content, it only walks it in document order to
//! find focus targets and lays its leaves out line by line.

use std::fmt;

/// Identifier of an element inside one dialog's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What an element is and the state it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Container; only groups its children.
    Group,
    /// Static text, never focusable unless given an explicit tab index.
    Text(String),
    /// Push button.
    Button(String),
    /// Single-line text input.
    Input {
        label: String,
        value: String,
        masked: bool,
    },
}

/// A node of dialog content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    tab_index: Option<i32>,
    disabled: bool,
    children: Vec<Self>,
}

impl Element {
    fn new(id: impl Into<ElementId>, kind: ElementKind, tab_index: Option<i32>) -> Self {
        Self {
            id: id.into(),
            kind,
            tab_index,
            disabled: false,
            children: Vec::new(),
        }
    }

    pub fn group(id: impl Into<ElementId>, children: impl IntoIterator<Item = Self>) -> Self {
        let mut group = Self::new(id, ElementKind::Group, None);
        group.children = children.into_iter().collect();
        group
    }

    pub fn text(id: impl Into<ElementId>, text: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Text(text.into()), None)
    }

    pub fn button(id: impl Into<ElementId>, label: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Button(label.into()), Some(0))
    }

    pub fn input(id: impl Into<ElementId>, label: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementKind::Input {
                label: label.into(),
                value: String::new(),
                masked: false,
            },
            Some(0),
        )
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set an explicit tab index. `-1` keeps the element out of the trap.
    #[must_use]
    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    #[must_use]
    pub fn with_value(mut self, text: impl Into<String>) -> Self {
        if let ElementKind::Input { value, .. } = &mut self.kind {
            *value = text.into();
        }
        self
    }

    /// Render the input's value as bullets.
    #[must_use]
    pub fn masked(mut self) -> Self {
        if let ElementKind::Input { masked, .. } = &mut self.kind {
            *masked = true;
        }
        self
    }

    pub const fn id(&self) -> &ElementId {
        &self.id
    }

    pub const fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub const fn tab_index(&self) -> Option<i32> {
        self.tab_index
    }

    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Current value of an input, `None` for every other kind.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Input { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut String> {
        match &mut self.kind {
            ElementKind::Input { value, .. } => Some(value),
            _ => None,
        }
    }

    /// All descendants in document order, not including `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children().iter().rev().collect(),
        }
    }

    pub fn find(&self, id: &ElementId) -> Option<&Self> {
        if &self.id == id {
            return Some(self);
        }
        self.descendants().find(|element| &element.id == id)
    }

    pub fn find_mut(&mut self, id: &ElementId) -> Option<&mut Self> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Leaf elements in document order; each one occupies a line when laid out.
    pub fn lines(&self) -> Vec<&Self> {
        if self.children.is_empty() && self.kind != ElementKind::Group {
            return vec![self];
        }
        self.descendants()
            .filter(|element| element.kind != ElementKind::Group)
            .collect()
    }
}

/// Pre-order iterator over an element's descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children().iter().rev());
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Element {
        Element::group(
            "root",
            [
                Element::text("heading", "Heading"),
                Element::group(
                    "fields",
                    [Element::input("name", "Name"), Element::input("secret", "Secret").masked()],
                ),
                Element::button("ok", "OK"),
            ],
        )
    }

    #[test]
    fn test_descendants_are_in_document_order() {
        let root = tree();
        let ids: Vec<&str> = root.descendants().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["heading", "fields", "name", "secret", "ok"]);
    }

    #[test]
    fn test_lines_skip_groups() {
        let root = tree();
        let ids: Vec<&str> = root.lines().iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["heading", "name", "secret", "ok"]);
    }

    #[test]
    fn test_default_tab_indices() {
        let root = tree();
        assert_eq!(root.tab_index(), None);
        assert_eq!(root.find(&"heading".into()).unwrap().tab_index(), None);
        assert_eq!(root.find(&"ok".into()).unwrap().tab_index(), Some(0));
        assert_eq!(root.find(&"name".into()).unwrap().tab_index(), Some(0));
    }

    #[test]
    fn test_find_mut_edits_nested_input() {
        let mut root = tree();
        root.find_mut(&"secret".into())
            .and_then(Element::value_mut)
            .unwrap()
            .push_str("hunter2");

        assert_eq!(root.find(&"secret".into()).unwrap().value(), Some("hunter2"));
        assert!(root.find_mut(&"missing".into()).is_none());
    }

    #[test]
    fn test_with_value_ignores_non_inputs() {
        let button = Element::button("ok", "OK").with_value("ignored");
        assert_eq!(button.value(), None);
    }
}
