//! Focus targets and the arithmetic behind the focus trap.
//!
//! Everything here is pure: the host snapshots the mounted content into a
//! [`FocusableSet`] each time it needs to move focus and asks the set where
//! focus should go.

use super::element::{Element, ElementId};

/// One of the two invisible positions bracketing the dialog content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Reached by tabbing backward past the first focusable element.
    Start,
    /// Reached by tabbing forward past the last focusable element.
    End,
}

/// Something that can hold keyboard focus while the host is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Sentinel(Sentinel),
    Element(ElementId),
}

impl FocusTarget {
    pub const START: Self = Self::Sentinel(Sentinel::Start);
    pub const END: Self = Self::Sentinel(Sentinel::End);

    pub const fn element_id(&self) -> Option<&ElementId> {
        match self {
            Self::Element(id) => Some(id),
            Self::Sentinel(_) => None,
        }
    }
}

/// A focus candidate found in the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focusable {
    pub id: ElementId,
    pub disabled: bool,
}

/// Snapshot of the keyboard-focusable descendants of a content root.
///
/// An element qualifies when it carries an explicit tab index other than
/// `-1`. Disabled elements are part of the set; only the trap and the tab
/// order decide whether to skip them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusableSet {
    items: Vec<Focusable>,
}

impl FocusableSet {
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn collect(root: &Element) -> Self {
        let items = root
            .descendants()
            .filter(|element| element.tab_index().is_some_and(|index| index != -1))
            .map(|element| Focusable {
                id: element.id().clone(),
                disabled: element.is_disabled(),
            })
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    pub fn is_enabled(&self, id: &ElementId) -> bool {
        self.items.iter().any(|item| &item.id == id && !item.disabled)
    }

    /// Where focus goes once new content has been rendered.
    ///
    /// The first element is chosen regardless of its disabled state.
    pub fn initial(&self) -> Option<&ElementId> {
        self.items.first().map(|item| &item.id)
    }

    /// Target when focus lands on the given sentinel.
    pub fn redirect(&self, sentinel: Sentinel) -> Option<&ElementId> {
        match sentinel {
            Sentinel::Start => self.last_enabled(),
            Sentinel::End => self.first_enabled(),
        }
    }

    /// The last element, or scanning backward the nearest one that is not
    /// disabled. `None` when every candidate is disabled.
    pub fn last_enabled(&self) -> Option<&ElementId> {
        let (last, rest) = self.items.split_last()?;
        if !last.disabled {
            return Some(&last.id);
        }
        rest.iter().rev().find(|item| !item.disabled).map(|item| &item.id)
    }

    /// The first element, or scanning forward the nearest one that is not
    /// disabled. `None` when every candidate is disabled.
    pub fn first_enabled(&self) -> Option<&ElementId> {
        let (first, rest) = self.items.split_first()?;
        if !first.disabled {
            return Some(&first.id);
        }
        rest.iter().find(|item| !item.disabled).map(|item| &item.id)
    }

    /// Sequential tab order while the host is visible: the sentinels around
    /// every enabled element.
    pub fn tab_sequence(&self) -> Vec<FocusTarget> {
        let mut sequence = Vec::with_capacity(self.items.len() + 2);
        sequence.push(FocusTarget::START);
        sequence.extend(
            self.items
                .iter()
                .filter(|item| !item.disabled)
                .map(|item| FocusTarget::Element(item.id.clone())),
        );
        sequence.push(FocusTarget::END);
        sequence
    }

    /// Target reached from `current` by one Tab (or Shift+Tab when
    /// `backward`). Nothing focused counts as sitting on the start sentinel
    /// going forward and on the end sentinel going backward.
    pub fn step(&self, current: Option<&FocusTarget>, backward: bool) -> FocusTarget {
        let sequence = self.tab_sequence();
        let last = sequence.len() - 1;
        let position = current
            .and_then(|target| sequence.iter().position(|candidate| candidate == target))
            .unwrap_or(if backward { last } else { 0 });

        let next = if backward {
            position.checked_sub(1).unwrap_or(last)
        } else if position == last {
            0
        } else {
            position + 1
        };
        sequence[next].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(disabled: &[bool]) -> Element {
        let names = ["a", "b", "c", "d"];
        Element::group(
            "root",
            names.iter().zip(disabled).map(|(name, disabled)| {
                let button = Element::button(*name, name.to_uppercase());
                if *disabled { button.disabled() } else { button }
            }),
        )
    }

    fn id(name: &str) -> ElementId {
        ElementId::new(name)
    }

    #[test]
    fn test_collect_respects_explicit_tab_index() {
        let root = Element::group(
            "root",
            [
                Element::text("label", "Label"),
                Element::text("focusable-label", "Focusable").with_tab_index(0),
                Element::button("hidden", "Hidden").with_tab_index(-1),
                Element::group("nested", [Element::input("field", "Field")]),
                Element::button("later", "Later").with_tab_index(3),
            ],
        );

        let set = FocusableSet::collect(&root);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&id("focusable-label")));
        assert!(set.contains(&id("field")));
        assert!(set.contains(&id("later")));
        assert!(!set.contains(&id("hidden")));
        assert!(!set.contains(&id("label")));
    }

    #[test]
    fn test_redirects_without_disabled_elements() {
        let set = FocusableSet::collect(&content(&[false, false, false]));
        assert_eq!(set.initial(), Some(&id("a")));
        assert_eq!(set.redirect(Sentinel::Start), Some(&id("c")));
        assert_eq!(set.redirect(Sentinel::End), Some(&id("a")));
    }

    #[test]
    fn test_start_redirect_skips_trailing_disabled() {
        let set = FocusableSet::collect(&content(&[false, true, true]));
        assert_eq!(set.redirect(Sentinel::Start), Some(&id("a")));
    }

    #[test]
    fn test_end_redirect_skips_leading_disabled() {
        let set = FocusableSet::collect(&content(&[true, true, false, false]));
        assert_eq!(set.redirect(Sentinel::End), Some(&id("c")));
    }

    #[test]
    fn test_initial_focus_ignores_disabled_state() {
        let set = FocusableSet::collect(&content(&[true, false]));
        assert_eq!(set.initial(), Some(&id("a")));
    }

    #[test]
    fn test_all_disabled_redirects_nowhere() {
        let set = FocusableSet::collect(&content(&[true, true, true]));
        assert_eq!(set.redirect(Sentinel::Start), None);
        assert_eq!(set.redirect(Sentinel::End), None);
    }

    #[test]
    fn test_empty_set_redirects_nowhere() {
        let set = FocusableSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.initial(), None);
        assert_eq!(set.redirect(Sentinel::Start), None);
        assert_eq!(set.redirect(Sentinel::End), None);
    }

    #[test]
    fn test_tab_sequence_skips_disabled() {
        let set = FocusableSet::collect(&content(&[false, true, false]));
        assert_eq!(
            set.tab_sequence(),
            vec![
                FocusTarget::START,
                FocusTarget::Element(id("a")),
                FocusTarget::Element(id("c")),
                FocusTarget::END,
            ]
        );
    }

    #[test]
    fn test_step_forward_reaches_end_sentinel() {
        let set = FocusableSet::collect(&content(&[false, false]));
        let b = FocusTarget::Element(id("b"));
        assert_eq!(set.step(Some(&b), false), FocusTarget::END);
        assert_eq!(set.step(Some(&FocusTarget::END), false), FocusTarget::START);
    }

    #[test]
    fn test_step_backward_reaches_start_sentinel() {
        let set = FocusableSet::collect(&content(&[false, false]));
        let a = FocusTarget::Element(id("a"));
        assert_eq!(set.step(Some(&a), true), FocusTarget::START);
        assert_eq!(set.step(Some(&FocusTarget::START), true), FocusTarget::END);
    }

    #[test]
    fn test_step_from_nothing() {
        let set = FocusableSet::collect(&content(&[false, false]));
        assert_eq!(set.step(None, false), FocusTarget::Element(id("a")));
        assert_eq!(set.step(None, true), FocusTarget::Element(id("b")));
    }

    #[test]
    fn test_step_from_unknown_target_restarts() {
        let set = FocusableSet::collect(&content(&[false, false]));
        let stale = FocusTarget::Element(id("gone"));
        assert_eq!(set.step(Some(&stale), false), FocusTarget::Element(id("a")));
    }
}
