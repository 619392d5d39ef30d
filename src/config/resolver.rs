use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{DialogAction, GlobalAction};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn global(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::Suspend => &kb.suspend,
            GlobalAction::OpenConfirm => &kb.open_confirm,
            GlobalAction::OpenBot => &kb.open_bot,
            GlobalAction::OpenUpdate => &kb.open_update,
        }
    }

    fn dialog(&self, action: DialogAction) -> &KeyBinding {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::FocusNext => &kb.focus_next,
            DialogAction::FocusPrevious => &kb.focus_previous,
            DialogAction::Activate => &kb.activate,
            DialogAction::Dismiss => &kb.dismiss,
        }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global(action).matches(event)
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global(action).display()
    }

    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        self.dialog(action).matches(event)
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        self.dialog(action).display()
    }
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn test_default_dialog_bindings() {
        let resolver = KeyResolver::default();
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);

        assert!(resolver.matches_dialog(&tab, DialogAction::FocusNext));
        assert!(!resolver.matches_dialog(&tab, DialogAction::FocusPrevious));
        assert!(resolver.matches_dialog(&back_tab, DialogAction::FocusPrevious));
        assert_eq!(resolver.display_dialog(DialogAction::Dismiss), "Esc");
    }

    #[test]
    fn test_global_display() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.display_global(GlobalAction::Suspend), "ctrl+z");
        assert_eq!(resolver.display_global(GlobalAction::OpenBot), "o");
    }
}
