use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{DialogKeybindings, GlobalKeybindings};

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            suspend: Key::with_ctrl(KeyCode::Char('z')).into(),
            open_confirm: Key::new(KeyCode::Char('d')).into(),
            open_bot: Key::new(KeyCode::Char('o')).into(),
            open_update: Key::new(KeyCode::Char('u')).into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            focus_next: Key::new(KeyCode::Tab).into(),
            focus_previous: Key::with_shift(KeyCode::BackTab).into(),
            activate: KeyBinding::multiple(vec![
                Key::new(KeyCode::Enter),
                Key::new(KeyCode::Char(' ')),
            ]),
            dismiss: Key::new(KeyCode::Esc).into(),
        }
    }
}
