use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub const fn with_ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub const fn with_shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        match (self.code, event.code) {
            // Terminals disagree on whether Shift is reported with uppercase
            // characters and with BackTab, so Shift never decides a match here.
            (KeyCode::Char(a), KeyCode::Char(b)) => {
                // "shift+d" stands for the "D" a Shift+D press reports.
                let a = if self.modifiers.contains(KeyModifiers::SHIFT) {
                    a.to_ascii_uppercase()
                } else {
                    a
                };
                a == b && without_shift(self.modifiers) == without_shift(event.modifiers)
            }
            (KeyCode::BackTab, KeyCode::BackTab) => {
                without_shift(self.modifiers) == without_shift(event.modifiers)
            }
            _ => self.code == event.code && self.modifiers == event.modifiers,
        }
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) || self.code == KeyCode::BackTab {
            parts.push("shift".to_string());
        }

        let key_str = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };

        parts.push(key_str);
        parts.join("+")
    }
}

const fn without_shift(modifiers: KeyModifiers) -> KeyModifiers {
    modifiers.difference(KeyModifiers::SHIFT)
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (modifier_parts, key_part) = match s.rsplit_once('+') {
            // "+" on its own, or a trailing "ctrl++"
            Some((rest, "")) => (rest.strip_suffix('+').unwrap_or(rest), "+"),
            Some((rest, key)) => (rest, key),
            None => ("", s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in modifier_parts.split('+').filter(|part| !part.is_empty()) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(format!("Unknown modifier: {part}")),
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "backtab" => {
                modifiers |= KeyModifiers::SHIFT;
                KeyCode::BackTab
            }
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => {
                let num: u8 = lower[1..]
                    .parse()
                    .map_err(|_| format!("Invalid function key: {key_part}"))?;
                KeyCode::F(num)
            }
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if modifiers.contains(KeyModifiers::SHIFT) => {
                        KeyCode::Char(c.to_ascii_uppercase())
                    }
                    // Keep the case the user wrote
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(format!("Unknown key: {key_part}")),
                }
            }
        };

        Ok(Self { code, modifiers })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.display())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// One key or a list of alternatives bound to the same action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyBinding {
    Single(Key),
    Multiple(Vec<Key>),
}

impl KeyBinding {
    pub const fn multiple(keys: Vec<Key>) -> Self {
        Self::Multiple(keys)
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        match self {
            Self::Single(key) => key.matches(event),
            Self::Multiple(keys) => keys.iter().any(|k| k.matches(event)),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Single(key) => key.display(),
            Self::Multiple(keys) => keys.iter().map(Key::display).collect::<Vec<_>>().join("/"),
        }
    }
}

impl From<Key> for KeyBinding {
    fn from(key: Key) -> Self {
        Self::Single(key)
    }
}
