use serde::{Deserialize, Serialize};

use crate::config::key::KeyBinding;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub suspend: KeyBinding,
    pub open_confirm: KeyBinding,
    pub open_bot: KeyBinding,
    pub open_update: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub focus_next: KeyBinding,
    pub focus_previous: KeyBinding,
    pub activate: KeyBinding,
    pub dismiss: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub dialog: DialogKeybindings,
}
