use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::AppConfig;

const CONFIG_DIR: &str = "dialoghost";
const CONFIG_FILE: &str = "config.toml";

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the configuration from `path`, or from the default location when no
/// path is given. A missing file yields the defaults.
pub fn load(path: Option<&Path>) -> color_eyre::Result<AppConfig> {
    let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
        debug!("No config directory found, using defaults");
        return Ok(AppConfig::default());
    };

    if !path.exists() {
        debug!("Config file not found at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config = parse(&content)?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}

pub fn parse(content: &str) -> color_eyre::Result<AppConfig> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.theme.name, "Catppuccin Mocha");
        assert_eq!(config.keybindings.dialog.dismiss.display(), "Esc");
    }

    #[test]
    fn test_partial_override() {
        let config = parse(
            r#"
            [theme]
            name = "Catppuccin Latte"

            [keybindings.dialog]
            dismiss = ["esc", "ctrl+w"]
            "#,
        )
        .unwrap();

        assert_eq!(config.theme.name, "Catppuccin Latte");
        let ctrl_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert!(config.keybindings.dialog.dismiss.matches(&ctrl_w));
        // untouched sections keep their defaults
        assert_eq!(config.keybindings.dialog.focus_next.display(), "Tab");
        assert_eq!(config.keybindings.global.quit.display(), "q");
    }

    #[test]
    fn test_bad_key_is_reported() {
        assert!(parse("[keybindings.global]\nquit = \"hyper+q\"").is_err());
        assert!(parse("[keybindings.dialog]\nactivate = [\"enter\", \"nope\"]").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load(Some(Path::new("/nonexistent/dialoghost/config.toml"))).unwrap();
        assert_eq!(config.keybindings.global.open_confirm.display(), "d");
    }
}
