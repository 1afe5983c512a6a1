use crate::app::{Action, FocusPanel};
use crate::persistence::{DataDir, KEYBINDINGS_FILE};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default keybindings embedded at compile time
const DEFAULT_KEYBINDINGS: &str = include_str!("defaults.toml");

/// A key combination (key code + modifiers)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    /// Shift on a character key is folded into the character, so "Shift-a",
    /// "A" and a terminal reporting `A` with SHIFT all compare equal.
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        match code {
            KeyCode::Char(c) if modifiers.contains(KeyModifiers::SHIFT) => Self {
                code: KeyCode::Char(c.to_ascii_uppercase()),
                modifiers: modifiers - KeyModifiers::SHIFT,
            },
            _ => Self { code, modifiers },
        }
    }

    pub fn from_event(key: &KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }

    /// Parse a key string like "Ctrl-c", "Alt-Shift-Left", "Enter", "?"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s == "-" {
            return Some(Self::new(KeyCode::Char('-'), KeyModifiers::NONE));
        }

        let mut parts: Vec<&str> = s.split('-').collect();
        let key_str = parts.pop()?;
        let mut modifiers = KeyModifiers::NONE;
        for modifier in parts {
            match modifier.to_lowercase().as_str() {
                "ctrl" | "c" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "a" | "opt" | "option" | "meta" => modifiers |= KeyModifiers::ALT,
                "shift" | "s" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        Some(Self::new(parse_key_code(key_str)?, modifiers))
    }

    /// Convert to display string for UI
    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        parts.push(key_code_display(&self.code));
        parts.join("-")
    }
}

fn parse_key_code(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "backspace" | "bs" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "insert" | "ins" => Some(KeyCode::Insert),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "space" => Some(KeyCode::Char(' ')),
        "minus" => Some(KeyCode::Char('-')),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}

fn key_code_display(code: &KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    }
}

/// Binding target as written in the TOML file, e.g. "new_tab"
pub type ActionName = String;

/// Map a binding name to the action it triggers.
pub fn action_from_name(name: &str) -> Option<Action> {
    let action = match name {
        "quit" => Action::Quit,
        "help" => Action::EnterHelpMode,
        "new_tab" => Action::NewSubTab,
        "close_tab" => Action::CloseActiveSubTab,
        "next_tab" => Action::NextSubTab,
        "prev_tab" => Action::PrevSubTab,
        "move_tab_left" => Action::MoveSubTabLeft,
        "move_tab_right" => Action::MoveSubTabRight,
        "rename_tab" => Action::EnterRenameMode,
        "next_project" => Action::NextProject,
        "prev_project" => Action::PrevProject,
        "add_project" => Action::EnterAddProjectMode,
        "remove_project" => Action::InitiateRemoveProject,
        "cycle_sort" => Action::CycleSortMode,
        "toggle_focus" => Action::ToggleFocus,
        "toggle_zoom" => Action::ToggleZoom,
        "cycle_theme" => Action::CycleTheme,
        "cycle_cursor" => Action::CycleCursorShape,
        "scroll_up" => Action::ScrollUp,
        "scroll_down" => Action::ScrollDown,
        "sidebar_up" => Action::MoveSidebarUp,
        "sidebar_down" => Action::MoveSidebarDown,
        "open_project" => Action::ActivateSidebarSelection,
        _ => return None,
    };
    Some(action)
}

/// Raw TOML structure for keybindings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeybindingsToml {
    #[serde(default)]
    pub global: HashMap<String, String>,
    #[serde(default)]
    pub sidebar: HashMap<String, String>,
}

/// Parsed keybinding configuration with KeyCombo lookups
#[derive(Debug, Clone)]
pub struct KeybindingConfig {
    /// Work whenever no dialog is open
    pub global: HashMap<KeyCombo, ActionName>,
    /// Only while the sidebar has focus
    pub sidebar: HashMap<KeyCombo, ActionName>,
}

impl KeybindingConfig {
    /// The built-in bindings.
    pub fn defaults() -> Self {
        Self::from_toml(DEFAULT_KEYBINDINGS).unwrap_or_else(|e| {
            tracing::error!(event = "keybindings.defaults_invalid", error = %e);
            Self {
                global: HashMap::new(),
                sidebar: HashMap::new(),
            }
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let raw: KeybindingsToml = toml::from_str(contents)?;
        Ok(Self {
            global: Self::parse_bindings(&raw.global),
            sidebar: Self::parse_bindings(&raw.sidebar),
        })
    }

    /// Unparseable keys and unknown action names are skipped with a warning.
    fn parse_bindings(raw: &HashMap<String, String>) -> HashMap<KeyCombo, ActionName> {
        raw.iter()
            .filter_map(|(key, action)| {
                let Some(combo) = KeyCombo::parse(key) else {
                    tracing::warn!(event = "keybindings.key_invalid", key = %key);
                    return None;
                };
                if action_from_name(action).is_none() {
                    tracing::warn!(event = "keybindings.action_unknown", key = %key, action = %action);
                    return None;
                }
                Some((combo, action.clone()))
            })
            .collect()
    }

    /// Resolve a key press in normal mode. Global bindings win over sidebar
    /// bindings.
    pub fn lookup(&self, key: &KeyEvent, focus: FocusPanel) -> Option<Action> {
        let combo = KeyCombo::from_event(key);
        self.global
            .get(&combo)
            .or_else(|| match focus {
                FocusPanel::Sidebar => self.sidebar.get(&combo),
                FocusPanel::Terminal => None,
            })
            .and_then(|name| action_from_name(name))
    }

    /// First key bound to `name`, for hints in the UI.
    pub fn key_for(&self, name: &str) -> Option<String> {
        let mut keys: Vec<String> = self
            .global
            .iter()
            .filter(|(_, action)| action.as_str() == name)
            .map(|(combo, _)| combo.display())
            .collect();
        keys.sort();
        keys.into_iter().next()
    }

    /// (keys, action) rows sorted by action name, for the help popup.
    pub fn help_rows(bindings: &HashMap<KeyCombo, ActionName>) -> Vec<(String, String)> {
        let mut grouped: HashMap<&str, Vec<String>> = HashMap::new();
        for (combo, action) in bindings {
            grouped.entry(action.as_str()).or_default().push(combo.display());
        }
        let mut rows: Vec<(String, String)> = grouped
            .into_iter()
            .map(|(action, mut keys)| {
                keys.sort();
                (keys.join(" / "), action.replace('_', " "))
            })
            .collect();
        rows.sort_by(|a, b| a.1.cmp(&b.1));
        rows
    }
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Load keybindings from the data directory, writing the defaults there on
/// first run. A file that fails to parse falls back to the defaults.
pub fn load_keybindings(data_dir: &DataDir) -> KeybindingConfig {
    let path = data_dir.file(KEYBINDINGS_FILE);
    if !path.exists() {
        if let Err(e) = std::fs::write(&path, DEFAULT_KEYBINDINGS) {
            tracing::warn!(event = "keybindings.write_defaults_failed", path = %path.display(), error = %e);
        }
        return KeybindingConfig::defaults();
    }
    load_from(&path)
}

fn load_from(path: &Path) -> KeybindingConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(event = "keybindings.read_failed", path = %path.display(), error = %e);
            return KeybindingConfig::defaults();
        }
    };
    KeybindingConfig::from_toml(&contents).unwrap_or_else(|e| {
        tracing::warn!(event = "keybindings.parse_failed", path = %path.display(), error = %e);
        KeybindingConfig::defaults()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_simple_key() {
        let combo = KeyCombo::parse("j").unwrap();
        assert_eq!(combo.code, KeyCode::Char('j'));
        assert_eq!(combo.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_with_modifiers() {
        let combo = KeyCombo::parse("Alt-Shift-Left").unwrap();
        assert_eq!(combo.code, KeyCode::Left);
        assert_eq!(combo.modifiers, KeyModifiers::ALT | KeyModifiers::SHIFT);
        assert!(KeyCombo::parse("Hyper-x").is_none());
    }

    #[test]
    fn test_shift_folds_into_characters() {
        assert_eq!(KeyCombo::parse("Shift-a"), KeyCombo::parse("A"));
        let event = key(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(KeyCombo::from_event(&event), KeyCombo::parse("?").unwrap());
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(KeyCombo::parse("F1").unwrap().code, KeyCode::F(1));
        assert_eq!(KeyCombo::parse("F12").unwrap().code, KeyCode::F(12));
        assert!(KeyCombo::parse("F13").is_none());
    }

    #[test]
    fn test_display() {
        let combo = KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(combo.display(), "Ctrl-q");
        let combo = KeyCombo::parse("Alt-Shift-Right").unwrap();
        assert_eq!(combo.display(), "Alt-Shift-Right");
    }

    #[test]
    fn test_defaults_cover_every_action_name() {
        let config = KeybindingConfig::defaults();
        assert!(config.global.values().all(|name| action_from_name(name).is_some()));
        assert!(config.sidebar.values().all(|name| action_from_name(name).is_some()));
        assert_eq!(config.key_for("new_tab").as_deref(), Some("Alt-t"));
    }

    #[test]
    fn test_sidebar_keys_need_sidebar_focus() {
        let config = KeybindingConfig::defaults();
        let j = key(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(config.lookup(&j, FocusPanel::Terminal).is_none());
        assert!(matches!(
            config.lookup(&j, FocusPanel::Sidebar),
            Some(Action::MoveSidebarDown)
        ));
        let quit = key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(matches!(config.lookup(&quit, FocusPanel::Terminal), Some(Action::Quit)));
    }

    #[test]
    fn test_user_file_is_created_and_read_back() {
        let tmp = TempDir::new().unwrap();
        let dir = DataDir::create(tmp.path().to_path_buf(), None).unwrap();

        load_keybindings(&dir);
        assert!(dir.file(KEYBINDINGS_FILE).exists());

        std::fs::write(dir.file(KEYBINDINGS_FILE), "[global]\n\"Ctrl-n\" = \"new_tab\"\n\"Ctrl-x\" = \"explode\"\n").unwrap();
        let config = load_keybindings(&dir);
        assert_eq!(config.global.len(), 1);
        assert_eq!(config.key_for("new_tab").as_deref(), Some("Ctrl-n"));
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = DataDir::create(tmp.path().to_path_buf(), None).unwrap();
        std::fs::write(dir.file(KEYBINDINGS_FILE), "[global\n").unwrap();

        let config = load_keybindings(&dir);
        assert_eq!(config.key_for("quit").as_deref(), Some("Ctrl-q"));
    }
}
