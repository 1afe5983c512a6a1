use crate::app::{Action, AppState, FocusPanel, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;

use super::EventHandler;

impl EventHandler {
    pub(super) fn handle_key_event(&self, key: KeyEvent, state: &AppState) -> Action {
        key_action(key, state)
    }
}

/// Translate a key press into an action for the current mode and focus.
pub(super) fn key_action(key: KeyEvent, state: &AppState) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Tick;
    }

    // A pending removal swallows the next key
    if state.ui.pending_remove.is_some() {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmRemoveProject,
            _ => Action::CancelPending,
        };
    }

    match state.ui.input_mode {
        InputMode::Help => {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
                    Action::ExitMode
                }
                KeyCode::F(1) => Action::ExitMode,
                _ => Action::Tick,
            };
        }
        InputMode::AddProject => {
            return match key.code {
                KeyCode::Esc => Action::ExitMode,
                KeyCode::Enter => {
                    let raw = state.ui.input_buffer.trim();
                    if raw.is_empty() {
                        Action::Tick
                    } else {
                        Action::AddProject(PathBuf::from(raw))
                    }
                }
                KeyCode::Backspace => Action::InputBackspace,
                KeyCode::Char(c) => Action::InputChar(c),
                _ => Action::Tick,
            };
        }
        InputMode::RenameSubTab(id) => {
            return match key.code {
                KeyCode::Esc => Action::ExitMode,
                KeyCode::Enter => Action::RenameSubTab(id, state.ui.input_buffer.clone()),
                KeyCode::Backspace => Action::InputBackspace,
                KeyCode::Char(c) => Action::InputChar(c),
                _ => Action::Tick,
            };
        }
        InputMode::Normal => {}
    }

    if let Some(action) = state.keybindings.lookup(&key, state.ui.focus) {
        return action;
    }

    match state.ui.focus {
        FocusPanel::Sidebar => Action::Tick,
        FocusPanel::Terminal => key_to_bytes(&key)
            .map(Action::SendInput)
            .unwrap_or(Action::Tick),
    }
}

/// Bytes a terminal expects for a key press, or `None` for keys with no
/// encoding.
pub fn key_to_bytes(key: &KeyEvent) -> Option<Vec<u8>> {
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let bytes = match key.code {
        KeyCode::Char(c) if ctrl && c.is_ascii() => {
            let control = (c.to_ascii_lowercase() as u8) & 0x1f;
            if alt {
                vec![0x1b, control]
            } else {
                vec![control]
            }
        }
        KeyCode::Char(c) => {
            let mut buf = [0u8; 4];
            let encoded = c.encode_utf8(&mut buf).as_bytes();
            if alt {
                let mut data = vec![0x1b];
                data.extend_from_slice(encoded);
                data
            } else {
                encoded.to_vec()
            }
        }
        KeyCode::Enter => vec![b'\r'],
        KeyCode::Esc => vec![0x1b],
        KeyCode::Tab => vec![b'\t'],
        KeyCode::BackTab => b"\x1b[Z".to_vec(),
        KeyCode::Backspace if alt => vec![0x1b, 0x7f],
        KeyCode::Backspace => vec![0x7f],
        KeyCode::Delete => b"\x1b[3~".to_vec(),
        KeyCode::Insert => b"\x1b[2~".to_vec(),
        KeyCode::Up => cursor_key(b'A', key.modifiers),
        KeyCode::Down => cursor_key(b'B', key.modifiers),
        KeyCode::Right => cursor_key(b'C', key.modifiers),
        KeyCode::Left => cursor_key(b'D', key.modifiers),
        KeyCode::Home => cursor_key(b'H', key.modifiers),
        KeyCode::End => cursor_key(b'F', key.modifiers),
        KeyCode::PageUp => b"\x1b[5~".to_vec(),
        KeyCode::PageDown => b"\x1b[6~".to_vec(),
        KeyCode::F(n) => match n {
            1 => b"\x1bOP".to_vec(),
            2 => b"\x1bOQ".to_vec(),
            3 => b"\x1bOR".to_vec(),
            4 => b"\x1bOS".to_vec(),
            5 => b"\x1b[15~".to_vec(),
            6 => b"\x1b[17~".to_vec(),
            7 => b"\x1b[18~".to_vec(),
            8 => b"\x1b[19~".to_vec(),
            9 => b"\x1b[20~".to_vec(),
            10 => b"\x1b[21~".to_vec(),
            11 => b"\x1b[23~".to_vec(),
            12 => b"\x1b[24~".to_vec(),
            _ => return None,
        },
        _ => return None,
    };
    Some(bytes)
}

/// CSI cursor key with the xterm modifier parameter when modified.
fn cursor_key(final_byte: u8, modifiers: KeyModifiers) -> Vec<u8> {
    let mut param = 1;
    if modifiers.contains(KeyModifiers::SHIFT) {
        param += 1;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        param += 2;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        param += 4;
    }
    if param == 1 {
        vec![0x1b, b'[', final_byte]
    } else {
        format!("\x1b[1;{}{}", param, final_byte as char).into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::test_app;
    use crate::app::PendingRemove;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_and_alt_encodings() {
        assert_eq!(key_to_bytes(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(vec![0x03]));
        assert_eq!(key_to_bytes(&press(KeyCode::Char('b'), KeyModifiers::ALT)), Some(vec![0x1b, b'b']));
        assert_eq!(key_to_bytes(&press(KeyCode::Char('é'), KeyModifiers::NONE)), Some("é".as_bytes().to_vec()));
        assert_eq!(key_to_bytes(&press(KeyCode::Up, KeyModifiers::NONE)), Some(b"\x1b[A".to_vec()));
        assert_eq!(key_to_bytes(&press(KeyCode::Left, KeyModifiers::CONTROL)), Some(b"\x1b[1;5D".to_vec()));
        assert_eq!(key_to_bytes(&press(KeyCode::F(13), KeyModifiers::NONE)), None);
    }

    #[test]
    fn unbound_keys_go_to_the_terminal() {
        let app = test_app();
        let action = key_action(press(KeyCode::Char('l'), KeyModifiers::NONE), &app.state);
        assert!(matches!(action, Action::SendInput(data) if data == b"l"));
    }

    #[test]
    fn bound_keys_win_over_the_terminal() {
        let app = test_app();
        let action = key_action(press(KeyCode::Char('t'), KeyModifiers::ALT), &app.state);
        assert!(matches!(action, Action::NewSubTab));
    }

    #[test]
    fn sidebar_swallows_unbound_keys() {
        let mut app = test_app();
        app.state.ui.focus = FocusPanel::Sidebar;
        let action = key_action(press(KeyCode::Char('x'), KeyModifiers::NONE), &app.state);
        assert!(matches!(action, Action::Tick));
    }

    #[test]
    fn rename_dialog_confirms_with_its_own_tab_id() {
        let mut app = test_app();
        let id = uuid::Uuid::new_v4();
        app.state.ui.input_mode = InputMode::RenameSubTab(id);
        app.state.ui.input_buffer = "logs".into();

        let action = key_action(press(KeyCode::Enter, KeyModifiers::NONE), &app.state);

        assert!(matches!(action, Action::RenameSubTab(target, name) if target == id && name == "logs"));
    }

    #[test]
    fn remove_prompt_takes_yes_or_anything_else() {
        let mut app = test_app();
        app.state.ui.pending_remove = Some(PendingRemove {
            project: 0,
            name: "web".into(),
        });
        let yes = key_action(press(KeyCode::Char('y'), KeyModifiers::NONE), &app.state);
        let no = key_action(press(KeyCode::Char('n'), KeyModifiers::NONE), &app.state);
        assert!(matches!(yes, Action::ConfirmRemoveProject));
        assert!(matches!(no, Action::CancelPending));
    }
}
