use crate::app::{Action, AppState, InputMode};
use anyhow::Result;

pub fn handle_input_action(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::EnterHelpMode => {
            state.ui.input_mode = InputMode::Help;
        }
        Action::ExitMode => {
            state.ui.input_mode = InputMode::Normal;
            state.ui.input_buffer.clear();
        }
        Action::InputChar(c) => {
            if state.ui.input_mode != InputMode::Normal {
                state.ui.input_buffer.push(c);
            }
        }
        Action::InputBackspace => {
            state.ui.input_buffer.pop();
        }
        _ => {}
    }
    Ok(())
}
