use crate::app::{Action, AppState};
use crate::workspace::CloseOutcome;
use anyhow::Result;

use super::handlers::input::handle_input_action;
use super::handlers::mouse::handle_mouse_action;
use super::handlers::project::handle_project_action;
use super::handlers::subtab::handle_subtab_action;
use super::handlers::view::handle_view_action;

const SCROLL_LINES: isize = 3;

pub fn process_action(state: &mut AppState, action: Action) -> Result<()> {
    if action.is_user_input() {
        state.ui.status_message = None;
    }

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::Tick => {}
        Action::Resize(w, h) => {
            state.screen_size = (w, h);
        }

        Action::SelectProject(_)
        | Action::NextProject
        | Action::PrevProject
        | Action::MoveSidebarUp
        | Action::MoveSidebarDown
        | Action::ActivateSidebarSelection
        | Action::EnterAddProjectMode
        | Action::AddProject(_)
        | Action::InitiateRemoveProject
        | Action::ConfirmRemoveProject
        | Action::CancelPending
        | Action::CycleSortMode => handle_project_action(state, action)?,

        Action::NewSubTab
        | Action::CloseActiveSubTab
        | Action::CloseSubTab(_)
        | Action::SelectSubTab(_)
        | Action::NextSubTab
        | Action::PrevSubTab
        | Action::MoveSubTabLeft
        | Action::MoveSubTabRight
        | Action::EnterRenameMode
        | Action::RenameSubTab(..) => handle_subtab_action(state, action)?,

        Action::MouseDown(..) | Action::MouseDrag(..) | Action::MouseUp(..) => {
            handle_mouse_action(state, action)?
        }

        Action::ToggleFocus
        | Action::ToggleZoom
        | Action::CycleTheme
        | Action::CycleCursorShape => handle_view_action(state, action)?,

        Action::EnterHelpMode
        | Action::ExitMode
        | Action::InputChar(_)
        | Action::InputBackspace => handle_input_action(state, action)?,

        // Terminal I/O
        Action::SendInput(data) => {
            state.workspace.send_input(&data);
        }
        Action::Paste(text) => {
            let bracketed = state
                .workspace
                .active_project()
                .and_then(|p| p.active_subtab())
                .and_then(|t| t.terminal.as_ref())
                .is_some_and(|t| t.screen().bracketed_paste());
            if bracketed {
                let mut data = Vec::with_capacity(text.len() + 12);
                data.extend_from_slice(b"\x1b[200~");
                data.extend_from_slice(text.as_bytes());
                data.extend_from_slice(b"\x1b[201~");
                state.workspace.send_input(&data);
            } else {
                state.workspace.send_input(text.as_bytes());
            }
        }
        Action::PtyOutput(id, data) => {
            state.workspace.handle_output(id, &data);
        }
        Action::TerminalExited(id, code) => {
            if let CloseOutcome::Closed { emptied: true } = state.workspace.handle_exit(id, code) {
                state.set_status("Last tab closed. Press Alt-t for a new one");
            }
        }
        Action::ScrollUp => {
            state.workspace.scroll_active(SCROLL_LINES);
        }
        Action::ScrollDown => {
            state.workspace.scroll_active(-SCROLL_LINES);
        }
    }

    Ok(())
}
