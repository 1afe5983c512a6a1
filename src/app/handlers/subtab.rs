use crate::app::{Action, AppState, InputMode};
use crate::workspace::CloseOutcome;
use anyhow::Result;

pub fn handle_subtab_action(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::NewSubTab => {
            if state.workspace.add_subtab().is_none() {
                state.set_status("Add a project first");
            }
        }
        Action::CloseActiveSubTab => {
            let outcome = state.workspace.close_active_subtab();
            report_close(state, outcome);
        }
        Action::CloseSubTab(id) => {
            let outcome = state.workspace.close_subtab(id);
            report_close(state, outcome);
        }
        Action::SelectSubTab(id) => {
            state.workspace.select_subtab(id);
        }
        Action::NextSubTab => {
            state.workspace.cycle_subtab(1);
        }
        Action::PrevSubTab => {
            state.workspace.cycle_subtab(-1);
        }
        Action::MoveSubTabLeft => {
            state.workspace.move_active_subtab(-1);
        }
        Action::MoveSubTabRight => {
            state.workspace.move_active_subtab(1);
        }
        Action::EnterRenameMode => {
            let Some(tab) = state
                .workspace
                .active_project()
                .and_then(|p| p.active_subtab())
            else {
                return Ok(());
            };
            state.ui.input_buffer = tab.name.clone();
            state.ui.input_mode = InputMode::RenameSubTab(tab.id);
        }
        Action::RenameSubTab(id, name) => {
            if !state.workspace.rename_subtab(id, &name) && state.workspace.subtab(id).is_none() {
                state.set_status("That tab has closed");
            }
            state.ui.input_mode = InputMode::Normal;
            state.ui.input_buffer.clear();
        }
        _ => {}
    }
    Ok(())
}

fn report_close(state: &mut AppState, outcome: CloseOutcome) {
    if let CloseOutcome::Closed { emptied: true } = outcome {
        state.set_status("Last tab closed. Press Alt-t for a new one");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::testing::test_app;
    use std::path::PathBuf;

    #[test]
    fn new_tab_without_project_reports() {
        let mut app = test_app();
        handle_subtab_action(&mut app.state, Action::NewSubTab).unwrap();
        assert_eq!(app.backend.spawn_count(), 0);
        assert!(app.state.ui.status_message.is_some());
    }

    #[test]
    fn rename_flow_targets_the_tab_it_started_on() {
        let mut app = test_app();
        app.state.workspace.add_project("a".into(), PathBuf::from("/a"));
        let first = app.state.active_terminal_id().unwrap();

        handle_subtab_action(&mut app.state, Action::EnterRenameMode).unwrap();
        assert_eq!(app.state.ui.input_mode, InputMode::RenameSubTab(first));
        assert_eq!(app.state.ui.input_buffer, "Tab 1");

        handle_subtab_action(&mut app.state, Action::NewSubTab).unwrap();
        handle_subtab_action(&mut app.state, Action::RenameSubTab(first, " build ".into()))
            .unwrap();

        assert_eq!(app.state.workspace.subtab(first).unwrap().name, "build");
        assert_eq!(app.state.ui.input_mode, InputMode::Normal);
    }

    #[test]
    fn rename_of_closed_tab_is_dropped() {
        let mut app = test_app();
        app.state.workspace.add_project("a".into(), PathBuf::from("/a"));
        let first = app.state.active_terminal_id().unwrap();
        handle_subtab_action(&mut app.state, Action::NewSubTab).unwrap();
        handle_subtab_action(&mut app.state, Action::EnterRenameMode).unwrap();
        let second = app.state.active_terminal_id().unwrap();

        handle_subtab_action(&mut app.state, Action::CloseSubTab(second)).unwrap();
        handle_subtab_action(&mut app.state, Action::RenameSubTab(second, "x".into())).unwrap();

        assert_eq!(app.state.workspace.subtab(first).unwrap().name, "Tab 1");
        assert_eq!(app.state.ui.status_message.as_deref(), Some("That tab has closed"));
    }

    #[test]
    fn move_and_cycle_follow_active_tab() {
        let mut app = test_app();
        app.state.workspace.add_project("a".into(), PathBuf::from("/a"));
        let first = app.state.active_terminal_id().unwrap();
        handle_subtab_action(&mut app.state, Action::NewSubTab).unwrap();
        let second = app.state.active_terminal_id().unwrap();

        handle_subtab_action(&mut app.state, Action::MoveSubTabLeft).unwrap();
        let order: Vec<_> = app.state.workspace.active_project().unwrap().tabs().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![second, first]);
        assert_eq!(app.state.active_terminal_id(), Some(second));

        handle_subtab_action(&mut app.state, Action::NextSubTab).unwrap();
        assert_eq!(app.state.active_terminal_id(), Some(first));
    }
}
