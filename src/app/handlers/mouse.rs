use crate::app::{Action, AppState, FocusPanel, InputMode};
use crate::workspace::drag::{DragRelease, PressTarget};
use anyhow::Result;

use super::subtab::handle_subtab_action;

pub fn handle_mouse_action(state: &mut AppState, action: Action) -> Result<()> {
    if state.ui.input_mode != InputMode::Normal {
        return Ok(());
    }

    match action {
        Action::MouseDown(x, y) => {
            if state.ui.is_new_tab_button(x, y) {
                return handle_subtab_action(state, Action::NewSubTab);
            }

            match state.ui.tab_target(x, y) {
                PressTarget::CloseButton(id) => {
                    return handle_subtab_action(state, Action::CloseSubTab(id));
                }
                target @ PressTarget::Tab(_) => {
                    let strip = state.ui.tab_strip();
                    state.ui.tab_drag.press(strip, target, f64::from(x));
                    state.ui.focus = FocusPanel::Terminal;
                    return Ok(());
                }
                PressTarget::Outside => {}
            }

            if let Some(id) = state.ui.project_at(x, y) {
                state.ui.focus = FocusPanel::Sidebar;
                if state.workspace.select_project(id) {
                    state.sync_sidebar_to_active();
                }
            } else if state.ui.is_in_terminal(x, y) {
                state.ui.focus = FocusPanel::Terminal;
            }
        }
        Action::MouseDrag(x, _) => {
            state.ui.tab_drag.motion(f64::from(x));
        }
        Action::MouseUp(..) => match state.ui.tab_drag.release() {
            DragRelease::Ignored => {}
            DragRelease::Click(id) => {
                state.workspace.select_subtab(id);
            }
            DragRelease::Reordered(order) => {
                state.workspace.apply_subtab_order(&order);
            }
        },
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::testing::test_app;
    use crate::app::TabRegion;
    use crate::models::TerminalId;
    use std::path::PathBuf;

    /// Lay tabs out the way the tab strip draws them: 10 cells each from
    /// column 20 on row 1, close button on the second to last cell.
    fn layout_tabs(state: &mut AppState) -> Vec<TerminalId> {
        let ids: Vec<TerminalId> = state
            .workspace
            .active_project()
            .unwrap()
            .tabs()
            .iter()
            .map(|t| t.id)
            .collect();
        state.ui.tab_row = Some(1);
        state.ui.tab_regions = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let x = 20 + 10 * i as u16;
                TabRegion {
                    id: *id,
                    x,
                    width: 10,
                    close_x: x + 8,
                }
            })
            .collect();
        state.ui.new_tab_button = Some((20 + 10 * ids.len() as u16, 3));
        ids
    }

    fn project_with_three_tabs() -> crate::app::state::testing::TestApp {
        let mut app = test_app();
        app.state.workspace.add_project("a".into(), PathBuf::from("/a"));
        app.state.workspace.add_subtab();
        app.state.workspace.add_subtab();
        app
    }

    fn tab_order(state: &AppState) -> Vec<TerminalId> {
        state
            .workspace
            .active_project()
            .unwrap()
            .tabs()
            .iter()
            .map(|t| t.id)
            .collect()
    }

    #[test]
    fn click_selects_tab() {
        let mut app = project_with_three_tabs();
        let ids = layout_tabs(&mut app.state);

        handle_mouse_action(&mut app.state, Action::MouseDown(22, 1)).unwrap();
        handle_mouse_action(&mut app.state, Action::MouseDrag(24, 1)).unwrap();
        handle_mouse_action(&mut app.state, Action::MouseUp(24, 1)).unwrap();

        assert_eq!(app.state.active_terminal_id(), Some(ids[0]));
        assert_eq!(tab_order(&app.state), ids);
    }

    #[test]
    fn drag_past_neighbour_midpoint_reorders() {
        let mut app = project_with_three_tabs();
        let ids = layout_tabs(&mut app.state);

        handle_mouse_action(&mut app.state, Action::MouseDown(22, 1)).unwrap();
        handle_mouse_action(&mut app.state, Action::MouseDrag(36, 1)).unwrap();
        assert_eq!(app.state.ui.dragged_tab(), Some(ids[0]));
        handle_mouse_action(&mut app.state, Action::MouseUp(36, 1)).unwrap();

        assert_eq!(tab_order(&app.state), vec![ids[1], ids[0], ids[2]]);
        assert_eq!(app.state.active_terminal_id(), Some(ids[2]));
        assert!(app.state.ui.dragged_tab().is_none());
    }

    #[test]
    fn close_button_closes_without_dragging() {
        let mut app = project_with_three_tabs();
        let ids = layout_tabs(&mut app.state);

        handle_mouse_action(&mut app.state, Action::MouseDown(38, 1)).unwrap();
        handle_mouse_action(&mut app.state, Action::MouseDrag(10, 1)).unwrap();
        handle_mouse_action(&mut app.state, Action::MouseUp(10, 1)).unwrap();

        assert_eq!(tab_order(&app.state), vec![ids[0], ids[2]]);
    }

    #[test]
    fn plus_button_opens_a_tab() {
        let mut app = project_with_three_tabs();
        layout_tabs(&mut app.state);

        handle_mouse_action(&mut app.state, Action::MouseDown(51, 1)).unwrap();

        assert_eq!(app.state.workspace.active_project().unwrap().tab_count(), 4);
    }

    #[test]
    fn sidebar_click_selects_project() {
        let mut app = test_app();
        let first = app.state.workspace.add_project("a".into(), PathBuf::from("/a"));
        let second = app.state.workspace.add_project("b".into(), PathBuf::from("/b"));
        app.state.ui.sidebar_area = Some((0, 0, 20, 10));
        app.state.ui.sidebar_rows = vec![(2, first), (3, second)];

        handle_mouse_action(&mut app.state, Action::MouseDown(4, 2)).unwrap();

        assert_eq!(app.state.workspace.active_project_id(), Some(first));
        assert_eq!(app.state.ui.focus, FocusPanel::Sidebar);
        assert_eq!(app.state.ui.sidebar_selected, 0);
    }

    #[test]
    fn mouse_is_ignored_while_a_dialog_is_open() {
        let mut app = project_with_three_tabs();
        layout_tabs(&mut app.state);
        app.state.ui.input_mode = InputMode::Help;

        handle_mouse_action(&mut app.state, Action::MouseDown(51, 1)).unwrap();

        assert_eq!(app.state.workspace.active_project().unwrap().tab_count(), 3);
    }
}
