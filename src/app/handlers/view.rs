use crate::app::{Action, AppState, FocusPanel};
use crate::persistence::CursorShape;
use crate::tui::theme::save_theme;
use anyhow::Result;

pub fn handle_view_action(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::ToggleFocus => {
            state.ui.focus = match state.ui.focus {
                FocusPanel::Sidebar => FocusPanel::Terminal,
                FocusPanel::Terminal if !state.ui.zoomed => {
                    state.sync_sidebar_to_active();
                    FocusPanel::Sidebar
                }
                FocusPanel::Terminal => FocusPanel::Terminal,
            };
        }
        Action::ToggleZoom => {
            state.ui.zoomed = !state.ui.zoomed;
            if state.ui.zoomed {
                state.ui.focus = FocusPanel::Terminal;
            }
            state.save_window_geometry();
        }
        Action::CycleTheme => {
            state.theme = state.theme.next();
            if let Err(e) = save_theme(state.workspace.data_dir(), state.theme) {
                tracing::warn!(event = "theme.save_failed", error = %e, error_code = e.error_code());
            }
            state.set_status(format!("Theme: {}", state.theme.name));
        }
        Action::CycleCursorShape => {
            let next = next_cursor_shape(state.overrides.cursor_shape);
            state.overrides.cursor_shape = next;
            state.save_overrides();
            let label = match next {
                None => "theme default",
                Some(CursorShape::Block) => "block",
                Some(CursorShape::IBeam) => "bar",
                Some(CursorShape::Underline) => "underline",
            };
            state.set_status(format!("Cursor: {}", label));
        }
        _ => {}
    }
    Ok(())
}

/// Inherit -> Block -> IBeam -> Underline -> Inherit
fn next_cursor_shape(shape: Option<CursorShape>) -> Option<CursorShape> {
    match shape {
        None => Some(CursorShape::Block),
        Some(CursorShape::Block) => Some(CursorShape::IBeam),
        Some(CursorShape::IBeam) => Some(CursorShape::Underline),
        Some(CursorShape::Underline) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{AppearanceOverrides, SETTINGS_FILE, THEME_FILE};
    use crate::app::state::testing::test_app;

    #[test]
    fn theme_choice_is_persisted() {
        let mut app = test_app();
        let before = app.state.theme.name;

        handle_view_action(&mut app.state, Action::CycleTheme).unwrap();

        assert_ne!(app.state.theme.name, before);
        let saved = std::fs::read_to_string(app.state.workspace.data_dir().file(THEME_FILE)).unwrap();
        assert_eq!(saved.trim(), app.state.theme.name);
    }

    #[test]
    fn cursor_shape_cycles_back_to_inherit() {
        let mut app = test_app();
        let path = app.state.workspace.data_dir().file(SETTINGS_FILE);

        handle_view_action(&mut app.state, Action::CycleCursorShape).unwrap();
        assert_eq!(
            AppearanceOverrides::load(&path).unwrap().cursor_shape,
            Some(CursorShape::Block)
        );

        for _ in 0..3 {
            handle_view_action(&mut app.state, Action::CycleCursorShape).unwrap();
        }
        assert_eq!(app.state.overrides.cursor_shape, None);
        assert_eq!(AppearanceOverrides::load(&path).unwrap().cursor_shape, None);
    }

    #[test]
    fn zoom_keeps_focus_on_terminal() {
        let mut app = test_app();
        handle_view_action(&mut app.state, Action::ToggleZoom).unwrap();
        handle_view_action(&mut app.state, Action::ToggleFocus).unwrap();
        assert_eq!(app.state.ui.focus, FocusPanel::Terminal);

        handle_view_action(&mut app.state, Action::ToggleZoom).unwrap();
        handle_view_action(&mut app.state, Action::ToggleFocus).unwrap();
        assert_eq!(app.state.ui.focus, FocusPanel::Sidebar);
    }
}
