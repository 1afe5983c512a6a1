mod types;
mod ui;

pub use types::*;
pub use ui::UIState;

use crate::config::KeybindingConfig;
use crate::models::{ProjectId, TerminalId};
use crate::persistence::{AppearanceOverrides, WindowGeometry, SETTINGS_FILE, WINDOW_FILE};
use crate::tui::theme::{load_theme, ThemePreset};
use crate::workspace::Workspace;

pub struct AppState {
    pub workspace: Workspace,
    pub ui: UIState,
    pub theme: &'static ThemePreset,
    pub overrides: AppearanceOverrides,
    pub keybindings: KeybindingConfig,
    /// Host terminal size as (cols, rows)
    pub screen_size: (u16, u16),
    /// Size last pushed to the terminals as (rows, cols)
    pub pty_size: Option<(u16, u16)>,
    pub should_quit: bool,
}

impl AppState {
    /// Build the app around an opened workspace, reading the theme, the
    /// appearance overrides and the saved window state.
    pub fn new(workspace: Workspace, keybindings: KeybindingConfig) -> Self {
        let data_dir = workspace.data_dir();
        let theme = load_theme(data_dir);

        let overrides = AppearanceOverrides::load(&data_dir.file(SETTINGS_FILE)).unwrap_or_else(|e| {
            tracing::warn!(event = "settings.load_failed", error = %e);
            AppearanceOverrides::default()
        });

        let geometry = WindowGeometry::load(&data_dir.file(WINDOW_FILE)).unwrap_or_else(|e| {
            tracing::warn!(event = "window.load_failed", error = %e);
            None
        });

        let mut ui = UIState::new();
        ui.zoomed = geometry.is_some_and(|g| g.maximized);

        let mut state = Self {
            workspace,
            ui,
            theme,
            overrides,
            keybindings,
            screen_size: geometry
                .and_then(|g| Some((u16::try_from(g.width).ok()?, u16::try_from(g.height).ok()?)))
                .unwrap_or((80, 24)),
            pty_size: None,
            should_quit: false,
        };
        state.sync_sidebar_to_active();
        state
    }

    pub fn sidebar_order(&self) -> Vec<ProjectId> {
        self.workspace.display_order()
    }

    pub fn selected_sidebar_project(&self) -> Option<ProjectId> {
        self.sidebar_order().get(self.ui.sidebar_selected).copied()
    }

    /// Point the sidebar cursor at the active project.
    pub fn sync_sidebar_to_active(&mut self) {
        let order = self.sidebar_order();
        self.ui.sidebar_selected = self
            .workspace
            .active_project_id()
            .and_then(|id| order.iter().position(|p| *p == id))
            .unwrap_or(0);
    }

    pub fn move_sidebar(&mut self, delta: isize) {
        let len = self.workspace.projects().len();
        if len == 0 {
            self.ui.sidebar_selected = 0;
            return;
        }
        let next = (self.ui.sidebar_selected as isize + delta).clamp(0, len as isize - 1);
        self.ui.sidebar_selected = next as usize;
    }

    pub fn active_terminal_id(&self) -> Option<TerminalId> {
        self.workspace
            .active_project()
            .and_then(|p| p.active_subtab())
            .map(|t| t.id)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.ui.status_message = Some(message.into());
    }

    /// Rows and columns available to terminals, from the last draw.
    pub fn terminal_pane_size(&self) -> Option<(u16, u16)> {
        self.ui
            .terminal_area
            .filter(|(_, _, w, h)| *w > 0 && *h > 0)
            .map(|(_, _, w, h)| (h, w))
    }

    /// Resize every terminal when the pane size changed since last time.
    pub fn sync_pty_size(&mut self) {
        let Some(size) = self.terminal_pane_size() else {
            return;
        };
        if self.pty_size == Some(size) {
            return;
        }
        self.pty_size = Some(size);
        self.workspace.resize_terminals(size.0, size.1);
    }

    pub fn window_geometry(&self) -> WindowGeometry {
        WindowGeometry {
            width: i32::from(self.screen_size.0),
            height: i32::from(self.screen_size.1),
            maximized: self.ui.zoomed,
        }
    }

    pub fn save_window_geometry(&self) {
        let path = self.workspace.data_dir().file(WINDOW_FILE);
        if let Err(e) = self.window_geometry().save(&path) {
            tracing::warn!(event = "window.save_failed", error = %e, error_code = e.error_code());
        }
    }

    pub fn save_overrides(&self) {
        let path = self.workspace.data_dir().file(SETTINGS_FILE);
        if let Err(e) = self.overrides.save(&path) {
            tracing::warn!(event = "settings.save_failed", error = %e, error_code = e.error_code());
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::test_app;
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn sidebar_cursor_tracks_active_project_in_display_order() {
        let mut app = test_app();
        let ws = &mut app.state.workspace;
        ws.add_project("zeta".into(), PathBuf::from("/zeta"));
        let alpha = ws.add_project("alpha".into(), PathBuf::from("/alpha"));
        ws.cycle_sort_mode();

        app.state.sync_sidebar_to_active();

        assert_eq!(app.state.ui.sidebar_selected, 0);
        assert_eq!(app.state.selected_sidebar_project(), Some(alpha));
    }

    #[test]
    fn sidebar_cursor_is_clamped() {
        let mut app = test_app();
        app.state.workspace.add_project("a".into(), PathBuf::from("/a"));
        app.state.move_sidebar(5);
        assert_eq!(app.state.ui.sidebar_selected, 0);
        app.state.move_sidebar(-1);
        assert_eq!(app.state.ui.sidebar_selected, 0);
    }

    #[test]
    fn pty_size_is_pushed_once_per_change() {
        let mut app = test_app();
        app.state.workspace.add_project("a".into(), PathBuf::from("/a"));
        let id = app.state.active_terminal_id().unwrap();
        let log = app.backend.log_for(id).unwrap();

        app.state.ui.terminal_area = Some((20, 2, 100, 30));
        app.state.sync_pty_size();
        assert_eq!(log.lock().unwrap().resized, Some((30, 100)));

        log.lock().unwrap().resized = None;
        app.state.sync_pty_size();
        assert_eq!(log.lock().unwrap().resized, None);
    }

    #[test]
    fn window_state_round_trips_through_data_dir() {
        let mut app = test_app();
        app.state.screen_size = (160, 48);
        app.state.ui.zoomed = true;
        app.state.save_window_geometry();

        let dir = app.state.workspace.data_dir().clone();
        let reopened = AppState::new(
            Workspace::open(dir, Box::new(app.backend.clone())),
            KeybindingConfig::defaults(),
        );

        assert!(reopened.ui.zoomed);
        assert_eq!(reopened.screen_size, (160, 48));
    }

    #[test]
    fn oversized_window_file_falls_back_to_default_size() {
        let app = test_app();
        let dir = app.state.workspace.data_dir().clone();
        std::fs::write(dir.file(crate::persistence::WINDOW_FILE), "70000\n48\n0\n").unwrap();

        let reopened = AppState::new(
            Workspace::open(dir, Box::new(app.backend.clone())),
            KeybindingConfig::defaults(),
        );

        assert_eq!(reopened.screen_size, (80, 24));
    }
}
