use crate::app::{AppState, FocusPanel};
use crate::config::load_keybindings;
use crate::persistence::DataDir;
use crate::pty::PtyManager;
use crate::tui;
use crate::tui::event::EventHandler;
use crate::workspace::Workspace;
use anyhow::Result;

use super::handler::process_action;

pub async fn run_tui(data_dir: DataDir) -> Result<()> {
    let mut terminal = tui::init()?;

    let size = terminal.size()?;
    let events = EventHandler::new();

    // Terminals start at the host size; the first draw narrows them to the pane
    let pty_manager = PtyManager::new(events.pty_sender(), size.height, size.width);
    let keybindings = load_keybindings(&data_dir);
    let workspace = Workspace::open(data_dir, Box::new(pty_manager));

    let mut state = AppState::new(workspace, keybindings);
    state.screen_size = (size.width, size.height);
    if state.workspace.projects().is_empty() {
        state.ui.focus = FocusPanel::Sidebar;
    }

    // Only the project that was active last time gets its shells back now
    state.workspace.activate_restored();
    state.sync_sidebar_to_active();

    let result = run_main_loop(&mut terminal, &mut state, events).await;

    state.save_window_geometry();
    state.workspace.shutdown();

    tui::restore()?;

    result
}

async fn run_main_loop(
    terminal: &mut tui::Terminal,
    state: &mut AppState,
    mut events: EventHandler,
) -> Result<()> {
    let mut applied_cursor = None;

    loop {
        terminal.draw(|frame| tui::ui::draw(frame, state))?;
        state.sync_pty_size();

        // Sync host cursor with the appearance overrides
        let cursor = tui::effective_cursor(&state.overrides);
        if applied_cursor != Some(cursor) {
            if let Err(e) = tui::apply_cursor_style(tui::cursor_style(cursor)) {
                tracing::debug!(event = "ui.cursor_style_failed", error = %e);
            }
            applied_cursor = Some(cursor);
        }

        let action = events.next(state).await?;
        process_action(state, action)?;

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
