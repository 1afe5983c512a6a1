use crate::app::{AppState, InputMode};
use crate::tui::components::{help_popup, input_dialog, sidebar, status_bar, tab_strip, terminal_pane};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

const SIDEBAR_WIDTH: u16 = 28;

fn as_area(rect: Rect) -> (u16, u16, u16, u16) {
    (rect.x, rect.y, rect.width, rect.height)
}

/// Draw the whole screen and record the hit regions mouse handling uses.
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let full = frame.area();
    state.screen_size = (full.width, full.height);

    // Translucent windows show the host terminal's background instead
    let mut base = Style::default().fg(state.theme.fg());
    if state.overrides.opacity >= 1.0 {
        base = base.bg(state.theme.bg());
    }
    frame.render_widget(Block::default().style(base), full);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(full);
    let main_area = chunks[0];
    let status_area = chunks[1];

    let right_panel = if state.ui.zoomed {
        state.ui.sidebar_area = None;
        state.ui.sidebar_rows.clear();
        main_area
    } else {
        let sidebar_width = SIDEBAR_WIDTH.min(main_area.width / 3);
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
            .split(main_area);
        let sidebar_area = horizontal[0];
        state.ui.sidebar_area = Some(as_area(sidebar_area));
        state.ui.sidebar_rows = sidebar::render(frame, sidebar_area, state);
        horizontal[1]
    };

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab strip
            Constraint::Min(1),    // Terminal
        ])
        .split(right_panel);
    let strip_area = right[0];
    let terminal_area = right[1];

    let strip = tab_strip::render(frame, strip_area, state);
    state.ui.tab_row = Some(strip_area.y);
    state.ui.tab_regions = strip.regions;
    state.ui.new_tab_button = strip.new_tab_button;

    state.ui.terminal_area = Some(as_area(terminal_area));
    terminal_pane::render(frame, terminal_area, state);

    status_bar::render(frame, status_area, state);

    match state.ui.input_mode {
        InputMode::Help => help_popup::render(frame, state),
        InputMode::AddProject | InputMode::RenameSubTab(_) => input_dialog::render(frame, state),
        InputMode::Normal => {}
    }
}
