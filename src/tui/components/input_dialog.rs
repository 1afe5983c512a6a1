use crate::app::{AppState, InputMode};
use crate::tui::components::centered_rect_fixed;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// One-line text prompt for adding a project or renaming a tab.
pub fn render(frame: &mut Frame, state: &AppState) {
    let theme = state.theme;
    let (title, prompt) = match state.ui.input_mode {
        InputMode::AddProject => (" Add Project ", "Directory:"),
        InputMode::RenameSubTab(_) => (" Rename Tab ", "Name:"),
        InputMode::Normal | InputMode::Help => return,
    };

    let area = centered_rect_fixed(60, 5, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight()))
        .style(Style::default().bg(theme.bg()).fg(theme.fg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled(prompt, Style::default().fg(theme.muted()))),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent())),
            Span::styled(
                state.ui.input_buffer.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);

    // Keep the caret at the end of the input, clipped to the box
    let caret = 2 + state.ui.input_buffer.chars().count() as u16;
    let x = inner.x + caret.min(inner.width.saturating_sub(1));
    frame.set_cursor_position((x, inner.y + 1));
}
