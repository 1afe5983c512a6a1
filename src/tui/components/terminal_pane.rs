use crate::app::{AppState, FocusPanel, InputMode};
use crate::tui::utils::{cursor_info, render_cursor, screen_to_lines};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;
    let hint_style = Style::default().fg(theme.muted());

    let Some(project) = state.workspace.active_project() else {
        let key = state.keybindings.key_for("add_project").unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(" No project open."),
            Line::from(format!(" Press {} and enter a directory to add one.", key)),
        ];
        frame.render_widget(Paragraph::new(text).style(hint_style), area);
        return;
    };

    let Some(tab) = project.active_subtab() else {
        let key = state.keybindings.key_for("new_tab").unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(format!(" {} has no open tabs.", project.name)),
            Line::from(format!(" Press {} to open one in {}.", key, project.display_path())),
        ];
        frame.render_widget(Paragraph::new(text).style(hint_style), area);
        return;
    };

    let Some(terminal) = tab.terminal.as_ref() else {
        let text = vec![
            Line::from(""),
            Line::from(format!(" The shell for \"{}\" could not be started.", tab.name)),
            Line::from(" See the log in the data directory for details."),
        ];
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(theme.error()))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    };

    let screen = terminal.screen();
    frame.render_widget(Paragraph::new(screen_to_lines(screen, theme)), area);

    if state.ui.focus == FocusPanel::Terminal && state.ui.input_mode == InputMode::Normal {
        render_cursor(frame, area, cursor_info(screen));
    }
}
