use crate::app::AppState;
use crate::config::KeybindingConfig;
use crate::tui::components::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState) {
    let theme = state.theme;
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let heading = Style::default().fg(theme.warning()).add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(theme.accent());

    let mut help_text = vec![
        Line::from(Span::styled(
            "tabdeck - projects and terminal tabs",
            Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Everywhere", heading)),
    ];

    let sections = [
        KeybindingConfig::help_rows(&state.keybindings.global),
        KeybindingConfig::help_rows(&state.keybindings.sidebar),
    ];
    let width = sections
        .iter()
        .flatten()
        .map(|(keys, _)| keys.chars().count())
        .max()
        .unwrap_or(0);

    for (i, rows) in sections.iter().enumerate() {
        if i == 1 {
            help_text.push(Line::from(""));
            help_text.push(Line::from(Span::styled("Project list", heading)));
        }
        for (keys, action) in rows {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<width$}  ", keys, width = width), key_style),
                Span::raw(action.clone()),
            ]));
        }
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "Mouse: click a tab to select it, drag to reorder, × to close",
        Style::default().fg(theme.muted()),
    )));
    help_text.push(Line::from(Span::styled(
        "Other keys go to the terminal. Esc or ? to close",
        Style::default().fg(theme.muted()),
    )));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.warning()))
        .style(Style::default().bg(theme.bg()).fg(theme.fg()));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
