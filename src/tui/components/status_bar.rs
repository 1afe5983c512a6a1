use crate::app::{AppState, FocusPanel, InputMode};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;
    let bar_style = Style::default().bg(theme.selection_bg()).fg(theme.fg());
    let hint_style = Style::default().fg(theme.muted());

    let badge = |label: &str, color: Color| {
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(theme.bg())
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
    };

    let (left, right): (Vec<Span>, Vec<Span>) = if let Some(pending) = &state.ui.pending_remove {
        (
            vec![
                badge("REMOVE?", theme.error()),
                Span::raw(" "),
                Span::styled(
                    format!("Remove project \"{}\" and close its tabs?", pending.name),
                    Style::default().fg(theme.error()).add_modifier(Modifier::BOLD),
                ),
            ],
            vec![Span::styled("[y] to confirm, any other key to cancel", hint_style)],
        )
    } else {
        match state.ui.input_mode {
            InputMode::Help => (
                vec![badge("HELP", theme.warning())],
                vec![Span::styled("Esc or ? to close", hint_style)],
            ),
            InputMode::AddProject => (
                vec![badge("ADD PROJECT", theme.highlight())],
                vec![Span::styled("Enter to add, Esc to cancel", hint_style)],
            ),
            InputMode::RenameSubTab(_) => (
                vec![badge("RENAME", theme.highlight())],
                vec![Span::styled("Enter to rename, Esc to cancel", hint_style)],
            ),
            InputMode::Normal => normal_segments(state, badge),
        }
    };

    let left_len: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let right_len: usize = right.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(left_len + right_len + 1);

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.extend(right);
    spans.push(Span::raw(" "));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);
}

fn normal_segments<'a>(
    state: &'a AppState,
    badge: impl Fn(&str, Color) -> Span<'static>,
) -> (Vec<Span<'a>>, Vec<Span<'a>>) {
    let theme = state.theme;
    let mut left = vec![match state.ui.focus {
        FocusPanel::Sidebar => badge("PROJECTS", theme.accent()),
        FocusPanel::Terminal => badge("TERMINAL", theme.accent()),
    }];
    if state.ui.zoomed {
        left.push(badge("ZOOM", theme.warning()));
    }

    if let Some(message) = &state.ui.status_message {
        left.push(Span::raw(" "));
        left.push(Span::styled(message.as_str(), Style::default().fg(theme.warning())));
    } else if let Some(project) = state.workspace.active_project() {
        left.push(Span::raw(" "));
        left.push(Span::styled(project.name.as_str(), Style::default().add_modifier(Modifier::BOLD)));
        left.push(Span::styled(
            format!("  {}", project.display_path()),
            Style::default().fg(theme.muted()),
        ));
    }

    let help = state.keybindings.key_for("help").unwrap_or_else(|| "F1".to_string());
    let right = vec![Span::styled(
        format!("{}  {} help", theme.name, help),
        Style::default().fg(theme.muted()),
    )];
    (left, right)
}
