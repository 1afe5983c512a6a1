use crate::app::{AppState, FocusPanel};
use crate::models::{Project, ProjectId};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the project list in display order. Returns the screen row of every
/// visible project so clicks can be resolved by id.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) -> Vec<(u16, ProjectId)> {
    let theme = state.theme;
    let is_focused = state.ui.focus == FocusPanel::Sidebar;
    let border_style = if is_focused {
        Style::default().fg(theme.accent())
    } else {
        Style::default().fg(theme.muted())
    };

    let block = Block::default()
        .title(format!(" Projects ({}) ", state.workspace.projects().len()))
        .title_bottom(Line::from(format!(" {} ", state.workspace.sort_mode().label())).right_aligned())
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let order = state.sidebar_order();
    if order.is_empty() {
        let hint = state
            .keybindings
            .key_for("add_project")
            .map(|k| format!("{} to add one", k))
            .unwrap_or_default();
        let empty = Paragraph::new(vec![
            Line::from(Span::styled("No projects", Style::default().fg(theme.muted()))),
            Line::from(Span::styled(hint, Style::default().fg(theme.muted()))),
        ]);
        frame.render_widget(empty, inner);
        return Vec::new();
    }

    // Keep the cursor row on screen
    let height = inner.height as usize;
    let offset = state.ui.sidebar_selected.saturating_sub(height.saturating_sub(1));

    let mut rows = Vec::new();
    for (visual, id) in order.iter().enumerate().skip(offset).take(height) {
        let Some(project) = state.workspace.project(*id) else {
            continue;
        };
        let y = inner.y + (visual - offset) as u16;
        let row_area = Rect::new(inner.x, y, inner.width, 1);
        let selected = is_focused && visual == state.ui.sidebar_selected;
        let active = state.workspace.active_project_id() == Some(*id);
        frame.render_widget(Paragraph::new(project_line(state, project, active, inner.width)), row_area);
        if selected {
            frame
                .buffer_mut()
                .set_style(row_area, Style::default().bg(theme.selection_bg()));
        }
        rows.push((y, *id));
    }
    rows
}

fn project_line(state: &AppState, project: &Project, active: bool, width: u16) -> Line<'static> {
    let theme = state.theme;
    let name_style = if active {
        Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg())
    };

    // Live tab count, or the number waiting to be restored
    let badge = if project.is_initialized() {
        format!(" {} ", project.tab_count())
    } else if !project.saved_tabs().is_empty() {
        format!(" {}· ", project.saved_tabs().len())
    } else {
        String::new()
    };

    let marker = if active { "▸ " } else { "  " };
    let available = (width as usize).saturating_sub(marker.chars().count() + badge.chars().count());
    let name = truncate(&project.name, available);
    let padding = available.saturating_sub(name.chars().count());

    Line::from(vec![
        Span::styled(marker, name_style),
        Span::styled(name, name_style),
        Span::raw(" ".repeat(padding)),
        Span::styled(badge, Style::default().fg(theme.muted())),
    ])
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("tabdeck", 10), "tabdeck");
        assert_eq!(truncate("tabdeck", 4), "tab…");
        assert_eq!(truncate("tabdeck", 0), "");
    }
}
