use crate::tui::theme::ThemePreset;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

#[derive(Clone, Copy)]
pub struct CursorInfo {
    pub row: u16,
    pub col: u16,
    pub hidden: bool,
}

/// Cursor of a screen, hidden while scrolled back.
pub fn cursor_info(screen: &vt100::Screen) -> CursorInfo {
    let (row, col) = screen.cursor_position();
    CursorInfo {
        row,
        col,
        hidden: screen.hide_cursor() || screen.scrollback() > 0,
    }
}

pub fn render_cursor(frame: &mut Frame, inner_area: Rect, cursor: CursorInfo) {
    if inner_area.width == 0 || inner_area.height == 0 || cursor.hidden {
        return;
    }
    if cursor.row >= inner_area.height {
        return;
    }
    let x = inner_area.x + cursor.col.min(inner_area.width - 1);
    let y = inner_area.y + cursor.row;
    frame.set_cursor_position((x, y));
}

/// Convert the visible screen into styled lines, mapping colors through
/// the theme.
pub fn screen_to_lines(screen: &vt100::Screen, theme: &ThemePreset) -> Vec<Line<'static>> {
    let (rows, cols) = screen.size();
    let cursor_row = screen.cursor_position().0;
    let mut lines = Vec::with_capacity(rows as usize);

    for row in 0..rows {
        let mut spans = Vec::new();
        let mut current_text = String::new();
        let mut current_style = Style::default();

        for col in 0..cols {
            let Some(cell) = screen.cell(row, col) else {
                continue;
            };
            if cell.is_wide_continuation() {
                continue;
            }

            let style = cell_style(cell, theme);
            if style != current_style && !current_text.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current_text), current_style));
            }
            current_style = style;

            // Empty cells keep column alignment for cursor-addressed programs
            let contents = cell.contents();
            if contents.is_empty() {
                current_text.push(' ');
            } else {
                current_text.push_str(&contents);
            }
        }

        if !current_text.is_empty() {
            // Trailing blanks only matter when they carry a background
            let text = if current_style.bg.is_some() || current_style.add_modifier.contains(Modifier::REVERSED) {
                current_text
            } else {
                current_text.trim_end().to_string()
            };
            if !text.is_empty() {
                spans.push(Span::styled(text, current_style));
            }
        }

        lines.push(Line::from(spans));
    }

    while lines.len() > cursor_row as usize + 1 && lines.last().is_some_and(|l| l.spans.is_empty()) {
        lines.pop();
    }

    lines
}

pub fn cell_style(cell: &vt100::Cell, theme: &ThemePreset) -> Style {
    let mut style = Style::default();

    if let Some(fg) = theme.terminal_color(cell.fgcolor()) {
        style = style.fg(fg);
    }
    if let Some(bg) = theme.terminal_color(cell.bgcolor()) {
        style = style.bg(bg);
    }

    if cell.bold() {
        style = style.add_modifier(Modifier::BOLD);
    }
    if cell.italic() {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if cell.underline() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if cell.inverse() {
        style = style.add_modifier(Modifier::REVERSED);
    }

    style
}
