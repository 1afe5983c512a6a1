pub mod components;
pub mod event;
pub mod theme;
pub mod ui;
pub mod utils;

use crate::persistence::{AppearanceOverrides, CursorBlink, CursorShape};
use anyhow::Result;
use crossterm::{
    cursor::SetCursorStyle,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};

pub type Terminal = ratatui::Terminal<CrosstermBackend<io::Stdout>>;

pub fn init() -> Result<Terminal> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = ratatui::Terminal::new(backend)?;
    Ok(terminal)
}

pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(
        stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        SetCursorStyle::DefaultUserShape
    )?;
    Ok(())
}

/// Cursor shape and blink the overrides ask for, or `None` to leave the
/// host terminal's own cursor alone.
pub fn effective_cursor(overrides: &AppearanceOverrides) -> Option<(CursorShape, bool)> {
    let blink = match overrides.cursor_blink {
        Some(CursorBlink::On) => true,
        Some(CursorBlink::Off) => false,
        Some(CursorBlink::System) | None if overrides.cursor_shape.is_none() => return None,
        Some(CursorBlink::System) | None => true,
    };
    Some((overrides.cursor_shape.unwrap_or(CursorShape::Block), blink))
}

pub fn cursor_style(cursor: Option<(CursorShape, bool)>) -> SetCursorStyle {
    match cursor {
        None => SetCursorStyle::DefaultUserShape,
        Some((CursorShape::Block, true)) => SetCursorStyle::BlinkingBlock,
        Some((CursorShape::Block, false)) => SetCursorStyle::SteadyBlock,
        Some((CursorShape::IBeam, true)) => SetCursorStyle::BlinkingBar,
        Some((CursorShape::IBeam, false)) => SetCursorStyle::SteadyBar,
        Some((CursorShape::Underline, true)) => SetCursorStyle::BlinkingUnderScore,
        Some((CursorShape::Underline, false)) => SetCursorStyle::SteadyUnderScore,
    }
}

pub fn apply_cursor_style(style: SetCursorStyle) -> Result<()> {
    execute!(stdout(), style)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_style_follows_overrides() {
        let mut overrides = AppearanceOverrides::default();
        assert_eq!(effective_cursor(&overrides), None);

        overrides.cursor_shape = Some(CursorShape::IBeam);
        assert_eq!(effective_cursor(&overrides), Some((CursorShape::IBeam, true)));

        overrides.cursor_blink = Some(CursorBlink::Off);
        assert_eq!(effective_cursor(&overrides), Some((CursorShape::IBeam, false)));

        overrides.cursor_shape = None;
        assert_eq!(effective_cursor(&overrides), Some((CursorShape::Block, false)));
    }
}
