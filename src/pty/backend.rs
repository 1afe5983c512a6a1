use crate::models::TerminalId;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// A running shell attached to a PTY.
pub trait TerminalSession: Send {
    /// Current working directory of the child, when the platform exposes it.
    fn current_dir(&self) -> Option<PathBuf>;
    fn send_input(&mut self, data: &[u8]) -> Result<()>;
    fn resize(&self, rows: u16, cols: u16) -> Result<()>;
    fn kill(&mut self) -> Result<()>;
}

/// Spawns terminal sessions. Output and exit events are delivered
/// asynchronously, keyed by the `TerminalId` passed to `spawn`.
pub trait TerminalBackend {
    fn spawn(&self, id: TerminalId, working_dir: &Path) -> Result<Box<dyn TerminalSession>>;

    /// Size new screens are created with, as (rows, cols).
    fn screen_size(&self) -> (u16, u16) {
        (24, 80)
    }

    fn set_screen_size(&self, _rows: u16, _cols: u16) {}
}

/// Live terminal handle owned by a sub-tab: the session plus the parsed screen.
pub struct Terminal {
    session: Box<dyn TerminalSession>,
    parser: vt100::Parser,
    title: String,
}

impl Terminal {
    const SCROLLBACK: usize = 10_000;

    pub fn new(session: Box<dyn TerminalSession>, rows: u16, cols: u16) -> Self {
        Self {
            session,
            parser: vt100::Parser::new(rows.max(1), cols.max(1), Self::SCROLLBACK),
            title: String::new(),
        }
    }

    /// Feed PTY output. Returns the new window title if it changed.
    pub fn process(&mut self, data: &[u8]) -> Option<String> {
        self.parser.process(data);
        let title = self.parser.screen().title();
        if title != self.title {
            self.title = title.to_string();
            return Some(self.title.clone());
        }
        None
    }

    pub fn screen(&self) -> &vt100::Screen {
        self.parser.screen()
    }

    pub fn scroll(&mut self, lines: isize) {
        let current = self.parser.screen().scrollback() as isize;
        let next = (current + lines).max(0) as usize;
        self.parser.set_scrollback(next);
    }

    pub fn current_dir(&self) -> Option<PathBuf> {
        self.session.current_dir()
    }

    pub fn send_input(&mut self, data: &[u8]) -> Result<()> {
        // Typing always snaps back to the live screen
        self.parser.set_scrollback(0);
        self.session.send_input(data)
    }

    pub fn resize(&mut self, rows: u16, cols: u16) -> Result<()> {
        let (rows, cols) = (rows.max(1), cols.max(1));
        if self.parser.screen().size() == (rows, cols) {
            return Ok(());
        }
        self.parser.set_size(rows, cols);
        self.session.resize(rows, cols)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(e) = self.session.kill() {
            tracing::debug!(event = "pty.kill_failed", error = %e);
        }
    }
}
