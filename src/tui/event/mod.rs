mod handlers;

pub use handlers::key_to_bytes;

use crate::app::{Action, AppState};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

/// Bound on queued PTY events; readers block when the UI falls behind.
const PTY_QUEUE_SIZE: usize = 256;
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Input from the host terminal, read on a dedicated thread
enum TerminalEvent {
    Key(KeyEvent),
    Paste(String),
    MouseDown(u16, u16),
    MouseDrag(u16, u16),
    MouseUp(u16, u16),
    ScrollUp,
    ScrollDown,
    Resize(u16, u16),
    Tick,
}

impl TerminalEvent {
    fn read() -> Self {
        if !event::poll(POLL_TIMEOUT).unwrap_or(false) {
            return TerminalEvent::Tick;
        }
        match event::read() {
            Ok(Event::Key(key)) => TerminalEvent::Key(key),
            Ok(Event::Mouse(mouse)) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    TerminalEvent::MouseDown(mouse.column, mouse.row)
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    TerminalEvent::MouseDrag(mouse.column, mouse.row)
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    TerminalEvent::MouseUp(mouse.column, mouse.row)
                }
                MouseEventKind::ScrollUp => TerminalEvent::ScrollUp,
                MouseEventKind::ScrollDown => TerminalEvent::ScrollDown,
                _ => TerminalEvent::Tick,
            },
            Ok(Event::Resize(w, h)) => TerminalEvent::Resize(w, h),
            Ok(Event::Paste(data)) => TerminalEvent::Paste(data),
            _ => TerminalEvent::Tick,
        }
    }
}

/// Merges host terminal input with PTY events into one action stream.
/// Keyboard and mouse input always wins over queued PTY output.
pub struct EventHandler {
    pty_tx: mpsc::Sender<Action>,
    pty_rx: mpsc::Receiver<Action>,
    terminal_rx: mpsc::UnboundedReceiver<TerminalEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (pty_tx, pty_rx) = mpsc::channel(PTY_QUEUE_SIZE);
        let (terminal_tx, terminal_rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || loop {
            if terminal_tx.send(TerminalEvent::read()).is_err() {
                break;
            }
        });

        Self {
            pty_tx,
            pty_rx,
            terminal_rx,
        }
    }

    /// Sender handed to the PTY reader threads.
    pub fn pty_sender(&self) -> mpsc::Sender<Action> {
        self.pty_tx.clone()
    }

    fn translate(&self, event: TerminalEvent, state: &AppState) -> Action {
        match event {
            TerminalEvent::Key(key) => self.handle_key_event(key, state),
            TerminalEvent::Paste(data) => Action::Paste(data),
            TerminalEvent::MouseDown(x, y) => Action::MouseDown(x, y),
            TerminalEvent::MouseDrag(x, y) => Action::MouseDrag(x, y),
            TerminalEvent::MouseUp(x, y) => Action::MouseUp(x, y),
            TerminalEvent::ScrollUp => Action::ScrollUp,
            TerminalEvent::ScrollDown => Action::ScrollDown,
            TerminalEvent::Resize(w, h) => Action::Resize(w, h),
            TerminalEvent::Tick => Action::Tick,
        }
    }

    pub async fn next(&mut self, state: &AppState) -> Result<Action> {
        if let Ok(event) = self.terminal_rx.try_recv() {
            return Ok(self.translate(event, state));
        }
        if let Ok(action) = self.pty_rx.try_recv() {
            return Ok(action);
        }

        tokio::select! {
            biased;

            Some(event) = self.terminal_rx.recv() => Ok(self.translate(event, state)),
            Some(action) = self.pty_rx.recv() => Ok(action),
            else => Ok(Action::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
