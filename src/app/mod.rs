mod action;
mod handler;
mod handlers;
mod runtime;
mod state;

pub use action::Action;
pub use runtime::run_tui;
pub use state::{AppState, FocusPanel, InputMode, PendingRemove, TabRegion, UIState};

#[cfg(test)]
pub(crate) use state::testing;
