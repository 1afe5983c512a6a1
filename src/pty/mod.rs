mod backend;
mod manager;

pub use backend::{Terminal, TerminalBackend, TerminalSession};
pub use manager::PtyManager;

#[cfg(test)]
pub(crate) use backend::testing;
