use crate::pty::Terminal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Stable key for a live terminal. Events from PTY threads and view hit
/// regions refer to sub-tabs through this id, never through positions.
pub type TerminalId = Uuid;

/// One live terminal inside a project.
pub struct SubTab {
    pub id: TerminalId,
    pub name: String,
    /// Set once the user renamed the tab; terminal titles stop overriding it
    pub renamed: bool,
    /// `None` when the backend failed to spawn
    pub terminal: Option<Terminal>,
    /// Set before the terminal is dropped and killed, so a close re-entered
    /// during teardown is refused. Exit events arriving after the tab is
    /// gone miss by id instead.
    pub closing: bool,
}

impl SubTab {
    pub fn new(name: impl Into<String>, terminal: Option<Terminal>, id: TerminalId) -> Self {
        Self {
            id,
            name: name.into(),
            renamed: false,
            terminal,
            closing: false,
        }
    }

    pub fn new_id() -> TerminalId {
        Uuid::new_v4()
    }

    /// Apply a title reported by the terminal. Empty titles are ignored.
    pub fn apply_title(&mut self, title: &str) -> bool {
        if self.renamed || title.is_empty() || self.name == title {
            return false;
        }
        self.name = title.to_string();
        true
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.renamed = true;
    }

    /// The directory the shell is currently in, if the backend can tell.
    pub fn current_dir(&self) -> Option<PathBuf> {
        self.terminal.as_ref().and_then(|t| t.current_dir())
    }

    pub fn has_backend(&self) -> bool {
        self.terminal.is_some()
    }
}

impl std::fmt::Debug for SubTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubTab")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("renamed", &self.renamed)
            .field("has_backend", &self.terminal.is_some())
            .field("closing", &self.closing)
            .finish()
    }
}

/// Placeholder for a sub-tab that has not been materialized yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSubTab {
    pub name: String,
    pub working_dir: PathBuf,
}

impl SavedSubTab {
    pub fn new(name: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            working_dir: working_dir.into(),
        }
    }
}
