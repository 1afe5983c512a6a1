//! Lazy Uninitialized -> Initialized transition of a project.

use crate::models::{Project, SubTab, SubTabs};
use crate::pty::{Terminal, TerminalBackend};
use std::path::Path;

/// Allocate a sub-tab and ask the backend for a terminal. A failed spawn
/// leaves the sub-tab without a backend rather than failing the caller.
pub(super) fn spawn_subtab(backend: &dyn TerminalBackend, name: String, working_dir: &Path) -> SubTab {
    let id = SubTab::new_id();
    let terminal = match backend.spawn(id, working_dir) {
        Ok(session) => {
            let (rows, cols) = backend.screen_size();
            Some(Terminal::new(session, rows, cols))
        }
        Err(e) => {
            tracing::warn!(
                event = "subtab.spawn_failed",
                terminal_id = %id,
                working_dir = %working_dir.display(),
                error = %e,
            );
            None
        }
    };
    SubTab::new(name, terminal, id)
}

impl Project {
    /// Name for the next default tab.
    pub(super) fn next_default_name(&mut self) -> String {
        self.tab_counter += 1;
        format!("Tab {}", self.tab_counter)
    }

    /// Append a live sub-tab and make it active. On an uninitialized project
    /// this is the transition itself, so it must only be reached once any
    /// placeholders have been taken.
    pub(super) fn push_live(&mut self, tab: SubTab) -> usize {
        match &mut self.subtabs {
            SubTabs::Initialized { tabs, active } => {
                tabs.push(tab);
                *active = tabs.len() - 1;
                *active
            }
            SubTabs::Uninitialized { saved, .. } => {
                debug_assert!(saved.is_empty(), "placeholders must be materialized first");
                self.subtabs = SubTabs::Initialized {
                    tabs: vec![tab],
                    active: 0,
                };
                0
            }
        }
    }

    /// Uninitialized -> Initialized. Placeholders are recreated in order and
    /// the saved active index is restored (the last tab if it is out of
    /// range); with no placeholders a single default tab rooted at the
    /// project path is created. Returns false if already initialized.
    pub fn materialize(&mut self, backend: &dyn TerminalBackend) -> bool {
        let (saved, saved_active) = match &mut self.subtabs {
            SubTabs::Initialized { .. } => return false,
            SubTabs::Uninitialized {
                saved,
                saved_active,
            } => (std::mem::take(saved), *saved_active),
        };

        if saved.is_empty() {
            self.tab_counter = 0;
            let name = self.next_default_name();
            let tab = spawn_subtab(backend, name, &self.path);
            self.push_live(tab);
        } else {
            self.tab_counter = saved.len() as u32;
            for placeholder in saved {
                let tab = spawn_subtab(backend, placeholder.name, &placeholder.working_dir);
                self.push_live(tab);
            }
            if let SubTabs::Initialized { tabs, active } = &mut self.subtabs {
                *active = saved_active.min(tabs.len() - 1);
            }
        }

        tracing::info!(
            event = "project.materialize_completed",
            project = %self.name,
            tabs = self.tab_count(),
        );
        true
    }

    /// Initialized -> Uninitialized after the last live sub-tab is gone.
    /// No placeholders are kept: the next visit starts fresh.
    pub(super) fn mark_empty(&mut self) {
        self.subtabs = SubTabs::empty();
        tracing::info!(event = "project.emptied", project = %self.name);
    }
}
