use super::lifecycle::spawn_subtab;
use crate::models::{Project, SubTabs, TerminalId};
use crate::pty::TerminalBackend;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    NotFound,
    /// A close for this sub-tab is already under way
    AlreadyClosing,
    /// Removed; `emptied` is set when it was the project's last sub-tab
    Closed { emptied: bool },
}

impl Project {
    /// Create a sub-tab at the end of the strip and make it active. An
    /// uninitialized project with placeholders restores them first.
    pub fn create_subtab(
        &mut self,
        backend: &dyn TerminalBackend,
        name: impl Into<String>,
        working_dir: PathBuf,
    ) -> TerminalId {
        if !self.saved_tabs().is_empty() {
            self.materialize(backend);
        }
        let tab = spawn_subtab(backend, name.into(), &working_dir);
        let id = tab.id;
        self.push_live(tab);
        tracing::info!(
            event = "subtab.create_completed",
            project = %self.name,
            terminal_id = %id,
            working_dir = %working_dir.display(),
        );
        id
    }

    /// The "new tab" request. On an uninitialized project this is only the
    /// lifecycle transition; otherwise a default-named tab is appended at
    /// the project root.
    pub fn add_subtab(&mut self, backend: &dyn TerminalBackend) -> Option<TerminalId> {
        if !self.is_initialized() {
            self.materialize(backend);
            return self.active_subtab().map(|t| t.id);
        }
        let name = self.next_default_name();
        let path = self.path.clone();
        Some(self.create_subtab(backend, name, path))
    }

    /// Remove the sub-tab at `index`. When it was active, the tab that slid
    /// into its slot becomes active, else the one before it.
    pub fn close_subtab(&mut self, index: usize) -> CloseOutcome {
        let SubTabs::Initialized { tabs, active } = &mut self.subtabs else {
            return CloseOutcome::NotFound;
        };
        let Some(tab) = tabs.get_mut(index) else {
            return CloseOutcome::NotFound;
        };
        if tab.closing {
            return CloseOutcome::AlreadyClosing;
        }
        tab.closing = true;

        // Dropping the terminal kills the process
        let removed = tabs.remove(index);
        let emptied = tabs.is_empty();
        if !emptied {
            if *active == index {
                *active = index.min(tabs.len() - 1);
            } else if *active > index {
                *active -= 1;
            }
        }

        tracing::info!(
            event = "subtab.close_completed",
            project = %self.name,
            terminal_id = %removed.id,
            emptied,
        );
        drop(removed);

        if emptied {
            self.mark_empty();
        }
        CloseOutcome::Closed { emptied }
    }

    pub fn select_subtab(&mut self, index: usize) -> bool {
        match &mut self.subtabs {
            SubTabs::Initialized { tabs, active } if index < tabs.len() && *active != index => {
                *active = index;
                true
            }
            _ => false,
        }
    }

    /// Step the active sub-tab by `delta`, wrapping around.
    pub fn cycle_subtab(&mut self, delta: isize) -> bool {
        let (len, current) = match &self.subtabs {
            SubTabs::Initialized { tabs, active } => (tabs.len() as isize, *active as isize),
            SubTabs::Uninitialized { .. } => return false,
        };
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_subtab(next)
    }

    /// Move one sub-tab; the same tab stays active wherever it ends up.
    pub fn reorder_subtab(&mut self, from: usize, to: usize) -> bool {
        let SubTabs::Initialized { tabs, active } = &mut self.subtabs else {
            return false;
        };
        if from == to || from >= tabs.len() || to >= tabs.len() {
            return false;
        }
        let active_id = tabs[*active].id;
        let tab = tabs.remove(from);
        tabs.insert(to, tab);
        *active = tabs.iter().position(|t| t.id == active_id).unwrap_or(0);
        true
    }

    /// Rebuild the strip order from a visual order. Ids no longer present
    /// are skipped; tabs missing from `order` keep their relative order at
    /// the end.
    pub fn apply_subtab_order(&mut self, order: &[TerminalId]) -> bool {
        let present: Vec<TerminalId> = order
            .iter()
            .copied()
            .filter(|id| self.position_of(*id).is_some())
            .collect();

        let mut changed = false;
        for (target, id) in present.into_iter().enumerate() {
            if let Some(current) = self.position_of(id) {
                changed |= self.reorder_subtab(current, target);
            }
        }
        changed
    }

    /// Move the active sub-tab one slot left or right.
    pub fn move_active_subtab(&mut self, delta: isize) -> bool {
        let Some(current) = self.active_index() else {
            return false;
        };
        let target = current as isize + delta;
        if target < 0 || target as usize >= self.tab_count() {
            return false;
        }
        self.reorder_subtab(current, target as usize)
    }
}
