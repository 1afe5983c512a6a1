//! The root context: every project, the active selection, sort mode, and
//! the persistence hooks that keep the session document current.

mod codec;
pub mod drag;
mod lifecycle;
mod subtabs;

pub use subtabs::CloseOutcome;

use crate::models::{Project, ProjectId, SortMode, SubTab, TerminalId};
use crate::persistence::{
    copy_forward_from_config_dir, read_legacy_session, DataDir, PersistenceError, SessionStore,
};
use crate::pty::TerminalBackend;
use std::path::PathBuf;

pub struct Workspace {
    projects: Vec<Project>,
    active: Option<ProjectId>,
    sort_mode: SortMode,
    next_id: ProjectId,
    data_dir: DataDir,
    store: SessionStore,
    backend: Box<dyn TerminalBackend>,
}

impl Workspace {
    pub fn new(data_dir: DataDir, backend: Box<dyn TerminalBackend>) -> Self {
        Self {
            projects: Vec::new(),
            active: None,
            sort_mode: SortMode::default(),
            next_id: 0,
            store: SessionStore::new(&data_dir),
            data_dir,
            backend,
        }
    }

    /// Startup: copy forward old config files, then load. No terminal is
    /// spawned until [`Workspace::activate_restored`].
    pub fn open(data_dir: DataDir, backend: Box<dyn TerminalBackend>) -> Self {
        match copy_forward_from_config_dir(&data_dir) {
            Ok(copied) if !copied.is_empty() => {
                tracing::info!(event = "session.copy_forward_completed", files = copied.len());
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    event = "session.copy_forward_failed",
                    error = %e,
                    error_code = e.error_code(),
                );
            }
        }

        let mut workspace = Self::new(data_dir, backend);
        workspace.load();
        workspace
    }

    /// Load the session document, or migrate the legacy project list when
    /// no document exists. A migration is saved immediately so it happens
    /// once. Failures leave the workspace empty.
    pub fn load(&mut self) {
        if self.store.exists() {
            match self.store.load() {
                Ok(Some(document)) => {
                    self.install_document(document);
                    tracing::info!(
                        event = "session.load_completed",
                        projects = self.projects.len(),
                    );
                }
                Ok(None) => {}
                Err(e) => {
                    self.clear();
                    tracing::warn!(
                        event = "session.load_failed",
                        path = %self.store.path().display(),
                        error = %e,
                        error_code = e.error_code(),
                    );
                }
            }
            return;
        }

        match read_legacy_session(&self.data_dir) {
            Ok(Some(legacy)) => {
                self.install_legacy(legacy);
                tracing::info!(
                    event = "session.migrate_completed",
                    projects = self.projects.len(),
                );
                self.save();
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    event = "session.migrate_failed",
                    error = %e,
                    error_code = e.error_code(),
                );
            }
        }
    }

    pub fn try_save(&self) -> Result<(), PersistenceError> {
        self.store.save(&self.to_document())
    }

    /// Persist the session. A failed write is logged and otherwise ignored.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            tracing::warn!(
                event = "session.save_failed",
                path = %self.store.path().display(),
                error = %e,
                error_code = e.error_code(),
            );
        }
    }

    fn clear(&mut self) {
        self.projects.clear();
        self.active = None;
        self.sort_mode = SortMode::default();
    }

    fn push_project(&mut self, name: String, path: PathBuf) -> &mut Project {
        let id = self.next_id;
        self.next_id += 1;
        self.projects.push(Project::new(id, name, path));
        let index = self.projects.len() - 1;
        &mut self.projects[index]
    }

    fn index_of(&self, id: ProjectId) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    // --- Accessors ---

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn active_project_id(&self) -> Option<ProjectId> {
        self.active
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.active.and_then(|id| self.project(id))
    }

    pub fn active_project_mut(&mut self) -> Option<&mut Project> {
        let id = self.active?;
        self.project_mut(id)
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn data_dir(&self) -> &DataDir {
        &self.data_dir
    }

    pub fn backend(&self) -> &dyn TerminalBackend {
        self.backend.as_ref()
    }

    /// Project ids in sidebar order for the current sort mode.
    pub fn display_order(&self) -> Vec<ProjectId> {
        let mut refs: Vec<&Project> = self.projects.iter().collect();
        self.sort_mode.sort(&mut refs);
        refs.into_iter().map(|p| p.id).collect()
    }

    // --- Projects ---

    /// Add a project with one fresh sub-tab at its root and make it active.
    pub fn add_project(&mut self, name: String, path: PathBuf) -> ProjectId {
        let backend = self.backend.as_ref();
        let id = self.next_id;
        self.next_id += 1;
        let mut project = Project::new(id, name, path);
        project.materialize(backend);

        tracing::info!(
            event = "project.add_completed",
            project = %project.name,
            path = %project.path.display(),
        );
        self.projects.push(project);
        self.active = Some(id);
        self.save();
        id
    }

    /// Remove the active project, terminating its terminals. The first
    /// remaining project in list order becomes active.
    pub fn remove_active_project(&mut self) -> Option<String> {
        let index = self.index_of(self.active?)?;
        let removed = self.projects.remove(index);
        tracing::info!(
            event = "project.remove_completed",
            project = %removed.name,
            tabs = removed.tab_count(),
        );
        let name = removed.name.clone();
        drop(removed);

        self.active = None;
        match self.projects.first().map(|p| p.id) {
            Some(next) => {
                self.select_project(next);
            }
            None => self.save(),
        }
        Some(name)
    }

    /// User selection: stamps `last_used`, materializes the project if
    /// needed, and persists.
    pub fn select_project(&mut self, id: ProjectId) -> bool {
        let backend = self.backend.as_ref();
        let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        project.touch();
        project.materialize(backend);
        self.active = Some(id);
        tracing::debug!(event = "project.select_completed", project_id = id);
        self.save();
        true
    }

    /// Select the project `delta` steps away in display order, wrapping.
    pub fn cycle_project(&mut self, delta: isize) -> bool {
        let order = self.display_order();
        if order.is_empty() {
            return false;
        }
        let current = self
            .active
            .and_then(|id| order.iter().position(|p| *p == id))
            .map(|i| i as isize)
            .unwrap_or(-1);
        let next = (current + delta).rem_euclid(order.len() as isize) as usize;
        self.select_project(order[next])
    }

    pub fn cycle_sort_mode(&mut self) -> SortMode {
        self.sort_mode = self.sort_mode.next();
        tracing::info!(event = "sort.mode_changed", mode = self.sort_mode.as_str());
        self.save();
        self.sort_mode
    }

    /// Materialize whatever project was active when the session was saved.
    /// Called once the UI can show terminals.
    pub fn activate_restored(&mut self) {
        if let Some(id) = self.active {
            self.select_project(id);
        }
    }

    // --- Sub-tabs ---

    /// Find a live sub-tab by terminal id as (project index, tab index).
    fn locate(&self, id: TerminalId) -> Option<(usize, usize)> {
        self.projects
            .iter()
            .enumerate()
            .find_map(|(pi, p)| p.position_of(id).map(|ti| (pi, ti)))
    }

    pub fn subtab(&self, id: TerminalId) -> Option<&SubTab> {
        let (pi, ti) = self.locate(id)?;
        self.projects[pi].tabs().get(ti)
    }

    pub fn project_of(&self, id: TerminalId) -> Option<ProjectId> {
        self.locate(id).map(|(pi, _)| self.projects[pi].id)
    }

    /// "New tab" on the active project.
    pub fn add_subtab(&mut self) -> Option<TerminalId> {
        let backend = self.backend.as_ref();
        let id = self.active?;
        let project = self.projects.iter_mut().find(|p| p.id == id)?;
        let created = project.add_subtab(backend);
        self.save();
        created
    }

    /// Close a sub-tab by terminal id. Unknown ids are ignored.
    pub fn close_subtab(&mut self, id: TerminalId) -> CloseOutcome {
        let Some((pi, ti)) = self.locate(id) else {
            return CloseOutcome::NotFound;
        };
        let outcome = self.projects[pi].close_subtab(ti);
        if matches!(outcome, CloseOutcome::Closed { .. }) {
            self.save();
        }
        outcome
    }

    pub fn close_active_subtab(&mut self) -> CloseOutcome {
        match self.active_project().and_then(|p| p.active_subtab()).map(|t| t.id) {
            Some(id) => self.close_subtab(id),
            None => CloseOutcome::NotFound,
        }
    }

    pub fn select_subtab(&mut self, id: TerminalId) -> bool {
        let Some((pi, ti)) = self.locate(id) else {
            return false;
        };
        let changed = self.projects[pi].select_subtab(ti);
        if changed {
            self.save();
        }
        changed
    }

    pub fn cycle_subtab(&mut self, delta: isize) -> bool {
        let changed = self
            .active_project_mut()
            .map(|p| p.cycle_subtab(delta))
            .unwrap_or(false);
        if changed {
            self.save();
        }
        changed
    }

    pub fn move_active_subtab(&mut self, delta: isize) -> bool {
        let changed = self
            .active_project_mut()
            .map(|p| p.move_active_subtab(delta))
            .unwrap_or(false);
        if changed {
            self.save();
        }
        changed
    }

    /// Commit the order of a finished tab drag and persist it.
    pub fn apply_subtab_order(&mut self, order: &[TerminalId]) {
        let Some(project_index) = order.iter().find_map(|id| self.locate(*id)).map(|(pi, _)| pi)
        else {
            return;
        };
        self.projects[project_index].apply_subtab_order(order);
        self.save();
    }

    /// Rename a sub-tab. The id is looked up again, so a rename confirmed
    /// after the tab closed does nothing.
    pub fn rename_subtab(&mut self, id: TerminalId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some((pi, ti)) = self.locate(id) else {
            tracing::debug!(event = "subtab.rename_skipped", terminal_id = %id);
            return false;
        };
        self.projects[pi].tabs_mut()[ti].rename(name.to_string());
        self.save();
        true
    }

    // --- Terminal events ---

    /// Feed output to the owning terminal. Returns true if it belongs to a
    /// live sub-tab.
    pub fn handle_output(&mut self, id: TerminalId, data: &[u8]) -> bool {
        let Some((pi, ti)) = self.locate(id) else {
            return false;
        };
        let tab = &mut self.projects[pi].tabs_mut()[ti];
        let Some(terminal) = tab.terminal.as_mut() else {
            return false;
        };
        if let Some(title) = terminal.process(data) {
            tab.apply_title(&title);
        }
        true
    }

    /// The process behind a sub-tab exited: close it unless a close is
    /// already running.
    pub fn handle_exit(&mut self, id: TerminalId, code: i32) -> CloseOutcome {
        tracing::info!(event = "pty.exit_received", terminal_id = %id, code);
        self.close_subtab(id)
    }

    pub fn send_input(&mut self, data: &[u8]) {
        let Some(terminal) = self
            .active_project_mut()
            .and_then(|p| p.active_subtab_mut())
            .and_then(|t| t.terminal.as_mut())
        else {
            return;
        };
        if let Err(e) = terminal.send_input(data) {
            tracing::warn!(event = "pty.write_failed", error = %e);
        }
    }

    pub fn scroll_active(&mut self, lines: isize) {
        if let Some(terminal) = self
            .active_project_mut()
            .and_then(|p| p.active_subtab_mut())
            .and_then(|t| t.terminal.as_mut())
        {
            terminal.scroll(lines);
        }
    }

    /// Apply a new screen size to every live terminal and to terminals
    /// spawned later.
    pub fn resize_terminals(&mut self, rows: u16, cols: u16) {
        self.backend.set_screen_size(rows, cols);
        for terminal in self
            .projects
            .iter_mut()
            .flat_map(|p| p.tabs_mut().iter_mut())
            .filter_map(|t| t.terminal.as_mut())
        {
            if let Err(e) = terminal.resize(rows, cols) {
                tracing::debug!(event = "pty.resize_failed", error = %e);
            }
        }
    }

    /// Save and tear down every terminal.
    pub fn shutdown(mut self) {
        self.save();
        self.projects.clear();
        tracing::info!(event = "session.shutdown_completed");
    }
}
