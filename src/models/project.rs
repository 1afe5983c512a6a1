use super::{SavedSubTab, SubTab};
use std::path::{Path, PathBuf};

/// Insertion order, assigned at creation and never reused.
pub type ProjectId = u32;

/// The two mutually exclusive shapes of a project's sub-tab state.
#[derive(Debug)]
pub enum SubTabs {
    /// At least one live sub-tab; `active` is always a valid index.
    Initialized { tabs: Vec<SubTab>, active: usize },
    /// Nothing spawned yet. `saved` may be empty (fresh or closed-to-empty).
    Uninitialized {
        saved: Vec<SavedSubTab>,
        saved_active: usize,
    },
}

impl SubTabs {
    pub fn empty() -> Self {
        SubTabs::Uninitialized {
            saved: Vec::new(),
            saved_active: 0,
        }
    }
}

#[derive(Debug)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub path: PathBuf,
    /// Microseconds since the Unix epoch of the last user selection
    pub last_used: i64,
    pub subtabs: SubTabs,
    /// Drives default "Tab N" names
    pub(crate) tab_counter: u32,
}

impl Project {
    pub fn new(id: ProjectId, name: String, path: PathBuf) -> Self {
        Self {
            id,
            name,
            path,
            last_used: 0,
            subtabs: SubTabs::empty(),
            tab_counter: 0,
        }
    }

    /// Project name derived from the last path component.
    pub fn name_from_path(path: &Path) -> String {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string())
            .unwrap_or_else(|| path.display().to_string())
    }

    pub fn touch(&mut self) {
        self.last_used = chrono::Utc::now().timestamp_micros();
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.subtabs, SubTabs::Initialized { .. })
    }

    pub fn tabs(&self) -> &[SubTab] {
        match &self.subtabs {
            SubTabs::Initialized { tabs, .. } => tabs,
            SubTabs::Uninitialized { .. } => &[],
        }
    }

    pub fn tabs_mut(&mut self) -> &mut [SubTab] {
        match &mut self.subtabs {
            SubTabs::Initialized { tabs, .. } => tabs,
            SubTabs::Uninitialized { .. } => &mut [],
        }
    }

    pub fn saved_tabs(&self) -> &[SavedSubTab] {
        match &self.subtabs {
            SubTabs::Initialized { .. } => &[],
            SubTabs::Uninitialized { saved, .. } => saved,
        }
    }

    /// Number of live sub-tabs, shown as the sidebar badge.
    pub fn tab_count(&self) -> usize {
        self.tabs().len()
    }

    pub fn active_index(&self) -> Option<usize> {
        match &self.subtabs {
            SubTabs::Initialized { active, .. } => Some(*active),
            SubTabs::Uninitialized { .. } => None,
        }
    }

    pub fn active_subtab(&self) -> Option<&SubTab> {
        match &self.subtabs {
            SubTabs::Initialized { tabs, active } => tabs.get(*active),
            SubTabs::Uninitialized { .. } => None,
        }
    }

    pub fn active_subtab_mut(&mut self) -> Option<&mut SubTab> {
        match &mut self.subtabs {
            SubTabs::Initialized { tabs, active } => tabs.get_mut(*active),
            SubTabs::Uninitialized { .. } => None,
        }
    }

    pub fn position_of(&self, id: super::TerminalId) -> Option<usize> {
        self.tabs().iter().position(|t| t.id == id)
    }

    /// Path with the home directory abbreviated to `~`.
    pub fn display_path(&self) -> String {
        self.path
            .to_str()
            .map(|s| {
                if let Some(home) = dirs::home_dir() {
                    if let Some(home_str) = home.to_str() {
                        if s.starts_with(home_str) {
                            return format!("~{}", &s[home_str.len()..]);
                        }
                    }
                }
                s.to_string()
            })
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
