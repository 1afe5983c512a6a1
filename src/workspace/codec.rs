//! Workspace <-> session document.

use super::Workspace;
use crate::models::{Project, SavedSubTab, SubTab, SubTabs};
use crate::persistence::{LegacySession, ProjectEntry, SessionDocument, SubTabEntry};
use std::path::PathBuf;

const FALLBACK_TAB_NAME: &str = "Tab";

/// The shell's current directory, unless serde_json could not encode it.
fn recorded_dir(tab: &SubTab, project: &Project) -> PathBuf {
    tab.current_dir()
        .filter(|dir| dir.to_str().is_some())
        .unwrap_or_else(|| project.path.clone())
}

fn project_entry(project: &Project) -> ProjectEntry {
    let (active_subtab_index, subtabs) = match &project.subtabs {
        SubTabs::Initialized { tabs, active } => {
            let entries = tabs
                .iter()
                .map(|tab| SubTabEntry {
                    name: Some(tab.name.clone()),
                    working_dir: Some(recorded_dir(tab, project)),
                })
                .collect();
            (*active, entries)
        }
        SubTabs::Uninitialized {
            saved,
            saved_active,
        } => {
            let entries: Vec<_> = saved
                .iter()
                .map(|s| SubTabEntry {
                    name: Some(s.name.clone()),
                    working_dir: Some(s.working_dir.clone()),
                })
                .collect();
            let active = if entries.is_empty() { 0 } else { *saved_active };
            (active, entries)
        }
    };

    ProjectEntry {
        name: Some(project.name.clone()),
        path: Some(project.path.clone()),
        last_used: project.last_used,
        active_subtab_index: active_subtab_index as i64,
        subtabs,
    }
}

impl Workspace {
    /// Snapshot for persistence. Live sub-tabs record the directory their
    /// shell is in now; placeholders are written back unchanged.
    pub fn to_document(&self) -> SessionDocument {
        let active_project_index = self
            .active
            .and_then(|id| self.projects.iter().position(|p| p.id == id))
            .unwrap_or(0);

        SessionDocument {
            active_project_index: active_project_index as i64,
            sort_mode: self.sort_mode,
            projects: self.projects.iter().map(project_entry).collect(),
        }
    }

    /// Replace the workspace contents with a decoded document. Nothing is
    /// spawned: every project comes back uninitialized with placeholders.
    pub(super) fn install_document(&mut self, document: SessionDocument) {
        self.clear();

        for entry in document.projects {
            let (Some(name), Some(path)) = (entry.name, entry.path) else {
                tracing::debug!(event = "session.entry_skipped");
                continue;
            };
            let saved = entry
                .subtabs
                .into_iter()
                .map(|s| {
                    SavedSubTab::new(
                        s.name.unwrap_or_else(|| FALLBACK_TAB_NAME.to_string()),
                        s.working_dir.unwrap_or_else(|| path.clone()),
                    )
                })
                .collect();
            let saved_active = usize::try_from(entry.active_subtab_index).unwrap_or(0);

            let project = self.push_project(name, path);
            project.last_used = entry.last_used;
            project.subtabs = SubTabs::Uninitialized {
                saved,
                saved_active,
            };
        }

        self.sort_mode = document.sort_mode;
        self.active = usize::try_from(document.active_project_index)
            .ok()
            .and_then(|i| self.projects.get(i))
            .or(self.projects.last())
            .map(|p| p.id);
    }

    /// Adopt a pre-session project list. The last listed project ends up
    /// active.
    pub(super) fn install_legacy(&mut self, legacy: LegacySession) {
        self.clear();
        for entry in legacy.projects {
            let project = self.push_project(entry.name, entry.path);
            project.last_used = entry.last_used;
        }
        self.sort_mode = legacy.sort_mode;
        self.active = self.projects.last().map(|p| p.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortMode;
    use crate::persistence::{DataDir, LegacyProject};
    use crate::pty::testing::RecordingBackend;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Workspace) {
        let tmp = TempDir::new().unwrap();
        let dir = DataDir::create(tmp.path().to_path_buf(), None).unwrap();
        let ws = Workspace::new(dir, Box::new(RecordingBackend::default()));
        (tmp, ws)
    }

    #[test]
    fn entries_without_name_or_path_are_skipped() {
        let (_tmp, mut ws) = workspace();
        ws.install_document(SessionDocument {
            active_project_index: 0,
            sort_mode: SortMode::Manual,
            projects: vec![
                ProjectEntry {
                    name: None,
                    path: Some("/a".into()),
                    ..Default::default()
                },
                ProjectEntry {
                    name: Some("b".into()),
                    path: Some("/b".into()),
                    subtabs: vec![SubTabEntry::default()],
                    ..Default::default()
                },
            ],
        });

        assert_eq!(ws.projects().len(), 1);
        let saved = ws.projects()[0].saved_tabs();
        assert_eq!(saved, &[SavedSubTab::new("Tab", "/b")]);
    }

    #[test]
    fn out_of_range_active_index_falls_back_to_last() {
        let (_tmp, mut ws) = workspace();
        let entry = |n: &str| ProjectEntry {
            name: Some(n.into()),
            path: Some(PathBuf::from("/").join(n)),
            ..Default::default()
        };
        ws.install_document(SessionDocument {
            active_project_index: 9,
            sort_mode: SortMode::Alphabetical,
            projects: vec![entry("a"), entry("b")],
        });

        assert_eq!(ws.active_project().unwrap().name, "b");
        assert_eq!(ws.sort_mode(), SortMode::Alphabetical);
    }

    #[test]
    fn empty_placeholders_are_written_with_zero_active() {
        let (_tmp, mut ws) = workspace();
        ws.install_document(SessionDocument {
            active_project_index: 0,
            sort_mode: SortMode::Manual,
            projects: vec![ProjectEntry {
                name: Some("a".into()),
                path: Some("/a".into()),
                active_subtab_index: 3,
                ..Default::default()
            }],
        });

        assert_eq!(ws.to_document().projects[0].active_subtab_index, 0);
    }

    #[test]
    fn live_tabs_record_current_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = DataDir::create(tmp.path().to_path_buf(), None).unwrap();
        let backend = RecordingBackend::default();
        *backend.cwd_override.borrow_mut() = Some(PathBuf::from("/src/api/db"));
        let mut ws = Workspace::new(dir, Box::new(backend));

        ws.add_project("api".into(), PathBuf::from("/src/api"));

        let doc = ws.to_document();
        assert_eq!(
            doc.projects[0].subtabs,
            vec![SubTabEntry {
                name: Some("Tab 1".into()),
                working_dir: Some(PathBuf::from("/src/api/db")),
            }]
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_shell_directory_falls_back_to_project_root() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let dir = DataDir::create(tmp.path().to_path_buf(), None).unwrap();
        let backend = RecordingBackend::default();
        *backend.cwd_override.borrow_mut() = Some(PathBuf::from(OsStr::from_bytes(b"/tmp/caf\xe9")));
        let mut ws = Workspace::new(dir.clone(), Box::new(backend));

        ws.add_project("ok".into(), PathBuf::from("/src/ok"));
        ws.add_project("other".into(), PathBuf::from("/src/other"));

        ws.try_save().unwrap();
        let doc = ws.to_document();
        assert_eq!(doc.projects[0].subtabs[0].working_dir, Some(PathBuf::from("/src/ok")));
        assert_eq!(doc.projects[1].subtabs[0].working_dir, Some(PathBuf::from("/src/other")));
        let on_disk = std::fs::read_to_string(dir.file(crate::persistence::SESSION_FILE)).unwrap();
        assert!(on_disk.contains("other"));
    }

    #[test]
    fn legacy_projects_arrive_uninitialized_with_last_active() {
        let (_tmp, mut ws) = workspace();
        ws.install_legacy(LegacySession {
            projects: vec![
                LegacyProject {
                    name: "one".into(),
                    path: "/one".into(),
                    last_used: 5,
                },
                LegacyProject {
                    name: "two".into(),
                    path: "/two".into(),
                    last_used: 0,
                },
            ],
            sort_mode: SortMode::MostRecentlyUsed,
        });

        assert_eq!(ws.projects().len(), 2);
        assert!(ws.projects().iter().all(|p| !p.is_initialized()));
        assert_eq!(ws.active_project().unwrap().name, "two");
        assert_eq!(ws.to_document().active_project_index, 1);
    }
}
