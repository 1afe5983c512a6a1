use crate::app::{Action, AppState, FocusPanel, InputMode, PendingRemove};
use crate::models::Project;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn handle_project_action(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::SelectProject(id) => {
            if state.workspace.select_project(id) {
                state.sync_sidebar_to_active();
            }
        }
        Action::NextProject => {
            state.workspace.cycle_project(1);
            state.sync_sidebar_to_active();
        }
        Action::PrevProject => {
            state.workspace.cycle_project(-1);
            state.sync_sidebar_to_active();
        }
        Action::MoveSidebarUp => state.move_sidebar(-1),
        Action::MoveSidebarDown => state.move_sidebar(1),
        Action::ActivateSidebarSelection => {
            if let Some(id) = state.selected_sidebar_project() {
                state.workspace.select_project(id);
                state.sync_sidebar_to_active();
                state.ui.focus = FocusPanel::Terminal;
            }
        }
        Action::EnterAddProjectMode => {
            state.ui.input_mode = InputMode::AddProject;
            state.ui.input_buffer.clear();
        }
        Action::AddProject(raw) => {
            let Some(path) = resolve_project_dir(&raw) else {
                state.set_status(format!("Not a directory: {}", raw.display()));
                return Ok(());
            };
            let name = Project::name_from_path(&path);
            state.workspace.add_project(name.clone(), path);
            state.sync_sidebar_to_active();
            state.ui.input_mode = InputMode::Normal;
            state.ui.input_buffer.clear();
            state.ui.focus = FocusPanel::Terminal;
            state.set_status(format!("Added {}", name));
        }
        Action::InitiateRemoveProject => {
            if let Some(project) = state.workspace.active_project() {
                state.ui.pending_remove = Some(PendingRemove {
                    project: project.id,
                    name: project.name.clone(),
                });
            }
        }
        Action::ConfirmRemoveProject => {
            let Some(pending) = state.ui.pending_remove.take() else {
                return Ok(());
            };
            // Selection may have moved since the prompt was shown
            if state.workspace.active_project_id() != Some(pending.project) {
                return Ok(());
            }
            if let Some(name) = state.workspace.remove_active_project() {
                state.sync_sidebar_to_active();
                state.set_status(format!("Removed {}", name));
            }
        }
        Action::CancelPending => {
            state.ui.pending_remove = None;
        }
        Action::CycleSortMode => {
            let mode = state.workspace.cycle_sort_mode();
            state.sync_sidebar_to_active();
            state.set_status(format!("Sort: {}", mode.label()));
        }
        _ => {}
    }
    Ok(())
}

/// Expand a leading `~` and require an existing directory.
fn resolve_project_dir(raw: &Path) -> Option<PathBuf> {
    let expanded = match raw.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()?.join(rest),
        Err(_) => raw.to_path_buf(),
    };
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir().ok()?.join(expanded)
    };
    if !absolute.is_dir() {
        return None;
    }
    absolute.canonicalize().ok()
}
