use crate::models::{ProjectId, TerminalId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Sidebar,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a directory to add as a project
    AddProject,
    /// Renaming the sub-tab with this id; it may close while the dialog is open
    RenameSubTab(TerminalId),
    Help,
}

/// Remove confirmation waiting for a second key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemove {
    pub project: ProjectId,
    pub name: String,
}

/// Screen position of one rendered tab. `close_x` is the close button
/// column, inside `x..x + width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabRegion {
    pub id: TerminalId,
    pub x: u16,
    pub width: u16,
    pub close_x: u16,
}

/// Rectangle as (x, y, width, height)
pub type Area = (u16, u16, u16, u16);

pub fn area_contains(area: Area, x: u16, y: u16) -> bool {
    let (ax, ay, aw, ah) = area;
    x >= ax && x < ax + aw && y >= ay && y < ay + ah
}
