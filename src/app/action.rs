use crate::models::{ProjectId, TerminalId};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Action {
    // Projects
    SelectProject(ProjectId),
    NextProject,
    PrevProject,
    MoveSidebarUp,
    MoveSidebarDown,
    ActivateSidebarSelection,
    EnterAddProjectMode,
    AddProject(PathBuf),
    InitiateRemoveProject,
    ConfirmRemoveProject,
    CycleSortMode,

    // Sub-tabs
    NewSubTab,
    CloseActiveSubTab,
    CloseSubTab(TerminalId),
    SelectSubTab(TerminalId),
    NextSubTab,
    PrevSubTab,
    MoveSubTabLeft,
    MoveSubTabRight,
    EnterRenameMode,
    RenameSubTab(TerminalId, String),

    // Terminal I/O
    SendInput(Vec<u8>),
    Paste(String),
    PtyOutput(TerminalId, Vec<u8>),
    TerminalExited(TerminalId, i32),
    ScrollUp,
    ScrollDown,

    // Mouse (column, row)
    MouseDown(u16, u16),
    MouseDrag(u16, u16),
    MouseUp(u16, u16),

    // View
    ToggleFocus,
    ToggleZoom,
    CycleTheme,
    CycleCursorShape,
    EnterHelpMode,
    ExitMode,
    InputChar(char),
    InputBackspace,
    CancelPending,

    // App control
    Quit,
    Tick,
    Resize(u16, u16),
}

impl Action {
    /// Actions that come from the user rather than from terminals or timers.
    pub fn is_user_input(&self) -> bool {
        !matches!(
            self,
            Action::Tick
                | Action::Resize(..)
                | Action::PtyOutput(..)
                | Action::TerminalExited(..)
                | Action::MouseDrag(..)
        )
    }
}
