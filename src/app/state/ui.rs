use crate::models::{ProjectId, TerminalId};
use crate::workspace::drag::{PressTarget, TabDrag, TabSlot, TabStrip};

use super::types::{area_contains, Area, FocusPanel, InputMode, PendingRemove, TabRegion};

pub struct UIState {
    pub focus: FocusPanel,
    pub input_mode: InputMode,
    pub input_buffer: String,
    /// Index into the sidebar's display order
    pub sidebar_selected: usize,
    pub pending_remove: Option<PendingRemove>,
    pub status_message: Option<String>,
    /// Terminal pane takes the whole screen
    pub zoomed: bool,

    // Hit regions recorded by the last draw. Rows and tabs are keyed by id,
    // so a stale region can at worst name something that no longer exists.
    pub sidebar_area: Option<Area>,
    pub sidebar_rows: Vec<(u16, ProjectId)>,
    pub tab_row: Option<u16>,
    pub tab_regions: Vec<TabRegion>,
    pub new_tab_button: Option<(u16, u16)>,
    pub terminal_area: Option<Area>,

    pub tab_drag: TabDrag,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            focus: FocusPanel::Terminal,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            sidebar_selected: 0,
            pending_remove: None,
            status_message: None,
            zoomed: false,
            sidebar_area: None,
            sidebar_rows: Vec::new(),
            tab_row: None,
            tab_regions: Vec::new(),
            new_tab_button: None,
            terminal_area: None,
            tab_drag: TabDrag::default(),
        }
    }

    pub fn project_at(&self, x: u16, y: u16) -> Option<ProjectId> {
        if !self.sidebar_area.is_some_and(|a| area_contains(a, x, y)) {
            return None;
        }
        self.sidebar_rows
            .iter()
            .find(|(row, _)| *row == y)
            .map(|(_, id)| *id)
    }

    pub fn is_tab_row(&self, y: u16) -> bool {
        self.tab_row == Some(y)
    }

    pub fn tab_target(&self, x: u16, y: u16) -> PressTarget {
        if !self.is_tab_row(y) {
            return PressTarget::Outside;
        }
        match self
            .tab_regions
            .iter()
            .find(|r| x >= r.x && x < r.x + r.width)
        {
            Some(region) if x == region.close_x => PressTarget::CloseButton(region.id),
            Some(region) => PressTarget::Tab(region.id),
            None => PressTarget::Outside,
        }
    }

    pub fn is_new_tab_button(&self, x: u16, y: u16) -> bool {
        self.is_tab_row(y)
            && self
                .new_tab_button
                .is_some_and(|(bx, width)| x >= bx && x < bx + width)
    }

    /// Tab geometry for a drag starting now.
    pub fn tab_strip(&self) -> TabStrip {
        let origin = self.tab_regions.first().map(|r| r.x).unwrap_or(0);
        let slots = self
            .tab_regions
            .iter()
            .map(|r| TabSlot {
                id: r.id,
                width: f64::from(r.width),
            })
            .collect();
        TabStrip::new(f64::from(origin), slots)
    }

    pub fn is_in_terminal(&self, x: u16, y: u16) -> bool {
        self.terminal_area.is_some_and(|a| area_contains(a, x, y))
    }

    pub fn dragged_tab(&self) -> Option<TerminalId> {
        self.tab_drag.dragged()
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn with_tabs() -> (UIState, Vec<TerminalId>) {
        let mut ui = UIState::new();
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        ui.tab_row = Some(1);
        ui.tab_regions = vec![
            TabRegion {
                id: ids[0],
                x: 20,
                width: 10,
                close_x: 28,
            },
            TabRegion {
                id: ids[1],
                x: 30,
                width: 12,
                close_x: 40,
            },
        ];
        ui.new_tab_button = Some((42, 3));
        (ui, ids)
    }

    #[test]
    fn tab_hits_resolve_to_ids() {
        let (ui, ids) = with_tabs();
        assert_eq!(ui.tab_target(21, 1), PressTarget::Tab(ids[0]));
        assert_eq!(ui.tab_target(28, 1), PressTarget::CloseButton(ids[0]));
        assert_eq!(ui.tab_target(35, 1), PressTarget::Tab(ids[1]));
        assert_eq!(ui.tab_target(35, 2), PressTarget::Outside);
        assert_eq!(ui.tab_target(43, 1), PressTarget::Outside);
        assert!(ui.is_new_tab_button(43, 1));
    }

    #[test]
    fn strip_follows_regions() {
        let (ui, ids) = with_tabs();
        assert_eq!(ui.tab_strip().order(), ids);
    }

    #[test]
    fn sidebar_rows_map_to_projects() {
        let mut ui = UIState::new();
        ui.sidebar_area = Some((0, 0, 20, 10));
        ui.sidebar_rows = vec![(2, 7), (3, 4)];
        assert_eq!(ui.project_at(5, 3), Some(4));
        assert_eq!(ui.project_at(5, 5), None);
        assert_eq!(ui.project_at(25, 2), None);
    }
}
