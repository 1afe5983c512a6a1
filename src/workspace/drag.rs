//! Drag-to-reorder for the sub-tab strip.
//!
//! A press on a tab body is held as pending. Once the pointer has moved at
//! least [`DRAG_THRESHOLD`] units horizontally the drag is claimed and the
//! dragged tab swaps with an immediate neighbour whenever the pointer
//! crosses that neighbour's midpoint. Release commits the visual order if
//! the drag was claimed, and is an ordinary click otherwise.

use crate::models::TerminalId;

pub const DRAG_THRESHOLD: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabSlot {
    pub id: TerminalId,
    pub width: f64,
}

/// Tab widths in visual order, starting at `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct TabStrip {
    origin: f64,
    slots: Vec<TabSlot>,
}

impl TabStrip {
    pub fn new(origin: f64, slots: Vec<TabSlot>) -> Self {
        Self { origin, slots }
    }

    fn index_of(&self, id: TerminalId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    fn midpoint(&self, index: usize) -> f64 {
        let start: f64 = self.origin + self.slots[..index].iter().map(|s| s.width).sum::<f64>();
        start + self.slots[index].width / 2.0
    }

    pub fn order(&self) -> Vec<TerminalId> {
        self.slots.iter().map(|s| s.id).collect()
    }
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    Tab(TerminalId),
    /// Close buttons handle their own clicks
    CloseButton(TerminalId),
    Outside,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragRelease {
    /// Nothing was pending
    Ignored,
    /// Released below the threshold
    Click(TerminalId),
    /// A claimed drag ended with this visual order
    Reordered(Vec<TerminalId>),
}

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Pending {
        tab: TerminalId,
        start_x: f64,
        claimed: bool,
        strip: TabStrip,
    },
}

#[derive(Debug, Default)]
pub struct TabDrag {
    state: DragState,
}

impl TabDrag {
    /// Start tracking a press. Returns false when the press is declined and
    /// should be handled as something else.
    pub fn press(&mut self, strip: TabStrip, target: PressTarget, x: f64) -> bool {
        let PressTarget::Tab(tab) = target else {
            self.state = DragState::Idle;
            return false;
        };
        if strip.index_of(tab).is_none() {
            return false;
        }
        self.state = DragState::Pending {
            tab,
            start_x: x,
            claimed: false,
            strip,
        };
        true
    }

    /// Pointer moved to `x`. Returns true when the visual order changed.
    pub fn motion(&mut self, x: f64) -> bool {
        let DragState::Pending {
            tab,
            start_x,
            claimed,
            strip,
        } = &mut self.state
        else {
            return false;
        };

        if !*claimed {
            if (x - *start_x).abs() < DRAG_THRESHOLD {
                return false;
            }
            *claimed = true;
        }

        let mut changed = false;
        while let Some(i) = strip.index_of(*tab) {
            if i > 0 && x < strip.midpoint(i - 1) {
                strip.slots.swap(i - 1, i);
            } else if i + 1 < strip.slots.len() && x > strip.midpoint(i + 1) {
                strip.slots.swap(i, i + 1);
            } else {
                break;
            }
            changed = true;
        }
        changed
    }

    pub fn release(&mut self) -> DragRelease {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragRelease::Ignored,
            DragState::Pending {
                tab,
                claimed: false,
                ..
            } => DragRelease::Click(tab),
            DragState::Pending { strip, .. } => DragRelease::Reordered(strip.order()),
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self.state, DragState::Pending { claimed: true, .. })
    }

    /// Order to draw while a claimed drag is in flight.
    pub fn visual_order(&self) -> Option<Vec<TerminalId>> {
        match &self.state {
            DragState::Pending {
                claimed: true,
                strip,
                ..
            } => Some(strip.order()),
            _ => None,
        }
    }

    pub fn dragged(&self) -> Option<TerminalId> {
        match &self.state {
            DragState::Pending {
                claimed: true, tab, ..
            } => Some(*tab),
            _ => None,
        }
    }
}
