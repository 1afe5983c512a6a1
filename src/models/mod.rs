mod project;
mod sort;
mod subtab;

pub use project::{Project, ProjectId, SubTabs};
pub use sort::SortMode;
pub use subtab::{SavedSubTab, SubTab, TerminalId};
