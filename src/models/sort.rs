use super::Project;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordering strategy for the project sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortMode {
    /// Creation order
    #[default]
    Manual,
    Alphabetical,
    MostRecentlyUsed,
}

impl SortMode {
    /// Manual -> Alphabetical -> MostRecentlyUsed -> Manual
    pub fn next(self) -> Self {
        match self {
            SortMode::Manual => SortMode::Alphabetical,
            SortMode::Alphabetical => SortMode::MostRecentlyUsed,
            SortMode::MostRecentlyUsed => SortMode::Manual,
        }
    }

    /// Token used in the session document and the legacy sort file.
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Manual => "none",
            SortMode::Alphabetical => "alpha",
            SortMode::MostRecentlyUsed => "mru",
        }
    }

    /// Unknown tokens mean manual ordering.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "alpha" => SortMode::Alphabetical,
            "mru" => SortMode::MostRecentlyUsed,
            _ => SortMode::Manual,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Manual => "Manual",
            SortMode::Alphabetical => "A-Z",
            SortMode::MostRecentlyUsed => "Recent",
        }
    }

    pub fn compare(self, a: &Project, b: &Project) -> Ordering {
        match self {
            SortMode::Manual => a.id.cmp(&b.id),
            SortMode::Alphabetical => compare_names(&a.name, &b.name),
            // Descending; equal timestamps stay in their current relative order
            SortMode::MostRecentlyUsed => b.last_used.cmp(&a.last_used),
        }
    }

    /// Sort project references in place. `sort_by` is stable, which the
    /// MRU comparator relies on for ties.
    pub fn sort(self, projects: &mut [&Project]) {
        projects.sort_by(|a, b| self.compare(a, b));
    }
}

impl From<String> for SortMode {
    fn from(s: String) -> Self {
        SortMode::parse(&s)
    }
}

impl From<SortMode> for String {
    fn from(mode: SortMode) -> Self {
        mode.as_str().to_string()
    }
}

/// ASCII case-insensitive comparison, byte by byte.
fn compare_names(a: &str, b: &str) -> Ordering {
    let a = a.bytes().map(|c| c.to_ascii_lowercase());
    let b = b.bytes().map(|c| c.to_ascii_lowercase());
    a.cmp(b)
}
