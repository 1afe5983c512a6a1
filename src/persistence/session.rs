use super::{read_optional, write_file, DataDir, PersistenceError, SESSION_FILE};
use crate::models::SortMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The persisted session. Field names are the on-disk format.
///
/// Deserialization is lenient the way hand-edited files need: missing
/// members take defaults, and entries without a name or path are skipped
/// when the document is installed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(default)]
    pub active_project_index: i64,
    #[serde(default)]
    pub sort_mode: SortMode,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub last_used: i64,
    #[serde(default)]
    pub active_subtab_index: i64,
    #[serde(default)]
    pub subtabs: Vec<SubTabEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubTabEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl SessionDocument {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(path: &Path, contents: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(contents).map_err(|source| PersistenceError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reads and writes the session document. Writes replace the whole file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &DataDir) -> Self {
        Self {
            path: data_dir.file(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// `Ok(None)` when no session has been written yet.
    pub fn load(&self) -> Result<Option<SessionDocument>, PersistenceError> {
        match read_optional(&self.path)? {
            Some(contents) => SessionDocument::from_json(&self.path, &contents).map(Some),
            None => Ok(None),
        }
    }

    pub fn save(&self, document: &SessionDocument) -> Result<(), PersistenceError> {
        let mut contents = document.to_json()?;
        contents.push('\n');
        write_file(&self.path, &contents)
    }
}
