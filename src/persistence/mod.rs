//! On-disk state. Every file lives under one per-application data directory;
//! an older config-directory location is copied forward once.

mod legacy;
mod session;
mod settings;

pub use legacy::{copy_forward_from_config_dir, read_legacy_session, LegacyProject, LegacySession};
pub use session::{ProjectEntry, SessionDocument, SessionStore, SubTabEntry};
pub use settings::{AppearanceOverrides, CursorBlink, CursorShape, WindowGeometry};

use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "tabdeck";

pub const SESSION_FILE: &str = "session.json";
pub const LEGACY_PROJECTS_FILE: &str = "projects.conf";
pub const LEGACY_SORT_FILE: &str = "sort.conf";
pub const WINDOW_FILE: &str = "window.conf";
pub const THEME_FILE: &str = "theme.conf";
pub const SETTINGS_FILE: &str = "settings.conf";
pub const KEYBINDINGS_FILE: &str = "keybindings.toml";
pub const LOG_FILE: &str = "tabdeck.log";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Could not find a data directory for this platform")]
    NoDataDir,

    #[error("IO error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session document at '{path}' is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode session document: {source}")]
    Encode {
        #[from]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Error code for log fields
    pub fn error_code(&self) -> &'static str {
        match self {
            PersistenceError::NoDataDir => "PERSIST_NO_DATA_DIR",
            PersistenceError::Io { .. } => "PERSIST_IO",
            PersistenceError::Malformed { .. } => "PERSIST_MALFORMED",
            PersistenceError::Encode { .. } => "PERSIST_ENCODE",
        }
    }
}

/// Root of all persisted files, plus the pre-migration config directory.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
    legacy_config: Option<PathBuf>,
}

impl DataDir {
    /// `$XDG_DATA_HOME/tabdeck` (or platform equivalent), created if missing.
    pub fn default_location() -> Result<Self, PersistenceError> {
        let root = dirs::data_dir()
            .ok_or(PersistenceError::NoDataDir)?
            .join(APP_DIR);
        let legacy_config = dirs::config_dir().map(|d| d.join(APP_DIR));
        Self::create(root, legacy_config)
    }

    pub fn create(root: PathBuf, legacy_config: Option<PathBuf>) -> Result<Self, PersistenceError> {
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| PersistenceError::io(&root, e))?;
        }
        Ok(Self {
            root,
            legacy_config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn legacy_config(&self) -> Option<&Path> {
        self.legacy_config.as_deref()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Read a file, mapping "not found" to `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, PersistenceError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PersistenceError::io(path, e)),
    }
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), PersistenceError> {
    fs::write(path, contents).map_err(|e| PersistenceError::io(path, e))
}

/// First line of a single-line file, trimmed; `None` when missing or blank.
pub fn read_single_line(path: &Path) -> Result<Option<String>, PersistenceError> {
    Ok(read_optional(path)?
        .and_then(|c| c.lines().next().map(|l| l.trim().to_string()))
        .filter(|l| !l.is_empty()))
}

pub fn write_single_line(path: &Path, line: &str) -> Result<(), PersistenceError> {
    write_file(path, &format!("{}\n", line))
}
