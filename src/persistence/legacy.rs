//! Pre-session formats: a line-per-project list and a one-line sort file.

use super::{
    read_optional, read_single_line, DataDir, PersistenceError, LEGACY_PROJECTS_FILE,
    LEGACY_SORT_FILE, THEME_FILE,
};
use crate::models::SortMode;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyProject {
    pub name: String,
    pub path: PathBuf,
    pub last_used: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacySession {
    pub projects: Vec<LegacyProject>,
    pub sort_mode: SortMode,
}

/// Parse one `projects.conf` line: `<timestamp>|<path>` or a bare path.
fn parse_project_line(line: &str) -> Option<LegacyProject> {
    if line.is_empty() {
        return None;
    }

    let (last_used, path) = match line.find('|') {
        Some(pipe) if pipe > 0 => {
            let stamp = &line[..pipe];
            (parse_leading_int(stamp), &line[pipe + 1..])
        }
        _ => (0, line),
    };

    let path = PathBuf::from(path);
    let name = crate::models::Project::name_from_path(&path);
    Some(LegacyProject {
        name,
        path,
        last_used,
    })
}

/// Leading decimal digits (with optional sign) as an integer; 0 if none.
fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);
    s[..end].parse().unwrap_or(0)
}

/// Read the legacy project list and sort mode. `Ok(None)` when there is no
/// legacy project list to migrate from.
pub fn read_legacy_session(data_dir: &DataDir) -> Result<Option<LegacySession>, PersistenceError> {
    let Some(contents) = read_optional(&data_dir.file(LEGACY_PROJECTS_FILE))? else {
        return Ok(None);
    };

    let projects = contents.lines().filter_map(parse_project_line).collect();

    let sort_mode = read_single_line(&data_dir.file(LEGACY_SORT_FILE))?
        .map(|line| SortMode::parse(&line))
        .unwrap_or_default();

    Ok(Some(LegacySession {
        projects,
        sort_mode,
    }))
}

fn copy_if_present(from: &Path, to: &Path) -> Result<bool, PersistenceError> {
    if !from.exists() {
        return Ok(false);
    }
    fs::copy(from, to).map_err(|e| PersistenceError::io(to, e))?;
    Ok(true)
}

/// One-time copy of recognized files from the old config directory into
/// the data directory. Runs only while the data-dir project list is absent,
/// never overwrites, and never removes the originals.
pub fn copy_forward_from_config_dir(data_dir: &DataDir) -> Result<Vec<PathBuf>, PersistenceError> {
    let mut copied = Vec::new();
    let Some(old_dir) = data_dir.legacy_config() else {
        return Ok(copied);
    };

    let new_projects = data_dir.file(LEGACY_PROJECTS_FILE);
    if new_projects.exists() {
        return Ok(copied);
    }

    if copy_if_present(&old_dir.join(LEGACY_PROJECTS_FILE), &new_projects)? {
        copied.push(new_projects);
    }

    let new_theme = data_dir.file(THEME_FILE);
    if !new_theme.exists() && copy_if_present(&old_dir.join(THEME_FILE), &new_theme)? {
        copied.push(new_theme);
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_timestamped_and_bare_lines() {
        assert_eq!(
            parse_project_line("1700000000|/home/me/api"),
            Some(LegacyProject {
                name: "api".into(),
                path: PathBuf::from("/home/me/api"),
                last_used: 1_700_000_000,
            })
        );
        assert_eq!(
            parse_project_line("/home/me/web"),
            Some(LegacyProject {
                name: "web".into(),
                path: PathBuf::from("/home/me/web"),
                last_used: 0,
            })
        );
        assert_eq!(parse_project_line(""), None);
    }

    #[test]
    fn leading_pipe_is_part_of_the_path() {
        let project = parse_project_line("|odd").unwrap();
        assert_eq!(project.path, PathBuf::from("|odd"));
        assert_eq!(project.last_used, 0);
    }

    #[test]
    fn non_numeric_timestamp_is_zero() {
        let project = parse_project_line("soon|/srv/app").unwrap();
        assert_eq!(project.last_used, 0);
        assert_eq!(project.path, PathBuf::from("/srv/app"));
    }

    #[test]
    fn reads_projects_and_sort_mode() {
        let tmp = TempDir::new().unwrap();
        let dir = DataDir::create(tmp.path().to_path_buf(), None).unwrap();
        fs::write(dir.file(LEGACY_PROJECTS_FILE), "5|/a/one\n\n/b/two\n").unwrap();
        fs::write(dir.file(LEGACY_SORT_FILE), "mru\n").unwrap();

        let legacy = read_legacy_session(&dir).unwrap().unwrap();
        assert_eq!(legacy.sort_mode, SortMode::MostRecentlyUsed);
        let names: Vec<_> = legacy.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two"]);
        assert_eq!(legacy.projects[0].last_used, 5);
    }

    #[test]
    fn no_legacy_list_means_nothing_to_migrate() {
        let tmp = TempDir::new().unwrap();
        let dir = DataDir::create(tmp.path().to_path_buf(), None).unwrap();
        fs::write(dir.file(LEGACY_SORT_FILE), "alpha\n").unwrap();
        assert_eq!(read_legacy_session(&dir).unwrap(), None);
    }

    #[test]
    fn copy_forward_copies_once_without_removing() {
        let tmp = TempDir::new().unwrap();
        let old = tmp.path().join("config");
        fs::create_dir_all(&old).unwrap();
        fs::write(old.join(LEGACY_PROJECTS_FILE), "/p\n").unwrap();
        fs::write(old.join(THEME_FILE), "Nord\n").unwrap();

        let dir = DataDir::create(tmp.path().join("data"), Some(old.clone())).unwrap();
        let copied = copy_forward_from_config_dir(&dir).unwrap();
        assert_eq!(copied.len(), 2);
        assert_eq!(fs::read_to_string(dir.file(THEME_FILE)).unwrap(), "Nord\n");
        assert!(old.join(LEGACY_PROJECTS_FILE).exists());

        fs::write(old.join(THEME_FILE), "Zenburn\n").unwrap();
        assert!(copy_forward_from_config_dir(&dir).unwrap().is_empty());
        assert_eq!(fs::read_to_string(dir.file(THEME_FILE)).unwrap(), "Nord\n");
    }

    #[test]
    fn copy_forward_keeps_existing_theme() {
        let tmp = TempDir::new().unwrap();
        let old = tmp.path().join("config");
        fs::create_dir_all(&old).unwrap();
        fs::write(old.join(THEME_FILE), "Nord\n").unwrap();

        let dir = DataDir::create(tmp.path().join("data"), Some(old)).unwrap();
        fs::write(dir.file(THEME_FILE), "Dracula\n").unwrap();
        assert!(copy_forward_from_config_dir(&dir).unwrap().is_empty());
        assert_eq!(fs::read_to_string(dir.file(THEME_FILE)).unwrap(), "Dracula\n");
    }
}
