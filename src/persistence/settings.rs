use super::{read_optional, write_file, PersistenceError};
use std::fmt::Write as _;
use std::path::Path;

/// Last screen size in cells and whether the terminal pane was zoomed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: i32,
    pub height: i32,
    pub maximized: bool,
}

impl WindowGeometry {
    /// Three lines: width, height, maximized (0/1). Non-positive sizes are
    /// ignored, which also covers a missing or truncated file.
    pub fn parse(contents: &str) -> Option<Self> {
        let mut lines = contents.lines().map(str::trim);
        let width = lines.next()?.parse().ok()?;
        let height = lines.next()?.parse().ok()?;
        let maximized: i32 = lines.next()?.parse().ok()?;
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            maximized: maximized != 0,
        })
    }

    pub fn load(path: &Path) -> Result<Option<Self>, PersistenceError> {
        Ok(read_optional(path)?.and_then(|c| Self::parse(&c)))
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        if self.width <= 0 || self.height <= 0 {
            return Ok(());
        }
        let contents = format!(
            "{}\n{}\n{}\n",
            self.width,
            self.height,
            if self.maximized { 1 } else { 0 }
        );
        write_file(path, &contents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Block,
    IBeam,
    Underline,
}

impl CursorShape {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(CursorShape::Block),
            1 => Some(CursorShape::IBeam),
            2 => Some(CursorShape::Underline),
            _ => None,
        }
    }

    pub fn index(self) -> i64 {
        match self {
            CursorShape::Block => 0,
            CursorShape::IBeam => 1,
            CursorShape::Underline => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorBlink {
    System,
    On,
    Off,
}

impl CursorBlink {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(CursorBlink::System),
            1 => Some(CursorBlink::On),
            2 => Some(CursorBlink::Off),
            _ => None,
        }
    }

    pub fn index(self) -> i64 {
        match self {
            CursorBlink::System => 0,
            CursorBlink::On => 1,
            CursorBlink::Off => 2,
        }
    }
}

/// User overrides on top of the theme. `None` means inherit.
#[derive(Debug, Clone, PartialEq)]
pub struct AppearanceOverrides {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    /// Always within [0, 1]; 1.0 is opaque
    pub opacity: f64,
    pub cursor_shape: Option<CursorShape>,
    pub cursor_blink: Option<CursorBlink>,
}

impl Default for AppearanceOverrides {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: None,
            opacity: 1.0,
            cursor_shape: None,
            cursor_blink: None,
        }
    }
}

impl AppearanceOverrides {
    /// `key=value` lines. Unknown keys and lines without `=` are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut overrides = Self::default();
        for line in contents.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "font_family" => overrides.font_family = Some(value.to_string()),
                "font_size" => {
                    overrides.font_size = value.parse::<f64>().ok().filter(|s| *s > 0.0);
                }
                "opacity" => {
                    overrides.opacity = value.parse::<f64>().unwrap_or(0.0).clamp(0.0, 1.0);
                }
                "cursor_shape" => {
                    overrides.cursor_shape = value.parse().ok().and_then(CursorShape::from_index);
                }
                "cursor_blink" => {
                    overrides.cursor_blink = value.parse().ok().and_then(CursorBlink::from_index);
                }
                _ => {}
            }
        }
        overrides
    }

    /// Only keys that override something are written.
    pub fn to_file_contents(&self) -> String {
        let mut out = String::new();
        if let Some(family) = &self.font_family {
            let _ = writeln!(out, "font_family={}", family);
        }
        if let Some(size) = self.font_size {
            let _ = writeln!(out, "font_size={:.1}", size);
        }
        if self.opacity < 1.0 {
            let _ = writeln!(out, "opacity={:.2}", self.opacity);
        }
        if let Some(shape) = self.cursor_shape {
            let _ = writeln!(out, "cursor_shape={}", shape.index());
        }
        if let Some(blink) = self.cursor_blink {
            let _ = writeln!(out, "cursor_blink={}", blink.index());
        }
        out
    }

    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        Ok(read_optional(path)?
            .map(|c| Self::parse(&c))
            .unwrap_or_default())
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        write_file(path, &self.to_file_contents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn geometry_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("window.conf");
        let geometry = WindowGeometry {
            width: 180,
            height: 50,
            maximized: true,
        };
        geometry.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "180\n50\n1\n");
        assert_eq!(WindowGeometry::load(&path).unwrap(), Some(geometry));
    }

    #[test]
    fn geometry_with_non_positive_size_is_ignored() {
        assert_eq!(WindowGeometry::parse("0\n40\n0\n"), None);
        assert_eq!(WindowGeometry::parse("120\n-1\n1\n"), None);
        assert_eq!(WindowGeometry::parse("120\n"), None);
    }

    #[test]
    fn geometry_save_skips_empty_size() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("window.conf");
        WindowGeometry {
            width: 0,
            height: 10,
            maximized: false,
        }
        .save(&path)
        .unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn overrides_parse_and_clamp() {
        let overrides = AppearanceOverrides::parse(
            "font_family=JetBrains Mono\nfont_size=11.5\nopacity=1.7\ncursor_shape=1\ncursor_blink=2\nbogus\n",
        );
        assert_eq!(overrides.font_family.as_deref(), Some("JetBrains Mono"));
        assert_eq!(overrides.font_size, Some(11.5));
        assert_eq!(overrides.opacity, 1.0);
        assert_eq!(overrides.cursor_shape, Some(CursorShape::IBeam));
        assert_eq!(overrides.cursor_blink, Some(CursorBlink::Off));

        let negative = AppearanceOverrides::parse("opacity=-0.5\ncursor_shape=-1\n");
        assert_eq!(negative.opacity, 0.0);
        assert_eq!(negative.cursor_shape, None);
    }

    #[test]
    fn absent_keys_inherit() {
        let overrides = AppearanceOverrides::parse("");
        assert_eq!(overrides, AppearanceOverrides::default());
        assert_eq!(overrides.to_file_contents(), "");
    }

    #[test]
    fn overrides_written_only_when_set() {
        let overrides = AppearanceOverrides {
            font_size: Some(12.0),
            opacity: 0.85,
            cursor_blink: Some(CursorBlink::On),
            ..Default::default()
        };
        assert_eq!(
            overrides.to_file_contents(),
            "font_size=12.0\nopacity=0.85\ncursor_blink=1\n"
        );
        assert_eq!(AppearanceOverrides::parse(&overrides.to_file_contents()), overrides);
    }
}
