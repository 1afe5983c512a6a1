//! Built-in color themes. The 16-entry palette backs indexed colors 0-15
//! coming from the terminal; higher indices and RGB pass through.

use crate::persistence::{read_single_line, write_single_line, DataDir, PersistenceError, THEME_FILE};
use ratatui::style::Color;

#[derive(Debug, PartialEq, Eq)]
pub struct ThemePreset {
    pub name: &'static str,
    pub dark: bool,
    pub foreground: u32,
    pub background: u32,
    pub cursor: u32,
    pub palette: [u32; 16],
}

pub const BUILTIN_THEMES: &[ThemePreset] = &[
    ThemePreset {
        name: "Dracula",
        dark: true,
        foreground: 0xF8F8F2,
        background: 0x282A36,
        cursor: 0xF8F8F2,
        palette: [
            0x262626, 0xFF5555, 0x50FA7B, 0xF1FA8C,
            0xBD93F9, 0xFF79C6, 0x8BE9FD, 0xF8F8F2,
            0x7A7A7A, 0xFF6E6E, 0x69FF94, 0xFFFFA5,
            0xD6ACFF, 0xFF92DF, 0xA4FFFF, 0xFFFFFF,
        ],
    },
    ThemePreset {
        name: "Nord",
        dark: true,
        foreground: 0xD8DEE9,
        background: 0x2E3440,
        cursor: 0xD8DEE9,
        palette: [
            0x3B4252, 0xBF616A, 0xA3BE8C, 0xEBCB8B,
            0x81A1C1, 0xB48EAD, 0x88C0D0, 0xE5E9F0,
            0x4C566A, 0xBF616A, 0xA3BE8C, 0xEBCB8B,
            0x81A1C1, 0xB48EAD, 0x8FBCBB, 0xECEFF4,
        ],
    },
    ThemePreset {
        name: "Nord Light",
        dark: false,
        foreground: 0x2E3440,
        background: 0xECEFF4,
        cursor: 0x2E3440,
        palette: [
            0x2E3440, 0xBF616A, 0xA3BE8C, 0xEBCB8B,
            0x81A1C1, 0xB48EAD, 0x88C0D0, 0xD8DEE9,
            0x4C566A, 0xBF616A, 0xA3BE8C, 0xEBCB8B,
            0x81A1C1, 0xB48EAD, 0x8FBCBB, 0xECEFF4,
        ],
    },
    ThemePreset {
        name: "Catppuccin Mocha",
        dark: true,
        foreground: 0xCDD6F4,
        background: 0x1E1E2E,
        cursor: 0xF5E0DC,
        palette: [
            0x45475A, 0xF38BA8, 0xA6E3A1, 0xF9E2AF,
            0x89B4FA, 0xF5C2E7, 0x94E2D5, 0xBAC2DE,
            0x585B70, 0xF38BA8, 0xA6E3A1, 0xF9E2AF,
            0x89B4FA, 0xF5C2E7, 0x94E2D5, 0xA6ADC8,
        ],
    },
    ThemePreset {
        name: "Catppuccin Latte",
        dark: false,
        foreground: 0x4C4F69,
        background: 0xEFF1F5,
        cursor: 0xDC8A78,
        palette: [
            0x5C5F77, 0xD20F39, 0x40A02B, 0xDF8E1D,
            0x1E66F5, 0xEA76CB, 0x179299, 0xACB0BE,
            0x6C6F85, 0xD20F39, 0x40A02B, 0xDF8E1D,
            0x1E66F5, 0xEA76CB, 0x179299, 0xBCC0CC,
        ],
    },
    ThemePreset {
        name: "Catppuccin Frappe",
        dark: true,
        foreground: 0xC6D0F5,
        background: 0x303446,
        cursor: 0xF2D5CF,
        palette: [
            0x51576D, 0xE78284, 0xA6D189, 0xE5C890,
            0x8CAAEE, 0xF4B8E4, 0x81C8BE, 0xB5BFE2,
            0x626880, 0xE78284, 0xA6D189, 0xE5C890,
            0x8CAAEE, 0xF4B8E4, 0x81C8BE, 0xA5ADCE,
        ],
    },
    ThemePreset {
        name: "Catppuccin Macchiato",
        dark: true,
        foreground: 0xCAD3F5,
        background: 0x24273A,
        cursor: 0xF4DBD6,
        palette: [
            0x494D64, 0xED8796, 0xA6DA95, 0xEED49F,
            0x8AADF4, 0xF5BDE6, 0x8BD5CA, 0xB8C0E0,
            0x5B6078, 0xED8796, 0xA6DA95, 0xEED49F,
            0x8AADF4, 0xF5BDE6, 0x8BD5CA, 0xA5ADCB,
        ],
    },
    ThemePreset {
        name: "Gruvbox Dark",
        dark: true,
        foreground: 0xEBDBB2,
        background: 0x282828,
        cursor: 0xEBDBB2,
        palette: [
            0x282828, 0xCC241D, 0x98971A, 0xD79921,
            0x458588, 0xB16286, 0x689D6A, 0xA89984,
            0x928374, 0xFB4934, 0xB8BB26, 0xFABD2F,
            0x83A598, 0xD3869B, 0x8EC07C, 0xEBDBB2,
        ],
    },
    ThemePreset {
        name: "Gruvbox Light",
        dark: false,
        foreground: 0x3C3836,
        background: 0xFBF1C7,
        cursor: 0x3C3836,
        palette: [
            0xFBF1C7, 0xCC241D, 0x98971A, 0xD79921,
            0x458588, 0xB16286, 0x689D6A, 0x7C6F64,
            0x928374, 0x9D0006, 0x79740E, 0xB57614,
            0x076678, 0x8F3F71, 0x427B58, 0x3C3836,
        ],
    },
    ThemePreset {
        name: "Solarized Dark",
        dark: true,
        foreground: 0x839496,
        background: 0x002B36,
        cursor: 0x839496,
        palette: [
            0x073642, 0xDC322F, 0x859900, 0xB58900,
            0x268BD2, 0xD33682, 0x2AA198, 0xEEE8D5,
            0x002B36, 0xCB4B16, 0x586E75, 0x657B83,
            0x839496, 0x6C71C4, 0x93A1A1, 0xFDF6E3,
        ],
    },
    ThemePreset {
        name: "Solarized Light",
        dark: false,
        foreground: 0x657B83,
        background: 0xFDF6E3,
        cursor: 0x657B83,
        palette: [
            0x073642, 0xDC322F, 0x859900, 0xB58900,
            0x268BD2, 0xD33682, 0x2AA198, 0xEEE8D5,
            0x002B36, 0xCB4B16, 0x586E75, 0x657B83,
            0x839496, 0x6C71C4, 0x93A1A1, 0xFDF6E3,
        ],
    },
    ThemePreset {
        name: "One Dark",
        dark: true,
        foreground: 0xABB2BF,
        background: 0x282C34,
        cursor: 0x528BFF,
        palette: [
            0x282C34, 0xE06C75, 0x98C379, 0xE5C07B,
            0x61AFEF, 0xC678DD, 0x56B6C2, 0xABB2BF,
            0x545862, 0xE06C75, 0x98C379, 0xE5C07B,
            0x61AFEF, 0xC678DD, 0x56B6C2, 0xC8CCD4,
        ],
    },
    ThemePreset {
        name: "One Light",
        dark: false,
        foreground: 0x383A42,
        background: 0xFAFAFA,
        cursor: 0x526FFF,
        palette: [
            0x383A42, 0xE45649, 0x50A14F, 0xC18401,
            0x4078F2, 0xA626A4, 0x0184BC, 0xA0A1A7,
            0x696C77, 0xE45649, 0x50A14F, 0xC18401,
            0x4078F2, 0xA626A4, 0x0184BC, 0x090A0B,
        ],
    },
    ThemePreset {
        name: "Tokyo Night",
        dark: true,
        foreground: 0xA9B1D6,
        background: 0x1A1B26,
        cursor: 0xC0CAF5,
        palette: [
            0x15161E, 0xF7768E, 0x9ECE6A, 0xE0AF68,
            0x7AA2F7, 0xBB9AF7, 0x7DCFFF, 0xA9B1D6,
            0x414868, 0xF7768E, 0x9ECE6A, 0xE0AF68,
            0x7AA2F7, 0xBB9AF7, 0x7DCFFF, 0xC0CAF5,
        ],
    },
    ThemePreset {
        name: "Tokyo Night Storm",
        dark: true,
        foreground: 0xA9B1D6,
        background: 0x24283B,
        cursor: 0xC0CAF5,
        palette: [
            0x1D202F, 0xF7768E, 0x9ECE6A, 0xE0AF68,
            0x7AA2F7, 0xBB9AF7, 0x7DCFFF, 0xA9B1D6,
            0x414868, 0xF7768E, 0x9ECE6A, 0xE0AF68,
            0x7AA2F7, 0xBB9AF7, 0x7DCFFF, 0xC0CAF5,
        ],
    },
    ThemePreset {
        name: "Rose Pine",
        dark: true,
        foreground: 0xE0DEF4,
        background: 0x191724,
        cursor: 0x524F67,
        palette: [
            0x26233A, 0xEB6F92, 0x31748F, 0xF6C177,
            0x9CCFD8, 0xC4A7E7, 0xEBBCBA, 0xE0DEF4,
            0x6E6A86, 0xEB6F92, 0x31748F, 0xF6C177,
            0x9CCFD8, 0xC4A7E7, 0xEBBCBA, 0xE0DEF4,
        ],
    },
    ThemePreset {
        name: "Rose Pine Moon",
        dark: true,
        foreground: 0xE0DEF4,
        background: 0x232136,
        cursor: 0x59546D,
        palette: [
            0x393552, 0xEB6F92, 0x3E8FB0, 0xF6C177,
            0x9CCFD8, 0xC4A7E7, 0xEA9A97, 0xE0DEF4,
            0x6E6A86, 0xEB6F92, 0x3E8FB0, 0xF6C177,
            0x9CCFD8, 0xC4A7E7, 0xEA9A97, 0xE0DEF4,
        ],
    },
    ThemePreset {
        name: "Rose Pine Dawn",
        dark: false,
        foreground: 0x575279,
        background: 0xFAF4ED,
        cursor: 0x9893A5,
        palette: [
            0xF2E9E1, 0xB4637A, 0x286983, 0xEA9D34,
            0x56949F, 0x907AA9, 0xD7827E, 0x575279,
            0x9893A5, 0xB4637A, 0x286983, 0xEA9D34,
            0x56949F, 0x907AA9, 0xD7827E, 0x575279,
        ],
    },
    ThemePreset {
        name: "Everforest Dark",
        dark: true,
        foreground: 0xD3C6AA,
        background: 0x2D353B,
        cursor: 0xD3C6AA,
        palette: [
            0x343F44, 0xE67E80, 0xA7C080, 0xDBBC7F,
            0x7FBBB3, 0xD699B6, 0x83C092, 0xD3C6AA,
            0x475258, 0xE67E80, 0xA7C080, 0xDBBC7F,
            0x7FBBB3, 0xD699B6, 0x83C092, 0xD3C6AA,
        ],
    },
    ThemePreset {
        name: "Monokai Dark",
        dark: true,
        foreground: 0xF8F8F2,
        background: 0x272822,
        cursor: 0xF8F8F0,
        palette: [
            0x272822, 0xF92672, 0xA6E22E, 0xF4BF75,
            0x66D9EF, 0xAE81FF, 0xA1EFE4, 0xF8F8F2,
            0x75715E, 0xF92672, 0xA6E22E, 0xF4BF75,
            0x66D9EF, 0xAE81FF, 0xA1EFE4, 0xF9F8F5,
        ],
    },
    ThemePreset {
        name: "Kanagawa",
        dark: true,
        foreground: 0xDCD7BA,
        background: 0x1F1F28,
        cursor: 0xC8C093,
        palette: [
            0x16161D, 0xC34043, 0x76946A, 0xC0A36E,
            0x7E9CD8, 0x957FB8, 0x6A9589, 0xC8C093,
            0x727169, 0xE82424, 0x98BB6C, 0xE6C384,
            0x7FB4CA, 0x938AA9, 0x7AA89F, 0xDCD7BA,
        ],
    },
    ThemePreset {
        name: "Zenburn",
        dark: true,
        foreground: 0xDCDCCC,
        background: 0x3F3F3F,
        cursor: 0xDCDCCC,
        palette: [
            0x1E2320, 0xCC9393, 0x7F9F7F, 0xF0DFAF,
            0x8CD0D3, 0xDC8CC3, 0x93E0E3, 0xDCDCCC,
            0x709080, 0xDCA3A3, 0xBFEBBF, 0xF0DFAF,
            0x8CD0D3, 0xDC8CC3, 0x93E0E3, 0xFFFFFF,
        ],
    },
];

fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl ThemePreset {
    pub fn find(name: &str) -> Option<&'static ThemePreset> {
        BUILTIN_THEMES.iter().find(|t| t.name == name)
    }

    /// The named theme, or the first built-in when the name is unknown.
    pub fn resolve(name: Option<&str>) -> &'static ThemePreset {
        name.and_then(Self::find).unwrap_or(&BUILTIN_THEMES[0])
    }

    /// Next built-in in list order, wrapping.
    pub fn next(&self) -> &'static ThemePreset {
        let index = BUILTIN_THEMES
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0);
        &BUILTIN_THEMES[(index + 1) % BUILTIN_THEMES.len()]
    }

    pub fn fg(&self) -> Color {
        rgb(self.foreground)
    }

    pub fn bg(&self) -> Color {
        rgb(self.background)
    }

    pub fn cursor(&self) -> Color {
        rgb(self.cursor)
    }

    /// Map a terminal color onto this theme.
    pub fn terminal_color(&self, color: vt100::Color) -> Option<Color> {
        match color {
            vt100::Color::Default => None,
            vt100::Color::Idx(i) if (i as usize) < self.palette.len() => {
                Some(rgb(self.palette[i as usize]))
            }
            vt100::Color::Idx(i) => Some(Color::Indexed(i)),
            vt100::Color::Rgb(r, g, b) => Some(Color::Rgb(r, g, b)),
        }
    }

    // Chrome colors are taken from the palette so the UI follows the theme.

    pub fn accent(&self) -> Color {
        rgb(self.palette[6])
    }

    pub fn highlight(&self) -> Color {
        rgb(self.palette[4])
    }

    pub fn warning(&self) -> Color {
        rgb(self.palette[3])
    }

    pub fn error(&self) -> Color {
        rgb(self.palette[1])
    }

    pub fn muted(&self) -> Color {
        rgb(self.palette[8])
    }

    /// Background for selected rows and the active tab.
    pub fn selection_bg(&self) -> Color {
        if self.dark {
            rgb(self.palette[0])
        } else {
            rgb(self.palette[7])
        }
    }
}

/// Theme named in the data directory, defaulting to the first built-in.
pub fn load_theme(data_dir: &DataDir) -> &'static ThemePreset {
    match read_single_line(&data_dir.file(THEME_FILE)) {
        Ok(name) => ThemePreset::resolve(name.as_deref()),
        Err(e) => {
            tracing::warn!(event = "theme.load_failed", error = %e);
            ThemePreset::resolve(None)
        }
    }
}

pub fn save_theme(data_dir: &DataDir, theme: &ThemePreset) -> Result<(), PersistenceError> {
    write_single_line(&data_dir.file(THEME_FILE), theme.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unknown_name_falls_back_to_dracula() {
        assert_eq!(ThemePreset::resolve(Some("Solarized Neon")).name, "Dracula");
        assert_eq!(ThemePreset::resolve(None).name, "Dracula");
        assert_eq!(ThemePreset::resolve(Some("Nord")).name, "Nord");
    }

    #[test]
    fn next_wraps_around() {
        let last = BUILTIN_THEMES.last().unwrap();
        assert_eq!(last.next().name, BUILTIN_THEMES[0].name);
        assert_eq!(BUILTIN_THEMES[0].next().name, BUILTIN_THEMES[1].name);
    }

    #[test]
    fn palette_backs_low_indexed_colors() {
        let dracula = ThemePreset::resolve(None);
        assert_eq!(dracula.terminal_color(vt100::Color::Idx(1)), Some(Color::Rgb(0xFF, 0x55, 0x55)));
        assert_eq!(dracula.terminal_color(vt100::Color::Idx(100)), Some(Color::Indexed(100)));
        assert_eq!(dracula.terminal_color(vt100::Color::Default), None);
        assert_eq!(dracula.bg(), Color::Rgb(0x28, 0x2A, 0x36));
    }

    #[test]
    fn theme_choice_persists() {
        let tmp = TempDir::new().unwrap();
        let dir = DataDir::create(tmp.path().to_path_buf(), None).unwrap();
        assert_eq!(load_theme(&dir).name, "Dracula");

        save_theme(&dir, ThemePreset::find("Gruvbox Dark").unwrap()).unwrap();

        assert_eq!(load_theme(&dir).name, "Gruvbox Dark");
    }
}
