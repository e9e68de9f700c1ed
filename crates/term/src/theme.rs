//! Colours: the fixed piece palette, accent themes and the persisted theme
//! preference.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fb::Rgb;
use crate::types::PieceKind;

/// Block colour per piece kind. Independent of the theme so pieces stay
/// recognisable.
pub const fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::from_hex(0x00f0f0),
        PieceKind::L => Rgb::from_hex(0xf0a000),
        PieceKind::J => Rgb::from_hex(0x0000f0),
        PieceKind::O => Rgb::from_hex(0xf0f000),
        PieceKind::Z => Rgb::from_hex(0xf00000),
        PieceKind::S => Rgb::from_hex(0x00f000),
        PieceKind::T => Rgb::from_hex(0xa000f0),
    }
}

/// Accent theme for the frame and side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Default,
    Purple,
    Blue,
    Red,
    Orange,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Default,
        Theme::Purple,
        Theme::Blue,
        Theme::Red,
        Theme::Orange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Purple => "purple",
            Theme::Blue => "blue",
            Theme::Red => "red",
            Theme::Orange => "orange",
        }
    }

    /// Parse a theme name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Theme::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Next theme in the cycle, wrapping around.
    pub fn next(self) -> Self {
        let i = Theme::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Theme::ALL[(i + 1) % Theme::ALL.len()]
    }

    pub fn accent(self) -> Rgb {
        match self {
            Theme::Default => Rgb::new(0, 200, 220),
            Theme::Purple => Rgb::new(168, 85, 247),
            Theme::Blue => Rgb::new(59, 130, 246),
            Theme::Red => Rgb::new(239, 68, 68),
            Theme::Orange => Rgb::new(249, 115, 22),
        }
    }
}

/// User preferences stored as JSON between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Theme name; unknown names resolve to the default theme.
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

fn default_theme_name() -> String {
    Theme::Default.name().to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
        }
    }
}

impl Preferences {
    /// Read preferences; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no preferences file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read preferences from {}", path.display()))
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse preferences in {}", path.display()))
    }

    /// Like [`Preferences::load`], but logs and falls back to defaults on error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "ignoring unreadable preferences");
                Self::default()
            }
        }
    }

    /// Write preferences, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to encode preferences")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write preferences to {}", path.display()))?;
        debug!(path = %path.display(), theme = %self.theme, "saved preferences");
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        Theme::from_name(&self.theme).unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme.name().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_kind_ids() {
        assert_eq!(piece_color(PieceKind::I), Rgb::new(0, 240, 240));
        assert_eq!(piece_color(PieceKind::O), Rgb::new(240, 240, 0));
        assert_eq!(piece_color(PieceKind::T), Rgb::new(160, 0, 240));
    }

    #[test]
    fn theme_names_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_name(theme.name()), Some(theme));
        }
        assert_eq!(Theme::from_name("PURPLE"), Some(Theme::Purple));
        assert_eq!(Theme::from_name("neon"), None);
    }

    #[test]
    fn theme_cycle_wraps() {
        assert_eq!(Theme::Default.next(), Theme::Purple);
        assert_eq!(Theme::Orange.next(), Theme::Default);
    }

    #[test]
    fn unknown_theme_falls_back() {
        let prefs: Preferences = serde_json::from_str(r#"{"theme":"neon"}"#).unwrap();
        assert_eq!(prefs.theme(), Theme::Default);
    }

    #[test]
    fn missing_field_uses_default() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, Preferences::default());
    }
}
