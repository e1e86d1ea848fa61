//! Theme selection and iced theme integration

use crate::colors::Palette;
use iced::theme::Palette as IcedPalette;
use iced::Theme;
use serde::{Deserialize, Serialize};

/// Theme mode (dark or light)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark theme (default)
    #[default]
    Dark,
    /// Light theme
    Light,
}

impl ThemeMode {
    /// Look up a theme by its settings name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    /// Name as written to the settings file
    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Color table for this mode
    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Dark => Palette::dark(),
            ThemeMode::Light => Palette::light(),
        }
    }
}

/// Create an iced theme from a theme mode
pub fn create_theme(mode: ThemeMode) -> Theme {
    let palette = mode.palette();
    let name = match mode {
        ThemeMode::Dark => "Lumen Dark",
        ThemeMode::Light => "Lumen Light",
    };

    let iced_palette = IcedPalette {
        background: palette.background,
        text: palette.text_primary,
        primary: palette.primary,
        success: palette.success,
        danger: palette.error,
    };

    Theme::custom(name.to_string(), iced_palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_names() {
        assert_eq!(ThemeMode::from_name("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_name(" Light "), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_name("solarized"), None);
        assert_eq!(ThemeMode::Light.name(), "light");
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn test_default_theme_mode_is_dark() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn test_theme_mode_serialization() {
        let json = serde_json::to_string(&ThemeMode::Light).unwrap();
        assert_eq!(json, "\"light\"");
        let parsed: ThemeMode = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(parsed, ThemeMode::Dark);
    }

    #[test]
    fn test_create_theme_uses_palette() {
        let theme = create_theme(ThemeMode::Light);
        assert_eq!(theme.palette().background, Palette::light().background);
    }
}
