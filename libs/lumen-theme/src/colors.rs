//! Color definitions for the Lumen desktop
//!
//! Two fixed palettes (dark and light) plus the handful of widget colors the
//! desktop cards, menus and usage bars use regardless of palette.

use iced::Color;

/// A complete color palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Primary brand color (start button, selected items)
    pub primary: Color,
    /// Secondary surface (buttons, menus)
    pub secondary: Color,
    /// Window background
    pub background: Color,
    /// Cards and inputs
    pub surface: Color,

    /// Primary text color
    pub text_primary: Color,
    /// Secondary/muted text
    pub text_secondary: Color,

    /// Error/danger color
    pub error: Color,
    /// Success color
    pub success: Color,

    /// Border color
    pub border: Color,
    /// Hover state background
    pub hover: Color,
    /// Pressed/active state background
    pub active: Color,
}

/// Lumen color constants
pub struct LumenColors;

impl LumenColors {
    // ═══════════════════════════════════════════════════════════════════════════
    // DESKTOP WIDGETS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Resting background of desktop cards, dock and taskbar (#1a1a1a)
    pub const WIDGET_BG: Color = Color::from_rgb(0.102, 0.102, 0.102);
    /// Menus, dialogs and tooltips (#2d2d2d)
    pub const MENU_BG: Color = Color::from_rgb(0.176, 0.176, 0.176);
    /// Hovered dock icon (#3d3d3d)
    pub const DOCK_HOVER: Color = Color::from_rgb(0.239, 0.239, 0.239);

    /// Bright label text
    pub const TEXT_BRIGHT: Color = Color::WHITE;
    /// Secondary label text (#cccccc)
    pub const TEXT_DIM: Color = Color::from_rgb(0.800, 0.800, 0.800);
    /// Captions (#999999)
    pub const TEXT_MUTED: Color = Color::from_rgb(0.600, 0.600, 0.600);

    // ═══════════════════════════════════════════════════════════════════════════
    // USAGE BARS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Bar trough (#333333)
    pub const BAR_TROUGH: Color = Color::from_rgb(0.200, 0.200, 0.200);
    /// Normal usage (#4caf50)
    pub const BAND_GREEN: Color = Color::from_rgb(0.298, 0.686, 0.314);
    /// Elevated usage (#ff9800)
    pub const BAND_AMBER: Color = Color::from_rgb(1.0, 0.596, 0.0);
    /// Critical usage (#f44336)
    pub const BAND_RED: Color = Color::from_rgb(0.957, 0.263, 0.212);

    // ═══════════════════════════════════════════════════════════════════════════
    // BACKGROUNDS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Solid fill when a wallpaper cannot be decoded (#1a1a1a)
    pub const FALLBACK_SOLID: Color = Color::from_rgb(0.102, 0.102, 0.102);
    /// Top stop of the synthesized wallpaper gradient
    pub const GRADIENT_TOP: Color = Color::from_rgb(0.059, 0.125, 0.235);
    /// Bottom stop of the synthesized wallpaper gradient
    pub const GRADIENT_BOTTOM: Color = Color::from_rgb(0.012, 0.020, 0.047);

    /// Error text on the bootstrap failure screen
    pub const ERROR_TEXT: Color = Color::from_rgb(1.0, 0.333, 0.333);

    /// Transparent
    pub const TRANSPARENT: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.0);
}

impl Palette {
    /// Dark palette (default)
    pub fn dark() -> Self {
        Self {
            primary: hex("#1a73e8"),
            secondary: hex("#2d2d2d"),
            background: hex("#1a1a1a"),
            surface: hex("#252525"),
            text_primary: hex("#ffffff"),
            text_secondary: hex("#b3b3b3"),
            error: hex("#cf6679"),
            success: hex("#4caf50"),
            border: hex("#3d3d3d"),
            hover: hex("#3d3d3d"),
            active: hex("#4d4d4d"),
        }
    }

    /// Light palette
    pub fn light() -> Self {
        Self {
            primary: hex("#1976d2"),
            secondary: hex("#f5f5f5"),
            background: hex("#ffffff"),
            surface: hex("#f0f0f0"),
            text_primary: hex("#212121"),
            text_secondary: hex("#666666"),
            error: hex("#d32f2f"),
            success: hex("#388e3c"),
            border: hex("#e0e0e0"),
            hover: hex("#e0e0e0"),
            active: hex("#d0d0d0"),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

// Palette tables are literals; a typo falls back to magenta so it is visible.
fn hex(value: &str) -> Color {
    crate::animation::hex_to_rgb(value)
        .map(Color::from)
        .unwrap_or(Color::from_rgb(1.0, 0.0, 1.0))
}

/// Lighten a color by a fixed amount per channel
pub fn lighten(color: Color, amount: f32) -> Color {
    Color::from_rgba(
        (color.r + amount).min(1.0),
        (color.g + amount).min(1.0),
        (color.b + amount).min(1.0),
        color.a,
    )
}

/// Darken a color by a fixed amount per channel
pub fn darken(color: Color, amount: f32) -> Color {
    Color::from_rgba(
        (color.r - amount).max(0.0),
        (color.g - amount).max(0.0),
        (color.b - amount).max(0.0),
        color.a,
    )
}

/// Adjust alpha of a color
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::from_rgba(color.r, color.g, color.b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_palette_has_dark_background() {
        let palette = Palette::dark();
        assert!(palette.background.r < 0.2);
        assert!(palette.background.g < 0.2);
        assert!(palette.background.b < 0.2);
    }

    #[test]
    fn test_light_palette_has_light_background() {
        let palette = Palette::light();
        assert!(palette.background.r > 0.9);
        assert!(palette.text_primary.r < 0.2);
    }

    #[test]
    fn test_palette_tables_parse() {
        let magenta = Color::from_rgb(1.0, 0.0, 1.0);
        for palette in [Palette::dark(), Palette::light()] {
            for color in [
                palette.primary,
                palette.secondary,
                palette.background,
                palette.surface,
                palette.text_primary,
                palette.text_secondary,
                palette.error,
                palette.success,
                palette.border,
                palette.hover,
                palette.active,
            ] {
                assert_ne!(color, magenta);
            }
        }
    }

    #[test]
    fn test_palette_hex_values() {
        assert_eq!(Palette::dark().primary, Color::from_rgb8(0x1a, 0x73, 0xe8));
        assert_eq!(Palette::light().text_primary, Color::from_rgb8(0x21, 0x21, 0x21));
        assert_eq!(hex("#zzzzzz"), Color::from_rgb(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_band_colors_are_appropriate() {
        assert!(LumenColors::BAND_GREEN.g > LumenColors::BAND_GREEN.r);
        assert!(LumenColors::BAND_RED.r > LumenColors::BAND_RED.g);
        assert!(LumenColors::BAND_AMBER.r > 0.9);
        assert!(LumenColors::BAND_AMBER.g > 0.5);
    }

    #[test]
    fn test_lighten_clamps_at_max() {
        let lighter = lighten(Color::from_rgb(0.95, 0.95, 0.95), 0.2);
        assert!((lighter.r - 1.0).abs() < 0.001);
        assert!((lighter.b - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_darken_clamps_at_min() {
        let darker = darken(Color::from_rgb(0.05, 0.05, 0.05), 0.2);
        assert!(darker.r.abs() < 0.001);
        assert!(darker.g.abs() < 0.001);
    }

    #[test]
    fn test_with_alpha_preserves_rgb() {
        let color = Color::from_rgb(0.5, 0.6, 0.7);
        let faded = with_alpha(color, 0.5);
        assert!((faded.g - color.g).abs() < 0.001);
        assert!((faded.a - 0.5).abs() < 0.001);
    }
}
