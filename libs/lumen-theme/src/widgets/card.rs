//! Card and overlay container styles

use crate::colors::{with_alpha, LumenColors, Palette};
use crate::spacing::Spacing;
use iced::widget::container::Style;
use iced::{Background, Border, Color, Shadow, Vector};

/// Desktop widget card.
///
/// The background is supplied by the caller so the hover color tween can
/// drive it frame by frame.
pub fn card_style(palette: Palette, background: Color) -> impl Fn(&iced::Theme) -> Style {
    move |_theme| Style {
        background: Some(Background::Color(background)),
        text_color: Some(palette.text_primary),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: Spacing::RADIUS_MD.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
    }
}

/// Modal dialog container
pub fn dialog_style(palette: Palette) -> impl Fn(&iced::Theme) -> Style {
    move |_theme| Style {
        background: Some(Background::Color(LumenColors::MENU_BG)),
        text_color: Some(LumenColors::TEXT_BRIGHT),
        border: Border {
            color: palette.border,
            width: 1.0,
            radius: Spacing::RADIUS_LG.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            offset: Vector::new(0.0, 8.0),
            blur_radius: 24.0,
        },
    }
}

/// Tooltip container
pub fn tooltip_style() -> impl Fn(&iced::Theme) -> Style {
    |_theme| Style {
        background: Some(Background::Color(LumenColors::MENU_BG)),
        text_color: Some(LumenColors::TEXT_BRIGHT),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: Spacing::RADIUS_SM.into(),
        },
        shadow: Shadow::default(),
    }
}

/// Dimmed backdrop behind dialogs and the whole-window fade.
pub fn scrim_style(alpha: f32) -> impl Fn(&iced::Theme) -> Style {
    move |_theme| Style {
        background: Some(Background::Color(with_alpha(Color::BLACK, alpha.clamp(0.0, 1.0)))),
        ..Style::default()
    }
}

/// Flat fill, used for the wallpaper fallback and usage bar segments
pub fn fill_style(color: Color) -> impl Fn(&iced::Theme) -> Style {
    move |_theme| Style {
        background: Some(Background::Color(color)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 2.0.into(),
        },
        ..Style::default()
    }
}

/// Error screen shown when the desktop could not be built
pub fn error_screen_style() -> impl Fn(&iced::Theme) -> Style {
    |_theme| Style {
        background: Some(Background::Color(LumenColors::FALLBACK_SOLID)),
        text_color: Some(LumenColors::ERROR_TEXT),
        ..Style::default()
    }
}
