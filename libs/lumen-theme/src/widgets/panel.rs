//! Taskbar, dock and menu styles

use crate::colors::{LumenColors, Palette};
use crate::spacing::Spacing;
use iced::widget::container::Style;
use iced::{Background, Border, Color, Shadow, Vector};

/// Taskbar along the bottom edge
pub fn taskbar_style() -> impl Fn(&iced::Theme) -> Style {
    |_theme| Style {
        background: Some(Background::Color(LumenColors::WIDGET_BG)),
        text_color: Some(LumenColors::TEXT_BRIGHT),
        border: Border::default(),
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
            offset: Vector::new(0.0, -2.0),
            blur_radius: 8.0,
        },
    }
}

/// Launcher dock
pub fn dock_style() -> impl Fn(&iced::Theme) -> Style {
    |_theme| Style {
        background: Some(Background::Color(LumenColors::WIDGET_BG)),
        text_color: Some(LumenColors::TEXT_BRIGHT),
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.08),
            width: 1.0,
            radius: Spacing::RADIUS_LG.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 16.0,
        },
    }
}

/// Dock icon tile; the background follows the hover tween
pub fn dock_item_style(background: Color) -> impl Fn(&iced::Theme) -> Style {
    move |_theme| Style {
        background: Some(Background::Color(background)),
        text_color: Some(LumenColors::TEXT_BRIGHT),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: Spacing::RADIUS_MD.into(),
        },
        shadow: Shadow::default(),
    }
}

/// Context menu and start menu body
pub fn popover_style(palette: Palette) -> impl Fn(&iced::Theme) -> Style {
    move |_theme| Style {
        background: Some(Background::Color(LumenColors::MENU_BG)),
        text_color: Some(LumenColors::TEXT_BRIGHT),
        border: Border {
            color: palette.border,
            width: 1.0,
            radius: Spacing::RADIUS_MD.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 12.0,
        },
    }
}

/// Start menu header strip
pub fn start_header_style(palette: Palette) -> impl Fn(&iced::Theme) -> Style {
    move |_theme| Style {
        background: Some(Background::Color(palette.primary)),
        text_color: Some(LumenColors::TEXT_BRIGHT),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: Spacing::RADIUS_MD.into(),
        },
        shadow: Shadow::default(),
    }
}

/// Power strip at the foot of the start menu
pub fn power_strip_style(palette: Palette) -> impl Fn(&iced::Theme) -> Style {
    move |_theme| Style {
        background: Some(Background::Color(palette.secondary)),
        text_color: Some(palette.text_primary),
        ..Style::default()
    }
}

/// Horizontal separator between menu groups
pub fn separator_style(palette: Palette) -> impl Fn(&iced::Theme) -> Style {
    move |_theme| Style {
        background: Some(Background::Color(palette.border)),
        ..Style::default()
    }
}
