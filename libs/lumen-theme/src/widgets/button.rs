//! Button styles for the Lumen desktop

use crate::colors::{with_alpha, LumenColors, Palette};
use crate::spacing::Spacing;
use iced::widget::button::{Status, Style};
use iced::{Background, Border, Color, Shadow, Vector};

/// Button variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Primary action button (filled with the palette primary)
    #[default]
    Primary,
    /// Secondary button (dialog cancel)
    Secondary,
    /// Taskbar start button
    Start,
    /// Context and start menu entries
    Menu,
    /// Power options in the start menu strip
    Power,
}

/// Create a button style function for the given variant
pub fn button_style(
    variant: ButtonVariant,
    palette: Palette,
) -> impl Fn(&iced::Theme, Status) -> Style {
    move |_theme, status| match variant {
        ButtonVariant::Primary => primary_style(&palette, status),
        ButtonVariant::Secondary => secondary_style(&palette, status),
        ButtonVariant::Start => start_style(&palette, status),
        ButtonVariant::Menu => menu_style(&palette, status),
        ButtonVariant::Power => power_style(&palette, status),
    }
}

fn primary_style(palette: &Palette, status: Status) -> Style {
    let background = match status {
        Status::Active => palette.primary,
        Status::Hovered => crate::colors::lighten(palette.primary, 0.08),
        Status::Pressed => crate::colors::darken(palette.primary, 0.08),
        Status::Disabled => with_alpha(palette.primary, 0.4),
    };

    Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: Spacing::RADIUS_SM.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 4.0,
        },
    }
}

fn secondary_style(palette: &Palette, status: Status) -> Style {
    let background = match status {
        Status::Active => palette.secondary,
        Status::Hovered => palette.hover,
        Status::Pressed => palette.active,
        Status::Disabled => with_alpha(palette.secondary, 0.5),
    };

    Style {
        background: Some(Background::Color(background)),
        text_color: palette.text_primary,
        border: Border {
            color: palette.border,
            width: 1.0,
            radius: Spacing::RADIUS_SM.into(),
        },
        shadow: Shadow::default(),
    }
}

fn start_style(palette: &Palette, status: Status) -> Style {
    let background = match status {
        Status::Hovered | Status::Pressed => palette.primary,
        Status::Active | Status::Disabled => LumenColors::TRANSPARENT,
    };

    Style {
        background: Some(Background::Color(background)),
        text_color: LumenColors::TEXT_BRIGHT,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: Spacing::RADIUS_SM.into(),
        },
        shadow: Shadow::default(),
    }
}

fn menu_style(palette: &Palette, status: Status) -> Style {
    let background = match status {
        Status::Hovered => palette.primary,
        Status::Pressed => crate::colors::darken(palette.primary, 0.08),
        Status::Active | Status::Disabled => LumenColors::TRANSPARENT,
    };
    let text_color = match status {
        Status::Disabled => LumenColors::TEXT_MUTED,
        _ => LumenColors::TEXT_BRIGHT,
    };

    Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: Spacing::RADIUS_SM.into(),
        },
        shadow: Shadow::default(),
    }
}

fn power_style(palette: &Palette, status: Status) -> Style {
    let background = match status {
        Status::Hovered => palette.hover,
        Status::Pressed => palette.active,
        Status::Active | Status::Disabled => LumenColors::TRANSPARENT,
    };

    Style {
        background: Some(Background::Color(background)),
        text_color: palette.text_primary,
        border: Border::default(),
        shadow: Shadow::default(),
    }
}
