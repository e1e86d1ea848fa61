//! Text field style for dialogs

use crate::colors::{with_alpha, LumenColors, Palette};
use crate::spacing::Spacing;
use iced::widget::text_input::{Status, Style};
use iced::{Background, Border};

/// Dialog text field, tinted from the active palette
pub fn input_style(palette: Palette) -> impl Fn(&iced::Theme, Status) -> Style {
    move |_theme, status| {
        let border_color = match status {
            Status::Focused => palette.primary,
            Status::Hovered => palette.hover,
            Status::Active | Status::Disabled => palette.border,
        };

        Style {
            background: Background::Color(LumenColors::WIDGET_BG),
            border: Border {
                color: border_color,
                width: if matches!(status, Status::Focused) { 2.0 } else { 1.0 },
                radius: Spacing::RADIUS_SM.into(),
            },
            icon: LumenColors::TEXT_DIM,
            placeholder: LumenColors::TEXT_MUTED,
            value: LumenColors::TEXT_BRIGHT,
            selection: with_alpha(palette.primary, 0.3),
        }
    }
}
