//! # Lumen Theme
//!
//! Design system for the Lumen desktop shell.
//!
//! This library provides:
//! - Color palettes (dark/light)
//! - Typography and spacing constants
//! - Container, button and input styles
//! - Eased animations driven by the shell's timers

pub mod animation;
pub mod colors;
pub mod fonts;
pub mod spacing;
pub mod theme;
pub mod widgets;

pub use animation::{
    Animation, Animator, ColorTween, Easing, Rgb, SlideFrom, Token, Tween, Value,
};
pub use colors::{LumenColors, Palette};
pub use fonts::Typography;
pub use spacing::Spacing;
pub use theme::ThemeMode;

use iced::Theme;

/// Get the iced theme for a mode
pub fn lumen_theme(mode: ThemeMode) -> Theme {
    theme::create_theme(mode)
}
