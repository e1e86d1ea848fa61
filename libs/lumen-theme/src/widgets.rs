//! Styled widget helpers for the Lumen shell

pub mod button;
pub mod card;
pub mod input;
pub mod panel;

pub use button::*;
pub use card::*;
pub use input::*;
pub use panel::*;
