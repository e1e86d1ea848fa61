//! Typography for the Lumen desktop

use iced::font::{Family, Weight};
use iced::Font;

/// Font sizes and faces used by the shell
#[derive(Debug, Clone, Copy)]
pub struct Typography;

impl Typography {
    /// Clock face
    pub const SIZE_CLOCK: f32 = 32.0;
    /// Weather temperature
    pub const SIZE_TEMPERATURE: f32 = 21.0;
    /// Card titles and menu entries
    pub const SIZE_TITLE: f32 = 13.0;
    /// Secondary lines (date, description)
    pub const SIZE_BODY: f32 = 13.0;
    /// Metric labels and values
    pub const SIZE_LABEL: f32 = 12.0;
    /// Captions (location, system summary)
    pub const SIZE_CAPTION: f32 = 11.0;

    /// Bold sans-serif for headline numbers
    pub const BOLD: Font = Font {
        family: Family::SansSerif,
        weight: Weight::Bold,
        stretch: iced::font::Stretch::Normal,
        style: iced::font::Style::Normal,
    };

    /// Monospace for error traces
    pub const CODE: Font = Font {
        family: Family::Monospace,
        weight: Weight::Normal,
        stretch: iced::font::Stretch::Normal,
        style: iced::font::Style::Normal,
    };
}
