//! Desktop clock widget

use crate::app::desktop_card;
use crate::messages::{AnimKey, HoverTarget, MenuKind, Message};
use chrono::{DateTime, Local, TimeZone};
use iced::widget::{column, text};
use iced::Element;
use lumen_theme::{Animator, Palette, Spacing, Typography};
use std::fmt::Display;

/// `HH:MM:SS`
pub fn format_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%H:%M:%S").to_string()
}

/// `Weekday, Month DD, YYYY`
pub fn format_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%A, %B %d, %Y").to_string()
}

/// `HH:MM`, shown in the taskbar tray
pub fn format_tray<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%H:%M").to_string()
}

/// Clock widget state
#[derive(Debug, Clone)]
pub struct Clock {
    time: String,
    date: String,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        let mut clock = Self {
            time: String::new(),
            date: String::new(),
        };
        clock.tick();
        clock
    }

    /// Read the wall clock
    pub fn tick(&mut self) {
        self.set(&Local::now());
    }

    pub fn set<Tz: TimeZone>(&mut self, now: &DateTime<Tz>)
    where
        Tz::Offset: Display,
    {
        self.time = format_time(now);
        self.date = format_date(now);
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn view<'a>(&'a self, palette: Palette, animator: &Animator<AnimKey>) -> Element<'a, Message> {
        let content = column![
            text(&self.time)
                .size(Typography::SIZE_CLOCK)
                .font(Typography::BOLD)
                .color(palette.text_primary),
            text(&self.date)
                .size(Typography::SIZE_BODY)
                .color(palette.text_secondary),
        ]
        .spacing(Spacing::XS);

        desktop_card(content, palette, HoverTarget::Clock, MenuKind::Clock, animator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn moment() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap()
    }

    #[test]
    fn test_time_is_zero_padded_24h() {
        assert_eq!(format_time(&moment()), "07:05:03");
        assert_eq!(format_tray(&moment()), "07:05");
    }

    #[test]
    fn test_date_is_spelled_out() {
        assert_eq!(format_date(&moment()), "Saturday, March 09, 2024");
    }

    #[test]
    fn test_set_updates_both_lines() {
        let mut clock = Clock::new();
        clock.set(&moment());
        assert_eq!(clock.time(), "07:05:03");
        assert_eq!(clock.date(), "Saturday, March 09, 2024");
    }
}
