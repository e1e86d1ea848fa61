//! Taskbar and start menu for Lumen Shell

use crate::clock::format_tray;
use crate::dock::{self, LauncherEntry};
use crate::messages::{MenuAction, Message, TaskbarMessage};
use chrono::Local;
use iced::widget::{button, column, container, horizontal_space, row, text, tooltip, Column};
use iced::{Alignment, Element, Length, Padding};
use lumen_theme::widgets::button::{button_style, ButtonVariant};
use lumen_theme::widgets::card::tooltip_style;
use lumen_theme::widgets::panel::{popover_style, power_strip_style, start_header_style, taskbar_style};
use lumen_theme::{LumenColors, Palette, Spacing, Typography};
use sysinfo::System;

/// Taskbar state
pub struct Taskbar {
    /// Start menu open
    start_open: bool,
    /// Tray clock text
    tray_time: String,
    /// `user@host` shown in the start menu header
    user: String,
    account: String,
}

impl Default for Taskbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Taskbar {
    pub fn new() -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "User".to_string());
        let host = System::host_name().unwrap_or_else(|| "lumen".to_string());

        Self {
            start_open: false,
            tray_time: format_tray(&Local::now()),
            account: format!("{}@{}", user, host),
            user,
        }
    }

    /// Refresh the tray clock
    pub fn tick(&mut self) {
        self.tray_time = format_tray(&Local::now());
    }

    pub fn toggle_start(&mut self) {
        self.start_open = !self.start_open;
    }

    /// Close the start menu; returns whether it was open
    pub fn close_start(&mut self) -> bool {
        std::mem::replace(&mut self.start_open, false)
    }

    pub fn is_start_open(&self) -> bool {
        self.start_open
    }

    /// Render the bar itself
    pub fn view(&self, palette: Palette) -> Element<'_, Message> {
        let start = button(text("Lumen").size(Typography::SIZE_TITLE).font(Typography::BOLD))
            .height(Length::Fill)
            .padding(Padding::from([0.0, Spacing::LG]))
            .style(button_style(ButtonVariant::Start, palette))
            .on_press(Message::Taskbar(TaskbarMessage::StartClicked));

        let tray = container(
            text(&self.tray_time)
                .size(Typography::SIZE_LABEL)
                .color(LumenColors::TEXT_BRIGHT),
        )
        .padding(Padding::from([0.0, Spacing::SM]));

        container(
            row![start, horizontal_space(), tray]
                .align_y(Alignment::Center)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fixed(Spacing::TASKBAR_HEIGHT))
        .style(taskbar_style())
        .into()
    }

    /// Render the start menu: header, launcher entries, power strip
    pub fn start_menu<'a>(&'a self, entries: &'a [LauncherEntry], palette: Palette) -> Element<'a, Message> {
        let header = container(
            row![
                text("👤").size(Typography::SIZE_CLOCK * 0.75),
                column![
                    text(&self.user).size(Typography::SIZE_TITLE),
                    text(&self.account)
                        .size(Typography::SIZE_CAPTION)
                        .color(LumenColors::TEXT_DIM),
                ],
            ]
            .spacing(Spacing::SM)
            .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Spacing::MD)
        .style(start_header_style(palette));

        let apps = Column::with_children(entries.iter().enumerate().map(|(index, entry)| {
            button(
                row![
                    dock::icon_view(&entry.icon, Spacing::LG * 1.5),
                    text(&entry.name).size(Typography::SIZE_TITLE),
                ]
                .spacing(Spacing::SM)
                .align_y(Alignment::Center),
            )
            .width(Length::Fill)
            .padding(Padding::from([Spacing::SM, Spacing::MD]))
            .style(button_style(ButtonVariant::Menu, palette))
            .on_press(Message::Taskbar(TaskbarMessage::Launch(index)))
            .into()
        }))
        .spacing(Spacing::XXS)
        .padding(Spacing::XS)
        .height(Length::Fill);

        let power = container(
            row![
                power_button("🔒", "Lock", MenuAction::Lock, palette),
                power_button("👤", "Sign out", MenuAction::SignOut, palette),
                power_button("⏻", "Power", MenuAction::ShutDown, palette),
            ]
            .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fixed(Spacing::TASKBAR_HEIGHT))
        .style(power_strip_style(palette));

        container(column![header, apps, power])
            .width(Length::Fixed(Spacing::START_MENU_WIDTH))
            .height(Length::Fixed(Spacing::START_MENU_HEIGHT))
            .style(popover_style(palette))
            .clip(true)
            .into()
    }
}

fn power_button<'a>(
    icon: &'a str,
    label: &'a str,
    action: MenuAction,
    palette: Palette,
) -> Element<'a, Message> {
    tooltip(
        button(text(icon).size(Typography::SIZE_TEMPERATURE * 0.75))
            .height(Length::Fill)
            .padding(Padding::from([0.0, Spacing::MD]))
            .style(button_style(ButtonVariant::Power, palette))
            .on_press(Message::Menu(action)),
        container(text(label).size(Typography::SIZE_LABEL))
            .padding(Padding::from([Spacing::XXS, Spacing::XS]))
            .style(tooltip_style()),
        tooltip::Position::Top,
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_menu_toggles() {
        let mut taskbar = Taskbar::new();
        assert!(!taskbar.is_start_open());

        taskbar.toggle_start();
        assert!(taskbar.is_start_open());
        assert!(taskbar.close_start());
        assert!(!taskbar.close_start());
    }

    #[test]
    fn test_tray_time_is_hours_and_minutes() {
        let taskbar = Taskbar::new();
        assert_eq!(taskbar.tray_time.len(), 5);
        assert_eq!(taskbar.tray_time.as_bytes()[2], b':');
        assert!(taskbar.account.contains('@'));
    }
}
