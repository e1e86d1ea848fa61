//! Modal dialogs: add application, change location, change wallpaper

use crate::dock::{self, LauncherEntry, DEFAULT_ICON};
use crate::messages::{DialogField, DialogMessage, Message};
use iced::widget::{button, column, container, row, text, text_input, Column, Space};
use iced::{Alignment, Element, Length};
use lumen_theme::widgets::button::{button_style, ButtonVariant};
use lumen_theme::widgets::card::dialog_style;
use lumen_theme::widgets::input::input_style;
use lumen_theme::widgets::panel::dock_item_style;
use lumen_theme::{LumenColors, Palette, Spacing, Typography};
use std::path::PathBuf;

/// An open dialog and its field contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    AddApplication {
        name: String,
        command: String,
        icon: String,
        error: Option<String>,
    },
    ChangeLocation {
        city: String,
    },
    ChangeWallpaper {
        path: String,
        error: Option<String>,
    },
}

/// Validated dialog result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    AddApplication(LauncherEntry),
    ChangeLocation(String),
    ChangeWallpaper(PathBuf),
}

impl Dialog {
    pub fn add_application() -> Self {
        Dialog::AddApplication {
            name: String::new(),
            command: String::new(),
            icon: DEFAULT_ICON.to_string(),
            error: None,
        }
    }

    pub fn change_location(current: &str) -> Self {
        Dialog::ChangeLocation {
            city: current.to_string(),
        }
    }

    pub fn change_wallpaper(current: &str) -> Self {
        Dialog::ChangeWallpaper {
            path: current.to_string(),
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Dialog::AddApplication { .. } => "Add Application",
            Dialog::ChangeLocation { .. } => "Change Location",
            Dialog::ChangeWallpaper { .. } => "Change Wallpaper",
        }
    }

    /// Replace the contents of `field`; fields the dialog lacks are ignored
    pub fn edit(&mut self, field: DialogField, value: String) {
        match (self, field) {
            (Dialog::AddApplication { name, error, .. }, DialogField::Name) => {
                *name = value;
                *error = None;
            }
            (Dialog::AddApplication { command, error, .. }, DialogField::Command) => {
                *command = value;
                *error = None;
            }
            (Dialog::AddApplication { icon, .. }, DialogField::Icon) => *icon = value,
            (Dialog::ChangeLocation { city }, DialogField::City) => *city = value,
            (Dialog::ChangeWallpaper { path, error }, DialogField::Path) => {
                *path = value;
                *error = None;
            }
            _ => {}
        }
    }

    /// Validate the fields. On failure the dialog stays open, showing why.
    pub fn submit(&mut self) -> Option<Submission> {
        match self {
            Dialog::AddApplication {
                name,
                command,
                icon,
                error,
            } => match LauncherEntry::new(name, command, icon) {
                Ok(entry) => Some(Submission::AddApplication(entry)),
                Err(e) => {
                    *error = Some(e.to_string());
                    None
                }
            },
            Dialog::ChangeLocation { city } => {
                let city = city.trim();
                (!city.is_empty()).then(|| Submission::ChangeLocation(city.to_string()))
            }
            Dialog::ChangeWallpaper { path, error } => {
                let trimmed = path.trim();
                if trimmed.is_empty() {
                    *error = Some("enter an image path".to_string());
                    return None;
                }
                let candidate = PathBuf::from(trimmed);
                if !candidate.is_file() {
                    *error = Some(format!("{} does not exist", candidate.display()));
                    return None;
                }
                Some(Submission::ChangeWallpaper(candidate))
            }
        }
    }

    pub fn view(&self, palette: Palette) -> Element<'_, Message> {
        let mut body = Column::new().spacing(Spacing::SM).push(
            text(self.title())
                .size(Typography::SIZE_TEMPERATURE)
                .font(Typography::BOLD)
                .color(LumenColors::TEXT_BRIGHT),
        );

        let (confirm, error) = match self {
            Dialog::AddApplication {
                name,
                command,
                icon,
                error,
            } => {
                body = body
                    .push(field("Name:", "Application name", name, DialogField::Name, palette))
                    .push(field("Command:", "Command line", command, DialogField::Command, palette))
                    .push(field(
                        "Icon (emoji or filename):",
                        DEFAULT_ICON,
                        icon,
                        DialogField::Icon,
                        palette,
                    ))
                    .push(
                        column![
                            text("Preview:").size(Typography::SIZE_LABEL),
                            container(dock::icon_view(icon, Spacing::DOCK_ICON_SIZE - Spacing::SM))
                                .center(Length::Fixed(Spacing::DOCK_ICON_SIZE))
                                .style(dock_item_style(LumenColors::DOCK_HOVER)),
                        ]
                        .spacing(Spacing::XS)
                        .align_x(Alignment::Center)
                        .width(Length::Fill),
                    );
                ("Add", error.as_deref())
            }
            Dialog::ChangeLocation { city } => {
                body = body.push(field("Enter city name:", "City", city, DialogField::City, palette));
                ("Save", None)
            }
            Dialog::ChangeWallpaper { path, error } => {
                body = body.push(field(
                    "Image file:",
                    "/path/to/wallpaper.jpg",
                    path,
                    DialogField::Path,
                    palette,
                ));
                ("Apply", error.as_deref())
            }
        };

        if let Some(error) = error {
            body = body.push(text(error).size(Typography::SIZE_LABEL).color(palette.error));
        }

        body = body.push(
            row![
                Space::with_width(Length::Fill),
                button(text("Cancel"))
                    .style(button_style(ButtonVariant::Secondary, palette))
                    .on_press(Message::Dialog(DialogMessage::Cancel)),
                button(text(confirm))
                    .style(button_style(ButtonVariant::Primary, palette))
                    .on_press(Message::Dialog(DialogMessage::Submit)),
            ]
            .spacing(Spacing::SM),
        );

        container(body)
            .width(Length::Fixed(Spacing::DIALOG_WIDTH))
            .padding(Spacing::XL)
            .style(dialog_style(palette))
            .into()
    }
}

fn field<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    target: DialogField,
    palette: Palette,
) -> Element<'a, Message> {
    column![
        text(label).size(Typography::SIZE_LABEL).color(LumenColors::TEXT_BRIGHT),
        text_input(placeholder, value)
            .on_input(move |value| Message::Dialog(DialogMessage::Edited(target, value)))
            .on_submit(Message::Dialog(DialogMessage::Submit))
            .padding(Spacing::SM)
            .style(input_style(palette)),
    ]
    .spacing(Spacing::XXS)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_application_requires_name_and_command() {
        let mut dialog = Dialog::add_application();
        assert!(dialog.submit().is_none());
        assert!(matches!(&dialog, Dialog::AddApplication { error: Some(_), .. }));

        dialog.edit(DialogField::Name, "Top".to_string());
        assert!(matches!(&dialog, Dialog::AddApplication { error: None, .. }));
        dialog.edit(DialogField::Command, "  top ".to_string());
        dialog.edit(DialogField::Icon, "📈".to_string());

        assert_eq!(
            dialog.submit(),
            Some(Submission::AddApplication(LauncherEntry {
                name: "Top".to_string(),
                icon: "📈".to_string(),
                command: "top".to_string(),
            }))
        );
    }

    #[test]
    fn test_blank_city_keeps_dialog_open() {
        let mut dialog = Dialog::change_location("New York");
        dialog.edit(DialogField::City, "   ".to_string());
        assert!(dialog.submit().is_none());

        dialog.edit(DialogField::City, " Oslo ".to_string());
        assert_eq!(dialog.submit(), Some(Submission::ChangeLocation("Oslo".to_string())));
    }

    #[test]
    fn test_wallpaper_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let mut dialog = Dialog::change_wallpaper("");
        dialog.edit(
            DialogField::Path,
            dir.path().join("missing.jpg").display().to_string(),
        );
        assert!(dialog.submit().is_none());

        let path = dir.path().join("present.jpg");
        std::fs::write(&path, b"jpeg").unwrap();
        dialog.edit(DialogField::Path, path.display().to_string());
        assert_eq!(dialog.submit(), Some(Submission::ChangeWallpaper(path)));
    }

    #[test]
    fn test_foreign_fields_are_ignored() {
        let mut dialog = Dialog::change_location("Paris");
        dialog.edit(DialogField::Command, "rm -rf /".to_string());
        assert_eq!(dialog, Dialog::change_location("Paris"));
    }
}
