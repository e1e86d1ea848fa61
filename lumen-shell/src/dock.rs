//! Launcher dock for Lumen Shell

use crate::error::LauncherError;
use crate::messages::{AnimKey, DockMessage, HoverTarget, MenuKind, Message};
use iced::widget::{container, image, mouse_area, text, tooltip, Row};
use iced::{mouse, Alignment, Color, Element, Length, Padding, Task};
use lumen_theme::spacing::Spacing;
use lumen_theme::widgets::card::tooltip_style;
use lumen_theme::widgets::panel::{dock_item_style, dock_style};
use lumen_theme::{Animator, LumenColors, Typography};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// Glyph used when an entry has no icon
pub const DEFAULT_ICON: &str = "📁";

/// Application in the dock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherEntry {
    /// Display name
    pub name: String,
    /// Glyph, or path to an image file
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Shell command line
    #[serde(default)]
    pub command: String,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl LauncherEntry {
    /// Build an entry from user input. Name and command are required; a
    /// blank icon falls back to the folder glyph.
    pub fn new(name: &str, command: &str, icon: &str) -> Result<Self, LauncherError> {
        let name = name.trim();
        let command = command.trim();
        let icon = icon.trim();

        if name.is_empty() {
            return Err(LauncherError::MissingField("name"));
        }
        if command.is_empty() {
            return Err(LauncherError::MissingField("command"));
        }

        Ok(Self {
            name: name.to_string(),
            icon: if icon.is_empty() { default_icon() } else { icon.to_string() },
            command: command.to_string(),
        })
    }

    fn preset(name: &str, icon: &str, command: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            command: command.to_string(),
        }
    }
}

/// Entries installed when the launcher file is missing or empty
pub fn default_entries() -> Vec<LauncherEntry> {
    if cfg!(windows) {
        vec![
            LauncherEntry::preset("File Explorer", "📁", "explorer"),
            LauncherEntry::preset("Web Browser", "🌐", "start msedge"),
            LauncherEntry::preset("Text Editor", "📝", "notepad"),
            LauncherEntry::preset("Terminal", "💻", "cmd"),
            LauncherEntry::preset("Calculator", "🧮", "calc"),
            LauncherEntry::preset("Settings", "⚙️", "start ms-settings:"),
        ]
    } else {
        vec![
            LauncherEntry::preset("File Explorer", "📁", "xdg-open ~"),
            LauncherEntry::preset("Web Browser", "🌐", "xdg-open https://"),
            LauncherEntry::preset("Text Editor", "📝", "gedit"),
            LauncherEntry::preset("Terminal", "💻", "x-terminal-emulator"),
            LauncherEntry::preset("Calculator", "🧮", "gnome-calculator"),
            LauncherEntry::preset("Settings", "⚙️", "gnome-control-center"),
        ]
    }
}

/// Ordered launcher entries backed by `apps.json`
#[derive(Debug)]
pub struct Launcher {
    path: PathBuf,
    entries: Vec<LauncherEntry>,
}

impl Launcher {
    /// Load entries from `path`. A missing or empty file gets the default
    /// entries written to it; a malformed one is left alone and the defaults
    /// are used in memory.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match Self::read(&path) {
            Ok(Some(entries)) if !entries.is_empty() => entries,
            Ok(_) => {
                let launcher = Self {
                    path,
                    entries: default_entries(),
                };
                if let Err(e) = launcher.save() {
                    tracing::warn!("Failed to write default launcher entries: {}", e);
                }
                return launcher;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                default_entries()
            }
        };

        Self { path, entries }
    }

    /// `Ok(None)` when the file does not exist or holds only whitespace
    fn read(path: &Path) -> Result<Option<Vec<LauncherEntry>>, LauncherError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| LauncherError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| LauncherError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Write all entries as pretty JSON
    pub fn save(&self) -> Result<(), LauncherError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LauncherError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content).map_err(|source| LauncherError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Re-read the file, keeping the current entries if it is unusable
    pub fn reload(&mut self) {
        match Self::read(&self.path) {
            Ok(Some(entries)) if !entries.is_empty() => self.entries = entries,
            Ok(_) => {}
            Err(e) => tracing::warn!("{}", e),
        }
    }

    pub fn entries(&self) -> &[LauncherEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&LauncherEntry> {
        self.entries.get(index)
    }

    /// Append an entry and persist. Duplicates are allowed.
    pub fn add(&mut self, entry: LauncherEntry) -> Result<(), LauncherError> {
        self.entries.push(entry);
        self.save()
    }

    /// Remove the entry at `index` and persist
    pub fn remove(&mut self, index: usize) -> Result<LauncherEntry, LauncherError> {
        if index >= self.entries.len() {
            return Err(LauncherError::NoSuchEntry(index));
        }
        let removed = self.entries.remove(index);
        self.save()?;
        Ok(removed)
    }
}

/// Command that runs `command` through the host shell
pub fn shell_command(command: &str) -> tokio::process::Command {
    let mut cmd = if cfg!(windows) {
        let mut cmd = tokio::process::Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    } else {
        let mut cmd = tokio::process::Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    };
    cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    cmd
}

/// Start `command` and reap it in the background
pub async fn run(command: String) -> Result<(), LauncherError> {
    let mut child = shell_command(&command)
        .spawn()
        .map_err(|source| LauncherError::Spawn {
            command: command.clone(),
            source,
        })?;

    tracing::info!("Launched `{}`", command);
    match child.wait().await {
        Ok(status) => tracing::debug!("`{}` exited with {}", command, status),
        Err(e) => tracing::debug!("Lost track of `{}`: {}", command, e),
    }
    Ok(())
}

/// Task that launches `command` without blocking the UI. Blank commands do nothing.
pub fn launch<T: Send + 'static>(command: &str) -> Task<T> {
    let command = command.trim().to_string();
    if command.is_empty() {
        return Task::none();
    }

    Task::future(async move {
        if let Err(e) = run(command).await {
            tracing::error!("{}", e);
        }
    })
    .discard()
}

/// Path of the image an icon string names, if it names an existing one
pub fn icon_image(icon: &str) -> Option<PathBuf> {
    let path = Path::new(icon);
    (path.is_file() && ::image::ImageFormat::from_path(path).is_ok()).then(|| path.to_path_buf())
}

/// Icon glyph or image at the given edge length
pub fn icon_view<'a>(icon: &str, size: f32) -> Element<'a, Message> {
    match icon_image(icon) {
        Some(path) => image(image::Handle::from_path(path))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into(),
        None => text(icon.to_string())
            .size(size * 0.6)
            .color(LumenColors::TEXT_BRIGHT)
            .into(),
    }
}

/// Render the dock
pub fn view<'a>(entries: &'a [LauncherEntry], animator: &Animator<AnimKey>) -> Element<'a, Message> {
    let items: Vec<Element<Message>> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| view_item(index, entry, animator))
        .collect();

    let content = Row::with_children(items)
        .spacing(Spacing::XXS)
        .align_y(Alignment::Center)
        .padding(Padding::from([Spacing::XS, Spacing::MD]));

    mouse_area(container(content).style(dock_style()))
        .on_right_press(Message::OpenMenu(MenuKind::Dock))
        .into()
}

fn view_item<'a>(
    index: usize,
    entry: &'a LauncherEntry,
    animator: &Animator<AnimKey>,
) -> Element<'a, Message> {
    let target = HoverTarget::DockItem(index);
    let background = animator
        .color(&AnimKey::Hover(target))
        .map(Color::from)
        .unwrap_or(LumenColors::WIDGET_BG);

    let tile = container(icon_view(&entry.icon, Spacing::DOCK_ICON_SIZE - Spacing::SM))
        .center(Length::Fixed(Spacing::DOCK_ICON_SIZE))
        .style(dock_item_style(background));

    let clickable = mouse_area(tile)
        .on_press(Message::Dock(DockMessage::AppClicked(index)))
        .on_right_press(Message::OpenMenu(MenuKind::DockItem(index)))
        .on_enter(Message::Hover(target, true))
        .on_exit(Message::Hover(target, false))
        .interaction(mouse::Interaction::Pointer);

    tooltip(
        clickable,
        container(text(&entry.name).size(Typography::SIZE_LABEL))
            .padding(Padding::from([Spacing::XXS, Spacing::XS]))
            .style(tooltip_style()),
        tooltip::Position::Top,
    )
    .gap(Spacing::XS)
    .into()
}
