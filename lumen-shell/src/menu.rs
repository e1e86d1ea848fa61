//! Right-click context menus

use crate::config::{Settings, Widget};
use crate::messages::{MenuAction, MenuKind, Message};
use iced::widget::{button, container, text, Column, Space};
use iced::{Element, Length, Padding, Point, Size};
use lumen_theme::widgets::button::{button_style, ButtonVariant};
use lumen_theme::widgets::panel::{popover_style, separator_style};
use lumen_theme::{Palette, Spacing, ThemeMode, Typography};

const ITEM_HEIGHT: f32 = 30.0;
const SEPARATOR_HEIGHT: f32 = 9.0;

/// One row of a context menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item { label: String, action: MenuAction },
    Separator,
}

impl MenuEntry {
    fn item(label: impl Into<String>, action: MenuAction) -> Self {
        MenuEntry::Item {
            label: label.into(),
            action,
        }
    }

    fn height(&self) -> f32 {
        match self {
            MenuEntry::Item { .. } => ITEM_HEIGHT,
            MenuEntry::Separator => SEPARATOR_HEIGHT,
        }
    }
}

/// An open context menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    pub kind: MenuKind,
    /// Pointer position when the menu was opened
    pub position: Point,
}

/// Entries of the menu of the given kind
pub fn entries(kind: MenuKind, settings: &Settings) -> Vec<MenuEntry> {
    use MenuEntry::Separator;

    match kind {
        MenuKind::Desktop => {
            let theme = match settings.theme.toggled() {
                ThemeMode::Dark => "Switch to Dark Theme",
                ThemeMode::Light => "Switch to Light Theme",
            };

            let mut entries = vec![
                MenuEntry::item("Change Wallpaper", MenuAction::ChangeWallpaper),
                Separator,
                MenuEntry::item("Refresh Desktop", MenuAction::RefreshDesktop),
                MenuEntry::item(theme, MenuAction::SwitchTheme),
            ];
            if settings.any_hidden() {
                entries.push(MenuEntry::item("Show Hidden Widgets", MenuAction::ShowHiddenWidgets));
            }
            entries.push(Separator);
            entries.extend(power_entries());
            entries
        }
        MenuKind::Clock => vec![MenuEntry::item("Hide Clock", MenuAction::Hide(Widget::Clock))],
        MenuKind::Weather => vec![
            MenuEntry::item("Refresh", MenuAction::RefreshWeather),
            MenuEntry::item("Change Location", MenuAction::ChangeLocation),
            Separator,
            MenuEntry::item("Hide Weather", MenuAction::Hide(Widget::Weather)),
        ],
        MenuKind::Monitor => vec![
            MenuEntry::item("Refresh", MenuAction::RefreshMonitor),
            Separator,
            MenuEntry::item("Hide Monitor", MenuAction::Hide(Widget::System)),
        ],
        MenuKind::Dock => vec![
            MenuEntry::item("Add Application", MenuAction::AddApplication),
            Separator,
            MenuEntry::item("Hide Launcher", MenuAction::Hide(Widget::Launcher)),
        ],
        MenuKind::DockItem(index) => vec![
            MenuEntry::item("Launch", MenuAction::Launch(index)),
            Separator,
            MenuEntry::item("Remove from Dock", MenuAction::Remove(index)),
        ],
        MenuKind::System => power_entries(),
    }
}

fn power_entries() -> Vec<MenuEntry> {
    vec![
        MenuEntry::item("Lock Screen", MenuAction::Lock),
        MenuEntry::item("Sign Out", MenuAction::SignOut),
        MenuEntry::item("Shut Down", MenuAction::ShutDown),
    ]
}

/// Top-left corner for a menu opened at `position`, kept inside `window`
pub fn placement(position: Point, menu: Size, window: Size) -> Point {
    let x = position.x.min(window.width - menu.width).max(0.0);
    let y = position.y.min(window.height - menu.height).max(0.0);
    Point::new(x, y)
}

/// Size the rendered menu will take
pub fn menu_size(entries: &[MenuEntry]) -> Size {
    let height: f32 = entries.iter().map(MenuEntry::height).sum();
    Size::new(Spacing::MENU_WIDTH, height + 2.0 * Spacing::XS)
}

/// Render `menu` positioned inside a window-sized layer
pub fn view<'a>(
    menu: &ContextMenu,
    entries: Vec<MenuEntry>,
    palette: Palette,
    window: Size,
) -> Element<'a, Message> {
    let at = placement(menu.position, menu_size(&entries), window);

    let rows = entries.into_iter().map(|entry| match entry {
        MenuEntry::Item { label, action } => button(text(label).size(Typography::SIZE_TITLE))
            .width(Length::Fill)
            .height(Length::Fixed(ITEM_HEIGHT))
            .padding(Padding::from([Spacing::XS + 2.0, Spacing::MD]))
            .style(button_style(ButtonVariant::Menu, palette))
            .on_press(Message::Menu(action))
            .into(),
        MenuEntry::Separator => container(
            container(Space::new(Length::Fill, Length::Fixed(1.0))).style(separator_style(palette)),
        )
        .padding(Padding::from([Spacing::XS, 0.0]))
        .height(Length::Fixed(SEPARATOR_HEIGHT))
        .into(),
    });

    let panel = container(Column::with_children(rows))
        .width(Length::Fixed(Spacing::MENU_WIDTH))
        .padding(Spacing::XS)
        .style(popover_style(palette));

    container(panel)
        .padding(Padding {
            top: at.y,
            right: 0.0,
            bottom: 0.0,
            left: at.x,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
