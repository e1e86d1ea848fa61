//! Message types for Lumen Shell

use crate::config::Widget;
use crate::wallpaper::Wallpaper;
use crate::weather::WeatherReport;
use iced::widget::image;
use iced::{Point, Size};
use lumen_theme::Token;

/// Main shell messages
#[derive(Debug, Clone)]
pub enum Message {
    /// Next step of a running animation
    Animate(AnimKey, Token),

    /// Pointer entered or left a hoverable element
    Hover(HoverTarget, bool),

    /// Clock widget refresh
    ClockTick,

    /// Taskbar messages
    Taskbar(TaskbarMessage),

    /// Dock messages
    Dock(DockMessage),

    /// Weather widget messages
    Weather(WeatherMessage),

    /// System monitor messages
    Monitor(MonitorMessage),

    /// Open a context menu at the pointer
    OpenMenu(MenuKind),

    /// Context menu entry chosen
    Menu(MenuAction),

    /// Dialog messages
    Dialog(DialogMessage),

    /// Close menus, the start menu and dialogs
    CloseOverlays,

    /// Dismiss the lock overlay
    Unlock,

    /// Wallpaper decoded for the given load generation
    WallpaperLoaded(u64, Wallpaper),

    /// Window events
    Window(WindowEvent),
}

/// Window events the shell tracks
#[derive(Debug, Clone)]
pub enum WindowEvent {
    /// Pointer position, used to place context menus
    CursorMoved(Point),
    /// New window size
    Resized(Size),
    /// Ctrl+Alt+Delete
    SystemKeys,
    /// Escape
    Escape,
}

/// Taskbar-specific messages
#[derive(Debug, Clone)]
pub enum TaskbarMessage {
    /// Start button clicked
    StartClicked,
    /// Tray clock refresh
    TrayTick,
    /// Start menu entry clicked (index into the launcher entries)
    Launch(usize),
}

/// Dock-specific messages
#[derive(Debug, Clone)]
pub enum DockMessage {
    /// App icon clicked
    AppClicked(usize),
}

/// Weather-specific messages
#[derive(Debug, Clone)]
pub enum WeatherMessage {
    /// Poll timer fired
    Poll,
    /// Report fetched
    Fetched(u64, Result<WeatherReport, String>),
    /// Icon loaded for a condition code
    IconLoaded(String, Result<image::Handle, String>),
}

/// System monitor messages
#[derive(Debug, Clone)]
pub enum MonitorMessage {
    /// Metric poll timer fired
    Poll,
    /// Summary text timer fired
    Summary,
}

/// Dialog messages
#[derive(Debug, Clone)]
pub enum DialogMessage {
    /// Text edited in the given field
    Edited(DialogField, String),
    /// Confirm button or Enter
    Submit,
    /// Cancel button
    Cancel,
}

/// Editable dialog fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogField {
    Name,
    Command,
    Icon,
    City,
    Path,
}

/// Which context menu to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    Desktop,
    Clock,
    Weather,
    Monitor,
    Dock,
    DockItem(usize),
    /// Ctrl+Alt+Delete menu
    System,
}

/// Context menu and power actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ChangeWallpaper,
    RefreshDesktop,
    SwitchTheme,
    ShowHiddenWidgets,
    Lock,
    SignOut,
    ShutDown,
    Hide(Widget),
    RefreshWeather,
    ChangeLocation,
    RefreshMonitor,
    AddApplication,
    Launch(usize),
    Remove(usize),
}

/// Elements with a hover color tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverTarget {
    Clock,
    Weather,
    Monitor,
    DockItem(usize),
}

/// Animated properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimKey {
    /// Whole-window opacity
    Fade,
    /// Dock vertical offset
    SlideDock,
    /// Taskbar vertical offset
    SlideTaskbar,
    /// Background color of a hovered element
    Hover(HoverTarget),
}
