//! Spacing and layout constants for the Lumen desktop
//!
//! Based on a 4px unit, plus the fixed positions and sizes of the desktop
//! widgets, dock and taskbar.

/// Spacing constants based on 4px base unit
#[derive(Debug, Clone, Copy)]
pub struct Spacing;

impl Spacing {
    // ═══════════════════════════════════════════════════════════════════════════
    // SPACING SCALE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Extra extra small (2px)
    pub const XXS: f32 = 2.0;
    /// Extra small (4px)
    pub const XS: f32 = 4.0;
    /// Small (8px)
    pub const SM: f32 = 8.0;
    /// Medium (12px)
    pub const MD: f32 = 12.0;
    /// Large (16px)
    pub const LG: f32 = 16.0;
    /// Extra large (20px)
    pub const XL: f32 = 20.0;

    // ═══════════════════════════════════════════════════════════════════════════
    // BORDER RADIUS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Small radius (4px) - buttons, inputs
    pub const RADIUS_SM: f32 = 4.0;
    /// Medium radius (8px) - cards, menus
    pub const RADIUS_MD: f32 = 8.0;
    /// Large radius (12px) - dock, dialogs
    pub const RADIUS_LG: f32 = 12.0;

    // ═══════════════════════════════════════════════════════════════════════════
    // DESKTOP LAYOUT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Left margin shared by the desktop widgets
    pub const WIDGET_X: f32 = 20.0;
    /// Clock card top edge
    pub const CLOCK_Y: f32 = 20.0;
    /// Weather card top edge
    pub const WEATHER_Y: f32 = 150.0;
    /// System monitor card top edge
    pub const MONITOR_Y: f32 = 300.0;
    /// Width of the system monitor usage bars
    pub const BAR_WIDTH: f32 = 200.0;
    /// Height of the system monitor usage bars
    pub const BAR_HEIGHT: f32 = 4.0;

    /// Taskbar height
    pub const TASKBAR_HEIGHT: f32 = 40.0;
    /// Dock icon size
    pub const DOCK_ICON_SIZE: f32 = 48.0;
    /// Gap between the dock and the bottom edge of the desktop area
    pub const DOCK_MARGIN: f32 = 20.0;
    /// Weather icon edge length
    pub const WEATHER_ICON: f32 = 64.0;

    /// Start menu size
    pub const START_MENU_WIDTH: f32 = 300.0;
    pub const START_MENU_HEIGHT: f32 = 500.0;
    /// Context menu width
    pub const MENU_WIDTH: f32 = 200.0;
    /// Dialog width
    pub const DIALOG_WIDTH: f32 = 400.0;
}
