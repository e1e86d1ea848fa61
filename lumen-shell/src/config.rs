//! Settings and path configuration for Lumen Shell
//!
//! Settings live in a flat JSON file. Loading overlays the file on top of
//! the compiled-in defaults one top-level key at a time, so a file holding
//! only `{"theme": "light"}` yields every default with the theme replaced.
//! Keys the shell does not know about are carried through to the next save.

use crate::error::ConfigError;
use lumen_theme::ThemeMode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "settings.json";
/// Launcher entries file name inside the config directory
pub const LAUNCHER_FILE: &str = "apps.json";
/// Wallpaper used until the user picks one
pub const DEFAULT_WALLPAPER: &str = "assets/wallpapers/default.jpg";

/// Toggleable desktop widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    Clock,
    Weather,
    System,
    Launcher,
}

impl Widget {
    pub const ALL: [Widget; 4] = [Widget::Clock, Widget::Weather, Widget::System, Widget::Launcher];

    /// Key in the `widgets` settings map
    pub fn name(self) -> &'static str {
        match self {
            Widget::Clock => "clock",
            Widget::Weather => "weather",
            Widget::System => "system",
            Widget::Launcher => "launcher",
        }
    }
}

/// Resolved directories the shell reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Holds `settings.json` and `apps.json`
    pub config_dir: PathBuf,
    /// Holds cached weather icons
    pub data_dir: PathBuf,
}

impl Paths {
    /// Use the given directories, or the platform defaults joined with `lumen`
    pub fn resolve(config_dir: Option<PathBuf>, data_dir: Option<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.unwrap_or_else(|| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("lumen")
            }),
            data_dir: data_dir.unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("lumen")
            }),
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    pub fn launcher_file(&self) -> PathBuf {
        self.config_dir.join(LAUNCHER_FILE)
    }

    pub fn weather_icon_dir(&self) -> PathBuf {
        self.data_dir.join("weather_icons")
    }
}

/// Persistent shell settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Wallpaper image path
    pub wallpaper: String,
    /// Color theme
    #[serde(deserialize_with = "lenient_theme")]
    pub theme: ThemeMode,
    /// Widget visibility by name
    pub widgets: BTreeMap<String, bool>,
    /// Weather widget configuration
    #[serde(default)]
    pub weather: WeatherSettings,
    /// Keys written by someone else, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        let widgets = Widget::ALL
            .into_iter()
            .map(|widget| (widget.name().to_string(), true))
            .collect();

        Self {
            wallpaper: DEFAULT_WALLPAPER.to_string(),
            theme: ThemeMode::Dark,
            widgets,
            weather: WeatherSettings::default(),
            extra: Map::new(),
        }
    }
}

/// Weather widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    /// City queried by name
    pub city: String,
    /// Unit system
    pub units: Units,
    /// OpenWeatherMap API key; empty disables fetching
    pub api_key: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            city: "New York".to_string(),
            units: Units::Metric,
            api_key: String::new(),
        }
    }
}

/// Temperature units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Celsius
    #[default]
    Metric,
    /// Fahrenheit
    Imperial,
}

impl Units {
    /// Value of the API `units` query parameter
    pub fn as_query(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

fn lenient_theme<'de, D>(deserializer: D) -> Result<ThemeMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let mode = value.as_str().and_then(ThemeMode::from_name);
    Ok(mode.unwrap_or_else(|| {
        tracing::warn!("Unknown theme {}, using dark", value);
        ThemeMode::Dark
    }))
}

impl Settings {
    /// Load settings from `path`, creating the file with defaults if it is
    /// missing. Unreadable or malformed files fall back to defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            let settings = Self::default();
            if let Err(e) = settings.save(path) {
                tracing::warn!("Failed to create settings file: {}", e);
            }
            return settings;
        }

        match Self::read(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Read and merge the settings file without any fallback
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: Map<String, Value> =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::merged(file).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay `file` on the defaults, one top-level key at a time
    pub fn merged(file: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut merged = match serde_json::to_value(Self::default())? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(file);
        serde_json::from_value(Value::Object(merged))
    }

    /// Write settings as pretty JSON, creating the parent directory
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Widgets missing from the map are shown
    pub fn is_visible(&self, widget: Widget) -> bool {
        self.widgets.get(widget.name()).copied().unwrap_or(true)
    }

    pub fn set_visible(&mut self, widget: Widget, visible: bool) {
        self.widgets.insert(widget.name().to_string(), visible);
    }

    /// Show every widget again
    pub fn show_all(&mut self) {
        for visible in self.widgets.values_mut() {
            *visible = true;
        }
    }

    /// Whether any widget is currently hidden
    pub fn any_hidden(&self) -> bool {
        self.widgets.values().any(|visible| !visible)
    }
}
