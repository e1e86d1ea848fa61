//! Lumen Shell - Desktop shell skin
//!
//! A full-screen window presenting:
//! - Wallpaper with a synthesized fallback
//! - Taskbar with start menu and tray clock
//! - Launcher dock
//! - Clock, weather and system monitor widgets
//! - Context menus and dialogs for desktop settings

mod app;
mod clock;
mod config;
mod dialog;
mod dock;
mod error;
mod menu;
mod messages;
mod monitor;
mod system;
mod taskbar;
mod wallpaper;
mod weather;

use app::{Shell, ShellOptions};
use clap::Parser;
use config::Paths;
use iced::{window, Size};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Lumen - Desktop shell
#[derive(Parser, Debug)]
#[command(name = "lumen-shell", version, about)]
struct Args {
    /// Directory holding settings.json and apps.json
    #[arg(long, env = "LUMEN_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Directory for cached data such as weather icons
    #[arg(long, env = "LUMEN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Run in a decorated window instead of full screen
    #[arg(long)]
    windowed: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// OpenWeatherMap API key, used when settings.json has none
    #[arg(long, env = "LUMEN_WEATHER_API_KEY", hide_env_values = true)]
    weather_api_key: Option<String>,
}

fn main() -> iced::Result {
    let args = Args::parse();

    let default_filter = if args.debug {
        "lumen_shell=debug,lumen_theme=debug"
    } else {
        "lumen_shell=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lumen Shell");

    let screen = if args.windowed {
        Size::new(1280, 800)
    } else {
        Size::new(1920, 1080)
    };

    let options = ShellOptions {
        paths: Paths::resolve(args.config_dir, args.data_dir),
        screen,
        fullscreen: !args.windowed,
        weather_api_key: args.weather_api_key,
    };

    iced::application(Shell::title, Shell::update, Shell::view)
        .subscription(Shell::subscription)
        .theme(Shell::theme)
        .window(window::Settings {
            size: Size::new(screen.width as f32, screen.height as f32),
            position: window::Position::Centered,
            decorations: args.windowed,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || Shell::new(options))
}
