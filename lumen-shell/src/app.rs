//! Main application state for Lumen Shell

use crate::clock::Clock;
use crate::config::{Paths, Settings, WeatherSettings, Widget};
use crate::dialog::{Dialog, Submission};
use crate::dock::{self, Launcher};
use crate::menu::{self, ContextMenu};
use crate::messages::{
    AnimKey, DialogMessage, DockMessage, HoverTarget, MenuAction, MenuKind, Message,
    MonitorMessage, TaskbarMessage, WeatherMessage, WindowEvent,
};
use crate::monitor::{self, Monitor};
use crate::taskbar::Taskbar;
use crate::wallpaper::Wallpaper;
use crate::weather::Weather;
use anyhow::Context;
use iced::alignment::Vertical;
use iced::widget::{column, container, mouse_area, text, Column, Space, Stack};
use iced::{
    event, keyboard, mouse, window, Color, Element, Event, Length, Padding, Point, Size,
    Subscription, Task, Theme,
};
use lumen_theme::widgets::card::{card_style, error_screen_style, scrim_style};
use lumen_theme::{
    Animator, LumenColors, Palette, SlideFrom, Spacing, Token, Tween, Typography,
};
use std::time::Duration;

/// Height of the dock slot the slide-in animates across
const DOCK_SLOT: f32 = Spacing::DOCK_ICON_SIZE + 2.0 * Spacing::XS + Spacing::DOCK_MARGIN;
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Startup options resolved from the command line
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub paths: Paths,
    /// Initial window size, used for the first wallpaper decode
    pub screen: Size<u32>,
    pub fullscreen: bool,
    /// Overrides the settings file key without being written to it
    pub weather_api_key: Option<String>,
}

/// Periodic activity derived from the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    Clock,
    Tray,
    Weather,
    MonitorPoll,
    MonitorSummary,
    Animation(AnimKey, Token),
}

impl Timer {
    fn message(self) -> Message {
        match self {
            Timer::Clock => Message::ClockTick,
            Timer::Tray => Message::Taskbar(TaskbarMessage::TrayTick),
            Timer::Weather => Message::Weather(WeatherMessage::Poll),
            Timer::MonitorPoll => Message::Monitor(MonitorMessage::Poll),
            Timer::MonitorSummary => Message::Monitor(MonitorMessage::Summary),
            Timer::Animation(key, token) => Message::Animate(key, token),
        }
    }
}

/// The application: a running desktop, or the reason it could not start
pub enum Shell {
    Desktop(Box<Desktop>),
    Failed { error: String, chain: Vec<String> },
}

impl Shell {
    pub fn new(options: ShellOptions) -> (Self, Task<Message>) {
        match Desktop::new(options) {
            Ok((desktop, task)) => (Shell::Desktop(Box::new(desktop)), task),
            Err(e) => {
                tracing::error!("Failed to start desktop: {:#}", e);
                let shell = Shell::Failed {
                    error: e.to_string(),
                    chain: e.chain().skip(1).map(ToString::to_string).collect(),
                };
                (shell, Task::none())
            }
        }
    }

    pub fn title(&self) -> String {
        String::from("Lumen")
    }

    pub fn theme(&self) -> Theme {
        match self {
            Shell::Desktop(desktop) => lumen_theme::lumen_theme(desktop.settings.theme),
            Shell::Failed { .. } => lumen_theme::lumen_theme(Default::default()),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match self {
            Shell::Desktop(desktop) => desktop.update(message),
            Shell::Failed { .. } => match message {
                Message::Window(WindowEvent::Escape) => iced::exit(),
                _ => Task::none(),
            },
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let events = event::listen_with(window_event);

        match self {
            Shell::Desktop(desktop) => {
                let timers = desktop.timers().into_iter().map(|(timer, interval)| {
                    iced::time::every(interval)
                        .with(timer)
                        .map(|(timer, _)| timer.message())
                });
                Subscription::batch(std::iter::once(events).chain(timers))
            }
            Shell::Failed { .. } => events,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self {
            Shell::Desktop(desktop) => desktop.view(),
            Shell::Failed { error, chain } => {
                let mut details = Column::new().spacing(Spacing::SM).push(
                    text("Lumen could not start")
                        .size(Typography::SIZE_CLOCK)
                        .font(Typography::BOLD),
                );
                details = details.push(text(error).font(Typography::CODE));
                for cause in chain {
                    details = details.push(
                        text(format!("caused by: {}", cause))
                            .font(Typography::CODE)
                            .color(LumenColors::TEXT_DIM),
                    );
                }
                details = details.push(
                    text("Press Escape to exit")
                        .size(Typography::SIZE_CAPTION)
                        .color(LumenColors::TEXT_MUTED),
                );

                container(details)
                    .padding(Spacing::XL * 2.0)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(error_screen_style())
                    .into()
            }
        }
    }
}

fn window_event(event: Event, _status: event::Status, _id: window::Id) -> Option<Message> {
    use keyboard::key::Named;

    let event = match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => WindowEvent::CursorMoved(position),
        Event::Window(window::Event::Resized(size)) => WindowEvent::Resized(size),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            match key.as_ref() {
                keyboard::Key::Named(Named::Escape) => WindowEvent::Escape,
                keyboard::Key::Named(Named::Delete) if modifiers.control() && modifiers.alt() => {
                    WindowEvent::SystemKeys
                }
                _ => return None,
            }
        }
        _ => return None,
    };

    Some(Message::Window(event))
}

/// Card wrapper shared by the desktop widgets: hover tween background and
/// a context menu on right click
pub(crate) fn desktop_card<'a>(
    content: impl Into<Element<'a, Message>>,
    palette: Palette,
    target: HoverTarget,
    menu: MenuKind,
    animator: &Animator<AnimKey>,
) -> Element<'a, Message> {
    let background = animator
        .color(&AnimKey::Hover(target))
        .map(Color::from)
        .unwrap_or(palette.surface);

    mouse_area(
        container(content)
            .padding(Spacing::LG)
            .style(card_style(palette, background)),
    )
    .on_enter(Message::Hover(target, true))
    .on_exit(Message::Hover(target, false))
    .on_right_press(Message::OpenMenu(menu))
    .into()
}

/// Desktop state: settings, widgets, overlays and animations
pub struct Desktop {
    paths: Paths,
    settings: Settings,
    weather_api_key: Option<String>,
    launcher: Launcher,

    wallpaper: Wallpaper,
    wallpaper_generation: u64,
    wallpaper_target: Size<u32>,

    clock: Clock,
    weather: Weather,
    monitor: Monitor,
    taskbar: Taskbar,

    animator: Animator<AnimKey>,
    menu: Option<ContextMenu>,
    dialog: Option<Dialog>,
    locked: bool,

    cursor: Point,
    window: Size,
}

impl Desktop {
    pub fn new(options: ShellOptions) -> anyhow::Result<(Self, Task<Message>)> {
        let ShellOptions {
            paths,
            screen,
            fullscreen,
            weather_api_key,
        } = options;

        std::fs::create_dir_all(&paths.config_dir).with_context(|| {
            format!("failed to create config directory {}", paths.config_dir.display())
        })?;

        let settings = Settings::load(&paths.settings_file());
        let launcher = Launcher::load(paths.launcher_file());
        tracing::info!(
            "Loaded settings ({} theme) and {} launcher entries from {}",
            settings.theme.name(),
            launcher.entries().len(),
            paths.config_dir.display()
        );

        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("lumen-shell/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        let mut monitor = Monitor::new();
        monitor.poll();

        let mut animator = Animator::new();
        animator.start(AnimKey::Fade, Tween::fade_in());
        animator.start(AnimKey::SlideDock, Tween::slide_in(DOCK_SLOT));
        animator.start(AnimKey::SlideTaskbar, Tween::slide_in(Spacing::TASKBAR_HEIGHT));

        let mut desktop = Self {
            weather: Weather::new(client, paths.weather_icon_dir()),
            paths,
            settings,
            weather_api_key: weather_api_key.filter(|key| !key.trim().is_empty()),
            launcher,
            wallpaper: Wallpaper::Solid,
            wallpaper_generation: 0,
            wallpaper_target: screen,
            clock: Clock::new(),
            monitor,
            taskbar: Taskbar::new(),
            animator,
            menu: None,
            dialog: None,
            locked: false,
            cursor: Point::ORIGIN,
            window: Size::new(screen.width as f32, screen.height as f32),
        };

        let mut tasks = vec![desktop.reload_wallpaper(), desktop.request_weather()];
        if fullscreen {
            tasks.push(
                window::get_oldest()
                    .and_then(|id| window::change_mode(id, window::Mode::Fullscreen)),
            );
        }

        Ok((desktop, Task::batch(tasks)))
    }

    fn palette(&self) -> Palette {
        self.settings.theme.palette()
    }

    /// Weather settings with the command-line key applied
    fn weather_settings(&self) -> WeatherSettings {
        let mut settings = self.settings.weather.clone();
        if let Some(key) = &self.weather_api_key {
            if settings.api_key.trim().is_empty() {
                settings.api_key = key.clone();
            }
        }
        settings
    }

    /// Every timer the current state needs, with its interval
    pub fn timers(&self) -> Vec<(Timer, Duration)> {
        let mut timers = vec![(Timer::Tray, Duration::from_secs(1))];

        if self.settings.is_visible(Widget::Clock) || self.locked {
            timers.push((Timer::Clock, Duration::from_secs(1)));
        }
        if self.settings.is_visible(Widget::Weather) {
            timers.push((Timer::Weather, self.weather.poll_interval()));
        }
        if self.settings.is_visible(Widget::System) {
            timers.push((Timer::MonitorPoll, monitor::POLL_INTERVAL));
            timers.push((Timer::MonitorSummary, monitor::SUMMARY_INTERVAL));
        }

        timers.extend(
            self.animator
                .running()
                .map(|(key, token, interval)| (Timer::Animation(*key, token), interval)),
        );

        timers
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Animate(key, token) => {
                self.animator.tick(&key, token);
            }

            Message::Hover(target, entered) => {
                self.hover(target, entered);
            }

            Message::ClockTick => {
                self.clock.tick();
            }

            Message::Taskbar(taskbar_msg) => {
                return self.handle_taskbar_message(taskbar_msg);
            }

            Message::Dock(DockMessage::AppClicked(index)) => {
                return self.launch(index);
            }

            Message::Weather(weather_msg) => {
                return self.handle_weather_message(weather_msg);
            }

            Message::Monitor(MonitorMessage::Poll) => {
                self.monitor.poll();
            }

            Message::Monitor(MonitorMessage::Summary) => {
                self.monitor.refresh_summary();
            }

            Message::OpenMenu(kind) => {
                if self.dialog.is_none() && !self.locked {
                    self.taskbar.close_start();
                    self.menu = Some(ContextMenu {
                        kind,
                        position: self.cursor,
                    });
                }
            }

            Message::Menu(action) => {
                self.menu = None;
                self.taskbar.close_start();
                return self.perform(action);
            }

            Message::Dialog(dialog_msg) => {
                return self.handle_dialog_message(dialog_msg);
            }

            Message::CloseOverlays => {
                self.menu = None;
                self.taskbar.close_start();
            }

            Message::Unlock => {
                self.locked = false;
            }

            Message::WallpaperLoaded(generation, wallpaper) => {
                if generation == self.wallpaper_generation {
                    self.wallpaper = wallpaper;
                } else {
                    tracing::debug!("Dropping stale wallpaper load {}", generation);
                }
            }

            Message::Window(window_event) => {
                return self.handle_window_event(window_event);
            }
        }

        Task::none()
    }

    fn handle_taskbar_message(&mut self, message: TaskbarMessage) -> Task<Message> {
        match message {
            TaskbarMessage::StartClicked => {
                self.menu = None;
                self.taskbar.toggle_start();
            }
            TaskbarMessage::TrayTick => self.taskbar.tick(),
            TaskbarMessage::Launch(index) => {
                self.taskbar.close_start();
                return self.launch(index);
            }
        }
        Task::none()
    }

    fn handle_weather_message(&mut self, message: WeatherMessage) -> Task<Message> {
        match message {
            WeatherMessage::Poll => self.request_weather(),
            WeatherMessage::Fetched(generation, result) => {
                self.weather.fetched(generation, result)
            }
            WeatherMessage::IconLoaded(code, result) => {
                self.weather.icon_loaded(code, result);
                Task::none()
            }
        }
    }

    fn handle_dialog_message(&mut self, message: DialogMessage) -> Task<Message> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Task::none();
        };

        match message {
            DialogMessage::Edited(field, value) => dialog.edit(field, value),
            DialogMessage::Cancel => self.dialog = None,
            DialogMessage::Submit => {
                if let Some(submission) = dialog.submit() {
                    self.dialog = None;
                    return self.apply(submission);
                }
            }
        }
        Task::none()
    }

    fn handle_window_event(&mut self, event: WindowEvent) -> Task<Message> {
        match event {
            WindowEvent::CursorMoved(position) => self.cursor = position,
            WindowEvent::Resized(size) => {
                self.window = size;
                let target = Size::new(size.width.round() as u32, size.height.round() as u32);
                if target != self.wallpaper_target && target.width > 0 && target.height > 0 {
                    self.wallpaper_target = target;
                    return self.reload_wallpaper();
                }
            }
            WindowEvent::SystemKeys => {
                if !self.locked {
                    self.dialog = None;
                    self.taskbar.close_start();
                    self.menu = Some(ContextMenu {
                        kind: MenuKind::System,
                        position: Point::new(self.window.width / 2.0, self.window.height / 2.0),
                    });
                }
            }
            WindowEvent::Escape => {
                self.menu = None;
                self.dialog = None;
                self.taskbar.close_start();
            }
        }
        Task::none()
    }

    fn perform(&mut self, action: MenuAction) -> Task<Message> {
        match action {
            MenuAction::ChangeWallpaper => {
                self.dialog = Some(Dialog::change_wallpaper(&self.settings.wallpaper));
            }
            MenuAction::RefreshDesktop => return self.refresh(),
            MenuAction::SwitchTheme => {
                self.settings.theme = self.settings.theme.toggled();
                tracing::info!("Switched to {} theme", self.settings.theme.name());
                self.clear_hover();
                self.save_settings();
            }
            MenuAction::ShowHiddenWidgets => {
                let weather_was_hidden = !self.settings.is_visible(Widget::Weather);
                self.settings.show_all();
                self.save_settings();
                if weather_was_hidden {
                    return self.request_weather();
                }
            }
            MenuAction::Lock => {
                self.dialog = None;
                self.locked = true;
            }
            MenuAction::SignOut | MenuAction::ShutDown => {
                tracing::info!("{:?} requested, closing the shell", action);
                self.animator.cancel_all();
                self.save_settings();
                return iced::exit();
            }
            MenuAction::Hide(widget) => {
                self.settings.set_visible(widget, false);
                self.save_settings();
                match widget {
                    Widget::Clock => self.animator.remove(&AnimKey::Hover(HoverTarget::Clock)),
                    Widget::Weather => self.animator.remove(&AnimKey::Hover(HoverTarget::Weather)),
                    Widget::System => self.animator.remove(&AnimKey::Hover(HoverTarget::Monitor)),
                    Widget::Launcher => self.clear_dock_hover(),
                }
            }
            MenuAction::RefreshWeather => return self.request_weather(),
            MenuAction::ChangeLocation => {
                self.dialog = Some(Dialog::change_location(&self.settings.weather.city));
            }
            MenuAction::RefreshMonitor => {
                self.monitor.poll();
                self.monitor.refresh_summary();
            }
            MenuAction::AddApplication => {
                self.dialog = Some(Dialog::add_application());
            }
            MenuAction::Launch(index) => return self.launch(index),
            MenuAction::Remove(index) => {
                match self.launcher.remove(index) {
                    Ok(entry) => tracing::info!("Removed {} from the dock", entry.name),
                    Err(e) => tracing::error!("Failed to remove launcher entry: {}", e),
                }
                self.clear_dock_hover();
            }
        }

        Task::none()
    }

    fn apply(&mut self, submission: Submission) -> Task<Message> {
        match submission {
            Submission::AddApplication(entry) => {
                let name = entry.name.clone();
                match self.launcher.add(entry) {
                    Ok(()) => tracing::info!("Added {} to the dock", name),
                    Err(e) => tracing::error!("Failed to save launcher entries: {}", e),
                }
                Task::none()
            }
            Submission::ChangeLocation(city) => {
                self.settings.weather.city = city;
                self.save_settings();
                self.request_weather()
            }
            Submission::ChangeWallpaper(path) => {
                self.settings.wallpaper = path.display().to_string();
                self.save_settings();
                self.reload_wallpaper()
            }
        }
    }

    /// Re-read settings and launcher entries, then reload everything they feed
    fn refresh(&mut self) -> Task<Message> {
        self.settings = Settings::load(&self.paths.settings_file());
        self.launcher.reload();
        self.clear_hover();
        self.monitor.poll();
        self.monitor.refresh_summary();
        self.clock.tick();

        Task::batch([self.reload_wallpaper(), self.request_weather()])
    }

    fn request_weather(&mut self) -> Task<Message> {
        if !self.settings.is_visible(Widget::Weather) {
            return Task::none();
        }
        let settings = self.weather_settings();
        self.weather.request(&settings)
    }

    fn reload_wallpaper(&mut self) -> Task<Message> {
        self.wallpaper_generation += 1;
        let generation = self.wallpaper_generation;
        let path = std::path::PathBuf::from(&self.settings.wallpaper);

        Task::perform(
            Wallpaper::load_async(path, self.wallpaper_target),
            move |wallpaper| Message::WallpaperLoaded(generation, wallpaper),
        )
    }

    fn launch(&self, index: usize) -> Task<Message> {
        match self.launcher.get(index) {
            Some(entry) => dock::launch(&entry.command),
            None => {
                tracing::warn!("No launcher entry at {}", index);
                Task::none()
            }
        }
    }

    fn hover(&mut self, target: HoverTarget, entered: bool) {
        let palette = self.palette();
        let (rest, highlight) = match target {
            HoverTarget::DockItem(_) => (LumenColors::WIDGET_BG, LumenColors::DOCK_HOVER),
            _ => (palette.surface, palette.hover),
        };
        let to = if entered { highlight } else { rest };

        self.animator
            .retarget_color(AnimKey::Hover(target), rest.into(), to.into());
    }

    fn clear_hover(&mut self) {
        for target in [HoverTarget::Clock, HoverTarget::Weather, HoverTarget::Monitor] {
            self.animator.remove(&AnimKey::Hover(target));
        }
        self.clear_dock_hover();
    }

    fn clear_dock_hover(&mut self) {
        let stale: Vec<AnimKey> = self
            .animator
            .keys()
            .filter(|key| matches!(key, AnimKey::Hover(HoverTarget::DockItem(_))))
            .copied()
            .collect();
        for key in stale {
            self.animator.remove(&key);
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.paths.settings_file()) {
            tracing::error!("Failed to save settings: {}", e);
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let palette = self.palette();
        let mut layers: Vec<Element<Message>> = Vec::new();

        layers.push(
            mouse_area(self.wallpaper.view())
                .on_right_press(Message::OpenMenu(MenuKind::Desktop))
                .into(),
        );

        if self.settings.is_visible(Widget::Clock) {
            layers.push(place(self.clock.view(palette, &self.animator), Spacing::CLOCK_Y));
        }
        if self.settings.is_visible(Widget::Weather) {
            let settings = &self.settings.weather;
            layers.push(place(
                self.weather.view(settings, palette, &self.animator),
                Spacing::WEATHER_Y,
            ));
        }
        if self.settings.is_visible(Widget::System) {
            layers.push(place(self.monitor.view(palette, &self.animator), Spacing::MONITOR_Y));
        }

        layers.push(self.view_bottom(palette));

        if self.taskbar.is_start_open() {
            layers.push(backdrop());
            layers.push(
                container(self.taskbar.start_menu(self.launcher.entries(), palette))
                    .padding(Padding {
                        top: 0.0,
                        right: 0.0,
                        bottom: Spacing::TASKBAR_HEIGHT,
                        left: 0.0,
                    })
                    .height(Length::Fill)
                    .align_y(Vertical::Bottom)
                    .into(),
            );
        }

        if let Some(open) = &self.menu {
            layers.push(backdrop());
            layers.push(menu::view(open, menu::entries(open.kind, &self.settings), palette, self.window));
        }

        if let Some(dialog) = &self.dialog {
            layers.push(
                mouse_area(
                    container(dialog.view(palette))
                        .center(Length::Fill)
                        .style(scrim_style(0.4)),
                )
                .interaction(mouse::Interaction::Idle)
                .into(),
            );
        }

        if self.locked {
            layers.push(self.view_lock());
        }

        if let Some(opacity) = self.animator.scalar(&AnimKey::Fade) {
            if opacity < 1.0 {
                layers.push(
                    container(Space::new(Length::Fill, Length::Fill))
                        .style(scrim_style(1.0 - opacity))
                        .into(),
                );
            }
        }

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn slide_offset(&self, key: AnimKey) -> f32 {
        let remaining = self.animator.scalar(&key).unwrap_or(0.0);
        SlideFrom::Bottom.offset(remaining).y.max(0.0)
    }

    /// Dock above the taskbar, both sliding up from below on startup
    fn view_bottom(&self, palette: Palette) -> Element<'_, Message> {
        let mut bottom = Column::new().push(Space::with_height(Length::Fill));

        if self.settings.is_visible(Widget::Launcher) {
            let offset = self.slide_offset(AnimKey::SlideDock);
            bottom = bottom.push(
                container(column![
                    Space::with_height(Length::Fixed(offset)),
                    container(dock::view(self.launcher.entries(), &self.animator))
                        .center_x(Length::Fill),
                ])
                .height(Length::Fixed(DOCK_SLOT))
                .clip(true),
            );
        }

        let offset = self.slide_offset(AnimKey::SlideTaskbar);
        bottom = bottom.push(
            container(column![
                Space::with_height(Length::Fixed(offset)),
                self.taskbar.view(palette),
            ])
            .height(Length::Fixed(Spacing::TASKBAR_HEIGHT))
            .clip(true),
        );

        bottom.width(Length::Fill).height(Length::Fill).into()
    }

    fn view_lock(&self) -> Element<'_, Message> {
        mouse_area(
            container(
                column![
                    text(self.clock.time())
                        .size(Typography::SIZE_CLOCK * 2.0)
                        .font(Typography::BOLD)
                        .color(LumenColors::TEXT_BRIGHT),
                    text(self.clock.date())
                        .size(Typography::SIZE_TITLE)
                        .color(LumenColors::TEXT_DIM),
                    text("Click to unlock")
                        .size(Typography::SIZE_CAPTION)
                        .color(LumenColors::TEXT_MUTED),
                ]
                .spacing(Spacing::SM)
                .align_x(iced::Alignment::Center),
            )
            .center(Length::Fill)
            .style(scrim_style(0.85)),
        )
        .on_press(Message::Unlock)
        .interaction(mouse::Interaction::Pointer)
        .into()
    }
}

/// Position a desktop widget at its fixed offset from the top-left corner
fn place(widget: Element<'_, Message>, top: f32) -> Element<'_, Message> {
    container(widget)
        .padding(Padding {
            top,
            right: 0.0,
            bottom: 0.0,
            left: Spacing::WIDGET_X,
        })
        .into()
}

/// Full-window catcher that closes menus on any click outside them
fn backdrop<'a>() -> Element<'a, Message> {
    mouse_area(Space::new(Length::Fill, Length::Fill))
        .on_press(Message::CloseOverlays)
        .on_right_press(Message::CloseOverlays)
        .interaction(mouse::Interaction::Idle)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Units;
    use crate::messages::DialogField;
    use crate::weather::WeatherReport;
    use lumen_theme::{Rgb, ThemeMode};
    use std::path::Path;
    use tempfile::TempDir;

    fn options(dir: &TempDir) -> ShellOptions {
        ShellOptions {
            paths: Paths {
                config_dir: dir.path().join("config"),
                data_dir: dir.path().join("data"),
            },
            screen: Size::new(64, 48),
            fullscreen: false,
            weather_api_key: None,
        }
    }

    fn desktop(dir: &TempDir) -> Desktop {
        let config = dir.path().join("config");
        std::fs::create_dir_all(&config).unwrap();
        let wallpaper = dir.path().join("missing.jpg");
        std::fs::write(
            config.join("settings.json"),
            serde_json::json!({ "wallpaper": wallpaper.display().to_string() }).to_string(),
        )
        .unwrap();

        let (desktop, _) = Desktop::new(options(dir)).unwrap();
        desktop
    }

    fn animation_timers(desktop: &Desktop) -> Vec<(AnimKey, Token)> {
        desktop
            .timers()
            .into_iter()
            .filter_map(|(timer, _)| match timer {
                Timer::Animation(key, token) => Some((key, token)),
                _ => None,
            })
            .collect()
    }

    fn drain_animations(desktop: &mut Desktop) {
        for _ in 0..100 {
            let live = animation_timers(desktop);
            if live.is_empty() {
                return;
            }
            for (key, token) in live {
                let _ = desktop.update(Message::Animate(key, token));
            }
        }
        panic!("animations never finished");
    }

    #[test]
    fn test_desktop_constructs_with_missing_wallpaper() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);
        assert!(desktop.wallpaper.is_fallback());

        let loaded = Wallpaper::load(Path::new(&desktop.settings.wallpaper), Size::new(64, 48));
        let generation = desktop.wallpaper_generation;
        let _ = desktop.update(Message::WallpaperLoaded(generation, loaded));
        assert!(matches!(desktop.wallpaper, Wallpaper::Gradient));
    }

    #[test]
    fn test_bootstrap_failure_shows_error_chain() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut options = options(&dir);
        options.paths.config_dir = blocker.join("config");

        let (shell, _) = Shell::new(options);
        match shell {
            Shell::Failed { error, chain } => {
                assert!(error.contains("failed to create config directory"));
                assert!(!chain.is_empty());
            }
            Shell::Desktop(_) => panic!("bootstrap should have failed"),
        }
    }

    #[test]
    fn test_missing_config_files_are_created() {
        let dir = TempDir::new().unwrap();
        let (desktop, _) = Desktop::new(options(&dir)).unwrap();

        assert!(desktop.paths.settings_file().exists());
        assert!(desktop.paths.launcher_file().exists());
        assert!(!desktop.launcher.entries().is_empty());
    }

    #[test]
    fn test_startup_animations_run_to_completion() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);

        let keys: Vec<AnimKey> = animation_timers(&desktop).into_iter().map(|(key, _)| key).collect();
        assert!(keys.contains(&AnimKey::Fade));
        assert!(keys.contains(&AnimKey::SlideDock));
        assert!(keys.contains(&AnimKey::SlideTaskbar));

        drain_animations(&mut desktop);
        assert_eq!(desktop.animator.scalar(&AnimKey::Fade), Some(1.0));
        assert_eq!(desktop.animator.scalar(&AnimKey::SlideDock), Some(0.0));
        assert_eq!(desktop.animator.scalar(&AnimKey::SlideTaskbar), Some(0.0));
    }

    #[test]
    fn test_stale_animation_tick_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);

        let _ = desktop.update(Message::Hover(HoverTarget::Clock, true));
        let (_, stale) = animation_timers(&desktop)
            .into_iter()
            .find(|(key, _)| *key == AnimKey::Hover(HoverTarget::Clock))
            .unwrap();
        let _ = desktop.update(Message::Hover(HoverTarget::Clock, false));

        let before = desktop.animator.color(&AnimKey::Hover(HoverTarget::Clock));
        let _ = desktop.update(Message::Animate(AnimKey::Hover(HoverTarget::Clock), stale));
        assert_eq!(desktop.animator.color(&AnimKey::Hover(HoverTarget::Clock)), before);
    }

    #[test]
    fn test_hover_retrigger_leaves_single_sequence() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);
        drain_animations(&mut desktop);

        let _ = desktop.update(Message::Hover(HoverTarget::Clock, true));
        let _ = desktop.update(Message::Hover(HoverTarget::Clock, false));
        let _ = desktop.update(Message::Hover(HoverTarget::Clock, true));

        let clock = AnimKey::Hover(HoverTarget::Clock);
        let live: Vec<_> = animation_timers(&desktop)
            .into_iter()
            .filter(|(key, _)| *key == clock)
            .collect();
        assert_eq!(live.len(), 1);

        drain_animations(&mut desktop);
        assert_eq!(
            desktop.animator.color(&clock),
            Some(Rgb::from(Palette::dark().hover))
        );
    }

    #[test]
    fn test_hiding_widget_removes_its_timer() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);

        let has = |desktop: &Desktop, wanted: Timer| {
            desktop.timers().iter().any(|(timer, _)| *timer == wanted)
        };
        assert!(has(&desktop, Timer::Clock));
        assert!(has(&desktop, Timer::MonitorPoll));

        let _ = desktop.update(Message::Menu(MenuAction::Hide(Widget::Clock)));
        let _ = desktop.update(Message::Menu(MenuAction::Hide(Widget::System)));
        assert!(!has(&desktop, Timer::Clock));
        assert!(!has(&desktop, Timer::MonitorPoll));
        assert!(!has(&desktop, Timer::MonitorSummary));
        assert!(has(&desktop, Timer::Tray));

        let saved = Settings::read(&desktop.paths.settings_file()).unwrap();
        assert!(!saved.is_visible(Widget::Clock));
        assert!(!saved.is_visible(Widget::System));
        assert!(saved.is_visible(Widget::Weather));

        let _ = desktop.update(Message::Menu(MenuAction::ShowHiddenWidgets));
        assert!(has(&desktop, Timer::Clock));
        assert!(!desktop.settings.any_hidden());
    }

    #[test]
    fn test_weather_timer_follows_poll_interval() {
        let dir = TempDir::new().unwrap();
        let desktop = desktop(&dir);

        let weather = desktop
            .timers()
            .into_iter()
            .find(|(timer, _)| *timer == Timer::Weather)
            .map(|(_, interval)| interval);
        assert_eq!(weather, Some(desktop.weather.poll_interval()));
    }

    #[test]
    fn test_sign_out_cancels_animations() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);
        assert!(!animation_timers(&desktop).is_empty());

        let _ = desktop.update(Message::Menu(MenuAction::SignOut));
        assert!(animation_timers(&desktop).is_empty());
    }

    #[test]
    fn test_switch_theme_persists() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);

        let _ = desktop.update(Message::Menu(MenuAction::SwitchTheme));
        assert_eq!(desktop.settings.theme, ThemeMode::Light);
        assert_eq!(desktop.palette(), Palette::light());

        let saved = Settings::read(&desktop.paths.settings_file()).unwrap();
        assert_eq!(saved.theme, ThemeMode::Light);
    }

    #[test]
    fn test_add_application_dialog_persists_entry() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);
        let before = desktop.launcher.entries().len();

        let _ = desktop.update(Message::Menu(MenuAction::AddApplication));
        assert!(desktop.dialog.is_some());

        let _ = desktop.update(Message::Dialog(DialogMessage::Submit));
        assert!(desktop.dialog.is_some());

        let _ = desktop.update(Message::Dialog(DialogMessage::Edited(
            DialogField::Name,
            "Editor".to_string(),
        )));
        let _ = desktop.update(Message::Dialog(DialogMessage::Edited(
            DialogField::Command,
            "gedit".to_string(),
        )));
        let _ = desktop.update(Message::Dialog(DialogMessage::Submit));
        assert!(desktop.dialog.is_none());

        let reloaded = Launcher::load(desktop.paths.launcher_file());
        assert_eq!(reloaded.entries().len(), before + 1);
        assert_eq!(reloaded.entries()[before].name, "Editor");
        assert_eq!(reloaded.entries()[before].command, "gedit");
    }

    #[test]
    fn test_remove_dock_entry_persists() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);
        let second = desktop.launcher.entries()[1].clone();
        let before = desktop.launcher.entries().len();

        let _ = desktop.update(Message::Menu(MenuAction::Remove(0)));

        let reloaded = Launcher::load(desktop.paths.launcher_file());
        assert_eq!(reloaded.entries().len(), before - 1);
        assert_eq!(reloaded.entries()[0], second);
    }

    #[test]
    fn test_change_location_updates_settings() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);

        let _ = desktop.update(Message::Menu(MenuAction::ChangeLocation));
        let _ = desktop.update(Message::Dialog(DialogMessage::Edited(
            DialogField::City,
            " Oslo ".to_string(),
        )));
        let _ = desktop.update(Message::Dialog(DialogMessage::Submit));

        assert!(desktop.dialog.is_none());
        let saved = Settings::read(&desktop.paths.settings_file()).unwrap();
        assert_eq!(saved.weather.city, "Oslo");
    }

    #[test]
    fn test_change_location_supersedes_fetch_in_flight() {
        let dir = TempDir::new().unwrap();
        let mut options = options(&dir);
        options.weather_api_key = Some("key".to_string());
        let (mut desktop, _) = Desktop::new(options).unwrap();
        assert!(desktop.weather.is_loading());

        let _ = desktop.update(Message::Menu(MenuAction::ChangeLocation));
        let _ = desktop.update(Message::Dialog(DialogMessage::Edited(
            DialogField::City,
            "Oslo".to_string(),
        )));
        let _ = desktop.update(Message::Dialog(DialogMessage::Submit));

        let report = |city: &str| WeatherReport {
            city: city.to_string(),
            temperature: 4,
            units: Units::Metric,
            description: "Light Rain".to_string(),
            icon: "10d".to_string(),
        };

        // Startup fetch was request 1, the location change request 2
        let _ = desktop.update(Message::Weather(WeatherMessage::Fetched(
            1,
            Ok(report("New York")),
        )));
        assert!(desktop.weather.report().is_none());
        assert!(desktop.weather.is_loading());

        let _ = desktop.update(Message::Weather(WeatherMessage::Fetched(
            2,
            Ok(report("Oslo")),
        )));
        assert_eq!(desktop.weather.report().map(|r| r.city.as_str()), Some("Oslo"));
        assert!(!desktop.weather.is_loading());
        assert_eq!(desktop.weather.poll_interval(), crate::weather::REFRESH_INTERVAL);
    }

    #[test]
    fn test_menus_open_at_cursor_and_close_on_escape() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);

        let _ = desktop.update(Message::Window(WindowEvent::CursorMoved(Point::new(30.0, 12.0))));
        let _ = desktop.update(Message::OpenMenu(MenuKind::Clock));
        assert_eq!(
            desktop.menu,
            Some(ContextMenu {
                kind: MenuKind::Clock,
                position: Point::new(30.0, 12.0),
            })
        );

        let _ = desktop.update(Message::Window(WindowEvent::Escape));
        assert!(desktop.menu.is_none());

        let _ = desktop.update(Message::Taskbar(TaskbarMessage::StartClicked));
        assert!(desktop.taskbar.is_start_open());
        let _ = desktop.update(Message::CloseOverlays);
        assert!(!desktop.taskbar.is_start_open());
    }

    #[test]
    fn test_system_keys_open_system_menu() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);

        let _ = desktop.update(Message::Window(WindowEvent::SystemKeys));
        assert_eq!(desktop.menu.map(|menu| menu.kind), Some(MenuKind::System));

        let _ = desktop.update(Message::Menu(MenuAction::Lock));
        assert!(desktop.menu.is_none());
        assert!(desktop.locked);
        assert!(desktop.timers().iter().any(|(timer, _)| *timer == Timer::Clock));

        let _ = desktop.update(Message::Unlock);
        assert!(!desktop.locked);
    }

    #[test]
    fn test_stale_wallpaper_load_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut desktop = desktop(&dir);
        let stale = desktop.wallpaper_generation;

        let _ = desktop.update(Message::Window(WindowEvent::Resized(Size::new(100.0, 80.0))));
        assert_eq!(desktop.wallpaper_generation, stale + 1);
        assert_eq!(desktop.wallpaper_target, Size::new(100, 80));

        let _ = desktop.update(Message::WallpaperLoaded(stale, Wallpaper::Gradient));
        assert!(matches!(desktop.wallpaper, Wallpaper::Solid));

        let _ = desktop.update(Message::WallpaperLoaded(stale + 1, Wallpaper::Gradient));
        assert!(matches!(desktop.wallpaper, Wallpaper::Gradient));
    }

    #[test]
    fn test_cli_key_is_not_written_to_settings() {
        let dir = TempDir::new().unwrap();
        let mut options = options(&dir);
        options.weather_api_key = Some("from-env".to_string());
        let (mut desktop, _) = Desktop::new(options).unwrap();

        assert_eq!(desktop.weather_settings().api_key, "from-env");
        let _ = desktop.update(Message::Menu(MenuAction::SwitchTheme));

        let saved = Settings::read(&desktop.paths.settings_file()).unwrap();
        assert_eq!(saved.weather.api_key, "");
    }
}
