//! Weather widget backed by the OpenWeatherMap current-weather API

use crate::app::desktop_card;
use crate::config::{Units, WeatherSettings};
use crate::error::WeatherError;
use crate::messages::{AnimKey, HoverTarget, MenuKind, Message, WeatherMessage};
use iced::widget::{column, container, image, row, text};
use iced::{Alignment, Element, Length, Task};
use lumen_theme::{Animator, Palette, Spacing, Typography};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current-weather endpoint
pub const API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Poll interval after a successful update
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);
/// Poll interval after a failed update
pub const RETRY_INTERVAL: Duration = Duration::from_secs(5 * 60);
/// How often to check again while no API key is configured
pub const NO_KEY_INTERVAL: Duration = Duration::from_secs(60);

const ICON_SIZE: u32 = 64;

/// Icon image URL for a condition code such as `10d`
pub fn icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", code)
}

/// Current conditions, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// City name as reported by the service
    pub city: String,
    /// Rounded temperature
    pub temperature: i64,
    pub units: Units,
    /// Title-cased description
    pub description: String,
    /// Condition icon code
    pub icon: String,
}

impl WeatherReport {
    /// `21°C`
    pub fn temperature_label(&self) -> String {
        format!("{}{}", self.temperature, self.units.symbol())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    name: String,
    main: ApiMain,
    weather: Vec<ApiCondition>,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Parse a current-weather response body
pub fn parse_report(body: &str, units: Units) -> Result<WeatherReport, WeatherError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Malformed(e.to_string()))?;
    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Malformed("no weather conditions".to_string()))?;

    Ok(WeatherReport {
        city: response.name,
        temperature: response.main.temp.round() as i64,
        units,
        description: title_case(&condition.description),
        icon: condition.icon,
    })
}

/// Capitalize the first letter of every word, lowercase the rest
pub fn title_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut word_start = true;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            result.push(ch);
            word_start = true;
        }
    }
    result
}

/// Fetch current conditions for the configured city
pub async fn fetch(
    client: reqwest::Client,
    settings: WeatherSettings,
) -> Result<WeatherReport, WeatherError> {
    let api_key = settings.api_key.trim();
    if api_key.is_empty() {
        return Err(WeatherError::MissingApiKey);
    }

    let response = client
        .get(API_URL)
        .query(&[
            ("q", settings.city.as_str()),
            ("appid", api_key),
            ("units", settings.units.as_query()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        return Err(WeatherError::Status {
            status: status.as_u16(),
            message,
        });
    }

    parse_report(&body, settings.units)
}

/// Load the icon for `code`, from `cache_dir` if present, otherwise from the
/// service (writing the cache).
pub async fn load_icon(
    client: reqwest::Client,
    cache_dir: PathBuf,
    code: String,
) -> Result<image::Handle, WeatherError> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(WeatherError::Malformed(format!("bad icon code {:?}", code)));
    }

    let path = cache_dir.join(format!("{}.png", code));
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(_) => {
            let bytes = download_icon(&client, &code).await?;
            store_icon(&cache_dir, &path, &bytes).await?;
            bytes
        }
    };

    decode_icon(&bytes)
}

async fn download_icon(client: &reqwest::Client, code: &str) -> Result<Vec<u8>, WeatherError> {
    let response = client.get(icon_url(code)).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

async fn store_icon(cache_dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), WeatherError> {
    tokio::fs::create_dir_all(cache_dir).await?;
    tokio::fs::write(path, bytes).await?;
    tracing::debug!("Cached weather icon {}", path.display());
    Ok(())
}

/// Decode and scale an icon to the widget size
pub fn decode_icon(bytes: &[u8]) -> Result<image::Handle, WeatherError> {
    let rgba = ::image::load_from_memory(bytes)?
        .resize_exact(ICON_SIZE, ICON_SIZE, ::image::imageops::FilterType::Lanczos3)
        .to_rgba8();
    Ok(image::Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw()))
}

/// Weather widget state
#[derive(Debug)]
pub struct Weather {
    client: reqwest::Client,
    icon_dir: PathBuf,
    report: Option<WeatherReport>,
    icon: Option<(String, image::Handle)>,
    poll_interval: Duration,
    /// Bumped by every request; results from older requests are dropped
    generation: u64,
    loading: bool,
}

impl Weather {
    pub fn new(client: reqwest::Client, icon_dir: PathBuf) -> Self {
        Self {
            client,
            icon_dir,
            report: None,
            icon: None,
            poll_interval: NO_KEY_INTERVAL,
            generation: 0,
            loading: false,
        }
    }

    /// Delay until the next scheduled poll
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start a fetch for `settings`, superseding any fetch still in flight.
    /// Does nothing without an API key.
    pub fn request(&mut self, settings: &WeatherSettings) -> Task<Message> {
        self.generation += 1;

        if settings.api_key.trim().is_empty() {
            tracing::debug!("No weather API key, checking again in {:?}", NO_KEY_INTERVAL);
            self.poll_interval = NO_KEY_INTERVAL;
            self.loading = false;
            return Task::none();
        }

        self.loading = true;
        let generation = self.generation;
        Task::perform(fetch(self.client.clone(), settings.clone()), move |result| {
            Message::Weather(WeatherMessage::Fetched(
                generation,
                result.map_err(|e| e.to_string()),
            ))
        })
    }

    /// Apply the result of request `generation`; returns the icon load when
    /// the condition changed
    pub fn fetched(
        &mut self,
        generation: u64,
        result: Result<WeatherReport, String>,
    ) -> Task<Message> {
        if generation != self.generation {
            tracing::debug!("Dropping superseded weather result {}", generation);
            return Task::none();
        }
        self.loading = false;

        match result {
            Ok(report) => {
                tracing::info!(
                    "Weather for {}: {} {}",
                    report.city,
                    report.temperature_label(),
                    report.description
                );
                self.poll_interval = REFRESH_INTERVAL;

                let code = report.icon.clone();
                self.report = Some(report);

                if self.icon.as_ref().is_some_and(|(current, _)| *current == code) {
                    return Task::none();
                }
                Task::perform(
                    load_icon(self.client.clone(), self.icon_dir.clone(), code.clone()),
                    move |result| {
                        Message::Weather(WeatherMessage::IconLoaded(
                            code.clone(),
                            result.map_err(|e| e.to_string()),
                        ))
                    },
                )
            }
            Err(e) => {
                tracing::warn!("Error updating weather: {}", e);
                self.poll_interval = RETRY_INTERVAL;
                Task::none()
            }
        }
    }

    /// Apply an icon load; failures keep the previous icon
    pub fn icon_loaded(&mut self, code: String, result: Result<image::Handle, String>) {
        match result {
            Ok(handle) => self.icon = Some((code, handle)),
            Err(e) => tracing::warn!("Error loading weather icon {}: {}", code, e),
        }
    }

    pub fn view<'a>(
        &'a self,
        settings: &'a WeatherSettings,
        palette: Palette,
        animator: &Animator<AnimKey>,
    ) -> Element<'a, Message> {
        let (temperature, description, city) = match self.report() {
            Some(report) => (
                report.temperature_label(),
                report.description.as_str(),
                report.city.as_str(),
            ),
            None => (
                format!("--{}", settings.units.symbol()),
                if self.is_loading() { "Loading..." } else { "No data" },
                settings.city.as_str(),
            ),
        };

        let icon: Element<Message> = match &self.icon {
            Some((_, handle)) => image(handle.clone())
                .width(Length::Fixed(Spacing::WEATHER_ICON))
                .height(Length::Fixed(Spacing::WEATHER_ICON))
                .into(),
            None => container(text(""))
                .width(Length::Fixed(Spacing::WEATHER_ICON))
                .height(Length::Fixed(Spacing::WEATHER_ICON))
                .into(),
        };

        let content = column![
            row![
                icon,
                column![
                    text(temperature)
                        .size(Typography::SIZE_TEMPERATURE)
                        .font(Typography::BOLD)
                        .color(palette.text_primary),
                    text(description)
                        .size(Typography::SIZE_BODY)
                        .color(palette.text_secondary),
                ]
                .spacing(Spacing::XXS),
            ]
            .spacing(Spacing::SM)
            .align_y(Alignment::Center),
            text(city)
                .size(Typography::SIZE_CAPTION)
                .color(palette.text_secondary),
        ]
        .spacing(Spacing::XS);

        desktop_card(content, palette, HoverTarget::Weather, MenuKind::Weather, animator)
    }
}
