//! Desktop wallpaper loading and rendering

use iced::gradient::{self, Gradient};
use iced::widget::{container, image, Space};
use iced::{Background, ContentFit, Degrees, Element, Length, Size};
use lumen_theme::LumenColors;
use std::path::{Path, PathBuf};

/// What the desktop background shows
#[derive(Debug, Clone)]
pub enum Wallpaper {
    /// Decoded image scaled to cover the screen
    Image {
        handle: image::Handle,
        size: Size<u32>,
    },
    /// The configured file does not exist
    Gradient,
    /// The configured file could not be decoded
    Solid,
}

impl Wallpaper {
    /// Load `path` scaled to cover `screen`. Never fails; missing or
    /// unreadable files yield a synthesized fill.
    pub fn load(path: &Path, screen: Size<u32>) -> Self {
        if !path.exists() {
            tracing::info!("Wallpaper {} not found, using gradient", path.display());
            return Wallpaper::Gradient;
        }

        match ::image::open(path) {
            Ok(decoded) => {
                let width = screen.width.max(1);
                let height = screen.height.max(1);
                let rgba = decoded
                    .resize_to_fill(width, height, ::image::imageops::FilterType::Lanczos3)
                    .to_rgba8();
                let size = Size::new(rgba.width(), rgba.height());

                Wallpaper::Image {
                    handle: image::Handle::from_rgba(size.width, size.height, rgba.into_raw()),
                    size,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to decode wallpaper {}: {}", path.display(), e);
                Wallpaper::Solid
            }
        }
    }

    /// Decode off the UI thread
    pub async fn load_async(path: PathBuf, screen: Size<u32>) -> Self {
        match tokio::task::spawn_blocking(move || Wallpaper::load(&path, screen)).await {
            Ok(wallpaper) => wallpaper,
            Err(e) => {
                tracing::error!("Wallpaper loader panicked: {}", e);
                Wallpaper::Solid
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self, Wallpaper::Image { .. })
    }

    pub fn view<'a, Message: 'a>(&self) -> Element<'a, Message> {
        match self {
            Wallpaper::Image { handle, .. } => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .into(),
            Wallpaper::Gradient => container(Space::new(Length::Fill, Length::Fill))
                .style(|_theme| container::Style {
                    background: Some(Background::Gradient(Gradient::Linear(
                        gradient::Linear::new(Degrees(180.0))
                            .add_stop(0.0, LumenColors::GRADIENT_TOP)
                            .add_stop(1.0, LumenColors::GRADIENT_BOTTOM),
                    ))),
                    ..container::Style::default()
                })
                .into(),
            Wallpaper::Solid => container(Space::new(Length::Fill, Length::Fill))
                .style(lumen_theme::widgets::fill_style(LumenColors::FALLBACK_SOLID))
                .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_gradient() {
        let dir = tempfile::tempdir().unwrap();
        let wallpaper = Wallpaper::load(&dir.path().join("nope.jpg"), Size::new(64, 48));
        assert!(matches!(wallpaper, Wallpaper::Gradient));
        assert!(wallpaper.is_fallback());
    }

    #[test]
    fn test_undecodable_file_yields_solid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        assert!(matches!(Wallpaper::load(&path, Size::new(64, 48)), Wallpaper::Solid));
    }

    #[test]
    fn test_image_is_scaled_to_cover_screen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tall.png");
        ::image::RgbaImage::from_pixel(10, 40, ::image::Rgba([200, 10, 10, 255]))
            .save(&path)
            .unwrap();

        match Wallpaper::load(&path, Size::new(32, 16)) {
            Wallpaper::Image { size, .. } => assert_eq!(size, Size::new(32, 16)),
            other => panic!("expected image, got {other:?}"),
        }
    }
}
