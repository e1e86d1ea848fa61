//! System monitor widget

use crate::app::desktop_card;
use crate::messages::{AnimKey, HoverTarget, MenuKind, Message};
use crate::system::{Band, NetRate, Sample, SystemSampler, Usage};
use iced::widget::{column, container, row, text, Column, Space};
use iced::{Element, Length};
use lumen_theme::widgets::card::fill_style;
use lumen_theme::{Animator, LumenColors, Palette, Spacing, Typography};
use std::time::Duration;

/// Metric poll interval
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Summary line refresh interval
pub const SUMMARY_INTERVAL: Duration = Duration::from_secs(5);

/// Last known value of every metric
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readings {
    pub cpu: Option<f32>,
    pub memory: Option<Usage>,
    pub disk: Option<Usage>,
    pub network: Option<NetRate>,
}

impl Readings {
    /// Take every metric the sample has; missing ones keep their last value
    pub fn apply(&mut self, sample: Sample) {
        if let Some(cpu) = sample.cpu {
            self.cpu = Some(cpu);
        }
        if let Some(memory) = sample.memory {
            self.memory = Some(memory);
        }
        if let Some(disk) = sample.disk {
            self.disk = Some(disk);
        }
        if let Some(network) = sample.network {
            self.network = Some(network);
        }
    }
}

/// System monitor widget state
pub struct Monitor {
    sampler: SystemSampler,
    readings: Readings,
    summary: String,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Monitor {
    pub fn new() -> Self {
        let sampler = SystemSampler::new();
        let summary = sampler.summary();
        Self {
            sampler,
            readings: Readings::default(),
            summary,
        }
    }

    /// Read fresh metrics from the host
    pub fn poll(&mut self) {
        let sample = self.sampler.sample();
        if sample.disk.is_none() {
            tracing::debug!("Disk usage unavailable this cycle");
        }
        self.readings.apply(sample);
    }

    pub fn refresh_summary(&mut self) {
        self.summary = self.sampler.summary();
    }

    pub fn view(&self, palette: Palette, animator: &Animator<AnimKey>) -> Element<'_, Message> {
        let readings = &self.readings;

        let cpu = metric(
            "CPU",
            readings.cpu.map(|cpu| format!("{:.1}%", cpu)),
            readings.cpu,
            palette,
        );
        let memory = metric(
            "Memory",
            readings.memory.map(|usage| usage.label()),
            readings.memory.map(|usage| usage.percent),
            palette,
        );
        let disk = metric(
            "Disk",
            readings.disk.map(|usage| usage.label()),
            readings.disk.map(|usage| usage.percent),
            palette,
        );
        let network = row![
            text("Network").size(Typography::SIZE_LABEL).color(palette.text_secondary),
            Space::with_width(Length::Fill),
            text(
                readings
                    .network
                    .map(|rate| rate.label())
                    .unwrap_or_else(|| "↑0.0 B/s ↓0.0 B/s".to_string())
            )
            .size(Typography::SIZE_LABEL)
            .color(palette.text_primary),
        ];

        let content = Column::new()
            .push(
                text("System Monitor")
                    .size(Typography::SIZE_TITLE)
                    .font(Typography::BOLD)
                    .color(palette.text_primary),
            )
            .push(cpu)
            .push(memory)
            .push(disk)
            .push(network)
            .push(
                text(&self.summary)
                    .size(Typography::SIZE_CAPTION)
                    .color(palette.text_secondary),
            )
            .spacing(Spacing::SM)
            .width(Length::Fixed(Spacing::BAR_WIDTH + 2.0 * Spacing::LG));

        desktop_card(content, palette, HoverTarget::Monitor, MenuKind::Monitor, animator)
    }
}

fn metric<'a>(
    label: &'a str,
    value: Option<String>,
    percent: Option<f32>,
    palette: Palette,
) -> Element<'a, Message> {
    column![
        row![
            text(label).size(Typography::SIZE_LABEL).color(palette.text_secondary),
            Space::with_width(Length::Fill),
            text(value.unwrap_or_else(|| "--".to_string()))
                .size(Typography::SIZE_LABEL)
                .color(palette.text_primary),
        ],
        usage_bar(percent.unwrap_or(0.0)),
    ]
    .spacing(Spacing::XXS)
    .into()
}

/// Trough with a filled segment colored by usage band
fn usage_bar<'a>(percent: f32) -> Element<'a, Message> {
    let filled = (percent.clamp(0.0, 100.0) / 100.0) * Spacing::BAR_WIDTH;

    container(
        container(Space::new(Length::Fixed(filled), Length::Fixed(Spacing::BAR_HEIGHT)))
            .style(fill_style(Band::for_usage(percent).color())),
    )
    .width(Length::Fixed(Spacing::BAR_WIDTH))
    .height(Length::Fixed(Spacing::BAR_HEIGHT))
    .style(fill_style(LumenColors::BAR_TROUGH))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_metric_keeps_last_value() {
        let mut readings = Readings::default();
        let disk = Usage::new(50, 100).unwrap();

        readings.apply(Sample {
            cpu: Some(12.5),
            memory: None,
            disk: Some(disk),
            network: None,
        });
        readings.apply(Sample {
            cpu: Some(40.0),
            memory: Usage::new(1, 4),
            disk: None,
            network: None,
        });

        assert_eq!(readings.cpu, Some(40.0));
        assert_eq!(readings.disk, Some(disk));
        assert_eq!(readings.memory.map(|m| m.percent), Some(25.0));
        assert!(readings.network.is_none());
    }

    #[test]
    fn test_poll_fills_readings() {
        let mut monitor = Monitor::new();
        monitor.poll();
        assert!(monitor.readings.cpu.is_none());

        monitor.refresh_summary();
        assert!(monitor.summary.contains("Uptime: "));
    }
}
