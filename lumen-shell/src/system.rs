//! Host metrics for the system monitor widget

use chrono::{Local, TimeZone};
use lumen_theme::LumenColors;
use iced::Color;
use std::path::Path;
use std::time::{Duration, Instant};
use sysinfo::{Disks, Networks, System, MINIMUM_CPU_UPDATE_INTERVAL};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Usage band for the colored bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Up to 70%
    Normal,
    /// Above 70%, up to 90%
    Elevated,
    /// Above 90%
    Critical,
}

impl Band {
    pub fn for_usage(percent: f32) -> Self {
        if percent > 90.0 {
            Band::Critical
        } else if percent > 70.0 {
            Band::Elevated
        } else {
            Band::Normal
        }
    }

    pub fn color(self) -> Color {
        match self {
            Band::Normal => LumenColors::BAND_GREEN,
            Band::Elevated => LumenColors::BAND_AMBER,
            Band::Critical => LumenColors::BAND_RED,
        }
    }
}

/// Format a byte rate, walking B/s up to GB/s with one decimal
pub fn format_speed(bytes_per_sec: f64) -> String {
    let mut speed = bytes_per_sec.max(0.0);
    for unit in ["B/s", "KB/s", "MB/s"] {
        if speed < 1024.0 {
            return format!("{:.1} {}", speed, unit);
        }
        speed /= 1024.0;
    }
    format!("{:.1} GB/s", speed)
}

/// Format seconds of uptime as `Nd Nh`
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    format!("{}d {}h", days, hours)
}

/// Cumulative interface counters summed over all interfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetCounters {
    pub sent: u64,
    pub received: u64,
}

/// Transfer rate between two counter readings, in bytes per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetRate {
    pub sent: f64,
    pub received: f64,
}

impl NetRate {
    /// Rate between two readings taken `elapsed` apart.
    ///
    /// Counters that went backwards (interface reset) count as zero traffic.
    pub fn between(prev: NetCounters, next: NetCounters, elapsed: Duration) -> Option<Self> {
        let seconds = elapsed.as_secs_f64();
        if seconds <= 0.0 {
            return None;
        }

        Some(Self {
            sent: next.sent.saturating_sub(prev.sent) as f64 / seconds,
            received: next.received.saturating_sub(prev.received) as f64 / seconds,
        })
    }

    /// `↑send ↓recv`
    pub fn label(&self) -> String {
        format!("↑{} ↓{}", format_speed(self.sent), format_speed(self.received))
    }
}

/// Used/total pair with its percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Usage {
    pub percent: f32,
    pub used: u64,
    pub total: u64,
}

impl Usage {
    pub fn new(used: u64, total: u64) -> Option<Self> {
        if total == 0 {
            return None;
        }
        Some(Self {
            percent: (used as f64 / total as f64 * 100.0) as f32,
            used,
            total,
        })
    }

    /// `NN.N% (used/total GB)`
    pub fn label(&self) -> String {
        format!(
            "{:.1}% ({:.1}/{:.1} GB)",
            self.percent,
            self.used as f64 / GIB,
            self.total as f64 / GIB
        )
    }
}

/// One polling cycle; metrics that could not be read are `None`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub cpu: Option<f32>,
    pub memory: Option<Usage>,
    pub disk: Option<Usage>,
    pub network: Option<NetRate>,
}

/// Whether a CPU refresh at `now` yields a meaningful usage figure
fn cpu_ready(refreshed: Instant, now: Instant) -> bool {
    now.saturating_duration_since(refreshed) >= MINIMUM_CPU_UPDATE_INTERVAL
}

/// Reads CPU, memory, disk and network figures from the host
pub struct SystemSampler {
    system: System,
    disks: Disks,
    networks: Networks,
    /// Baseline the next CPU usage figure is computed against
    cpu_refreshed: Instant,
    last_network: Option<(Instant, NetCounters)>,
}

impl Default for SystemSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSampler {
    pub fn new() -> Self {
        let networks = Networks::new_with_refreshed_list();
        let last_network = Some((Instant::now(), Self::counters(&networks)));
        let disks = Disks::new_with_refreshed_list();

        let mut system = System::new();
        system.refresh_memory();
        system.refresh_cpu_all();

        Self {
            system,
            disks,
            networks,
            cpu_refreshed: Instant::now(),
            last_network,
        }
    }

    /// Refresh and read every metric. CPU usage is skipped until enough
    /// time has passed since the previous CPU refresh to measure it.
    pub fn sample(&mut self) -> Sample {
        let now = Instant::now();
        let cpu = if cpu_ready(self.cpu_refreshed, now) {
            self.system.refresh_cpu_usage();
            self.cpu_refreshed = now;
            self.cpu()
        } else {
            None
        };
        self.system.refresh_memory();
        self.disks.refresh();
        self.networks.refresh();

        Sample {
            cpu,
            memory: Usage::new(self.system.used_memory(), self.system.total_memory()),
            disk: self.disk(),
            network: self.network(),
        }
    }

    fn cpu(&self) -> Option<f32> {
        if self.system.cpus().is_empty() {
            return None;
        }
        Some(self.system.global_cpu_usage().clamp(0.0, 100.0))
    }

    /// Root mount, or the first disk when there is none
    fn disk(&self) -> Option<Usage> {
        let list = self.disks.list();
        let disk = list
            .iter()
            .find(|disk| disk.mount_point() == Path::new("/"))
            .or_else(|| list.first())?;

        let total = disk.total_space();
        Usage::new(total.saturating_sub(disk.available_space()), total)
    }

    fn network(&mut self) -> Option<NetRate> {
        let now = Instant::now();
        let counters = Self::counters(&self.networks);
        let previous = self.last_network.replace((now, counters));

        previous.and_then(|(at, prev)| NetRate::between(prev, counters, now - at))
    }

    fn counters(networks: &Networks) -> NetCounters {
        networks
            .iter()
            .fold(NetCounters::default(), |acc, (_, data)| NetCounters {
                sent: acc.sent + data.total_transmitted(),
                received: acc.received + data.total_received(),
            })
    }

    /// `CPU: 4C/8T 3.2GHz | Linux 6.8.0 | Boot: 2024-05-01 08:00:00 | Uptime: 1d 2h`
    pub fn summary(&self) -> String {
        let logical = self.system.cpus().len();
        let physical = self.system.physical_core_count().unwrap_or(logical);
        let ghz = self
            .system
            .cpus()
            .first()
            .map(|cpu| cpu.frequency() as f64 / 1000.0)
            .unwrap_or(0.0);
        let cpu = format!("CPU: {}C/{}T {:.1}GHz", physical, logical, ghz);

        let os = format!(
            "{} {}",
            System::name().unwrap_or_else(|| "Unknown".to_string()),
            System::kernel_version().unwrap_or_default()
        );

        let boot = Local
            .timestamp_opt(System::boot_time() as i64, 0)
            .single()
            .map(|time| time.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        format!(
            "{} | {} | Boot: {} | Uptime: {}",
            cpu,
            os.trim(),
            boot,
            format_uptime(System::uptime())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_rate_from_counter_deltas() {
        let rate = NetRate::between(
            NetCounters { sent: 1000, received: 2000 },
            NetCounters { sent: 2024, received: 2048 },
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(rate.sent, 1024.0);
        assert_eq!(rate.received, 48.0);
        assert_eq!(format_speed(rate.sent), "1.0 KB/s");
        assert_eq!(format_speed(rate.received), "48.0 B/s");
        assert_eq!(rate.label(), "↑1.0 KB/s ↓48.0 B/s");
    }

    #[test]
    fn test_network_rate_scales_by_elapsed_time() {
        let rate = NetRate::between(
            NetCounters { sent: 0, received: 0 },
            NetCounters { sent: 4096, received: 100 },
            Duration::from_secs(2),
        )
        .unwrap();
        assert_eq!(rate.sent, 2048.0);
        assert_eq!(rate.received, 50.0);
    }

    #[test]
    fn test_network_rate_needs_elapsed_time() {
        let counters = NetCounters { sent: 1, received: 1 };
        assert!(NetRate::between(counters, counters, Duration::ZERO).is_none());
    }

    #[test]
    fn test_counter_reset_is_zero_traffic() {
        let rate = NetRate::between(
            NetCounters { sent: 5000, received: 5000 },
            NetCounters { sent: 10, received: 6000 },
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(rate.sent, 0.0);
        assert_eq!(rate.received, 1000.0);
    }

    #[test]
    fn test_format_speed_units() {
        assert_eq!(format_speed(0.0), "0.0 B/s");
        assert_eq!(format_speed(1023.0), "1023.0 B/s");
        assert_eq!(format_speed(1536.0), "1.5 KB/s");
        assert_eq!(format_speed(5.0 * 1024.0 * 1024.0), "5.0 MB/s");
        assert_eq!(format_speed(3.0 * GIB), "3.0 GB/s");
        assert_eq!(format_speed(4096.0 * GIB), "4096.0 GB/s");
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(Band::for_usage(65.0), Band::Normal);
        assert_eq!(Band::for_usage(75.0), Band::Elevated);
        assert_eq!(Band::for_usage(95.0), Band::Critical);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::for_usage(70.0), Band::Normal);
        assert_eq!(Band::for_usage(70.1), Band::Elevated);
        assert_eq!(Band::for_usage(90.0), Band::Elevated);
        assert_eq!(Band::for_usage(90.1), Band::Critical);
        assert_eq!(Band::Critical.color(), LumenColors::BAND_RED);
    }

    #[test]
    fn test_usage_label() {
        let usage = Usage::new(4 * 1024 * 1024 * 1024, 16 * 1024 * 1024 * 1024).unwrap();
        assert_eq!(usage.label(), "25.0% (4.0/16.0 GB)");
        assert!(Usage::new(1, 0).is_none());
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0d 0h");
        assert_eq!(format_uptime(90_000), "1d 1h");
        assert_eq!(format_uptime(3 * 86_400 + 5 * 3600 + 59), "3d 5h");
    }

    #[test]
    fn test_cpu_needs_minimum_interval() {
        let start = Instant::now();
        assert!(!cpu_ready(start, start));
        assert!(cpu_ready(start, start + MINIMUM_CPU_UPDATE_INTERVAL));
        assert!(cpu_ready(start, start + Duration::from_secs(2)));
    }

    #[test]
    fn test_first_sample_skips_cpu() {
        let mut sampler = SystemSampler::new();
        assert!(sampler.sample().cpu.is_none());
    }

    #[test]
    fn test_sampler_reports_sane_values() {
        let mut sampler = SystemSampler::new();
        let sample = sampler.sample();

        if let Some(cpu) = sample.cpu {
            assert!((0.0..=100.0).contains(&cpu));
        }
        if let Some(memory) = sample.memory {
            assert!(memory.used <= memory.total);
        }
        assert!(sampler.summary().starts_with("CPU: "));
    }
}
