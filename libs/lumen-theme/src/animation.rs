//! Eased interpolation for Lumen widgets
//!
//! A [`Tween`] walks a value from `start` to `end` over a fixed number of
//! ticks, shaping progress with an [`Easing`] curve. [`ColorTween`] runs the
//! same sweep independently on each RGB channel.
//!
//! The shell never loops over a tween itself: it asks the [`Animator`] which
//! sequences are live and schedules one timer per sequence at
//! [`Animator::running`]'s interval. Each timer tick carries the [`Token`]
//! handed out when the sequence started, so a tick that belongs to a
//! replaced or cancelled sequence is silently dropped.

use iced::{Color, Vector};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

/// Whole-window fade-in duration
pub const FADE_DURATION: Duration = Duration::from_millis(300);
/// Whole-window fade-in tick count
pub const FADE_STEPS: u32 = 20;

/// Slide-in duration for the dock and taskbar
pub const SLIDE_DURATION: Duration = Duration::from_millis(300);
/// Slide-in tick count
pub const SLIDE_STEPS: u32 = 20;

/// Hover color transition duration
pub const HOVER_DURATION: Duration = Duration::from_millis(200);
/// Hover color transition tick count
pub const HOVER_STEPS: u32 = 10;

/// Easing curve mapping normalized time to progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No shaping
    Linear,
    /// `1 - (1 - t)^2`
    #[default]
    EaseOutQuad,
    /// `1 - (1 - t)^3`
    EaseOutCubic,
}

impl Easing {
    /// Map `t` (clamped to `[0, 1]`) onto the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t).powi(2),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A finite, self-terminating interpolation between two scalars.
///
/// Yields `steps + 1` values: the first is `start`, the last is exactly
/// `end`. Every value lies between the two endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    start: f32,
    end: f32,
    duration: Duration,
    steps: u32,
    step: u32,
    easing: Easing,
}

impl Tween {
    /// Create a tween. A step count of zero is treated as one.
    pub fn new(start: f32, end: f32, duration: Duration, steps: u32) -> Self {
        Self {
            start,
            end,
            duration,
            steps: steps.max(1),
            step: 0,
            easing: Easing::default(),
        }
    }

    /// Set the easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Opacity sweep from transparent to opaque
    pub fn fade_in() -> Self {
        Self::new(0.0, 1.0, FADE_DURATION, FADE_STEPS).with_easing(Easing::EaseOutQuad)
    }

    /// Offset sweep from `distance` back to rest
    pub fn slide_in(distance: f32) -> Self {
        Self::new(distance, 0.0, SLIDE_DURATION, SLIDE_STEPS).with_easing(Easing::EaseOutCubic)
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Delay between two ticks
    pub fn interval(&self) -> Duration {
        (self.duration / self.steps).max(Duration::from_millis(1))
    }

    /// Value applied on tick `step`
    pub fn value_at(&self, step: u32) -> f32 {
        if step >= self.steps {
            return self.end;
        }

        let t = step as f32 / self.steps as f32;
        let value = self.start + (self.end - self.start) * self.easing.apply(t);

        let (low, high) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        value.clamp(low, high)
    }

    /// Whether the final value has already been produced
    pub fn is_finished(&self) -> bool {
        self.step > self.steps
    }
}

impl Iterator for Tween {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.is_finished() {
            return None;
        }

        let value = self.value_at(self.step);
        self.step += 1;
        Some(value)
    }
}

/// Edge a slide-in enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideFrom {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl SlideFrom {
    /// Translation for a slide tween value (distance still to travel)
    pub fn offset(self, remaining: f32) -> Vector {
        match self {
            SlideFrom::Top => Vector::new(0.0, -remaining),
            SlideFrom::Bottom => Vector::new(0.0, remaining),
            SlideFrom::Left => Vector::new(-remaining, 0.0),
            SlideFrom::Right => Vector::new(remaining, 0.0),
        }
    }
}

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` / `rrggbb`; an `aa` alpha suffix is ignored
    pub fn from_hex(hex: &str) -> Option<Self> {
        hex_to_rgb(hex)
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    /// Per-channel interpolation, rounded to the nearest integer
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        fn channel(a: u8, b: u8, t: f32) -> u8 {
            let value = a as f32 + (b as f32 - a as f32) * t;
            value.round().clamp(0.0, 255.0) as u8
        }

        Rgb {
            r: channel(self.r, other.r, t),
            g: channel(self.g, other.g, t),
            b: channel(self.b, other.b, t),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::from_rgb8(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let [r, g, b, _] = color.into_rgba8();
        Rgb { r, g, b }
    }
}

/// Parse a hex color into channels
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    let hex = match hex.len() {
        6 => hex,
        8 => &hex[..6],
        _ => return None,
    };

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

/// Format channels as `#rrggbb`
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Eased color transition, one channel sweep per tick
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTween {
    from: Rgb,
    to: Rgb,
    progress: Tween,
}

impl ColorTween {
    pub fn new(from: Rgb, to: Rgb, duration: Duration, steps: u32) -> Self {
        Self {
            from,
            to,
            progress: Tween::new(0.0, 1.0, duration, steps),
        }
    }

    /// Build from hex strings; `None` if either endpoint does not parse
    pub fn from_hex(from: &str, to: &str, duration: Duration, steps: u32) -> Option<Self> {
        Some(Self::new(hex_to_rgb(from)?, hex_to_rgb(to)?, duration, steps))
    }

    /// Hover highlight transition
    pub fn hover(from: Rgb, to: Rgb) -> Self {
        Self::new(from, to, HOVER_DURATION, HOVER_STEPS)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.progress = self.progress.with_easing(easing);
        self
    }

    pub fn target(&self) -> Rgb {
        self.to
    }

    pub fn interval(&self) -> Duration {
        self.progress.interval()
    }

    pub fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }
}

impl Iterator for ColorTween {
    type Item = Rgb;

    fn next(&mut self) -> Option<Rgb> {
        let t = self.progress.next()?;
        if t >= 1.0 {
            Some(self.to)
        } else {
            Some(self.from.lerp(self.to, t))
        }
    }
}

/// Either kind of running sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    Scalar(Tween),
    Color(ColorTween),
}

impl Animation {
    fn interval(&self) -> Duration {
        match self {
            Animation::Scalar(tween) => tween.interval(),
            Animation::Color(tween) => tween.interval(),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Animation::Scalar(tween) => tween.is_finished(),
            Animation::Color(tween) => tween.is_finished(),
        }
    }

    fn advance(&mut self) -> Option<Value> {
        match self {
            Animation::Scalar(tween) => tween.next().map(Value::Scalar),
            Animation::Color(tween) => tween.next().map(Value::Color),
        }
    }
}

impl From<Tween> for Animation {
    fn from(tween: Tween) -> Self {
        Animation::Scalar(tween)
    }
}

impl From<ColorTween> for Animation {
    fn from(tween: ColorTween) -> Self {
        Animation::Color(tween)
    }
}

/// Value most recently applied to an animated property
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Scalar(f32),
    Color(Rgb),
}

impl Value {
    pub fn as_scalar(self) -> Option<f32> {
        match self {
            Value::Scalar(value) => Some(value),
            Value::Color(_) => None,
        }
    }

    pub fn as_color(self) -> Option<Rgb> {
        match self {
            Value::Color(rgb) => Some(rgb),
            Value::Scalar(_) => None,
        }
    }
}

/// Cancellation token identifying one started sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(u64);

#[derive(Debug)]
struct Entry {
    token: Token,
    animation: Option<Animation>,
    value: Value,
}

/// Keyed set of animated properties, at most one live sequence per key
#[derive(Debug)]
pub struct Animator<K> {
    entries: HashMap<K, Entry>,
    next_token: u64,
}

impl<K> Default for Animator<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_token: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> Animator<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a sequence for `key`, replacing any sequence already running
    /// for it. The first value is applied immediately.
    pub fn start(&mut self, key: K, animation: impl Into<Animation>) -> Token {
        let mut animation = animation.into();
        self.next_token += 1;
        let token = Token(self.next_token);

        if self.is_running(&key) {
            tracing::trace!(?token, "replacing in-flight animation");
        }

        match animation.advance() {
            Some(value) => {
                let animation = (!animation.is_finished()).then_some(animation);
                self.entries.insert(
                    key,
                    Entry {
                        token,
                        animation,
                        value,
                    },
                );
            }
            None => {
                self.entries.remove(&key);
            }
        }

        token
    }

    /// Transition a color property to `to`, starting from whatever color is
    /// currently displayed (or `from` if the key has never been animated).
    pub fn retarget_color(&mut self, key: K, from: Rgb, to: Rgb) -> Token {
        let current = self.color(&key).unwrap_or(from);
        self.start(key, ColorTween::hover(current, to))
    }

    /// Apply the next value of the sequence identified by `token`.
    ///
    /// Returns `None` for unknown keys, stale tokens and finished sequences.
    pub fn tick(&mut self, key: &K, token: Token) -> Option<Value> {
        let entry = self.entries.get_mut(key)?;
        if entry.token != token {
            return None;
        }

        let animation = entry.animation.as_mut()?;
        let value = animation.advance();
        let finished = animation.is_finished();

        if let Some(value) = value {
            entry.value = value;
        }
        if finished {
            entry.animation = None;
        }

        value
    }

    /// Stop the running sequence for `key`, keeping its current value
    pub fn cancel(&mut self, key: &K) -> bool {
        self.entries
            .get_mut(key)
            .and_then(|entry| entry.animation.take())
            .is_some()
    }

    /// Stop every running sequence
    pub fn cancel_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.animation = None;
        }
    }

    /// Forget `key` entirely (its element no longer exists)
    pub fn remove(&mut self, key: &K) {
        self.entries.remove(key);
    }

    /// Every key holding a value, running or settled
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.keys()
    }

    pub fn value(&self, key: &K) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value)
    }

    pub fn scalar(&self, key: &K) -> Option<f32> {
        self.value(key).and_then(Value::as_scalar)
    }

    pub fn color(&self, key: &K) -> Option<Rgb> {
        self.value(key).and_then(Value::as_color)
    }

    pub fn is_running(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.animation.is_some())
    }

    pub fn is_animating(&self) -> bool {
        self.entries.values().any(|entry| entry.animation.is_some())
    }

    /// Live sequences with the delay before their next tick
    pub fn running(&self) -> impl Iterator<Item = (&K, Token, Duration)> + '_ {
        self.entries.iter().filter_map(|(key, entry)| {
            entry
                .animation
                .as_ref()
                .map(|animation| (key, entry.token, animation.interval()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(tween: Tween) -> Vec<f32> {
        tween.collect()
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOutQuad, Easing::EaseOutCubic] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-0.5), 0.0);
            assert_eq!(easing.apply(1.5), 1.0);
        }
    }

    #[test]
    fn test_ease_out_is_ahead_of_linear() {
        assert!((Easing::EaseOutQuad.apply(0.5) - 0.75).abs() < 1e-6);
        assert!((Easing::EaseOutCubic.apply(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_tween_reaches_exact_target() {
        let endpoints = [(0.0, 1.0), (0.1, 0.7), (-3.3, 17.9), (240.0, 0.0), (0.3, 0.3)];
        let durations = [1, 17, 200, 300, 1000];
        let step_counts = [1, 3, 7, 10, 20, 33, 100];

        for &(start, end) in &endpoints {
            for &ms in &durations {
                for &steps in &step_counts {
                    let values = drain(Tween::new(start, end, Duration::from_millis(ms), steps));
                    assert_eq!(values.len(), steps as usize + 1);
                    assert_eq!(values.first().copied(), Some(start));
                    assert_eq!(values.last().copied(), Some(end));
                }
            }
        }
    }

    #[test]
    fn test_tween_stays_within_bounds_and_is_monotonic() {
        for easing in [Easing::Linear, Easing::EaseOutQuad, Easing::EaseOutCubic] {
            let rising = drain(Tween::new(0.2, 0.9, Duration::from_millis(300), 20).with_easing(easing));
            assert!(rising.iter().all(|v| (0.2..=0.9).contains(v)));
            assert!(rising.windows(2).all(|w| w[0] <= w[1]));

            let falling = drain(Tween::new(120.0, 0.0, Duration::from_millis(300), 20).with_easing(easing));
            assert!(falling.iter().all(|v| (0.0..=120.0).contains(v)));
            assert!(falling.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_tween_stops_after_final_step() {
        let mut tween = Tween::new(0.0, 1.0, Duration::from_millis(100), 2);
        assert_eq!(tween.next(), Some(0.0));
        assert!(tween.next().is_some());
        assert_eq!(tween.next(), Some(1.0));
        assert!(tween.is_finished());
        assert_eq!(tween.next(), None);
        assert_eq!(tween.next(), None);
    }

    #[test]
    fn test_zero_steps_treated_as_one() {
        let tween = Tween::new(0.0, 5.0, Duration::from_millis(100), 0);
        assert_eq!(tween.steps(), 1);
        assert_eq!(drain(tween), vec![0.0, 5.0]);
    }

    #[test]
    fn test_tween_interval() {
        let tween = Tween::new(0.0, 1.0, Duration::from_millis(300), 20);
        assert_eq!(tween.interval(), Duration::from_millis(15));

        let instant = Tween::new(0.0, 1.0, Duration::ZERO, 20);
        assert_eq!(instant.interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_slide_offsets_point_away_from_rest() {
        assert_eq!(SlideFrom::Bottom.offset(40.0), Vector::new(0.0, 40.0));
        assert_eq!(SlideFrom::Top.offset(40.0), Vector::new(0.0, -40.0));
        assert_eq!(SlideFrom::Left.offset(12.0), Vector::new(-12.0, 0.0));
        assert_eq!(SlideFrom::Right.offset(0.0), Vector::new(0.0, 0.0));
    }

    #[test]
    fn test_presets() {
        let fade = Tween::fade_in();
        assert_eq!((fade.start(), fade.end(), fade.steps()), (0.0, 1.0, FADE_STEPS));

        let slide = Tween::slide_in(80.0);
        assert_eq!((slide.start(), slide.end()), (80.0, 0.0));
        assert_eq!(drain(slide).last().copied(), Some(0.0));
    }

    #[test]
    fn test_hex_conversion() {
        assert_eq!(hex_to_rgb("#1a73e8"), Some(Rgb::new(0x1a, 0x73, 0xe8)));
        assert_eq!(hex_to_rgb("3D3D3D"), Some(Rgb::new(0x3d, 0x3d, 0x3d)));
        assert_eq!(hex_to_rgb("#3d3d3dcc"), Some(Rgb::new(0x3d, 0x3d, 0x3d)));
        assert_eq!(hex_to_rgb("#12345"), None);
        assert_eq!(hex_to_rgb("#gggggg"), None);
        assert_eq!(hex_to_rgb("transparent"), None);
        assert_eq!(hex_to_rgb("#ééé"), None);

        assert_eq!(rgb_to_hex(Rgb::new(255, 0, 16)), "#ff0010");
        assert_eq!(Rgb::new(0x2d, 0x2d, 0x2d).to_hex(), "#2d2d2d");
    }

    #[test]
    fn test_color_tween_channels_are_independent() {
        let tween = ColorTween::from_hex("#00ff80", "#ff0080", Duration::from_millis(200), 10)
            .unwrap()
            .with_easing(Easing::Linear);
        let colors: Vec<Rgb> = tween.collect();

        assert_eq!(colors.len(), 11);
        assert_eq!(colors[0], Rgb::new(0, 255, 128));
        assert_eq!(colors[10], Rgb::new(255, 0, 128));
        assert!(colors.windows(2).all(|w| w[0].r <= w[1].r));
        assert!(colors.windows(2).all(|w| w[0].g >= w[1].g));
        assert!(colors.iter().all(|c| c.b == 128));
    }

    #[test]
    fn test_color_tween_reaches_target() {
        let from = Rgb::new(0x1a, 0x1a, 0x1a);
        let to = Rgb::new(0x2d, 0x2d, 0x2d);
        let last = ColorTween::hover(from, to).last();
        assert_eq!(last, Some(to));
    }

    #[test]
    fn test_animator_start_applies_first_value() {
        let mut animator = Animator::new();
        animator.start("fade", Tween::fade_in());

        assert_eq!(animator.scalar(&"fade"), Some(0.0));
        assert!(animator.is_running(&"fade"));
        assert!(animator.is_animating());
    }

    #[test]
    fn test_animator_runs_to_completion() {
        let mut animator = Animator::new();
        let token = animator.start("fade", Tween::new(0.0, 1.0, Duration::from_millis(40), 4));

        let mut ticks = 0;
        while animator.tick(&"fade", token).is_some() {
            ticks += 1;
        }

        assert_eq!(ticks, 4);
        assert_eq!(animator.scalar(&"fade"), Some(1.0));
        assert!(!animator.is_running(&"fade"));
        assert_eq!(animator.running().count(), 0);
    }

    #[test]
    fn test_retrigger_leaves_single_sequence() {
        let mut animator = Animator::new();
        let first = animator.start("clock", Tween::new(0.0, 10.0, Duration::from_millis(100), 10));
        animator.tick(&"clock", first);
        animator.tick(&"clock", first);

        let second = animator.start("clock", Tween::new(5.0, -2.0, Duration::from_millis(100), 10));
        assert_ne!(first, second);
        assert_eq!(animator.running().count(), 1);

        // Interleave ticks of the superseded sequence; they must be ignored.
        loop {
            assert_eq!(animator.tick(&"clock", first), None);
            if animator.tick(&"clock", second).is_none() {
                break;
            }
        }

        assert_eq!(animator.scalar(&"clock"), Some(-2.0));
    }

    #[test]
    fn test_rapid_hover_in_out_ends_on_latest_target() {
        let idle = Rgb::new(0x1a, 0x1a, 0x1a);
        let hot = Rgb::new(0x2d, 0x2d, 0x2d);
        let mut animator = Animator::new();

        let enter = animator.retarget_color("weather", idle, hot);
        animator.tick(&"weather", enter);
        animator.tick(&"weather", enter);
        let midway = animator.color(&"weather").unwrap();
        assert!(midway.r > idle.r && midway.r < hot.r);

        let leave = animator.retarget_color("weather", hot, idle);
        // Leave starts from the displayed color, not from `hot`.
        assert_eq!(animator.color(&"weather"), Some(midway));

        while animator.tick(&"weather", leave).is_some() {}
        assert_eq!(animator.tick(&"weather", enter), None);
        assert_eq!(animator.color(&"weather"), Some(idle));
    }

    #[test]
    fn test_cancel_keeps_current_value() {
        let mut animator = Animator::new();
        let token = animator.start(1u8, Tween::new(0.0, 1.0, Duration::from_millis(100), 10));
        animator.tick(&1, token);
        let value = animator.scalar(&1);

        assert!(animator.cancel(&1));
        assert!(!animator.cancel(&1));
        assert_eq!(animator.tick(&1, token), None);
        assert_eq!(animator.scalar(&1), value);
    }

    #[test]
    fn test_cancel_all_and_unknown_keys() {
        let mut animator = Animator::new();
        let a = animator.start("a", Tween::fade_in());
        animator.start("b", Tween::slide_in(40.0));
        animator.cancel_all();

        assert!(!animator.is_animating());
        assert_eq!(animator.tick(&"a", a), None);
        assert_eq!(animator.tick(&"missing", a), None);

        animator.remove(&"a");
        assert_eq!(animator.value(&"a"), None);
        assert_eq!(animator.tick(&"a", a), None);
    }

    #[test]
    fn test_running_reports_intervals() {
        let mut animator = Animator::new();
        let token = animator.start("slide", Tween::slide_in(60.0));
        let running: Vec<_> = animator.running().collect();

        assert_eq!(running.len(), 1);
        assert_eq!(running[0], (&"slide", token, Duration::from_millis(15)));
    }
}
