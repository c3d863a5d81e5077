//! Lunar-cycle time
//!
//! A single scalar "day" drives every animated element of the scene. The
//! [`TimeStore`] owns it together with the play/pause flag and is passed
//! explicitly to whoever needs to read or write it.

use std::time::Instant;

/// Synodic month, in days. One full moon orbit.
pub const LUNAR_PERIOD_DAYS: f32 = 29.53;

/// Period of the lattice deformation, in days.
pub const LATTICE_PERIOD_DAYS: f32 = 29.33;

/// Auto-play speed: simulated days per wall-clock second.
pub const DEFAULT_DAYS_PER_SECOND: f32 = 2.0;

/// Current simulated day plus the auto-play flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStore {
    current_day: f32,
    is_playing: bool,
}

impl TimeStore {
    /// Day zero, playing.
    pub fn new() -> Self {
        Self {
            current_day: 0.0,
            is_playing: true,
        }
    }

    pub fn with_playing(is_playing: bool) -> Self {
        Self {
            is_playing,
            ..Self::new()
        }
    }

    pub fn current_day(&self) -> f32 {
        self.current_day
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Overwrite the day. No clamping or wrapping is applied here; only the
    /// auto-play path wraps at the lunar period.
    pub fn set_day(&mut self, day: f32) {
        self.current_day = day;
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Auto-play step. Uses a truncated remainder, so a negative day written
    /// through [`set_day`](Self::set_day) stays negative until it climbs past
    /// zero.
    pub fn advance(&mut self, delta_secs: f32, days_per_second: f32) {
        if !self.is_playing {
            return;
        }
        let day = (self.current_day + delta_secs * days_per_second) % LUNAR_PERIOD_DAYS;
        self.set_day(day);
    }
}

impl Default for TimeStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing of one rendered frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

/// Wall clock sampled once per rendered frame.
pub struct FrameClock {
    start: Instant,
    last: Option<Instant>,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last: None,
            frame_count: 0,
        }
    }

    /// Sample the clock for a new frame. The first frame has a zero delta.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = self
            .last
            .replace(now)
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.frame_count += 1;
        FrameTime {
            elapsed: now.duration_since(self.start).as_secs_f32(),
            delta,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn starts_at_day_zero_playing() {
        let store = TimeStore::new();
        assert_eq!(store.current_day(), 0.0);
        assert!(store.is_playing());
    }

    #[test]
    fn set_day_is_exact() {
        let mut store = TimeStore::new();
        store.set_day(15.0);
        assert_eq!(store.current_day(), 15.0);
    }

    #[test]
    fn set_day_does_not_clamp_or_wrap() {
        let mut store = TimeStore::new();
        store.set_day(42.0);
        assert_eq!(store.current_day(), 42.0);
        store.set_day(-3.5);
        assert_eq!(store.current_day(), -3.5);
    }

    #[test]
    fn toggling_twice_restores_flag() {
        let mut store = TimeStore::new();
        let original = store.is_playing();
        store.toggle_play();
        assert_ne!(store.is_playing(), original);
        store.toggle_play();
        assert_eq!(store.is_playing(), original);
    }

    #[test]
    fn paused_advance_leaves_day_untouched() {
        let mut store = TimeStore::with_playing(false);
        store.set_day(7.25);
        for delta in [0.0, 0.016, 1.0, 100.0] {
            store.advance(delta, DEFAULT_DAYS_PER_SECOND);
        }
        assert_eq!(store.current_day(), 7.25);
    }

    #[test]
    fn playing_advance_wraps_at_lunar_period() {
        let mut store = TimeStore::new();
        store.set_day(29.52);
        store.advance(1.0, DEFAULT_DAYS_PER_SECOND);
        assert!((store.current_day() - 1.99).abs() < EPS, "{}", store.current_day());
    }

    #[test]
    fn advance_keeps_sign_of_negative_day() {
        let mut store = TimeStore::new();
        store.set_day(-10.0);
        store.advance(1.0, DEFAULT_DAYS_PER_SECOND);
        assert!((store.current_day() + 8.0).abs() < EPS);
    }

    #[test]
    fn clock_first_tick_has_no_delta_spike() {
        let mut clock = FrameClock::new();
        // Setup time before the first frame must not reach the store
        std::thread::sleep(std::time::Duration::from_millis(50));
        let first = clock.tick();
        assert_eq!(first.delta, 0.0);
        assert!(first.elapsed >= 0.05);

        let mut store = TimeStore::new();
        store.advance(first.delta, DEFAULT_DAYS_PER_SECOND);
        assert_eq!(store.current_day(), 0.0);

        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = clock.tick();
        assert!(second.delta > 0.0);
        assert!(second.elapsed >= first.elapsed);
        assert_eq!(clock.frame_count(), 2);
    }
}
