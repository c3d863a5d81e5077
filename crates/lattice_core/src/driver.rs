//! Per-frame driver
//!
//! Advances the day while playing and derives everything the scene reads for
//! the frame. Every component sees the same day within one frame.

use crate::math::Vec3;
use crate::resonance;
use crate::time::{FrameTime, TimeStore, DEFAULT_DAYS_PER_SECOND};

/// Values derived from the day for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSignals {
    /// Wall-clock seconds since start.
    pub elapsed: f32,
    pub day: f32,
    pub beat_phase: f32,
    /// Sharp pulse for the moon, tether and halo.
    pub resonance: f32,
    /// Broad pulse for the grid.
    pub resonance_intensity: f32,
    pub moon_position: Vec3,
}

impl FrameSignals {
    pub fn compute(day: f32, elapsed: f32) -> Self {
        let beat_phase = resonance::beat_phase(day);
        Self {
            elapsed,
            day,
            beat_phase,
            resonance: resonance::flash_resonance(day),
            resonance_intensity: resonance::grid_resonance(day),
            moon_position: resonance::moon_position(day),
        }
    }
}

pub struct FrameDriver {
    days_per_second: f32,
}

impl FrameDriver {
    pub fn new(days_per_second: f32) -> Self {
        Self { days_per_second }
    }

    pub fn days_per_second(&self) -> f32 {
        self.days_per_second
    }

    /// Advance the store if playing, then derive this frame's signals from
    /// the written-back day.
    pub fn step(&self, time: &mut TimeStore, frame: FrameTime) -> FrameSignals {
        time.advance(frame.delta, self.days_per_second);
        FrameSignals::compute(time.current_day(), frame.elapsed)
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(DEFAULT_DAYS_PER_SECOND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(elapsed: f32, delta: f32) -> FrameTime {
        FrameTime { elapsed, delta }
    }

    #[test]
    fn step_advances_and_reports_new_day() {
        let driver = FrameDriver::default();
        let mut time = TimeStore::new();
        let signals = driver.step(&mut time, frame(0.5, 0.5));
        assert!((time.current_day() - 1.0).abs() < 1e-6);
        assert_eq!(signals.day, time.current_day());
        assert_eq!(signals.elapsed, 0.5);
    }

    #[test]
    fn paused_step_keeps_day_but_tracks_wall_time() {
        let driver = FrameDriver::default();
        let mut time = TimeStore::with_playing(false);
        time.set_day(3.0);
        let a = driver.step(&mut time, frame(1.0, 0.25));
        let b = driver.step(&mut time, frame(9.0, 8.0));
        assert_eq!(time.current_day(), 3.0);
        assert_eq!(a.day, b.day);
        assert_eq!(a.resonance, b.resonance);
        assert_eq!(b.elapsed, 9.0);
    }

    #[test]
    fn signals_match_resonance_functions() {
        let s = FrameSignals::compute(10.0, 2.0);
        assert_eq!(s.beat_phase, resonance::beat_phase(10.0));
        assert_eq!(s.resonance, resonance::flash_resonance(10.0));
        assert_eq!(s.resonance_intensity, resonance::grid_resonance(10.0));
        assert_eq!(s.moon_position, resonance::moon_position(10.0));
    }

    #[test]
    fn scrubbed_day_is_visible_on_next_step() {
        let driver = FrameDriver::new(2.0);
        let mut time = TimeStore::with_playing(false);
        time.set_day(15.0);
        let s = driver.step(&mut time, frame(0.1, 0.1));
        assert_eq!(s.day, 15.0);
    }
}
