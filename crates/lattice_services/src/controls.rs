//! Time controls
//!
//! The scrubber and play toggle write straight into the [`TimeStore`].

use lattice_core::time::{TimeStore, LUNAR_PERIOD_DAYS};

/// Range slider over one lunar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scrubber {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for Scrubber {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: LUNAR_PERIOD_DAYS,
            step: 0.01,
        }
    }
}

impl Scrubber {
    /// Snap to the step grid and clamp to the range.
    pub fn quantize(&self, value: f32) -> f32 {
        let snapped = self.min + ((value - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }

    /// Day for a position along the track, `0.0..=1.0`.
    pub fn value_at(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        self.quantize(self.min + fraction * (self.max - self.min))
    }

    /// Track position for a day; out-of-range days pin to the ends.
    pub fn fraction_of(&self, value: f32) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// User intent coming from the HUD or the keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    TogglePlay,
    /// Jump to a position along the scrubber track.
    ScrubTo(f32),
    /// Nudge the day by a signed amount, through the scrubber.
    StepDay(f32),
}

impl ControlAction {
    pub fn apply(self, scrubber: &Scrubber, time: &mut TimeStore) {
        match self {
            ControlAction::TogglePlay => {
                time.toggle_play();
                tracing::debug!(playing = time.is_playing(), "Toggled playback");
            }
            ControlAction::ScrubTo(fraction) => time.set_day(scrubber.value_at(fraction)),
            ControlAction::StepDay(delta) => {
                time.set_day(scrubber.quantize(time.current_day() + delta))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantizes_to_hundredths() {
        let s = Scrubber::default();
        assert!((s.quantize(12.3449) - 12.34).abs() < 1e-4);
        assert!((s.quantize(12.346) - 12.35).abs() < 1e-4);
    }

    #[test]
    fn clamps_to_month() {
        let s = Scrubber::default();
        assert!((s.value_at(2.0) - LUNAR_PERIOD_DAYS).abs() < 1e-4);
        assert!(s.value_at(2.0) <= LUNAR_PERIOD_DAYS);
        assert_eq!(s.value_at(-1.0), 0.0);
        assert_eq!(s.quantize(-5.0), 0.0);
    }

    #[test]
    fn fraction_round_trip() {
        let s = Scrubber::default();
        let day = s.value_at(0.5);
        assert!((s.fraction_of(day) - 0.5).abs() < 1e-3);
        assert_eq!(s.fraction_of(100.0), 1.0);
    }

    #[test]
    fn actions_write_into_store() {
        let s = Scrubber::default();
        let mut time = TimeStore::new();

        ControlAction::TogglePlay.apply(&s, &mut time);
        assert!(!time.is_playing());

        ControlAction::ScrubTo(1.0).apply(&s, &mut time);
        assert!((time.current_day() - LUNAR_PERIOD_DAYS).abs() < 1e-4);

        ControlAction::StepDay(-1.0).apply(&s, &mut time);
        assert!((time.current_day() - 28.53).abs() < 1e-3);

        ControlAction::TogglePlay.apply(&s, &mut time);
        assert!(time.is_playing());
    }
}
