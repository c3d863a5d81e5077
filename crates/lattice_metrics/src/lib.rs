//! Temporal Lattice Metrics - frame pacing and render-loop phase timing
//!
//! Instrumentation vanishes when the `metrics` feature is off: the types
//! below become no-op stubs with the same API.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable metrics collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use lattice_metrics::{FrameTimer, PhaseProfiler};
//!
//! let mut timer = FrameTimer::new(120);
//! let mut phases = PhaseProfiler::new();
//! phases.time_phase("update", || scene.update(&signals));
//! timer.frame();
//! ```

#[cfg(feature = "metrics")]
mod frame_timer;
#[cfg(feature = "metrics")]
mod phase_profiler;
#[cfg(feature = "metrics")]
mod ring_buffer;

#[cfg(feature = "metrics")]
pub use frame_timer::FrameTimer;
#[cfg(feature = "metrics")]
pub use phase_profiler::PhaseProfiler;

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
pub struct FrameTimer;

#[cfg(not(feature = "metrics"))]
impl FrameTimer {
    pub fn new(_capacity: usize) -> Self { Self }
    pub fn frame(&mut self) {}
    pub fn fps(&self) -> f64 { 0.0 }
    pub fn frame_time_ms(&self) -> f64 { 0.0 }
    pub fn frame_time_range_ms(&self) -> (f64, f64) { (0.0, 0.0) }
    pub fn report_due(&mut self, _interval: std::time::Duration) -> bool { false }
}

#[cfg(not(feature = "metrics"))]
pub struct PhaseProfiler;

#[cfg(not(feature = "metrics"))]
impl PhaseProfiler {
    pub fn new() -> Self { Self }
    pub fn time_phase<F, R>(&mut self, _name: &'static str, f: F) -> R where F: FnOnce() -> R { f() }
    pub fn record(&mut self, _name: &'static str, _elapsed: std::time::Duration) {}
    pub fn average_ms(&self, _name: &str) -> f64 { 0.0 }
    pub fn reset(&mut self) {}
}

#[cfg(not(feature = "metrics"))]
impl Default for PhaseProfiler {
    fn default() -> Self { Self }
}

#[cfg(test)]
mod tests {
    #[test]
    fn api_available_with_or_without_feature() {
        let mut timer = super::FrameTimer::new(60);
        timer.frame();
        let mut phases = super::PhaseProfiler::new();
        assert_eq!(phases.time_phase("update", || 1 + 1), 2);
        phases.reset();
    }
}
