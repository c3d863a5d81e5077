//! Per-phase timing inside the render loop

use std::time::{Duration, Instant};

/// Accumulates time spent in named phases between reports.
pub struct PhaseProfiler {
    phases: Vec<(&'static str, Duration, u32)>,
}

impl PhaseProfiler {
    pub fn new() -> Self {
        Self { phases: Vec::new() }
    }

    pub fn time_phase<F, R>(&mut self, name: &'static str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.record(name, start.elapsed());
        result
    }

    pub fn record(&mut self, name: &'static str, elapsed: Duration) {
        match self.phases.iter_mut().find(|(n, _, _)| *n == name) {
            Some((_, total, calls)) => {
                *total += elapsed;
                *calls += 1;
            }
            None => self.phases.push((name, elapsed, 1)),
        }
    }

    /// Mean time per call since the last reset, in milliseconds.
    pub fn average_ms(&self, name: &str) -> f64 {
        self.phases
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, total, calls)| total.as_secs_f64() * 1000.0 / f64::from(*calls))
            .unwrap_or(0.0)
    }

    pub fn reset(&mut self) {
        self.phases.clear();
    }
}

impl Default for PhaseProfiler {
    fn default() -> Self {
        Self::new()
    }
}
