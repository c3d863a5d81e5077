//! Frame pacing

use super::ring_buffer::RingBuffer;
use std::time::{Duration, Instant};

/// Measures the interval between presented frames.
pub struct FrameTimer {
    last_frame: Option<Instant>,
    intervals: RingBuffer<Duration>,
    last_report: Instant,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        Self {
            last_frame: None,
            intervals: RingBuffer::new(capacity),
            last_report: Instant::now(),
        }
    }

    /// Mark a presented frame.
    pub fn frame(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_frame.replace(now) {
            self.intervals.push(now - last);
        }
    }

    pub fn fps(&self) -> f64 {
        let avg = self.intervals.average().as_secs_f64();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.intervals.average().as_secs_f64() * 1000.0
    }

    pub fn frame_time_range_ms(&self) -> (f64, f64) {
        let (min, max) = self.intervals.min_max();
        (min.as_secs_f64() * 1000.0, max.as_secs_f64() * 1000.0)
    }

    /// True at most once per `interval`; the caller logs when it fires.
    pub fn report_due(&mut self, interval: Duration) -> bool {
        if self.last_report.elapsed() >= interval {
            self.last_report = Instant::now();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_two_frames_for_a_rate() {
        let mut timer = FrameTimer::new(8);
        timer.frame();
        assert_eq!(timer.fps(), 0.0);
        std::thread::sleep(Duration::from_millis(5));
        timer.frame();
        assert!(timer.fps() > 0.0);
        assert!(timer.frame_time_ms() >= 5.0);
    }

    #[test]
    fn report_gate() {
        let mut timer = FrameTimer::new(8);
        assert!(!timer.report_due(Duration::from_secs(3600)));
        assert!(timer.report_due(Duration::ZERO));
    }
}
