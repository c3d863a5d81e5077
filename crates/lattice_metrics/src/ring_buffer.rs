//! Ring buffer for rolling statistics

use std::time::Duration;

/// Values that can be averaged.
pub trait Sample: Copy + PartialOrd {
    fn zero() -> Self;
    fn mean(samples: &[Self]) -> Self;
}

impl Sample for Duration {
    fn zero() -> Self {
        Duration::ZERO
    }

    fn mean(samples: &[Self]) -> Self {
        samples.iter().sum::<Duration>() / samples.len() as u32
    }
}

/// Fixed-capacity window over the most recent samples.
pub struct RingBuffer<T> {
    samples: Vec<T>,
    capacity: usize,
    next: usize,
}

impl<T: Sample> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    pub fn push(&mut self, sample: T) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.next] = sample;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    pub fn average(&self) -> T {
        if self.samples.is_empty() {
            T::zero()
        } else {
            T::mean(&self.samples)
        }
    }

    pub fn min_max(&self) -> (T, T) {
        let mut iter = self.samples.iter().copied();
        let Some(first) = iter.next() else {
            return (T::zero(), T::zero());
        };
        iter.fold((first, first), |(lo, hi), s| {
            (if s < lo { s } else { lo }, if s > hi { s } else { hi })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_average_wraps() {
        let mut buffer = RingBuffer::new(3);

        buffer.push(Duration::from_millis(10));
        assert_eq!(buffer.average(), Duration::from_millis(10));

        buffer.push(Duration::from_millis(20));
        buffer.push(Duration::from_millis(30));
        assert_eq!(buffer.average(), Duration::from_millis(20));

        // Oldest sample drops out
        buffer.push(Duration::from_millis(40));
        assert_eq!(buffer.average(), Duration::from_millis(30));
        assert_eq!(
            buffer.min_max(),
            (Duration::from_millis(20), Duration::from_millis(40))
        );
    }

    #[test]
    fn empty_buffer_is_zero() {
        let buffer = RingBuffer::<Duration>::new(4);
        assert_eq!(buffer.average(), Duration::ZERO);
        assert_eq!(buffer.min_max(), (Duration::ZERO, Duration::ZERO));
    }
}
