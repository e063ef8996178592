use std::time::Instant;

/// Monotonic clock measuring seconds since it was started. Peers key their
/// time-indexed history with it.
#[derive(Clone, Copy, Debug)]
pub struct LocalClock {
    start: Instant,
}

impl LocalClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self::start()
    }
}
