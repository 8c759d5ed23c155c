use std::time::Instant;

/// Monotonic millisecond clock. All trial timing is measured against one of
/// these; wall-clock capture times are taken separately at record time.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Production clock backed by `Instant`, anchored at construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-stepped clock for tests and headless simulation. Time only moves
/// when the driver advances it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }

    pub fn set(&mut self, ms: u64) {
        debug_assert!(ms >= self.now, "manual clock must not move backwards");
        self.now = ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}
