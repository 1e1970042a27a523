use std::time::{Duration, Instant};

/// A monotonic source of "now", in seconds.
pub trait TimeSource {
    fn now(&self) -> f64;

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Measures the time between loop iterations.
#[derive(Debug)]
pub struct Timer<C = MonotonicClock> {
    clock: C,
    last_loop_time: f64,
}

impl<C: TimeSource> Timer<C> {
    pub fn new(clock: C) -> Self {
        let last_loop_time = clock.now();
        Self {
            clock,
            last_loop_time,
        }
    }

    pub fn init(&mut self) {
        self.last_loop_time = self.clock.now();
    }

    /// Seconds since the previous poll (or `init`). Consumes the interval.
    pub fn elapsed_time(&mut self) -> f64 {
        let now = self.clock.now();
        let elapsed = (now - self.last_loop_time).max(0.0);
        self.last_loop_time = self.last_loop_time.max(now);
        elapsed
    }

    pub fn current_time(&self) -> f64 {
        self.clock.now()
    }

    pub fn last_loop_time(&self) -> f64 {
        self.last_loop_time
    }

    pub fn sleep(&self, duration: Duration) {
        self.clock.sleep(duration);
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl Default for Timer<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::new())
    }
}
