//! Fixed-rate tick scheduling.
//!
//! The spinner decays once per tick and does not scale by elapsed time, so
//! ticks must arrive at a steady cadence. [`TickClock`] turns wall-clock
//! readings into a count of ticks due.
//!
//! # Example
//!
//! ```ignore
//! use fidget_spin::time::TickClock;
//!
//! let mut clock = TickClock::new(Duration::from_millis(16));
//!
//! // On every wake-up:
//! for _ in 0..clock.advance(Instant::now()) {
//!     spinner.tick();
//! }
//! match clock.next_deadline() {
//!     Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
//!     None => event_loop.set_control_flow(ControlFlow::Wait),
//! }
//! ```

use std::time::{Duration, Instant};

/// Fixed-interval tick accumulator.
#[derive(Debug)]
pub struct TickClock {
    /// When the clock was created.
    start: Instant,
    /// Time of the last `advance` call.
    last_advance: Instant,
    /// Time owed to ticks not yet run.
    accumulator: Duration,
    interval: Duration,
    /// Backlog beyond this many ticks is dropped.
    max_catch_up: u32,
    tick_count: u64,
    paused: bool,
    /// Total time spent paused.
    pause_elapsed: Duration,
    paused_at: Option<Instant>,
}

impl TickClock {
    /// Create a clock ticking every `interval`, starting now.
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    /// Create a clock whose first interval starts at `start`.
    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            start,
            last_advance: start,
            accumulator: Duration::ZERO,
            interval: interval.max(Duration::from_millis(1)),
            max_catch_up: crate::config::DEFAULT_MAX_CATCH_UP_TICKS,
            tick_count: 0,
            paused: false,
            pause_elapsed: Duration::ZERO,
            paused_at: None,
        }
    }

    /// Limit how many ticks a single `advance` may return.
    pub fn with_max_catch_up(mut self, ticks: u32) -> Self {
        self.max_catch_up = ticks.max(1);
        self
    }

    /// Count the ticks due at `now`.
    ///
    /// After a long stall only `max_catch_up` ticks are returned and the
    /// rest of the backlog is dropped.
    pub fn advance(&mut self, now: Instant) -> u32 {
        if self.paused {
            return 0;
        }

        self.accumulator += now.saturating_duration_since(self.last_advance);
        self.last_advance = now;

        let mut due = 0u32;
        while self.accumulator >= self.interval && due < self.max_catch_up {
            self.accumulator -= self.interval;
            due += 1;
        }
        if self.accumulator >= self.interval {
            log::debug!(
                "dropping {:?} of tick backlog after a stall",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += due as u64;
        due
    }

    /// When the next tick becomes due, or `None` while paused.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.paused {
            return None;
        }
        Some(self.last_advance + (self.interval - self.accumulator))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks handed out since start.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop accruing ticks, e.g. while the window is hidden.
    pub fn pause(&mut self, now: Instant) {
        if !self.paused {
            self.paused = true;
            self.paused_at = Some(now);
        }
    }

    /// Resume after `pause`. Time spent paused never turns into ticks.
    pub fn resume(&mut self, now: Instant) {
        if self.paused {
            if let Some(at) = self.paused_at.take() {
                self.pause_elapsed += now.saturating_duration_since(at);
            }
            self.last_advance = now;
            self.paused = false;
        }
    }

    /// Milliseconds since start, excluding paused time.
    ///
    /// Used as the pointer sample timestamp.
    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        let paused_now = match self.paused_at {
            Some(at) => now.saturating_duration_since(at),
            None => Duration::ZERO,
        };
        let active = now
            .saturating_duration_since(self.start)
            .saturating_sub(self.pause_elapsed + paused_now);
        active.as_millis() as u64
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_TICK_INTERVAL_MS))
    }
}
