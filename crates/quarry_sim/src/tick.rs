//! # Host Tick Loop
//!
//! Fixed-timestep loop standing in for a game server's main thread.
//!
//! A paged reset gets one `resume` per tick, so the tick rate and the page
//! budget together decide how fast a mine resets and how much each tick
//! is stretched.

use std::time::{Duration, Instant};

/// Default host tick rate (20 Hz, 50 ms per tick).
pub const HOST_TICK_RATE: u32 = 20;

/// Fixed-timestep tick loop controller.
#[derive(Debug)]
pub struct TickLoop {
    /// Target tick duration.
    tick_duration: Duration,
    /// Time of last `should_tick` sample.
    last_tick: Instant,
    /// Time owed to pending ticks.
    accumulator: Duration,
    /// Total ticks started.
    tick_count: u64,
    /// Tick timing statistics.
    stats: TickStats,
}

/// Tick timing statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickStats {
    /// Shortest tick observed.
    pub min_tick: Duration,
    /// Longest tick observed.
    pub max_tick: Duration,
    /// Rolling average tick duration.
    pub avg_tick: Duration,
    /// Ticks that took longer than the tick duration.
    pub late_ticks: u64,
    /// Ticks measured.
    pub total_ticks: u64,
}

impl TickStats {
    fn fresh(tick_duration: Duration) -> Self {
        Self {
            min_tick: Duration::MAX,
            max_tick: Duration::ZERO,
            avg_tick: tick_duration,
            late_ticks: 0,
            total_ticks: 0,
        }
    }
}

impl TickLoop {
    /// Creates a tick loop running at `tick_rate` Hz.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        let tick_duration = Duration::from_micros(1_000_000 / u64::from(tick_rate.max(1)));
        Self {
            tick_duration,
            last_tick: Instant::now(),
            accumulator: Duration::ZERO,
            tick_count: 0,
            stats: TickStats::fresh(tick_duration),
        }
    }

    /// Returns true if a tick is due.
    #[must_use]
    pub fn should_tick(&mut self) -> bool {
        let now = Instant::now();
        self.accumulator += now.duration_since(self.last_tick);
        self.last_tick = now;
        self.accumulator >= self.tick_duration
    }

    /// Marks the start of a tick and returns its start time.
    #[must_use]
    pub fn begin_tick(&mut self) -> Instant {
        self.accumulator = self.accumulator.saturating_sub(self.tick_duration);
        self.tick_count += 1;
        Instant::now()
    }

    /// Marks the end of a tick started at `start`.
    pub fn end_tick(&mut self, start: Instant) {
        let duration = start.elapsed();

        self.stats.total_ticks += 1;
        self.stats.min_tick = self.stats.min_tick.min(duration);
        self.stats.max_tick = self.stats.max_tick.max(duration);
        self.stats.avg_tick = (self.stats.avg_tick * 15 + duration) / 16;

        if duration > self.tick_duration {
            self.stats.late_ticks += 1;
        }
    }

    /// Sleeps until the next tick is due.
    pub fn wait_for_next_tick(&self) {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.tick_duration {
            std::thread::sleep(self.tick_duration - elapsed);
        }
    }

    /// Ticks started so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Tick statistics.
    #[must_use]
    pub const fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Target tick duration.
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::new(HOST_TICK_RATE)
    }
}
