//! # Reset Statistics
//!
//! Phase timings for one reset cycle.
//!
//! A fresh [`ResetStats`] replaces the previous one at the start of every
//! cycle. Phases fill in their own slot once; in a paged reset the block
//! update and total slots grow by one page at a time.

use std::fmt;
use std::time::Duration;

use quarry_core::MineSite;

/// Timing of each reset phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetStats {
    /// Whole cycle, excluding generation.
    pub total: Duration,
    /// Plan generation.
    pub generation: Duration,
    /// First evacuation pass.
    pub teleport_first: Duration,
    /// Block application (all pages).
    pub block_update: Duration,
    /// Second evacuation pass.
    pub teleport_second: Duration,
    /// Completion broadcast.
    pub broadcast: Duration,
}

impl ResetStats {
    /// Fresh stats for a cycle whose plan took `generation` to build.
    #[must_use]
    pub fn with_generation(generation: Duration) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    /// Adds one page of block application.
    pub fn record_page(&mut self, elapsed: Duration) {
        self.block_update += elapsed;
        self.total += elapsed;
    }
}

/// `Reset: 1.234 BlockGen: 0.120 TP1: 0.000 BlockUpdate: 0.950 TP2: 0.000 MsgBroadcast: 0.001`
impl fmt::Display for ResetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reset: {:.3} BlockGen: {:.3} TP1: {:.3} BlockUpdate: {:.3} \
             TP2: {:.3} MsgBroadcast: {:.3}",
            self.total.as_secs_f64(),
            self.generation.as_secs_f64(),
            self.teleport_first.as_secs_f64(),
            self.block_update.as_secs_f64(),
            self.teleport_second.as_secs_f64(),
            self.broadcast.as_secs_f64(),
        )
    }
}

/// Formats a count with thousands separators: `1234567` -> `"1,234,567"`.
#[must_use]
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Logs the summary line for a finished reset.
pub fn log_summary(mine: &MineSite, stats: &ResetStats) {
    tracing::info!(
        mine = %mine.name,
        "Mine reset: {}  Blocks: {}  {}",
        mine.name,
        format_count(mine.bounds.total_block_count()),
        stats
    );
}
