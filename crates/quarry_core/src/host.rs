//! # Host Platform Contracts
//!
//! Traits the host platform implements so the engine can touch the world.
//!
//! ## Architecture
//!
//! The engine never reaches into the host. It only calls these traits:
//!
//! ```text
//! Engine calls:                Host implements:
//! ┌──────────────────┐        ┌──────────────────┐
//! │ resolve_world    │ ←───── │ WorldResolver    │
//! │ is_empty / set   │ ←───── │ WorldMutator     │
//! │ players / tp     │ ←───── │ PlayerRoster     │
//! │ send             │ ←───── │ MessageSink      │
//! │ now              │ ←───── │ Clock            │
//! │ pre_reset        │ ←───── │ PreResetSignal   │
//! └──────────────────┘        └──────────────────┘
//! ```
//!
//! Every call happens on the host's authoritative tick thread.

use std::fmt;
use std::time::{Duration, Instant};

use crate::block::BlockType;
use crate::error::HostResult;
use crate::math::{BlockPos, Location};
use crate::mine::MineSite;

// ============================================================================
// WORLD
// ============================================================================

/// Looks up the world a mine lives in.
pub trait WorldResolver {
    /// Host handle for a loaded world.
    type World;

    /// Returns the world with the given name, or `None` if it is gone.
    fn resolve_world(&self, name: &str) -> Option<Self::World>;
}

/// Reads and writes blocks.
pub trait WorldMutator: WorldResolver {
    /// Returns true if the block at `pos` is empty (air).
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be read.
    fn is_empty(&self, world: &Self::World, pos: BlockPos) -> HostResult<bool>;

    /// Replaces the block at `pos`.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be written.
    fn set_block_type(
        &mut self,
        world: &Self::World,
        pos: BlockPos,
        block: BlockType,
    ) -> HostResult<()>;
}

// ============================================================================
// PLAYERS
// ============================================================================

/// Stable player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u128);

/// Snapshot of an online player.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    /// Player identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Current feet location.
    pub location: Location,
}

/// Lists and moves players.
pub trait PlayerRoster: WorldResolver {
    /// Players in the given world, or `None` if the host cannot scope the
    /// roster to one world.
    fn players_in(&self, world: &Self::World) -> Option<Vec<PlayerView>>;

    /// Every online player.
    fn online_players(&self) -> Vec<PlayerView>;

    /// Moves a player.
    ///
    /// # Errors
    ///
    /// Returns an error if the player could not be moved.
    fn teleport(&mut self, player: PlayerId, to: Location) -> HostResult<()>;

    /// Players in the world, falling back to the whole online roster.
    fn players_or_online(&self, world: &Self::World) -> Vec<PlayerView> {
        self.players_in(world)
            .unwrap_or_else(|| self.online_players())
    }
}

// ============================================================================
// MESSAGING
// ============================================================================

/// Notices the engine sends to players.
///
/// The host localizes them; `Display` gives the default English text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The player was moved out of a mine.
    Teleported {
        /// Mine name.
        mine: String,
    },
    /// A mine has just reset.
    ResetCompleted {
        /// Mine name.
        mine: String,
    },
    /// A mine is about to reset.
    ResetPending {
        /// Mine name.
        mine: String,
        /// Seconds until the reset starts.
        seconds_until: u64,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Teleported { mine } => {
                write!(f, "You have been teleported out of mine {mine}.")
            }
            Self::ResetCompleted { mine } => write!(f, "The mine {mine} has just reset."),
            Self::ResetPending {
                mine,
                seconds_until,
            } => write!(
                f,
                "The mine {mine} will reset in {}.",
                format_time_until(*seconds_until)
            ),
        }
    }
}

/// Delivers notices to players.
pub trait MessageSink {
    /// Sends a notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered.
    fn send(&mut self, player: PlayerId, notice: &Notice) -> HostResult<()>;
}

/// Formats a countdown as text: `"2 hours, 5 minutes and 1 second"`.
#[must_use]
pub fn format_time_until(seconds: u64) -> String {
    const UNITS: [(u64, &str); 4] = [
        (86_400, "day"),
        (3_600, "hour"),
        (60, "minute"),
        (1, "second"),
    ];

    let mut rest = seconds;
    let mut parts = Vec::with_capacity(UNITS.len());
    for (size, unit) in UNITS {
        let count = rest / size;
        rest %= size;
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{count} {unit}{plural}"));
        }
    }

    match parts.len() {
        0 => "0 seconds".to_owned(),
        1 => parts.remove(0),
        n => {
            let last = parts.remove(n - 1);
            format!("{} and {last}", parts.join(", "))
        }
    }
}

// ============================================================================
// TIME & SIGNALS
// ============================================================================

/// Monotonic time source.
pub trait Clock {
    /// Time since an arbitrary, fixed origin. Never goes backwards.
    fn now(&self) -> Duration;

    /// Time elapsed since an earlier [`Clock::now`] reading.
    fn since(&self, earlier: Duration) -> Duration {
        self.now().saturating_sub(earlier)
    }
}

/// Wall clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Answer to the pre-reset signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetVerdict {
    /// Let the reset run.
    Proceed,
    /// Veto this reset cycle.
    Cancel,
}

/// Raised before any mutation; a listener may veto the cycle.
pub trait PreResetSignal {
    /// Called once per cycle before anything is touched.
    fn pre_reset(&mut self, mine: &MineSite) -> ResetVerdict;
}

impl<F> PreResetSignal for F
where
    F: FnMut(&MineSite) -> ResetVerdict,
{
    fn pre_reset(&mut self, mine: &MineSite) -> ResetVerdict {
        self(mine)
    }
}

// ============================================================================
// BUNDLE
// ============================================================================

/// Everything the engine needs from a host, in one bound.
pub trait Host: WorldMutator + PlayerRoster + MessageSink {}

impl<T> Host for T where T: WorldMutator + PlayerRoster + MessageSink {}
