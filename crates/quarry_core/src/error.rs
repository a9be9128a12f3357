//! # Reset Error Types
//!
//! All errors that can occur while resetting a mine.
//!
//! Cancellation by the pre-reset signal is NOT an error; it is reported as a
//! status by the engine. Everything here ends up in a log line, never in a
//! panic.

use thiserror::Error;

use crate::math::BlockPos;

/// Failures reported by a host platform adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A block could not be read or written.
    #[error("block access failed at {pos}: {reason}")]
    BlockAccess {
        /// The block that was being accessed.
        pos: BlockPos,
        /// Adapter-specific reason.
        reason: String,
    },

    /// A player could not be moved.
    #[error("could not teleport player {player}: {reason}")]
    Teleport {
        /// Display name of the player.
        player: String,
        /// Adapter-specific reason.
        reason: String,
    },

    /// A message could not be delivered.
    #[error("could not message player {player}: {reason}")]
    Messaging {
        /// Display name of the player.
        player: String,
        /// Adapter-specific reason.
        reason: String,
    },

    /// Anything else the adapter wants to surface.
    #[error("host failure: {0}")]
    Other(String),
}

/// Errors that can occur in the reset engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResetError {
    /// The world the mine was created in does not exist anymore.
    #[error("could not reset mine {mine} because the world {world} does not exist")]
    WorldUnresolved {
        /// Mine name.
        mine: String,
        /// World name the mine points at.
        world: String,
    },

    /// A host call failed mid-cycle.
    #[error("failed to reset mine {mine}: {source}")]
    Host {
        /// Mine name.
        mine: String,
        /// The adapter failure.
        #[source]
        source: HostError,
    },

    /// A new plan was staged while a cycle was still being applied.
    #[error("mine {mine} is already resetting")]
    CycleInProgress {
        /// Mine name.
        mine: String,
    },

    /// The scheduler was resumed with nothing to apply.
    #[error("mine {mine} has no staged block plan")]
    NoPlanStaged {
        /// Mine name.
        mine: String,
    },

    /// A staged plan was generated for different bounds.
    #[error("block plan for mine {mine} does not match its bounds")]
    PlanMismatch {
        /// Mine name.
        mine: String,
    },

    /// Palette entry with a chance outside (0, 100].
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// Invalid configuration file or value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Background plan generation did not deliver a plan.
    #[error("plan generation failed: {0}")]
    GenerationFailed(String),
}

impl ResetError {
    /// Wraps a host failure with the mine it happened in.
    #[must_use]
    pub fn host(mine: &str, source: HostError) -> Self {
        Self::Host {
            mine: mine.to_owned(),
            source,
        }
    }
}

/// Result type for host adapter calls.
pub type HostResult<T> = Result<T, HostError>;

/// Result type for engine operations.
pub type ResetResult<T> = Result<T, ResetError>;
