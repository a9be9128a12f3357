//! # QUARRY Core
//!
//! Shared vocabulary for the mine reset engine:
//! - Block types and the designated empty block
//! - Integer block positions, fractional player locations, region bounds
//! - The contracts a host platform implements (world, roster, messaging,
//!   clock, pre-reset signal)
//! - Reset configuration and the error taxonomy
//!
//! ## Architecture Rules
//!
//! 1. **No mutation here** - this crate only describes the world, the engine
//!    in `quarry_reset` is the one that changes it
//! 2. **Host owns the thread** - every trait in [`host`] is called from the
//!    host's authoritative tick thread
//! 3. **Failures are values** - host calls return [`HostResult`] so a bad
//!    adapter can never take the server down
//!
//! ## Example
//!
//! ```rust
//! use quarry_core::{BlockPos, RegionBounds};
//!
//! let bounds = RegionBounds::new(BlockPos::new(0, 60, 0), BlockPos::new(9, 64, 9));
//! assert_eq!(bounds.total_block_count(), 500);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod block;
pub mod config;
pub mod error;
pub mod host;
pub mod math;
pub mod mine;
pub mod region;

pub use block::BlockType;
pub use config::{
    ResetConfig, MINE_RESET_BROADCAST_RADIUS_BLOCKS, MINE_RESET_MAX_PAGE_ELAPSED_TIME_MS,
    MINE_RESET_PAGE_TIMEOUT_CHECK_BLOCK_COUNT,
};
pub use error::{HostError, HostResult, ResetError, ResetResult};
pub use host::{
    format_time_until, Clock, Host, MessageSink, Notice, PlayerId, PlayerRoster, PlayerView,
    PreResetSignal, ResetVerdict, SystemClock, WorldMutator, WorldResolver,
};
pub use math::{BlockPos, Location};
pub use mine::MineSite;
pub use region::RegionBounds;
