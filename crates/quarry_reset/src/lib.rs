//! # QUARRY Reset Engine
//!
//! Regenerates a mine's blocks without stalling the host's tick thread.
//!
//! ## Reset Cycle
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. PRE-RESET SIGNAL     listeners may veto the cycle                │
//! │ 2. RESOLVE WORLD        gone? log and abort, nothing touched        │
//! │ 3. GENERATE PLAN        weighted draw per cell (may be off-thread)  │
//! │ 4. EVACUATE             players inside the mine are moved out       │
//! │ 5. APPLY PLAN           one pass (sync) or page by page (paged)     │
//! │ 6. EVACUATE AGAIN       catch anyone who fell back in               │
//! │ 7. BROADCAST            nearby players are told the mine reset      │
//! │ 8. STATS                phase timings, optionally logged            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Variants
//!
//! - [`SyncResetRunner`]: the whole cycle in one call. For small mines.
//! - [`PagedResetScheduler`]: a resumable state machine. The host calls
//!   [`PagedResetScheduler::resume`] once per tick until it reports
//!   [`PageStatus::Complete`]; each call stays within a soft time budget.
//!
//! ## Failure Policy
//!
//! Host failures are logged with the mine name and turned into a status.
//! Nothing from this crate can take the host down.

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod apply;
pub mod broadcast;
pub mod context;
pub mod cursor;
pub mod mine;
pub mod paged;
pub mod safety;
pub mod stats;
pub mod sync;

pub use broadcast::{broadcast_completed, broadcast_pending};
pub use context::ResetContext;
pub use cursor::ResetCursor;
pub use mine::Mine;
pub use paged::{PageStatus, PagedResetScheduler, SchedulerState};
pub use safety::{evacuate, teleport_out};
pub use stats::ResetStats;
pub use sync::{ResetReport, ResetStatus, SyncResetRunner};
