//! # QUARRY Sim
//!
//! An in-memory host platform for the reset engine.
//!
//! - [`SimHost`] implements every host trait over plain collections and can
//!   be told to fail, to drop a world, or to cost time per block write.
//! - [`ManualClock`] is a shareable clock that moves only when advanced.
//! - [`TickLoop`] drives a fixed host tick rate for the demo binary.

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod host;
pub mod tick;

pub use clock::ManualClock;
pub use host::{SimHost, SimPlayer};
pub use tick::{TickLoop, TickStats, HOST_TICK_RATE};
