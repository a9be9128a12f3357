//! # QUARRY Procedural Generation
//!
//! Turns a palette and a region into a block plan.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and palette always produce the same plan
//! 2. **Top-down**: Plans are ordered from the top layer to the bottom one,
//!    so a player standing on the surface sees a finished mine first
//! 3. **Side-effect free**: Nothing here touches the world, so generation may
//!    run on a worker thread
//!
//! ## Core Components
//!
//! - `BlockPalette`: ordered (block, chance) entries and the weighted draw
//! - `BlockPlan`: every cell of the region with its planned block
//! - `PlanJob`: background generation with a channel hand-off
//!
//! ## Example
//!
//! ```rust
//! use quarry_core::{BlockPos, BlockType, RegionBounds};
//! use quarry_procedural::{BlockPalette, BlockPlan, PaletteEntry};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let palette = BlockPalette::new(vec![
//!     PaletteEntry::new(BlockType::STONE, 70.0),
//!     PaletteEntry::new(BlockType::COAL_ORE, 20.0),
//! ]).unwrap();
//! let bounds = RegionBounds::new(BlockPos::new(0, 0, 0), BlockPos::new(3, 3, 3));
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let plan = BlockPlan::generate(bounds, &palette, &mut rng);
//! assert_eq!(plan.len(), 64);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod job;
pub mod palette;
pub mod plan;

pub use job::{spawn_plan_generation, GeneratedPlan, PlanJob};
pub use palette::{BlockPalette, PaletteEntry};
pub use plan::{BlockPlan, PlanKey, PlannedBlock};
