//! # Block Plans
//!
//! A plan is the full list of blocks a reset will write: one entry per cell
//! of the region, in the order they will be applied.
//!
//! ## Order
//!
//! ```text
//! for y in max.y ..= min.y   (top layer first)
//!   for x in min.x ..= max.x
//!     for z in min.z ..= max.z
//! ```
//!
//! The top layer goes first so a player teleported onto the surface sees a
//! finished mine and not a hole that is still filling from below.
//!
//! ## Storage
//!
//! One `IndexMap<BlockPos, BlockType>`: insertion order is application order,
//! hashing gives O(1) lookup by position. Sequence and index are the same
//! structure, so they cannot drift apart.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use indexmap::IndexMap;
use rand::Rng;

use quarry_core::{BlockPos, BlockType, RegionBounds};

use crate::palette::BlockPalette;

/// Position key ordered the way plans are applied.
///
/// Y descending, then X ascending, then Z ascending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlanKey(pub BlockPos);

impl Ord for PlanKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .y
            .cmp(&self.0.y)
            .then(self.0.x.cmp(&other.0.x))
            .then(self.0.z.cmp(&other.0.z))
    }
}

impl PartialOrd for PlanKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One cell of a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedBlock {
    /// Cell position.
    pub pos: BlockPos,
    /// Block to write there.
    pub block: BlockType,
}

impl PlannedBlock {
    /// Ordering key of this cell.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> PlanKey {
        PlanKey(self.pos)
    }
}

/// Every cell of a region with its planned block, in application order.
#[derive(Clone, Debug)]
pub struct BlockPlan {
    bounds: RegionBounds,
    blocks: IndexMap<BlockPos, BlockType>,
    air_count: u64,
}

impl BlockPlan {
    /// Generates a plan for `bounds`, one weighted draw per cell.
    ///
    /// Pure apart from the draws taken from `rng`; safe to run on any thread.
    pub fn generate<R: Rng + ?Sized>(
        bounds: RegionBounds,
        palette: &BlockPalette,
        rng: &mut R,
    ) -> Self {
        let capacity = usize::try_from(bounds.total_block_count()).unwrap_or(0);
        let mut blocks = IndexMap::with_capacity(capacity);
        let mut air_count = 0;

        let (min, max) = (bounds.min(), bounds.max());
        for y in (min.y..=max.y).rev() {
            for x in min.x..=max.x {
                for z in min.z..=max.z {
                    let block = palette.select(rng);
                    if block.is_empty() {
                        air_count += 1;
                    }
                    blocks.insert(BlockPos::new(x, y, z), block);
                }
            }
        }

        Self {
            bounds,
            blocks,
            air_count,
        }
    }

    /// Region this plan covers.
    #[must_use]
    pub const fn bounds(&self) -> &RegionBounds {
        &self.bounds
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True for a plan with no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of cells that drew air.
    #[must_use]
    pub const fn air_count(&self) -> u64 {
        self.air_count
    }

    /// Planned block at a position.
    #[must_use]
    pub fn get(&self, pos: BlockPos) -> Option<BlockType> {
        self.blocks.get(&pos).copied()
    }

    /// Application index of a position.
    #[must_use]
    pub fn position_of(&self, pos: BlockPos) -> Option<usize> {
        self.blocks.get_index_of(&pos)
    }

    /// Entry at an application index.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<PlannedBlock> {
        self.blocks
            .get_index(index)
            .map(|(&pos, &block)| PlannedBlock { pos, block })
    }

    /// All entries in application order.
    pub fn iter(&self) -> impl Iterator<Item = PlannedBlock> + '_ {
        self.iter_from(0)
    }

    /// Entries from an application index onwards.
    pub fn iter_from(&self, start: usize) -> impl Iterator<Item = PlannedBlock> + '_ {
        self.blocks
            .iter()
            .skip(start)
            .map(|(&pos, &block)| PlannedBlock { pos, block })
    }

    /// How many cells drew each block type.
    #[must_use]
    pub fn block_counts(&self) -> BTreeMap<BlockType, u64> {
        let mut counts = BTreeMap::new();
        for block in self.blocks.values() {
            *counts.entry(*block).or_insert(0) += 1;
        }
        counts
    }
}
