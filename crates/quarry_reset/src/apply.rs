//! Writing plan entries into the world.

use quarry_core::{HostResult, WorldMutator};
use quarry_procedural::{BlockPlan, PlannedBlock};

/// Applies one plan entry.
///
/// In fill mode a cell that is not currently empty is left alone.
/// Returns true if the block was written.
///
/// # Errors
///
/// Returns the host failure from reading or writing the cell.
pub fn apply_block<H: WorldMutator + ?Sized>(
    host: &mut H,
    world: &H::World,
    entry: PlannedBlock,
    fill_mode: bool,
) -> HostResult<bool> {
    if fill_mode && !host.is_empty(world, entry.pos)? {
        return Ok(false);
    }
    host.set_block_type(world, entry.pos, entry.block)?;
    Ok(true)
}

/// Applies a whole plan in order. Returns how many blocks were written.
///
/// # Errors
///
/// Stops at the first host failure and returns it.
pub fn apply_all<H: WorldMutator + ?Sized>(
    host: &mut H,
    world: &H::World,
    plan: &BlockPlan,
    fill_mode: bool,
) -> HostResult<u64> {
    let mut written = 0;
    for entry in plan.iter() {
        if apply_block(host, world, entry, fill_mode)? {
            written += 1;
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{BlockPos, BlockType, RegionBounds, WorldResolver};
    use quarry_procedural::{BlockPalette, PaletteEntry};
    use quarry_sim::SimHost;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn stone_plan(bounds: RegionBounds) -> BlockPlan {
        let palette = BlockPalette::new(vec![PaletteEntry::new(BlockType::STONE, 100.0)]).unwrap();
        BlockPlan::generate(bounds, &palette, &mut ChaCha8Rng::seed_from_u64(1))
    }

    #[test]
    fn test_fill_mode_keeps_solid_cells() {
        let bounds = RegionBounds::new(BlockPos::new(0, 0, 0), BlockPos::new(1, 1, 1));
        let mut host = SimHost::new().with_world("world");
        host.set_block("world", BlockPos::new(0, 0, 0), BlockType::DIRT);
        let world = host.resolve_world("world").unwrap();

        let written = apply_all(&mut host, &world, &stone_plan(bounds), true).unwrap();

        assert_eq!(written, 7);
        assert_eq!(host.block_at("world", BlockPos::new(0, 0, 0)), BlockType::DIRT);
        assert_eq!(host.block_at("world", BlockPos::new(1, 1, 1)), BlockType::STONE);
    }

    #[test]
    fn test_overwrite_mode_replaces_everything() {
        let bounds = RegionBounds::new(BlockPos::new(0, 0, 0), BlockPos::new(1, 1, 1));
        let mut host = SimHost::new().with_world("world");
        host.set_block("world", BlockPos::new(0, 0, 0), BlockType::DIRT);
        let world = host.resolve_world("world").unwrap();

        let written = apply_all(&mut host, &world, &stone_plan(bounds), false).unwrap();

        assert_eq!(written, 8);
        assert_eq!(host.block_at("world", BlockPos::new(0, 0, 0)), BlockType::STONE);
    }

    #[test]
    fn test_failure_stops_application() {
        let bounds = RegionBounds::new(BlockPos::new(0, 0, 0), BlockPos::new(1, 1, 1));
        let mut host = SimHost::new().with_world("world");
        host.fail_writes_after(3);
        let world = host.resolve_world("world").unwrap();

        assert!(apply_all(&mut host, &world, &stone_plan(bounds), false).is_err());
        assert_eq!(host.write_count(), 3);
    }
}
