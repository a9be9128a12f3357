//! A mine the engine can reset: its site plus what it is filled with.

use quarry_core::{Clock, MineSite, ResetResult};
use quarry_procedural::{spawn_plan_generation, BlockPalette, GeneratedPlan, PlanJob};
use rand::Rng;

/// A resettable mine.
#[derive(Clone, Debug)]
pub struct Mine {
    /// Name, world, bounds and spawn.
    pub site: MineSite,
    /// Weighted block composition.
    pub palette: BlockPalette,
}

impl Mine {
    /// Creates a mine.
    #[must_use]
    pub fn new(site: MineSite, palette: BlockPalette) -> Self {
        Self { site, palette }
    }

    /// Mine name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.site.name
    }

    /// Generates a plan on the current thread, timed against `clock`.
    pub fn generate_plan<R, C>(&self, rng: &mut R, clock: &C) -> GeneratedPlan
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        GeneratedPlan::generate(self.site.bounds, &self.palette, rng, clock)
    }

    /// Starts generating a plan on a worker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker cannot be spawned.
    pub fn spawn_plan(&self, seed: u64) -> ResetResult<PlanJob> {
        spawn_plan_generation(self.site.bounds, self.palette.clone(), seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{BlockPos, BlockType, RegionBounds};
    use quarry_procedural::PaletteEntry;
    use quarry_sim::ManualClock;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn mine() -> Mine {
        let bounds = RegionBounds::new(BlockPos::new(0, 0, 0), BlockPos::new(3, 3, 3));
        let palette = BlockPalette::new(vec![PaletteEntry::new(BlockType::STONE, 60.0)]).unwrap();
        Mine::new(MineSite::new("north", "world", bounds), palette)
    }

    #[test]
    fn test_worker_and_local_plans_agree() {
        let mine = mine();
        let local = mine.generate_plan(&mut ChaCha8Rng::seed_from_u64(9), &ManualClock::new());
        let remote = mine.spawn_plan(9).unwrap().wait().unwrap();

        assert_eq!(mine.name(), "north");
        assert_eq!(local.plan.len(), 64);
        assert!(local.plan.iter().eq(remote.plan.iter()));
        assert_eq!(local.generation_time, std::time::Duration::ZERO);
    }
}
