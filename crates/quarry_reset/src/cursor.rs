//! Progress through a staged plan.

use quarry_procedural::BlockPlan;

/// Where a paged reset is in its plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetCursor {
    page: u32,
    position: usize,
    plan_len: usize,
    air_count_original: u64,
}

impl ResetCursor {
    /// A zeroed cursor for a freshly generated plan.
    #[must_use]
    pub fn for_plan(plan: &BlockPlan) -> Self {
        Self {
            page: 0,
            position: 0,
            plan_len: plan.len(),
            air_count_original: plan.air_count(),
        }
    }

    /// Pages applied so far. 0 means the cycle has not started.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Index of the next plan entry to apply.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Entries left to apply.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.plan_len.saturating_sub(self.position)
    }

    /// True once every entry has been applied.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.position >= self.plan_len
    }

    /// Air cells in the plan when it was generated.
    #[must_use]
    pub const fn air_count_original(&self) -> u64 {
        self.air_count_original
    }

    /// Percentage of the plan that is solid.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fill_percent(&self) -> f64 {
        if self.plan_len == 0 {
            return 0.0;
        }
        let total = self.plan_len as f64;
        (total - self.air_count_original as f64) / total * 100.0
    }

    /// Ends a page at `position`.
    pub(crate) fn finish_page(&mut self, position: usize) {
        debug_assert!(position >= self.position && position <= self.plan_len);
        self.position = position.min(self.plan_len);
        self.page += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{BlockPos, BlockType, RegionBounds};
    use quarry_procedural::{BlockPalette, PaletteEntry};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn plan(chance: f64) -> BlockPlan {
        let palette = BlockPalette::new(vec![PaletteEntry::new(BlockType::STONE, chance)]).unwrap();
        let bounds = RegionBounds::new(BlockPos::new(0, 0, 0), BlockPos::new(9, 9, 9));
        BlockPlan::generate(bounds, &palette, &mut ChaCha8Rng::seed_from_u64(4))
    }

    #[test]
    fn test_fresh_cursor() {
        let cursor = ResetCursor::for_plan(&plan(100.0));
        assert_eq!(cursor.page(), 0);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.remaining(), 1_000);
        assert!(!cursor.is_complete());
        assert_eq!(cursor.air_count_original(), 0);
        assert!((cursor.fill_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fill_percent_tracks_air() {
        let p = plan(50.0);
        let mut cursor = ResetCursor::for_plan(&p);
        assert_eq!(cursor.air_count_original(), p.air_count());
        assert!(p.air_count() > 0);
        let expected = (1_000.0 - p.air_count() as f64) / 10.0;
        assert!((cursor.fill_percent() - expected).abs() < 1e-9);

        // Applying pages does not change the plan's composition.
        cursor.finish_page(600);
        assert!((cursor.fill_percent() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_pages_advance() {
        let mut cursor = ResetCursor::for_plan(&plan(100.0));
        cursor.finish_page(400);
        cursor.finish_page(1_000);
        assert_eq!(cursor.page(), 2);
        assert!(cursor.is_complete());
        assert_eq!(cursor.remaining(), 0);
    }
}
