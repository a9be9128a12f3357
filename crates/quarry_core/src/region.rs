//! # Region Bounds
//!
//! An axis-aligned box of blocks, inclusive on both corners.
//!
//! ```text
//!            max (x, y, z)
//!        ┌──────────┐
//!       /│         /│
//!      ┌──────────┐ │   center = midpoint of the two corners
//!      │ └────────│─┘   top    = max.y
//!      │/         │/
//!      └──────────┘
//!  min (x, y, z)
//! ```

use crate::math::{BlockPos, Location};

/// Inclusive block region.
///
/// Invariant: `min <= max` on every axis. [`RegionBounds::new`] sorts the
/// corners so any two opposite corners are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionBounds {
    min: BlockPos,
    max: BlockPos,
}

impl RegionBounds {
    /// Creates bounds from two opposite corners.
    #[must_use]
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Lowest corner.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> BlockPos {
        self.min
    }

    /// Highest corner.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> BlockPos {
        self.max
    }

    /// Extent along X, in blocks.
    #[inline]
    #[must_use]
    pub fn width_x(&self) -> u64 {
        axis_extent(self.min.x, self.max.x)
    }

    /// Extent along Y, in blocks.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u64 {
        axis_extent(self.min.y, self.max.y)
    }

    /// Extent along Z, in blocks.
    #[inline]
    #[must_use]
    pub fn width_z(&self) -> u64 {
        axis_extent(self.min.z, self.max.z)
    }

    /// Number of cells in the region, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_block_count(&self) -> u64 {
        self.width_x()
            .saturating_mul(self.height())
            .saturating_mul(self.width_z())
    }

    /// Geometric center of the region.
    ///
    /// Uses the block-space box `[min, max + 1)` so a 10 wide region starting
    /// at 0 is centered on 5.0.
    #[must_use]
    pub fn center(&self) -> Location {
        let lo = Location::from(self.min);
        let hi = Location::from(self.max);
        Location::new(
            (lo.x + hi.x + 1.0) / 2.0,
            (lo.y + hi.y + 1.0) / 2.0,
            (lo.z + hi.z + 1.0) / 2.0,
        )
    }

    /// Returns true if the block position is inside the region.
    #[must_use]
    pub const fn contains_block(&self, pos: BlockPos) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    /// Returns true if the location lies in one of the region's blocks.
    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        self.contains_block(location.block())
    }

    /// Returns true if the location is within `radius` blocks of the center.
    #[must_use]
    pub fn within_radius(&self, location: Location, radius: u32) -> bool {
        let r = f64::from(radius);
        self.center().distance_squared(location) <= r * r
    }
}

fn axis_extent(min: i32, max: i32) -> u64 {
    (i64::from(max) - i64::from(min) + 1).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> RegionBounds {
        RegionBounds::new(BlockPos::new(0, 60, 0), BlockPos::new(9, 64, 9))
    }

    #[test]
    fn test_corners_are_normalized() {
        let flipped = RegionBounds::new(BlockPos::new(9, 64, 9), BlockPos::new(0, 60, 0));
        assert_eq!(flipped, region());
        assert_eq!(flipped.min(), BlockPos::new(0, 60, 0));
    }

    #[test]
    fn test_total_block_count() {
        assert_eq!(region().total_block_count(), 10 * 5 * 10);
        let single = RegionBounds::new(BlockPos::new(3, 3, 3), BlockPos::new(3, 3, 3));
        assert_eq!(single.total_block_count(), 1);
    }

    #[test]
    fn test_total_block_count_saturates() {
        let everything = RegionBounds::new(
            BlockPos::new(i32::MIN, i32::MIN, i32::MIN),
            BlockPos::new(i32::MAX, i32::MAX, i32::MAX),
        );
        assert_eq!(everything.width_x(), 1 << 32);
        assert_eq!(everything.total_block_count(), u64::MAX);

        // 2^32 * 2^31 still fits.
        let slab = RegionBounds::new(
            BlockPos::new(i32::MIN, 0, 0),
            BlockPos::new(i32::MAX, i32::MAX, 0),
        );
        assert_eq!(slab.total_block_count(), 1 << 63);
    }

    #[test]
    fn test_center() {
        let c = region().center();
        assert!((c.x - 5.0).abs() < f64::EPSILON);
        assert!((c.y - 62.5).abs() < f64::EPSILON);
        assert!((c.z - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_membership() {
        let r = region();
        assert!(r.contains(Location::new(0.0, 60.0, 0.0)));
        assert!(r.contains(Location::new(9.99, 64.5, 9.99)));
        assert!(!r.contains(Location::new(10.0, 62.0, 5.0)));
        assert!(!r.contains(Location::new(5.0, 65.0, 5.0)));
    }

    #[test]
    fn test_radius_is_looser_than_membership() {
        let r = region();
        let above = Location::new(5.0, 70.0, 5.0);
        assert!(!r.contains(above));
        assert!(r.within_radius(above, 150));
        assert!(!r.within_radius(Location::new(500.0, 62.0, 5.0), 150));
    }
}
