//! The read-only description of a mine as the engine sees it.
//!
//! How mines are defined and stored is the host's business; the engine only
//! needs a name for logs and messages, the world to resolve, the region, and
//! an optional spawn point.

use crate::math::Location;
use crate::region::RegionBounds;

/// A mine's identity and placement.
#[derive(Clone, Debug, PartialEq)]
pub struct MineSite {
    /// Mine name, used in logs and player notices.
    pub name: String,
    /// Name of the world the mine was created in.
    pub world: String,
    /// The region that gets reset.
    pub bounds: RegionBounds,
    /// Where evacuated players are sent. `None` means "on top of the mine".
    pub spawn: Option<Location>,
}

impl MineSite {
    /// Creates a mine without a spawn point.
    #[must_use]
    pub fn new(name: impl Into<String>, world: impl Into<String>, bounds: RegionBounds) -> Self {
        Self {
            name: name.into(),
            world: world.into(),
            bounds,
            spawn: None,
        }
    }

    /// Sets the spawn point.
    #[must_use]
    pub fn with_spawn(mut self, spawn: Location) -> Self {
        self.spawn = Some(spawn);
        self
    }

    /// Where a player standing in the mine is sent.
    ///
    /// The spawn point if one is set, otherwise the horizontal center of the
    /// region one block above its top layer.
    #[must_use]
    pub fn evacuation_target(&self) -> Location {
        self.spawn.unwrap_or_else(|| {
            let top = f64::from(self.bounds.max().y) + 1.0;
            self.bounds.center().with_y(top)
        })
    }
}
