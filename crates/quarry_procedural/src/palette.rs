//! # Block Palette
//!
//! Weighted block selection for mine resets.
//!
//! A palette is an ordered list of `(block, chance)` entries, chances in
//! percent. Chances do not have to add up to 100: whatever is left over is
//! air.
//!
//! ```text
//! draw = 83.2   ┌──────────── STONE 70 ───────────┬── COAL 20 ──┬ DIA 5 ┬ AIR ┐
//!               0                                 70            90      95    100
//!                                                        ▲ 83.2 → COAL
//! ```
//!
//! Entry order decides which block owns which slice of the line; it never
//! changes how wide a slice is.

use rand::Rng;
use serde::{Deserialize, Serialize};

use quarry_core::{BlockType, ResetError, ResetResult};

/// Draws are taken from `[0, CHANCE_SCALE)`.
const CHANCE_SCALE: f64 = 100.0;

/// One `(block, chance)` entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Block placed when this entry is drawn.
    pub block: BlockType,
    /// Chance in percent, in `(0, 100]`.
    pub chance: f64,
}

impl PaletteEntry {
    /// Creates an entry. Validated when the palette is built.
    #[must_use]
    pub const fn new(block: BlockType, chance: f64) -> Self {
        Self { block, chance }
    }
}

/// Ordered list of weighted entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PaletteEntry>", into = "Vec<PaletteEntry>")]
pub struct BlockPalette {
    entries: Vec<PaletteEntry>,
}

impl BlockPalette {
    /// Builds a palette.
    ///
    /// # Errors
    ///
    /// Returns [`ResetError::InvalidPalette`] if any chance is not a finite
    /// number in `(0, 100]`.
    pub fn new(entries: Vec<PaletteEntry>) -> ResetResult<Self> {
        if let Some(bad) = entries
            .iter()
            .find(|e| !e.chance.is_finite() || e.chance <= 0.0 || e.chance > CHANCE_SCALE)
        {
            return Err(ResetError::InvalidPalette(format!(
                "chance {} for {} is outside (0, 100]",
                bad.chance, bad.block
            )));
        }
        Ok(Self { entries })
    }

    /// The entries, in priority order.
    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Sum of all chances. Anything under 100 is the air share.
    #[must_use]
    pub fn total_chance(&self) -> f64 {
        self.entries.iter().map(|e| e.chance).sum()
    }

    /// Expected share of air draws, in percent.
    #[must_use]
    pub fn air_chance(&self) -> f64 {
        (CHANCE_SCALE - self.total_chance()).max(0.0)
    }

    /// Draws one block.
    ///
    /// Consumes exactly one value from `rng`. Falls through to
    /// [`BlockType::AIR`] when the draw lands past the last entry.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockType {
        let mut chance = rng.gen::<f64>() * CHANCE_SCALE;

        for entry in &self.entries {
            if chance <= entry.chance {
                return entry.block;
            }
            chance -= entry.chance;
        }
        BlockType::AIR
    }
}

impl TryFrom<Vec<PaletteEntry>> for BlockPalette {
    type Error = ResetError;

    fn try_from(entries: Vec<PaletteEntry>) -> ResetResult<Self> {
        Self::new(entries)
    }
}

impl From<BlockPalette> for Vec<PaletteEntry> {
    fn from(palette: BlockPalette) -> Self {
        palette.entries
    }
}
