//! # Block Types
//!
//! A block type is a bare numeric id. The engine only needs to know which id
//! means "empty" and which id is the solid placeholder dropped under a
//! teleport target; everything else is opaque palette data the host maps to
//! its own materials.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A block type identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockType(u16);

impl BlockType {
    /// Air block (empty). Remainder of every palette.
    pub const AIR: Self = Self(0);
    /// Stone block.
    pub const STONE: Self = Self(1);
    /// Dirt block.
    pub const DIRT: Self = Self(3);
    /// Cobblestone block.
    pub const COBBLESTONE: Self = Self(4);
    /// Bedrock block.
    pub const BEDROCK: Self = Self(7);
    /// Gold ore block.
    pub const GOLD_ORE: Self = Self(14);
    /// Iron ore block.
    pub const IRON_ORE: Self = Self(15);
    /// Coal ore block.
    pub const COAL_ORE: Self = Self(16);
    /// Glass block. Placed under players so they do not fall.
    pub const GLASS: Self = Self(20);
    /// Lapis ore block.
    pub const LAPIS_ORE: Self = Self(21);
    /// Diamond ore block.
    pub const DIAMOND_ORE: Self = Self(56);
    /// Redstone ore block.
    pub const REDSTONE_ORE: Self = Self(73);
    /// Emerald ore block.
    pub const EMERALD_ORE: Self = Self(129);

    /// Creates a block type from a raw id.
    #[inline]
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns true if this is the empty (air) type.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::AIR.0
    }

    /// Human-readable name for the named constants.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("air"),
            1 => Some("stone"),
            3 => Some("dirt"),
            4 => Some("cobblestone"),
            7 => Some("bedrock"),
            14 => Some("gold_ore"),
            15 => Some("iron_ore"),
            16 => Some("coal_ore"),
            20 => Some("glass"),
            21 => Some("lapis_ore"),
            56 => Some("diamond_ore"),
            73 => Some("redstone_ore"),
            129 => Some("emerald_ore"),
            _ => None,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "block#{}", self.0),
        }
    }
}
