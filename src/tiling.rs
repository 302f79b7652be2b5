//! Tile geometry for a single-resolution image.
//!
//! Under [`TilePolicy::SquareWithRemainder`] a square image is one tile. A
//! non-square ("odd") image is two: the leading square of side
//! `min(width, height)`, then whatever is left along the longer axis.

use crate::error::TileError;

/// How an image is divided into tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TilePolicy {
    /// Leading square tile plus one remainder tile for non-square images.
    #[default]
    SquareWithRemainder,
    /// The whole image is a single tile.
    WholeImage,
}

/// A pixel rectangle inside an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Tile geometry of one image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileLayout {
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub policy: TilePolicy,
}

impl TileLayout {
    pub fn new(width: u32, height: u32, policy: TilePolicy) -> Self {
        let (tile_width, tile_height) = match policy {
            TilePolicy::SquareWithRemainder => {
                let side = width.min(height);
                (side, side)
            }
            TilePolicy::WholeImage => (width, height),
        };
        Self {
            width,
            height,
            tile_width,
            tile_height,
            policy,
        }
    }

    /// Whether the image is split into a square and a remainder.
    pub fn is_odd(&self) -> bool {
        self.policy == TilePolicy::SquareWithRemainder && self.width != self.height
    }

    pub fn tile_count(&self) -> u32 {
        if self.is_odd() { 2 } else { 1 }
    }

    /// Pixel region covered by `tile`.
    ///
    /// The remainder tile of an odd image is smaller than the nominal tile
    /// size along the longer axis; callers must use the returned dimensions.
    pub fn region(&self, tile: u32) -> Result<Region, TileError> {
        if tile >= self.tile_count() {
            return Err(TileError::InvalidTileIndex {
                tile,
                count: self.tile_count(),
            });
        }
        if !self.is_odd() {
            return Ok(Region::new(0, 0, self.width, self.height));
        }

        let side = self.tile_width;
        if tile == 0 {
            Ok(Region::new(0, 0, side, side))
        } else if self.width > self.height {
            Ok(Region::new(side, 0, self.width - side, side))
        } else {
            Ok(Region::new(0, side, side, self.height - side))
        }
    }
}
