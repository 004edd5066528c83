//! Image and sprite-sheet lookup
//!
//! Every sprite is a 101x171 cell on `images/sprite-sheet.png`; the board
//! tiles are separate images of the same size. The transparent band above
//! each sprite is why entities are drawn slightly above their board y.

use crate::consts::*;
use crate::sim::{CollectibleKind, EntityKind, FloatKind, HazardKind};

/// Source image height of every sprite and tile
pub const SPRITE_HEIGHT: f32 = 171.0;
/// Vertical draw offset that sits a sprite's body on its row tile
pub const SPRITE_OFFSET_Y: f32 = -14.0;

/// Images the renderer needs loaded before the first frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    SpriteSheet,
    GrassTop,
    Water,
    RoadTop,
    RoadMid,
    RoadBottom,
    GrassBottom,
}

impl ImageId {
    pub const ALL: [ImageId; 7] = [
        ImageId::SpriteSheet,
        ImageId::GrassTop,
        ImageId::Water,
        ImageId::RoadTop,
        ImageId::RoadMid,
        ImageId::RoadBottom,
        ImageId::GrassBottom,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ImageId::SpriteSheet => "images/sprite-sheet.png",
            ImageId::GrassTop => "images/grass-top.png",
            ImageId::Water => "images/water-tile.png",
            ImageId::RoadTop => "images/road-top.png",
            ImageId::RoadMid => "images/road-mid.png",
            ImageId::RoadBottom => "images/road-bottom.png",
            ImageId::GrassBottom => "images/grass-bottom.png",
        }
    }
}

/// A source rectangle inside one image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRegion {
    pub image: ImageId,
    pub src_x: f32,
    pub src_y: f32,
    pub width: f32,
    pub height: f32,
}

impl SpriteRegion {
    /// A whole tile image
    pub fn tile(image: ImageId) -> Self {
        Self {
            image,
            src_x: 0.0,
            src_y: 0.0,
            width: COL_WIDTH,
            height: SPRITE_HEIGHT,
        }
    }

    /// Cell `(col, sheet_row)` of the sprite sheet
    pub fn sheet(col: u32, sheet_row: u32) -> Self {
        Self {
            image: ImageId::SpriteSheet,
            src_x: col as f32 * COL_WIDTH,
            src_y: sheet_row as f32 * SPRITE_HEIGHT,
            width: COL_WIDTH,
            height: SPRITE_HEIGHT,
        }
    }
}

/// Sprite-sheet rows
const CHARACTER_ROW: u32 = 0;
const COLLECTIBLE_ROW: u32 = 2;
const HAZARD_ROW: u32 = 3;
const RIVER_ROW: u32 = 4;

/// Sprite for an entity kind
pub fn region_for(kind: EntityKind) -> SpriteRegion {
    match kind {
        EntityKind::Player(character) => SpriteRegion::sheet(character as u32, CHARACTER_ROW),
        EntityKind::Collectible(kind) => {
            let col = match kind {
                CollectibleKind::Star => 0,
                CollectibleKind::Key => 1,
                CollectibleKind::Heart => 2,
                CollectibleKind::GreenGem => 3,
                CollectibleKind::BlueGem => 4,
            };
            SpriteRegion::sheet(col, COLLECTIBLE_ROW)
        }
        EntityKind::Hazard(kind) => {
            let col = match kind {
                HazardKind::Car => 0,
                HazardKind::Truck => 1,
                HazardKind::Viper => 2,
                HazardKind::Ambulance => 3,
                HazardKind::Predator => 4,
            };
            SpriteRegion::sheet(col, HAZARD_ROW)
        }
        EntityKind::Floatable(FloatKind::Log) => SpriteRegion::sheet(0, RIVER_ROW),
        EntityKind::Floatable(FloatKind::LilyPad) => SpriteRegion::sheet(1, RIVER_ROW),
        EntityKind::Rock => SpriteRegion::sheet(2, RIVER_ROW),
        EntityKind::Food => SpriteRegion::sheet(3, RIVER_ROW),
    }
}
