//! Shared entity state
//!
//! Every object on the board is an `Entity`: a position, a size and a kind
//! tag. The kind doubles as the handle the renderer uses to pick a sprite
//! region, so the simulation never touches image data.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, overlaps_with_tolerance};
use crate::consts::*;
use crate::y_to_row;

/// Size of one board cell; every sprite occupies exactly one
pub const TILE_SIZE: Vec2 = Vec2::new(COL_WIDTH, ROW_HEIGHT);

/// Vehicle and predator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Car,
    Truck,
    Viper,
    Ambulance,
    Predator,
}

impl HazardKind {
    pub fn name(&self) -> &'static str {
        match self {
            HazardKind::Car => "car",
            HazardKind::Truck => "truck",
            HazardKind::Viper => "viper",
            HazardKind::Ambulance => "ambulance",
            HazardKind::Predator => "predator",
        }
    }
}

/// River platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatKind {
    Log,
    LilyPad,
}

impl FloatKind {
    pub fn name(&self) -> &'static str {
        match self {
            FloatKind::Log => "log",
            FloatKind::LilyPad => "lily pad",
        }
    }
}

/// Bonus items scattered on the road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Star,
    Key,
    Heart,
    GreenGem,
    BlueGem,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 5] = [
        CollectibleKind::Star,
        CollectibleKind::Key,
        CollectibleKind::Heart,
        CollectibleKind::GreenGem,
        CollectibleKind::BlueGem,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CollectibleKind::Star => "star",
            CollectibleKind::Key => "key",
            CollectibleKind::Heart => "heart",
            CollectibleKind::GreenGem => "green gem",
            CollectibleKind::BlueGem => "blue gem",
        }
    }

    pub fn points(&self) -> i64 {
        match self {
            CollectibleKind::Star => 100,
            CollectibleKind::Key => 75,
            CollectibleKind::Heart => 50,
            CollectibleKind::GreenGem | CollectibleKind::BlueGem => 25,
        }
    }
}

/// Closed set of everything that can sit on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Hazard(HazardKind),
    Floatable(FloatKind),
    Rock,
    Food,
    Collectible(CollectibleKind),
    /// Player sprite, by selected character index
    Player(u8),
}

/// Position, size and kind common to every board object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// Top-left corner in board coordinates
    pub pos: Vec2,
    pub size: Vec2,
    /// Inset applied to this entity's box when it probes others
    pub tolerance: Vec2,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: TILE_SIZE,
            tolerance: Vec2::ZERO,
        }
    }

    pub fn with_tolerance(mut self, tolerance: Vec2) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Board row this entity currently occupies
    #[inline]
    pub fn row(&self) -> i32 {
        y_to_row(self.pos.y)
    }

    /// Nearest grid cell; the column can leave the board while wrapping
    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        ((self.pos.x / COL_WIDTH).round() as i32, self.row())
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Tolerance-inset overlap test with this entity as the probe
    #[inline]
    pub fn overlaps(&self, other: &Entity) -> bool {
        overlaps_with_tolerance(&self.bounds(), &other.bounds(), self.tolerance)
    }
}
