//! Frogger - a river-crossing arcade game
//!
//! Core modules:
//! - `sim`: Entity simulation (motion, collisions, life/score state machine)
//! - `renderer`: Sprite atlas regions and per-frame draw submission
//! - `platform`: Collaborator interfaces (messages, input, frame clock)
//! - `audio`: Sound ids and the audio feedback sink
//! - `tuning`: Data-driven lane map and game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game configuration constants
pub mod consts {
    use super::RowSpan;

    /// Board grid
    pub const COL_WIDTH: f32 = 101.0;
    pub const ROW_HEIGHT: f32 = 83.0;
    pub const NUM_COLS: u32 = 8;
    pub const NUM_ROWS: u32 = 8;
    pub const BOARD_WIDTH: f32 = COL_WIDTH * NUM_COLS as f32;
    pub const BOARD_HEIGHT: f32 = ROW_HEIGHT * NUM_ROWS as f32;

    /// Rows are numbered top to bottom
    pub const GOAL_ROW: u32 = 0;
    pub const WATER_ROWS: RowSpan = RowSpan::new(1, 3);
    pub const ROAD_ROWS: RowSpan = RowSpan::new(4, 6);
    pub const START_ROW: u32 = NUM_ROWS - 1;

    /// Collision inset for transparent sprite padding (player side)
    pub const XTOL: f32 = 17.0;
    pub const YTOL: f32 = 10.0;

    /// Longest frame delta the simulation will integrate
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player rules
    pub const START_LIVES: u8 = 3;
    pub const GOAL_POINTS: i64 = 100;
    /// Flat penalty for falling in the river
    pub const WATER_PENALTY: i64 = 25;
    /// Food eaten per extra life
    pub const FOOD_PER_LIFE: u32 = 5;
    /// Selectable player characters on the sprite sheet
    pub const NUM_CHARACTERS: u8 = 5;
}

/// An inclusive range of board rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSpan {
    pub first: u32,
    pub last: u32,
}

impl RowSpan {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    #[inline]
    pub fn contains(&self, row: i32) -> bool {
        row >= self.first as i32 && row <= self.last as i32
    }

    pub fn len(&self) -> u32 {
        if self.last < self.first {
            0
        } else {
            self.last - self.first + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &RowSpan) -> bool {
        self.first <= other.last && other.first <= self.last
    }

    pub fn rows(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

/// Board y of the top edge of a row
#[inline]
pub fn row_to_y(row: u32) -> f32 {
    row as f32 * ROW_HEIGHT
}

/// Board x of the left edge of a column
#[inline]
pub fn col_to_x(col: u32) -> f32 {
    col as f32 * COL_WIDTH
}

/// Row nearest to a board y coordinate (negative above the board)
#[inline]
pub fn y_to_row(y: f32) -> i32 {
    ((y + ROW_HEIGHT / 2.0) / ROW_HEIGHT).floor() as i32
}

/// Top-left corner of a grid cell
#[inline]
pub fn cell_to_pos(col: u32, row: u32) -> Vec2 {
    Vec2::new(col_to_x(col), row_to_y(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_round_trip() {
        for row in 0..NUM_ROWS {
            assert_eq!(y_to_row(row_to_y(row)), row as i32);
        }
        // Food falling between rows snaps to the nearest one
        assert_eq!(y_to_row(row_to_y(2) + 40.0), 2);
        assert_eq!(y_to_row(row_to_y(2) + 45.0), 3);
        assert_eq!(y_to_row(-ROW_HEIGHT), -1);
    }

    #[test]
    fn test_row_span() {
        assert!(WATER_ROWS.contains(1));
        assert!(WATER_ROWS.contains(3));
        assert!(!WATER_ROWS.contains(4));
        assert!(!WATER_ROWS.contains(-1));
        assert_eq!(ROAD_ROWS.len(), 3);
        assert!(!WATER_ROWS.overlaps(&ROAD_ROWS));
        assert!(RowSpan::new(2, 5).overlaps(&ROAD_ROWS));
        assert!(RowSpan::new(3, 2).is_empty());
        assert_eq!(ROAD_ROWS.rows().collect::<Vec<_>>(), vec![4, 5, 6]);
    }
}
