//! Static rocks on the goal row
//!
//! Rocks never move. A hop into a rock's cell is refused, which narrows the
//! goal row to the open columns.

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use crate::cell_to_pos;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub entity: Entity,
}

impl Rock {
    pub fn at_cell(col: u32, row: u32) -> Self {
        Self {
            entity: Entity::new(EntityKind::Rock, cell_to_pos(col, row)),
        }
    }

    /// `count` rocks in distinct random columns of the goal row
    pub fn scatter<R: Rng>(rng: &mut R, count: u32) -> Vec<Self> {
        let count = count.min(NUM_COLS.saturating_sub(1));
        index::sample(rng, NUM_COLS as usize, count as usize)
            .iter()
            .map(|col| Self::at_cell(col as u32, GOAL_ROW))
            .collect()
    }

    /// Whether the rock occupies the given grid cell
    pub fn occupies(&self, col: i32, row: i32) -> bool {
        self.entity.cell() == (col, row)
    }
}
