//! Collectibles and falling food
//!
//! Collectibles are scattered on distinct road cells. Once every one of them
//! has been picked up the whole set is re-scattered at once. Food drops from
//! above the board and is recycled when it falls off the bottom or is eaten.

use glam::Vec2;
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::entity::{CollectibleKind, Entity, EntityKind};
use super::motion::random_speed;
use super::player::Player;
use super::state::GameEvent;
use crate::consts::*;
use crate::tuning::SpeedRange;
use crate::{RowSpan, col_to_x, row_to_y};

/// Where collected items are parked so they neither render nor collide
pub const OFF_BOARD: Vec2 = Vec2::new(-COL_WIDTH, -ROW_HEIGHT);

/// A bonus item worth points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub entity: Entity,
    pub kind: CollectibleKind,
    pub points: i64,
    pub collected: bool,
}

impl Collectible {
    pub fn new(kind: CollectibleKind) -> Self {
        Self {
            entity: Entity::new(EntityKind::Collectible(kind), OFF_BOARD),
            kind,
            points: kind.points(),
            collected: false,
        }
    }

    /// Award the item if the player is standing on it
    pub fn check_collected(&mut self, player: &mut Player) -> bool {
        if self.collected || !player.entity.overlaps(&self.entity) {
            return false;
        }
        player.collect(self.points);
        self.collected = true;
        true
    }
}

/// All collectibles plus the shared "collected so far" counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleSet {
    pub items: Vec<Collectible>,
    pub num_collected: usize,
    /// Rows the items are scattered over
    pub rows: RowSpan,
    /// Cells held by stationary land predators, never used for items
    pub blocked: Vec<(i32, i32)>,
}

impl CollectibleSet {
    /// One of every kind, scattered over the free cells of `rows`
    pub fn new<R: Rng>(rng: &mut R, rows: RowSpan, blocked: Vec<(i32, i32)>) -> Self {
        let mut set = Self {
            items: CollectibleKind::ALL.iter().map(|&k| Collectible::new(k)).collect(),
            num_collected: 0,
            rows,
            blocked,
        };
        set.reset(rng);
        set
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Re-scatter every item on distinct free cells and mark all uncollected
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        let free: Vec<(u32, u32)> = self
            .rows
            .rows()
            .flat_map(|row| (0..NUM_COLS).map(move |col| (col, row)))
            .filter(|&(col, row)| !self.blocked.contains(&(col as i32, row as i32)))
            .collect();
        let picks = index::sample(rng, free.len(), self.items.len().min(free.len()));
        for (item, pick) in self.items.iter_mut().zip(picks.iter()) {
            let (col, row) = free[pick];
            item.entity.pos = Vec2::new(col_to_x(col), row_to_y(row));
            item.collected = false;
        }
        self.num_collected = 0;
    }

    /// Per-tick lifecycle, run after the player has moved
    pub fn update<R: Rng>(&mut self, player: &mut Player, rng: &mut R, events: &mut Vec<GameEvent>) {
        if self.num_collected == self.total() {
            log::debug!("All collectibles picked up, scattering a new set");
            self.reset(rng);
            return;
        }
        for item in &mut self.items {
            if item.collected {
                item.entity.pos = OFF_BOARD;
            } else if item.check_collected(player) {
                self.num_collected += 1;
                events.push(GameEvent::Collected {
                    kind: item.kind,
                    points: item.points,
                });
            }
        }
    }
}

/// A snack that falls down the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub entity: Entity,
    /// Downward speed in board pixels per second
    pub fall_speed: f32,
    pub points: i64,
}

impl Food {
    pub fn new<R: Rng>(rng: &mut R, fall_speed: SpeedRange, points: i64) -> Self {
        let mut food = Self {
            entity: Entity::new(EntityKind::Food, OFF_BOARD),
            fall_speed: 0.0,
            points,
        };
        food.respawn(rng, fall_speed);
        food
    }

    /// Random column just above the board, random fall speed
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, fall_speed: SpeedRange) {
        let col = rng.random_range(0..NUM_COLS);
        self.entity.pos = Vec2::new(col_to_x(col), -ROW_HEIGHT);
        self.fall_speed = random_speed(rng, fall_speed.min, fall_speed.max);
    }

    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R, fall_speed: SpeedRange) {
        self.entity.pos.y += self.fall_speed * dt;
        if self.entity.pos.y > BOARD_HEIGHT {
            self.respawn(rng, fall_speed);
        }
    }
}
