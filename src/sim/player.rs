//! The player sprite and its life/score state machine
//!
//! Collision resolution lives here because every outcome (ride, hit, goal,
//! food) mutates the player. Categories are checked in a fixed order and the
//! first one that costs a life ends resolution for the tick, so a single
//! frame can never charge two penalties.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::first_overlap;
use super::entity::{Entity, EntityKind, HazardKind};
use super::floatable::Floatable;
use super::hazard::{Hazard, Predator};
use super::obstacle::Rock;
use super::pickup::Food;
use super::state::GameEvent;
use crate::consts::*;
use crate::tuning::SpeedRange;
use crate::{RowSpan, cell_to_pos, row_to_y};

/// A discrete hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Column and row delta of one hop
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// What cost the player a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCause {
    /// Vehicle or predator contact
    Hazard(HazardKind),
    /// Fell in the river with nothing to stand on
    Water,
}

/// Everything the player can touch during one update
pub struct Surroundings<'a, R: Rng> {
    pub vehicles: &'a [Hazard],
    pub floatables: &'a [Floatable],
    pub predators: &'a [Predator],
    pub foods: &'a mut [Food],
    pub water: RowSpan,
    pub food_fall_speed: SpeedRange,
    pub rng: &'a mut R,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub entity: Entity,
    pub lives: u8,
    /// Penalties can drive this below zero
    pub score: i64,
    /// Food eaten toward the next extra life
    pub food: u32,
    /// Set while a floatable carries the player this tick
    pub riding: bool,
    pub character: u8,
}

impl Player {
    pub fn new(character: u8) -> Self {
        let character = character.min(NUM_CHARACTERS - 1);
        Self {
            entity: Entity::new(EntityKind::Player(character), Self::start_position())
                .with_tolerance(Vec2::new(XTOL, YTOL)),
            lives: START_LIVES,
            score: 0,
            food: 0,
            riding: false,
            character,
        }
    }

    /// Center column of the bottom row
    pub fn start_position() -> Vec2 {
        cell_to_pos(NUM_COLS / 2, START_ROW)
    }

    pub fn select_character(&mut self, character: u8) {
        self.character = character.min(NUM_CHARACTERS - 1);
        self.entity.kind = EntityKind::Player(self.character);
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    /// Back to the start cell; a hard reset also revives a dead player
    pub fn reset(&mut self, restore: bool) {
        self.entity.pos = Self::start_position();
        self.riding = false;
        if restore && self.lives == 0 {
            self.lives = START_LIVES;
            self.score = 0;
            self.food = 0;
        }
    }

    pub fn take_hit(&mut self, penalty: i64, cause: HitCause, events: &mut Vec<GameEvent>) {
        self.lives = self.lives.saturating_sub(1);
        self.score -= penalty;
        log::debug!("Player hit by {:?}: -{} points, {} lives left", cause, penalty, self.lives);
        events.push(GameEvent::PlayerHit {
            cause,
            penalty,
            lives_left: self.lives,
        });
        self.reset(false);
    }

    pub fn reach_goal(&mut self, events: &mut Vec<GameEvent>) {
        self.score += GOAL_POINTS;
        events.push(GameEvent::ReachedGoal {
            points: GOAL_POINTS,
        });
        self.reset(false);
    }

    pub fn collect(&mut self, points: i64) {
        self.score += points;
    }

    /// Eat one food item; returns true when it earned an extra life
    pub fn eat(&mut self, points: i64, events: &mut Vec<GameEvent>) -> bool {
        self.collect(points);
        self.food += 1;
        events.push(GameEvent::FoodEaten { count: self.food });
        if self.food < FOOD_PER_LIFE {
            return false;
        }
        self.food = 0;
        self.lives = self.lives.saturating_add(1);
        events.push(GameEvent::ExtraLife { lives: self.lives });
        true
    }

    /// Grid cell the player is closest to, column kept on the board
    pub fn cell(&self) -> (i32, i32) {
        let (col, row) = self.entity.cell();
        (col.clamp(0, NUM_COLS as i32 - 1), row)
    }

    /// Hop one cell; returns whether the hop happened
    pub fn handle_input(
        &mut self,
        direction: Direction,
        rocks: &[Rock],
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let (col, row) = self.cell();
        let (dc, dr) = direction.delta();
        let (to_col, to_row) = (col + dc, row + dr);
        if !(0..NUM_COLS as i32).contains(&to_col) || !(0..NUM_ROWS as i32).contains(&to_row) {
            return false;
        }
        if rocks.iter().any(|r| r.occupies(to_col, to_row)) {
            log::debug!("Hop into rock at ({}, {}) refused", to_col, to_row);
            return false;
        }
        // A ride can carry the player past the edge between ticks
        self.entity.pos.x = self.entity.pos.x.clamp(0.0, BOARD_WIDTH - COL_WIDTH);
        self.entity.pos.x += dc as f32 * COL_WIDTH;
        self.entity.pos.y += dr as f32 * ROW_HEIGHT;
        events.push(GameEvent::Hop { direction });
        true
    }

    /// Resolve this tick's contacts against the already-moved world
    pub fn update<R: Rng>(
        &mut self,
        world: &mut Surroundings<'_, R>,
        events: &mut Vec<GameEvent>,
    ) -> Option<HitCause> {
        self.riding = false;
        let pos = &mut self.entity.pos;
        pos.x = pos.x.clamp(0.0, BOARD_WIDTH - COL_WIDTH);
        pos.y = pos.y.min(row_to_y(START_ROW));
        if pos.y <= 0.0 {
            self.reach_goal(events);
            return None;
        }

        // Road traffic and predators sitting on land
        let mut land = world
            .vehicles
            .iter()
            .chain(world.predators.iter().filter(|p| !p.is_on_water()).map(|p| &p.hazard));
        if let Some(hazard) = land.find(|h| self.entity.overlaps(&h.entity)) {
            let cause = HitCause::Hazard(hazard.kind);
            self.take_hit(hazard.points, cause, events);
            return Some(cause);
        }

        if world.water.contains(self.entity.row()) {
            match first_overlap(&self.entity, world.floatables.iter().map(|f| &f.entity)) {
                Some(i) => world.floatables[i].ride(self),
                None => {
                    self.take_hit(WATER_PENALTY, HitCause::Water, events);
                    return Some(HitCause::Water);
                }
            }
        }

        let mut carried = world.predators.iter().filter(|p| p.is_on_water());
        if let Some(predator) = carried.find(|p| self.entity.overlaps(p.entity())) {
            let cause = HitCause::Hazard(predator.hazard.kind);
            self.take_hit(predator.hazard.points, cause, events);
            return Some(cause);
        }

        if let Some(i) = first_overlap(&self.entity, world.foods.iter().map(|f| &f.entity)) {
            let food = &mut world.foods[i];
            self.eat(food.points, events);
            food.respawn(world.rng, world.food_fall_speed);
        }
        None
    }
}
