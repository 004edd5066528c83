//! Vehicles and predators
//!
//! A hazard is created once at setup in a random lane and then cycles its
//! lane forever. Predators either sit still on the road or ride a floatable,
//! in which case they follow the carrier exactly.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, HazardKind};
use super::floatable::Floatable;
use super::motion::{Heading, Motion, random_lane, random_speed};
use crate::consts::*;
use crate::tuning::VehicleSpec;
use crate::{RowSpan, cell_to_pos, row_to_y};

/// A moving (or parked) thing that costs the player a life on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub entity: Entity,
    pub kind: HazardKind,
    pub motion: Motion,
    /// Score penalty on collision with the player
    pub points: i64,
    pub lane: u32,
}

impl Hazard {
    /// Spawn a vehicle at the entry edge of a random road lane
    pub fn vehicle<R: Rng>(rng: &mut R, spec: &VehicleSpec, road: RowSpan) -> Self {
        let lane = random_lane(rng, road);
        let heading = Heading::for_row(lane);
        let speed = random_speed(rng, spec.speed.min, spec.speed.max);
        Self::in_lane(spec.kind, lane, heading.spawn_x(), speed, spec.points)
    }

    /// A hazard at a known position (lane heading still follows row parity)
    pub fn in_lane(kind: HazardKind, lane: u32, x: f32, speed: f32, points: i64) -> Self {
        Self {
            entity: Entity::new(
                EntityKind::Hazard(kind),
                Vec2::new(x, row_to_y(lane)),
            ),
            kind,
            motion: Motion::new(Heading::for_row(lane), speed),
            points,
            lane,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.entity.pos.x = self.motion.advance(self.entity.pos.x, dt);
    }
}

/// Where a predator lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Perch {
    /// Parked on a road cell
    Land,
    /// Carried by the floatable at this index
    Floatable(usize),
}

/// Predator hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Predator {
    pub hazard: Hazard,
    pub perch: Perch,
}

impl Predator {
    /// A stationary predator on a random road cell
    pub fn on_land<R: Rng>(rng: &mut R, road: RowSpan, points: i64) -> Self {
        let lane = random_lane(rng, road);
        let col = rng.random_range(0..NUM_COLS);
        let mut hazard = Hazard::in_lane(HazardKind::Predator, lane, 0.0, 0.0, points);
        hazard.entity.pos = cell_to_pos(col, lane);
        hazard.motion = Motion::stationary();
        Self {
            hazard,
            perch: Perch::Land,
        }
    }

    /// Put a predator on a floatable; `None` if it already carries one
    pub fn board(index: usize, carrier: &mut Floatable, points: i64) -> Option<Self> {
        if carrier.has_predator {
            return None;
        }
        carrier.has_predator = true;
        let hazard = Hazard::in_lane(
            HazardKind::Predator,
            carrier.lane,
            carrier.entity.pos.x,
            carrier.motion.speed,
            points,
        );
        Some(Self {
            hazard,
            perch: Perch::Floatable(index),
        })
    }

    pub fn is_on_water(&self) -> bool {
        matches!(self.perch, Perch::Floatable(_))
    }

    pub fn entity(&self) -> &Entity {
        &self.hazard.entity
    }

    /// Follow the carrier if riding, otherwise move on its own
    pub fn update(&mut self, dt: f32, floatables: &[Floatable]) {
        match self.perch {
            Perch::Land => self.hazard.update(dt),
            Perch::Floatable(index) => {
                // Floatables are never removed, so the index stays valid
                if let Some(carrier) = floatables.get(index) {
                    self.hazard.motion = carrier.motion;
                    self.hazard.lane = carrier.lane;
                    self.hazard.entity.pos = carrier.entity.pos;
                } else {
                    self.hazard.update(dt);
                }
            }
        }
    }
}
