//! River platforms the player can ride

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, FloatKind};
use super::motion::{Heading, Motion, random_lane};
use super::player::Player;
use crate::tuning::FloatSpec;
use crate::{RowSpan, row_to_y};

/// A log or lily pad drifting along a water lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floatable {
    pub entity: Entity,
    pub kind: FloatKind,
    pub motion: Motion,
    pub lane: u32,
    /// At most one predator rides a floatable
    pub has_predator: bool,
}

impl Floatable {
    /// Spawn at the entry edge of a random water lane; speed comes from the row
    pub fn new<R: Rng>(rng: &mut R, spec: &FloatSpec, water: RowSpan) -> Self {
        Self::for_row(spec, random_lane(rng, water))
    }

    /// Spawn at the entry edge of a given water lane
    pub fn for_row(spec: &FloatSpec, lane: u32) -> Self {
        let heading = Heading::for_row(lane);
        Self::in_lane(spec.kind, lane, heading.spawn_x(), spec.speed_for_row(lane))
    }

    pub fn in_lane(kind: FloatKind, lane: u32, x: f32, speed: f32) -> Self {
        Self {
            entity: Entity::new(
                EntityKind::Floatable(kind),
                Vec2::new(x, row_to_y(lane)),
            ),
            kind,
            motion: Motion::new(Heading::for_row(lane), speed),
            lane,
            has_predator: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.entity.pos.x = self.motion.advance(self.entity.pos.x, dt);
    }

    /// Carry the player for this tick: pin its x to ours
    pub fn ride(&self, player: &mut Player) {
        player.entity.pos.x = self.entity.pos.x;
        player.riding = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_speed_derived_from_row() {
        let spec = FloatSpec {
            kind: FloatKind::LilyPad,
            count: 1,
            base_speed: 30.0,
            speed_per_row: 15.0,
        };
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            let pad = Floatable::new(&mut rng, &spec, WATER_ROWS);
            assert!(WATER_ROWS.contains(pad.lane as i32));
            assert_eq!(pad.motion.speed, spec.speed_for_row(pad.lane));
            assert_eq!(pad.motion.heading.index(), pad.lane % 2);
            assert_eq!(pad.entity.pos.x, pad.motion.heading.spawn_x());
            assert!(!pad.has_predator);
        }
    }

    #[test]
    fn test_ride_pins_player_x() {
        let log = Floatable::in_lane(FloatKind::Log, 2, 337.25, 60.0);
        let mut player = Player::new(0);
        player.entity.pos = Vec2::new(350.0, row_to_y(2));

        log.ride(&mut player);
        assert_eq!(player.entity.pos.x, 337.25);
        assert_eq!(player.entity.pos.y, row_to_y(2));
        assert!(player.riding);
    }
}
