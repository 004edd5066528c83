//! Per-frame simulation step
//!
//! Advances every collection in a fixed order so collision checks always
//! read positions from the same tick.

use super::player::Surroundings;
use super::state::{GameEvent, GamePhase, SessionState};
use crate::consts::*;

/// Advance the session by `dt` seconds (clamped to `[0, MAX_FRAME_DT]`)
pub fn tick(state: &mut SessionState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    state.time += dt as f64;

    // Hazards first so the player collides against this tick's positions
    for vehicle in &mut state.vehicles {
        vehicle.update(dt);
    }
    for floatable in &mut state.floatables {
        floatable.update(dt);
    }
    for predator in &mut state.predators {
        predator.update(dt, &state.floatables);
    }
    let fall_speed = state.tuning.food_fall_speed;
    for food in &mut state.foods {
        food.update(dt, &mut state.rng, fall_speed);
    }

    let mut world = Surroundings {
        vehicles: &state.vehicles,
        floatables: &state.floatables,
        predators: &state.predators,
        foods: &mut state.foods,
        water: state.tuning.lanes.water_rows,
        food_fall_speed: fall_speed,
        rng: &mut state.rng,
    };
    state.player.update(&mut world, &mut state.events);

    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.player.score,
        });
        log::info!("Game over with score {}", state.player.score);
        return;
    }

    state
        .collectibles
        .update(&mut state.player, &mut state.rng, &mut state.events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_to_pos;
    use crate::sim::player::{Direction, HitCause, Player};
    use crate::sim::{Hazard, HazardKind};
    use crate::tuning::Tuning;

    /// A session with only the pieces a test adds itself
    fn quiet_session(seed: u64) -> SessionState {
        let mut state = SessionState::new(seed);
        state.vehicles.clear();
        state.predators.clear();
        state.foods.clear();
        for f in &mut state.floatables {
            f.has_predator = false;
        }
        state.start();
        state
    }

    #[test]
    fn test_menu_does_not_advance() {
        let mut state = SessionState::new(42);
        let before: Vec<f32> = state.vehicles.iter().map(|v| v.entity.pos.x).collect();
        tick(&mut state, 0.05);
        let after: Vec<f32> = state.vehicles.iter().map(|v| v.entity.pos.x).collect();
        assert_eq!(before, after);
        assert_eq!(state.time, 0.0);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = quiet_session(42);
        tick(&mut state, 5.0);
        assert!((state.time - MAX_FRAME_DT as f64).abs() < 1e-9);
        tick(&mut state, -1.0);
        tick(&mut state, f32::NAN);
        assert!((state.time - MAX_FRAME_DT as f64).abs() < 1e-9);
    }

    #[test]
    fn test_collision_uses_moved_hazards() {
        let mut state = quiet_session(42);
        let target = cell_to_pos(2, 4);
        state.player.entity.pos = target;
        // Clear of the player now, deep inside it after this tick's move
        state
            .vehicles
            .push(Hazard::in_lane(HazardKind::Car, 4, target.x - 150.0, 1000.0, 25));

        tick(&mut state, 0.1);
        assert_eq!(state.player.lives, START_LIVES - 1);
        assert_eq!(state.player.score, -25);
        assert!(state.drain_events().iter().any(|e| matches!(
            e,
            GameEvent::PlayerHit {
                cause: HitCause::Hazard(HazardKind::Car),
                ..
            }
        )));
    }

    #[test]
    fn test_game_over_halts_updates() {
        let mut state = quiet_session(9);
        state.player.lives = 1;
        state.player.entity.pos = cell_to_pos(0, 2);
        // Clear the river so the player drowns
        state.floatables.clear();

        tick(&mut state, 0.016);
        assert!(state.is_game_over());
        assert_eq!(state.player.lives, 0);
        let events = state.drain_events();
        assert!(matches!(events.last(), Some(GameEvent::GameOver { score: -25 })));

        let collectibles: Vec<_> = state
            .collectibles
            .items
            .iter()
            .map(|c| c.entity.pos)
            .collect();
        let time = state.time;
        tick(&mut state, 0.016);
        assert_eq!(state.time, time);
        assert!(state.drain_events().is_empty());
        let after: Vec<_> = state
            .collectibles
            .items
            .iter()
            .map(|c| c.entity.pos)
            .collect();
        assert_eq!(collectibles, after);
        assert!(!state.handle_input(Direction::Up));

        state.reset();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.lives, START_LIVES);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.entity.pos, Player::start_position());
    }

    #[test]
    fn test_hop_to_goal() {
        let mut state = quiet_session(5);
        state.rocks.clear();
        state.player.entity.pos = cell_to_pos(1, 1);
        // Stand on a log so the river row is safe
        state.floatables.truncate(1);
        state.floatables[0].entity.pos = cell_to_pos(1, 1);
        state.floatables[0].lane = 1;
        state.floatables[0].motion.speed = 0.0;

        tick(&mut state, 0.016);
        assert!(state.player.riding);
        assert!(state.handle_input(Direction::Up));
        tick(&mut state, 0.016);
        assert_eq!(state.player.score, 100);
        assert_eq!(state.player.entity.pos, Player::start_position());
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = SessionState::with_tuning(99999, tuning.clone()).unwrap();
        let mut b = SessionState::with_tuning(99999, tuning).unwrap();
        a.start();
        b.start();

        let hops = [Direction::Up, Direction::Left, Direction::Up, Direction::Right];
        for i in 0..240 {
            if i % 30 == 0 {
                let hop = hops[(i / 30) % hops.len()];
                a.handle_input(hop);
                b.handle_input(hop);
            }
            tick(&mut a, 1.0 / 60.0);
            tick(&mut b, 1.0 / 60.0);
        }

        assert_eq!(a.player.score, b.player.score);
        assert_eq!(a.player.lives, b.player.lives);
        assert_eq!(a.player.entity.pos, b.player.entity.pos);
        assert_eq!(a.drain_events(), b.drain_events());
        for (va, vb) in a.vehicles.iter().zip(&b.vehicles) {
            assert_eq!(va.entity.pos, vb.entity.pos);
        }
        for (fa, fb) in a.foods.iter().zip(&b.foods) {
            assert_eq!(fa.entity.pos, fb.entity.pos);
        }
    }
}
