//! Session state: every collection, the seeded RNG and the event queue

use rand::SeedableRng;
use rand::seq::{SliceRandom, index};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::CollectibleKind;
use super::floatable::Floatable;
use super::hazard::{Hazard, Predator};
use super::obstacle::Rock;
use super::pickup::{CollectibleSet, Food};
use super::player::{Direction, HitCause, Player};
use crate::tuning::{FloatSpec, Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start menu / character selection, nothing moves
    Menu,
    /// Active gameplay
    Playing,
    /// Out of lives, waiting for an external reset
    GameOver,
}

/// Something that happened during a tick, for audio and message feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Hop { direction: Direction },
    PlayerHit {
        cause: HitCause,
        penalty: i64,
        lives_left: u8,
    },
    ReachedGoal { points: i64 },
    Collected { kind: CollectibleKind, points: i64 },
    FoodEaten { count: u32 },
    ExtraLife { lives: u8 },
    GameOver { score: i64 },
    /// Session restarted after game over (or via start over)
    Reset,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub vehicles: Vec<Hazard>,
    pub floatables: Vec<Floatable>,
    /// Land predators and predators carried by floatables
    pub predators: Vec<Predator>,
    pub rocks: Vec<Rock>,
    pub collectibles: CollectibleSet,
    pub foods: Vec<Food>,
    pub player: Player,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Simulated seconds while playing
    pub time: f64,
}

impl SessionState {
    /// New session with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// New session with custom tuning, validated first
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let road = tuning.lanes.road_rows;
        let water = tuning.lanes.water_rows;

        let vehicles: Vec<Hazard> = tuning
            .vehicles
            .iter()
            .flat_map(|spec| (0..spec.count).map(move |_| spec))
            .map(|spec| Hazard::vehicle(&mut rng, spec, road))
            .collect();

        // The first floatable dealt to each water row never carries a predator
        let mut specs: Vec<&FloatSpec> = tuning
            .floatables
            .iter()
            .flat_map(|spec| (0..spec.count).map(move |_| spec))
            .collect();
        specs.shuffle(&mut rng);
        let anchors = (water.len() as usize).min(specs.len());
        let mut floatables: Vec<Floatable> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| match water.rows().nth(i) {
                Some(row) => Floatable::for_row(spec, row),
                None => Floatable::new(&mut rng, spec, water),
            })
            .collect();

        let mut predators: Vec<Predator> = (0..tuning.land_predators)
            .map(|_| Predator::on_land(&mut rng, road, tuning.predator_points))
            .collect();
        let spare = floatables.len() - anchors;
        let riders = (tuning.water_predators as usize).min(spare);
        let mut carriers = index::sample(&mut rng, spare, riders).into_vec();
        carriers.sort_unstable();
        for i in carriers.into_iter().map(|i| i + anchors) {
            predators.extend(Predator::board(i, &mut floatables[i], tuning.predator_points));
        }

        let rocks = Rock::scatter(&mut rng, tuning.rocks);
        let blocked = predators
            .iter()
            .filter(|p| !p.is_on_water())
            .map(|p| p.entity().cell())
            .collect();
        let collectibles = CollectibleSet::new(&mut rng, road, blocked);
        let foods = (0..tuning.food_count)
            .map(|_| Food::new(&mut rng, tuning.food_fall_speed, tuning.food_points))
            .collect();

        log::info!(
            "Session built with seed {}: {} vehicles, {} floatables, {} predators, {} rocks",
            seed,
            vehicles.len(),
            floatables.len(),
            predators.len(),
            rocks.len()
        );

        Self {
            seed,
            tuning,
            rng,
            phase: GamePhase::Menu,
            vehicles,
            floatables,
            predators,
            rocks,
            collectibles,
            foods,
            player: Player::new(0),
            events: Vec::new(),
            time: 0.0,
        }
    }

    /// Leave the menu and start playing
    pub fn start(&mut self) {
        if self.phase == GamePhase::Menu {
            log::info!("Game started with character {}", self.player.character);
            self.phase = GamePhase::Playing;
        }
    }

    /// Restart after game over (or mid-game via start over)
    pub fn reset(&mut self) {
        self.player.reset(true);
        self.collectibles.reset(&mut self.rng);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Reset);
        log::info!("Session reset");
    }

    /// Character choice only applies from the menu
    pub fn select_character(&mut self, character: u8) {
        if self.phase == GamePhase::Menu {
            self.player.select_character(character);
        }
    }

    /// Route a hop to the player while playing
    pub fn handle_input(&mut self, direction: Direction) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.player
            .handle_input(direction, &self.rocks, &mut self.events)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RowSpan;
    use crate::consts::*;
    use crate::sim::hazard::Perch;
    use crate::tuning::LaneMap;

    #[test]
    fn test_default_session_population() {
        let state = SessionState::new(12345);
        let tuning = Tuning::default();
        let vehicles: u32 = tuning.vehicles.iter().map(|v| v.count).sum();
        assert_eq!(state.vehicles.len(), vehicles as usize);
        assert_eq!(state.floatables.len(), tuning.floatable_count() as usize);
        assert_eq!(
            state.predators.len(),
            (tuning.land_predators + tuning.water_predators) as usize
        );
        assert_eq!(state.rocks.len(), tuning.rocks as usize);
        assert_eq!(state.foods.len(), tuning.food_count as usize);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.player.lives, START_LIVES);
    }

    #[test]
    fn test_lane_membership() {
        let state = SessionState::new(7);
        for v in &state.vehicles {
            assert!(ROAD_ROWS.contains(v.lane as i32));
            assert_eq!(v.motion.heading.index(), v.lane % 2);
        }
        for f in &state.floatables {
            assert!(WATER_ROWS.contains(f.lane as i32));
            assert_eq!(f.motion.heading.index(), f.lane % 2);
        }
    }

    #[test]
    fn test_at_most_one_predator_per_floatable() {
        let tuning = Tuning {
            water_predators: 6,
            ..Tuning::default()
        };
        let state = SessionState::with_tuning(3, tuning).unwrap();
        let mut carried: Vec<usize> = state
            .predators
            .iter()
            .filter_map(|p| match p.perch {
                Perch::Floatable(i) => Some(i),
                Perch::Land => None,
            })
            .collect();
        assert_eq!(carried.len(), 6);
        carried.sort_unstable();
        carried.dedup();
        assert_eq!(carried.len(), 6);
        let flagged = state.floatables.iter().filter(|f| f.has_predator).count();
        assert_eq!(flagged, 6);
    }

    fn has_safe_platform(state: &SessionState, row: u32) -> bool {
        state
            .floatables
            .iter()
            .any(|f| f.lane == row && !f.has_predator)
    }

    #[test]
    fn test_every_water_row_has_safe_platform() {
        for seed in 0..500 {
            let state = SessionState::new(seed);
            for row in WATER_ROWS.rows() {
                assert!(has_safe_platform(&state, row), "seed {seed} row {row}");
            }
        }

        // Four logs over three rows: the only spare one carries the predator
        let mut tuning = Tuning::default();
        tuning.floatables.truncate(1);
        tuning.floatables[0].count = 4;
        tuning.water_predators = 1;
        for seed in 0..200 {
            let state = SessionState::with_tuning(seed, tuning.clone()).unwrap();
            assert_eq!(state.predators.iter().filter(|p| p.is_on_water()).count(), 1);
            for row in WATER_ROWS.rows() {
                assert!(has_safe_platform(&state, row), "seed {seed} row {row}");
            }
        }
    }

    #[test]
    fn test_collectibles_avoid_land_predators() {
        let crowded = Tuning {
            land_predators: 12,
            ..Tuning::default()
        };
        for seed in 0..300 {
            let mut state = SessionState::with_tuning(seed, crowded.clone()).unwrap();
            for _ in 0..3 {
                let lairs: Vec<(i32, i32)> = state
                    .predators
                    .iter()
                    .filter(|p| !p.is_on_water())
                    .map(|p| p.entity().cell())
                    .collect();
                for item in &state.collectibles.items {
                    assert!(
                        !lairs.contains(&item.entity.cell()),
                        "seed {seed}: {:?} on a predator",
                        item.kind
                    );
                }
                state.reset();
            }
        }
    }

    #[test]
    fn test_with_tuning_rejects_broken_map() {
        let tuning = Tuning {
            lanes: LaneMap {
                road_rows: RowSpan::new(3, 6),
                water_rows: WATER_ROWS,
            },
            ..Tuning::default()
        };
        assert!(matches!(
            SessionState::with_tuning(1, tuning),
            Err(TuningError::OverlappingLanes)
        ));
    }

    #[test]
    fn test_input_ignored_outside_play() {
        let mut state = SessionState::new(1);
        assert!(!state.handle_input(Direction::Up));
        assert_eq!(state.player.entity.pos, Player::start_position());

        state.start();
        assert!(state.handle_input(Direction::Up));
        assert_eq!(state.drain_events().len(), 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_character_locked_after_start() {
        let mut state = SessionState::new(1);
        state.select_character(3);
        assert_eq!(state.player.character, 3);
        state.start();
        state.select_character(1);
        assert_eq!(state.player.character, 3);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = SessionState::new(1);
        state.start();
        state.player.lives = 0;
        state.player.score = -40;
        state.phase = GamePhase::GameOver;

        state.reset();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.lives, START_LIVES);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.collectibles.num_collected, 0);
        assert_eq!(state.drain_events(), vec![GameEvent::Reset]);
    }
}
