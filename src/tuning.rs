//! Data-driven game balance
//!
//! The lane map and per-kind hazard numbers live here so a level can be
//! described in JSON. Everything is validated once at setup; the simulation
//! loop assumes a valid `Tuning`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RowSpan;
use crate::consts::*;
use crate::sim::{CollectibleKind, FloatKind, HazardKind};

/// Inclusive speed range in board pixels per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// How many of one vehicle kind to spawn and how they behave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub kind: HazardKind,
    pub count: u32,
    pub speed: SpeedRange,
    /// Score penalty when it hits the player
    pub points: i64,
}

/// How many of one floatable kind to spawn; speed grows with the row index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatSpec {
    pub kind: FloatKind,
    pub count: u32,
    pub base_speed: f32,
    pub speed_per_row: f32,
}

impl FloatSpec {
    /// Speed for a floatable travelling along `row`
    pub fn speed_for_row(&self, row: u32) -> f32 {
        self.base_speed + self.speed_per_row * row as f32
    }
}

/// Which rows hold which kind of lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneMap {
    pub road_rows: RowSpan,
    pub water_rows: RowSpan,
}

impl Default for LaneMap {
    fn default() -> Self {
        Self {
            road_rows: ROAD_ROWS,
            water_rows: WATER_ROWS,
        }
    }
}

/// Complete balance sheet for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lanes: LaneMap,
    pub vehicles: Vec<VehicleSpec>,
    pub floatables: Vec<FloatSpec>,
    /// Stationary predators on road rows
    pub land_predators: u32,
    /// Predators riding floatables
    pub water_predators: u32,
    pub predator_points: i64,
    /// Rocks on the goal row
    pub rocks: u32,
    pub food_count: u32,
    pub food_points: i64,
    pub food_fall_speed: SpeedRange,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lanes: LaneMap::default(),
            vehicles: vec![
                VehicleSpec {
                    kind: HazardKind::Car,
                    count: 3,
                    speed: SpeedRange::new(100.0, 200.0),
                    points: 25,
                },
                VehicleSpec {
                    kind: HazardKind::Truck,
                    count: 2,
                    speed: SpeedRange::new(60.0, 120.0),
                    points: 50,
                },
                VehicleSpec {
                    kind: HazardKind::Viper,
                    count: 1,
                    speed: SpeedRange::new(250.0, 350.0),
                    points: 40,
                },
                VehicleSpec {
                    kind: HazardKind::Ambulance,
                    count: 1,
                    speed: SpeedRange::new(200.0, 300.0),
                    points: 50,
                },
            ],
            floatables: vec![
                FloatSpec {
                    kind: FloatKind::Log,
                    count: 6,
                    base_speed: 40.0,
                    speed_per_row: 20.0,
                },
                FloatSpec {
                    kind: FloatKind::LilyPad,
                    count: 4,
                    base_speed: 30.0,
                    speed_per_row: 15.0,
                },
            ],
            land_predators: 1,
            water_predators: 1,
            predator_points: 30,
            rocks: 2,
            food_count: 2,
            food_points: 10,
            food_fall_speed: SpeedRange::new(40.0, 120.0),
        }
    }
}

/// Why a tuning sheet cannot produce a playable board
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A lane span reaches outside the hazard rows of the board
    RowOutOfBoard { lane: &'static str, span: RowSpan },
    /// A lane span is empty (last < first)
    EmptyLane { lane: &'static str },
    /// Road and water spans share rows
    OverlappingLanes,
    /// Some water row would have nothing to stand on
    TooFewFloatables { floatables: u32, rows: u32 },
    /// A speed range is inverted or negative
    BadSpeedRange { what: &'static str, range: SpeedRange },
    /// Rocks would wall off the goal row
    TooManyRocks { rocks: u32 },
    /// More water predators than floatables free to carry them
    TooManyWaterPredators { predators: u32, floatables: u32 },
    /// Land predators would leave no room for the collectibles
    TooManyLandPredators { predators: u32, cells: u32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning JSON: {e}"),
            TuningError::RowOutOfBoard { lane, span } => write!(
                f,
                "{lane} rows {}..={} must lie strictly between the goal row and the start row",
                span.first, span.last
            ),
            TuningError::EmptyLane { lane } => write!(f, "{lane} row span is empty"),
            TuningError::OverlappingLanes => write!(f, "road and water rows overlap"),
            TuningError::TooFewFloatables { floatables, rows } => write!(
                f,
                "{floatables} floatables cannot cover {rows} water rows, the goal is unreachable"
            ),
            TuningError::BadSpeedRange { what, range } => {
                write!(f, "{what} speed range {}..={} is invalid", range.min, range.max)
            }
            TuningError::TooManyRocks { rocks } => write!(
                f,
                "{rocks} rocks leave no open goal cell on a {NUM_COLS}-column board"
            ),
            TuningError::TooManyWaterPredators {
                predators,
                floatables,
            } => write!(
                f,
                "{predators} water predators but only {floatables} floatables free to carry one"
            ),
            TuningError::TooManyLandPredators { predators, cells } => write!(
                f,
                "{predators} land predators leave too few of {cells} road cells for the collectibles"
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a tuning sheet
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of floatables across all kinds
    pub fn floatable_count(&self) -> u32 {
        self.floatables.iter().map(|f| f.count).sum()
    }

    /// Check the sheet describes a reachable board
    pub fn validate(&self) -> Result<(), TuningError> {
        let lanes = [
            ("road", self.lanes.road_rows),
            ("water", self.lanes.water_rows),
        ];
        for (lane, span) in lanes {
            if span.is_empty() {
                return Err(TuningError::EmptyLane { lane });
            }
            if span.first <= GOAL_ROW || span.last >= START_ROW {
                return Err(TuningError::RowOutOfBoard { lane, span });
            }
        }
        if self.lanes.road_rows.overlaps(&self.lanes.water_rows) {
            return Err(TuningError::OverlappingLanes);
        }
        let floatables = self.floatable_count();
        let water_rows = self.lanes.water_rows.len();
        if floatables < water_rows {
            return Err(TuningError::TooFewFloatables {
                floatables,
                rows: water_rows,
            });
        }

        for spec in &self.vehicles {
            check_speed(spec.kind.name(), spec.speed)?;
        }
        for spec in &self.floatables {
            let speeds = SpeedRange::new(
                spec.speed_for_row(self.lanes.water_rows.first),
                spec.speed_for_row(self.lanes.water_rows.last),
            );
            if speeds.min < 0.0 || speeds.max < 0.0 {
                return Err(TuningError::BadSpeedRange {
                    what: spec.kind.name(),
                    range: speeds,
                });
            }
        }
        check_speed("food", self.food_fall_speed)?;
        // A falling food item must eventually leave the board
        if self.food_count > 0 && self.food_fall_speed.min <= 0.0 {
            return Err(TuningError::BadSpeedRange {
                what: "food",
                range: self.food_fall_speed,
            });
        }

        if self.rocks >= NUM_COLS {
            return Err(TuningError::TooManyRocks { rocks: self.rocks });
        }
        // One floatable per water row never carries a predator
        let spare = floatables - water_rows;
        if self.water_predators > spare {
            return Err(TuningError::TooManyWaterPredators {
                predators: self.water_predators,
                floatables: spare,
            });
        }
        let cells = NUM_COLS * self.lanes.road_rows.len();
        if self.land_predators as usize + CollectibleKind::ALL.len() > cells as usize {
            return Err(TuningError::TooManyLandPredators {
                predators: self.land_predators,
                cells,
            });
        }
        Ok(())
    }
}

fn check_speed(what: &'static str, range: SpeedRange) -> Result<(), TuningError> {
    let finite = range.min.is_finite() && range.max.is_finite();
    if !finite || range.min < 0.0 || range.max < range.min {
        return Err(TuningError::BadSpeedRange { what, range });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        let parsed = Tuning::from_json(&json).unwrap();
        assert_eq!(parsed, tuning);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "rocks": 3, "food_count": 0 }"#).unwrap();
        assert_eq!(tuning.rocks, 3);
        assert_eq!(tuning.food_count, 0);
        assert_eq!(tuning.vehicles, Tuning::default().vehicles);
    }

    #[test]
    fn test_bad_json() {
        let err = Tuning::from_json("{ rocks: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_overlapping_lanes_rejected() {
        let mut tuning = Tuning::default();
        tuning.lanes.road_rows = RowSpan::new(3, 5);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OverlappingLanes)
        ));
    }

    #[test]
    fn test_lane_on_goal_or_start_row_rejected() {
        let mut tuning = Tuning::default();
        tuning.lanes.water_rows = RowSpan::new(0, 2);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::RowOutOfBoard { lane: "water", .. })
        ));

        let mut tuning = Tuning::default();
        tuning.lanes.road_rows = RowSpan::new(4, START_ROW);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::RowOutOfBoard { lane: "road", .. })
        ));
    }

    #[test]
    fn test_unreachable_river_rejected() {
        let mut tuning = Tuning::default();
        tuning.floatables.clear();
        tuning.water_predators = 0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::TooFewFloatables {
                floatables: 0,
                rows: 3
            })
        ));

        // Two platforms cannot cover three water rows
        tuning.floatables = vec![FloatSpec {
            kind: FloatKind::Log,
            count: 2,
            base_speed: 40.0,
            speed_per_row: 20.0,
        }];
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::TooFewFloatables { floatables: 2, .. })
        ));
    }

    #[test]
    fn test_bad_speed_rejected() {
        let mut tuning = Tuning::default();
        tuning.vehicles[0].speed = SpeedRange::new(200.0, 100.0);
        let err = tuning.validate().unwrap_err();
        assert!(matches!(err, TuningError::BadSpeedRange { what: "car", .. }));
        assert!(err.to_string().contains("car"));
    }

    #[test]
    fn test_rock_and_predator_limits() {
        let mut tuning = Tuning::default();
        tuning.rocks = NUM_COLS;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::TooManyRocks { .. })
        ));

        // Every water row keeps one predator-free floatable
        let mut tuning = Tuning::default();
        let spare = tuning.floatable_count() - WATER_ROWS.len();
        tuning.water_predators = spare;
        assert!(tuning.validate().is_ok());
        tuning.water_predators = spare + 1;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::TooManyWaterPredators { floatables, .. }) if floatables == spare
        ));

        let mut tuning = Tuning::default();
        let cells = NUM_COLS * ROAD_ROWS.len();
        tuning.land_predators = cells - CollectibleKind::ALL.len() as u32;
        assert!(tuning.validate().is_ok());
        tuning.land_predators += 1;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::TooManyLandPredators { .. })
        ));
    }

    #[test]
    fn test_speed_for_row() {
        let spec = FloatSpec {
            kind: FloatKind::Log,
            count: 1,
            base_speed: 40.0,
            speed_per_row: 20.0,
        };
        assert_eq!(spec.speed_for_row(1), 60.0);
        assert_eq!(spec.speed_for_row(3), 100.0);
    }
}
