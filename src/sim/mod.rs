//! Board simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Randomness comes only from the session's seeded RNG
//! - Stable iteration order (collections are never reordered)
//! - No rendering or platform dependencies; feedback leaves as `GameEvent`s

pub mod collision;
pub mod entity;
pub mod floatable;
pub mod hazard;
pub mod motion;
pub mod obstacle;
pub mod pickup;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_overlap, overlaps_with_tolerance};
pub use entity::{CollectibleKind, Entity, EntityKind, FloatKind, HazardKind, TILE_SIZE};
pub use floatable::Floatable;
pub use hazard::{Hazard, Perch, Predator};
pub use motion::{Heading, Motion};
pub use obstacle::Rock;
pub use pickup::{Collectible, CollectibleSet, Food};
pub use player::{Direction, HitCause, Player};
pub use state::{GameEvent, GamePhase, SessionState};
pub use tick::tick;
