//! Linear lane motion shared by vehicles, floatables and carried predators
//!
//! Lanes alternate direction by row parity: even rows travel left to right,
//! odd rows right to left. Entities that leave the board wrap to the
//! opposite edge instead of being destroyed, so a lane is an endless
//! conveyor with no allocation at runtime.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::RowSpan;
use crate::consts::*;

/// Travel direction along a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Direction 0
    LeftToRight,
    /// Direction 1
    RightToLeft,
}

impl Heading {
    /// Traffic pattern: even rows move right, odd rows move left
    pub fn for_row(row: u32) -> Self {
        if row % 2 == 0 {
            Heading::LeftToRight
        } else {
            Heading::RightToLeft
        }
    }

    /// Numeric direction (0 = left to right, 1 = right to left)
    pub fn index(&self) -> u32 {
        match self {
            Heading::LeftToRight => 0,
            Heading::RightToLeft => 1,
        }
    }

    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Heading::LeftToRight => 1.0,
            Heading::RightToLeft => -1.0,
        }
    }

    /// Edge-aligned x where an entity enters its lane
    pub fn spawn_x(&self) -> f32 {
        match self {
            Heading::LeftToRight => -COL_WIDTH,
            Heading::RightToLeft => BOARD_WIDTH,
        }
    }
}

/// Speed and heading of a lane entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub heading: Heading,
    /// Unsigned speed in board pixels per second
    pub speed: f32,
}

impl Motion {
    pub fn new(heading: Heading, speed: f32) -> Self {
        Self { heading, speed }
    }

    pub fn stationary() -> Self {
        Self::new(Heading::LeftToRight, 0.0)
    }

    /// Move `x` by one step and wrap it if it left the board
    #[inline]
    pub fn advance(&self, x: f32, dt: f32) -> f32 {
        wrap_x(x + self.heading.sign() * self.speed * dt, self.heading)
    }
}

/// Wrap an off-board x to the opposite edge (never clamps)
#[inline]
pub fn wrap_x(x: f32, heading: Heading) -> f32 {
    match heading {
        Heading::LeftToRight if x > BOARD_WIDTH => -COL_WIDTH,
        Heading::RightToLeft if x < -COL_WIDTH => BOARD_WIDTH,
        _ => x,
    }
}

/// Pick a lane uniformly from a row span
pub fn random_lane<R: Rng>(rng: &mut R, span: RowSpan) -> u32 {
    rng.random_range(span.first..=span.last)
}

/// Pick a speed uniformly from an inclusive range
pub fn random_speed<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    }
}
