//! Axis-aligned collision tests
//!
//! Sprites carry transparent padding, so the player's box is inset by a
//! tolerance before it is compared. Exact pixel rectangles feel unfair.

use glam::Vec2;

use super::entity::Entity;

/// Axis-aligned rectangle in board coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Plain overlap (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        overlaps_with_tolerance(self, other, Vec2::ZERO)
    }
}

/// Overlap test with `probe` inset by `tol` on every side
///
/// `probe.x + tol.x < other.right && probe.right - tol.x > other.x`, and the
/// same on y.
#[inline]
pub fn overlaps_with_tolerance(probe: &Rect, other: &Rect, tol: Vec2) -> bool {
    let p_max = probe.max();
    let o_max = other.max();
    probe.min.x + tol.x < o_max.x
        && p_max.x - tol.x > other.min.x
        && probe.min.y + tol.y < o_max.y
        && p_max.y - tol.y > other.min.y
}

/// Index of the first entity the probe overlaps (short-circuits)
pub fn first_overlap<'a, I>(probe: &Entity, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Entity>,
{
    candidates.into_iter().position(|e| probe.overlaps(e))
}
