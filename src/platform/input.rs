//! Keyboard mapping

use crate::sim::Direction;

impl Direction {
    /// Legacy `keyCode` values for the arrow keys
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Direction::Left),
            38 => Some(Direction::Up),
            39 => Some(Direction::Right),
            40 => Some(Direction::Down),
            _ => None,
        }
    }

    /// `KeyboardEvent.key` names (older browsers drop the `Arrow` prefix)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Direction::Left),
            "ArrowUp" | "Up" => Some(Direction::Up),
            "ArrowRight" | "Right" => Some(Direction::Right),
            "ArrowDown" | "Down" => Some(Direction::Down),
            _ => None,
        }
    }
}
