//! Robot state value type.

use serde::{Deserialize, Serialize};

/// Observable state of a warehouse robot.
///
/// `RobotState` is a plain value: the executor publishes a copy after
/// every command, and `current_state()` returns a copy taken under the
/// world lock. Coordinates use the south-west corner as the origin;
/// `+y` is north and `+x` is east.
///
/// # Example
///
/// ```
/// use depot_types::RobotState;
///
/// let state = RobotState::at(3, 2);
/// assert_eq!((state.x, state.y), (3, 2));
/// assert!(!state.has_crate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotState {
    /// X coordinate (east-west), `0..GRID_SIZE`.
    pub x: usize,
    /// Y coordinate (north-south), `0..GRID_SIZE`.
    pub y: usize,
    /// Whether the robot is currently carrying a crate.
    pub has_crate: bool,
}

impl RobotState {
    /// Creates a state at the given cell, not carrying a crate.
    #[must_use]
    pub fn at(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            has_crate: false,
        }
    }
}
