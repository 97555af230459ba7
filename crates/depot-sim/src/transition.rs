//! The robot state machine: one command, one atomic transition.
//!
//! Movement commands resolve their target cell and delegate to
//! [`World::move_robot`]; the crate commands delegate to
//! [`World::pickup_crate`] / [`World::drop_crate`]. A transition
//! either commits whole or rejects whole: a diagonal move whose
//! single-axis target is out of bounds or occupied performs no partial
//! step.

use crate::command::Command;
use crate::world::World;
use depot_types::{RobotId, RobotState, SimError};

impl World {
    /// Executes one command for the given robot.
    ///
    /// Callers hold the world write lock for the duration of the call,
    /// which is what makes the transition atomic with respect to every
    /// other robot.
    ///
    /// # Errors
    ///
    /// Whatever the underlying transition surfaces (bounds, collision,
    /// crate preconditions, warehouse kind), plus
    /// [`SimError::UnknownCommand`] for characters outside the
    /// alphabet. On error the robot, grid, and crate map are unchanged.
    pub fn execute(&mut self, id: &RobotId, command: Command) -> Result<RobotState, SimError> {
        let (dx, dy): (isize, isize) = match command {
            Command::North => (0, 1),
            Command::South => (0, -1),
            Command::East => (1, 0),
            Command::West => (-1, 0),
            Command::NorthEast => (1, 1),
            Command::NorthWest => (-1, 1),
            Command::SouthEast => (1, -1),
            Command::SouthWest => (-1, -1),
            Command::Grab => return self.pickup_crate(id),
            Command::Drop => return self.drop_crate(id),
            Command::Unknown(c) => return Err(SimError::UnknownCommand(c)),
        };

        let state = self.robot_state(id)?;
        let target_x = state.x as isize + dx;
        let target_y = state.y as isize + dy;
        if target_x < 0 || target_y < 0 {
            return Err(SimError::OutOfBounds);
        }
        self.move_robot(id, target_x as usize, target_y as usize)
    }
}
