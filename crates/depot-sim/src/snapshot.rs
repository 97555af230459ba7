//! Read-consistent world snapshots.

use depot_types::{RobotId, RobotState};
use serde::{Deserialize, Serialize};

/// One robot as seen by a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotSummary {
    /// The robot's identifier.
    pub id: RobotId,
    /// Position and carry flag at snapshot time.
    pub state: RobotState,
}

/// A read-consistent copy of the world.
///
/// Taken under the world read lock, so a snapshot never reflects a
/// half-applied transition: every robot listed sits exactly where the
/// grids say, and crate cells agree with carry flags. Robots are
/// sorted by id for stable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Grid dimension (the grid is square).
    pub grid_size: usize,
    /// Crate bitmap, addressed `[y][x]`.
    pub crates: Vec<Vec<bool>>,
    /// All registered robots, sorted by id.
    pub robots: Vec<RobotSummary>,
}

impl WorldSnapshot {
    /// Returns whether the cell held a crate at snapshot time.
    /// Out-of-grid cells read as empty.
    #[must_use]
    pub fn crate_at(&self, x: usize, y: usize) -> bool {
        y < self.crates.len() && x < self.crates[y].len() && self.crates[y][x]
    }
}
