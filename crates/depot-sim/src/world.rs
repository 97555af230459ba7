//! World - the warehouse state store.
//!
//! [`World`] owns the occupancy grid, the crate grid, and the robot
//! registry, and provides the atomic transitions every other component
//! builds on: admit, move, pickup, drop, add/remove crate, snapshot.
//!
//! # Thread Safety
//!
//! `World` is not thread-safe by itself. The engine wraps it in
//! `Arc<RwLock<World>>`: mutating transitions run under the write
//! side, snapshots and enumeration under the read side. Because robot
//! state is stored in the registry and only mutated here, a position
//! update and its grid update always land in the same critical
//! section; observers can never see them disagree.

use crate::config::GRID_SIZE;
use crate::registry::{RobotRecord, RobotRegistry};
use crate::snapshot::{RobotSummary, WorldSnapshot};
use depot_types::{RobotId, RobotState, SimError};
use std::array;
use tracing::debug;

/// Whether a warehouse accepts crate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseKind {
    /// Robots only; every crate operation fails with
    /// [`SimError::InvalidWarehouseType`].
    Plain,
    /// Robots and crates.
    Crates,
}

/// The warehouse state store.
///
/// Cell addressing is `[y][x]` with the origin at the south-west
/// corner. A cell may hold a robot and a crate at the same time; the
/// two grids are independent.
#[derive(Debug)]
pub struct World {
    kind: WarehouseKind,
    /// Id of the robot occupying each cell, if any.
    occupancy: [[Option<RobotId>; GRID_SIZE]; GRID_SIZE],
    /// Whether each cell holds a crate.
    crates: [[bool; GRID_SIZE]; GRID_SIZE],
    registry: RobotRegistry,
}

impl World {
    /// Creates an empty world of the given kind.
    #[must_use]
    pub fn new(kind: WarehouseKind) -> Self {
        Self {
            kind,
            occupancy: array::from_fn(|_| array::from_fn(|_| None)),
            crates: [[false; GRID_SIZE]; GRID_SIZE],
            registry: RobotRegistry::new(),
        }
    }

    /// Returns the warehouse kind.
    #[must_use]
    pub fn kind(&self) -> WarehouseKind {
        self.kind
    }

    fn in_bounds(x: usize, y: usize) -> bool {
        x < GRID_SIZE && y < GRID_SIZE
    }

    /// Registers a robot and occupies its cell, atomically.
    ///
    /// # Errors
    ///
    /// - [`SimError::OutOfBounds`] if the cell is outside the grid
    /// - [`SimError::PositionOccupied`] if another robot holds the cell
    /// - [`SimError::DuplicateId`] if the id is already registered
    pub(crate) fn admit(&mut self, record: RobotRecord) -> Result<(), SimError> {
        let RobotState { x, y, .. } = record.state;
        if !Self::in_bounds(x, y) {
            return Err(SimError::OutOfBounds);
        }
        if self.occupancy[y][x].is_some() {
            return Err(SimError::PositionOccupied);
        }
        if self.registry.contains(&record.id) {
            return Err(SimError::DuplicateId(record.id.clone()));
        }

        self.occupancy[y][x] = Some(record.id.clone());
        self.registry.insert(record);
        Ok(())
    }

    /// Moves a robot to the given cell.
    ///
    /// The old cell is vacated, the new cell occupied, and the robot's
    /// state updated in one critical section; on any error nothing
    /// changes. A cell counts as occupied only when it holds a robot
    /// other than the mover.
    ///
    /// # Errors
    ///
    /// [`SimError::RobotNotFound`], [`SimError::OutOfBounds`], or
    /// [`SimError::PositionOccupied`].
    pub fn move_robot(
        &mut self,
        id: &RobotId,
        new_x: usize,
        new_y: usize,
    ) -> Result<RobotState, SimError> {
        if !Self::in_bounds(new_x, new_y) {
            return Err(SimError::OutOfBounds);
        }
        if self.occupancy[new_y][new_x]
            .as_ref()
            .is_some_and(|occupant| occupant != id)
        {
            return Err(SimError::PositionOccupied);
        }
        let record = self
            .registry
            .get_mut(id)
            .ok_or_else(|| SimError::RobotNotFound(id.clone()))?;

        let old = record.state;
        record.state.x = new_x;
        record.state.y = new_y;
        let state = record.state;
        self.occupancy[old.y][old.x] = None;
        self.occupancy[new_y][new_x] = Some(id.clone());
        debug!("robot {} moved to ({}, {})", id, new_x, new_y);
        Ok(state)
    }

    /// Picks up the crate at the robot's current cell.
    ///
    /// Clears the cell's crate and sets the robot's carry flag in one
    /// critical section.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidWarehouseType`], [`SimError::RobotNotFound`],
    /// [`SimError::RobotHasCrate`], or [`SimError::CrateNotFound`].
    pub fn pickup_crate(&mut self, id: &RobotId) -> Result<RobotState, SimError> {
        if self.kind != WarehouseKind::Crates {
            return Err(SimError::InvalidWarehouseType);
        }
        let record = self
            .registry
            .get_mut(id)
            .ok_or_else(|| SimError::RobotNotFound(id.clone()))?;
        if record.state.has_crate {
            return Err(SimError::RobotHasCrate);
        }
        let RobotState { x, y, .. } = record.state;
        if !self.crates[y][x] {
            return Err(SimError::CrateNotFound);
        }

        record.state.has_crate = true;
        let state = record.state;
        self.crates[y][x] = false;
        debug!("robot {} grabbed crate at ({}, {})", id, x, y);
        Ok(state)
    }

    /// Drops the carried crate at the robot's current cell.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidWarehouseType`], [`SimError::RobotNotFound`],
    /// [`SimError::RobotNotCarrying`], or [`SimError::CrateExists`].
    pub fn drop_crate(&mut self, id: &RobotId) -> Result<RobotState, SimError> {
        if self.kind != WarehouseKind::Crates {
            return Err(SimError::InvalidWarehouseType);
        }
        let record = self
            .registry
            .get_mut(id)
            .ok_or_else(|| SimError::RobotNotFound(id.clone()))?;
        if !record.state.has_crate {
            return Err(SimError::RobotNotCarrying);
        }
        let RobotState { x, y, .. } = record.state;
        if self.crates[y][x] {
            return Err(SimError::CrateExists);
        }

        record.state.has_crate = false;
        let state = record.state;
        self.crates[y][x] = true;
        debug!("robot {} dropped crate at ({}, {})", id, x, y);
        Ok(state)
    }

    /// Places a crate at the given cell.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidWarehouseType`], [`SimError::OutOfBounds`],
    /// or [`SimError::CrateExists`].
    pub fn add_crate(&mut self, x: usize, y: usize) -> Result<(), SimError> {
        if self.kind != WarehouseKind::Crates {
            return Err(SimError::InvalidWarehouseType);
        }
        if !Self::in_bounds(x, y) {
            return Err(SimError::OutOfBounds);
        }
        if self.crates[y][x] {
            return Err(SimError::CrateExists);
        }
        self.crates[y][x] = true;
        debug!("crate added at ({}, {})", x, y);
        Ok(())
    }

    /// Removes the crate at the given cell.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidWarehouseType`], [`SimError::OutOfBounds`],
    /// or [`SimError::CrateNotFound`].
    pub fn remove_crate(&mut self, x: usize, y: usize) -> Result<(), SimError> {
        if self.kind != WarehouseKind::Crates {
            return Err(SimError::InvalidWarehouseType);
        }
        if !Self::in_bounds(x, y) {
            return Err(SimError::OutOfBounds);
        }
        if !self.crates[y][x] {
            return Err(SimError::CrateNotFound);
        }
        self.crates[y][x] = false;
        debug!("crate removed from ({}, {})", x, y);
        Ok(())
    }

    /// Returns the state of the robot with the given id.
    ///
    /// # Errors
    ///
    /// [`SimError::RobotNotFound`] for unknown ids.
    pub fn robot_state(&self, id: &RobotId) -> Result<RobotState, SimError> {
        self.registry
            .get(id)
            .map(|record| record.state)
            .ok_or_else(|| SimError::RobotNotFound(id.clone()))
    }

    /// Returns whether the cell holds a crate. Out-of-grid cells read
    /// as empty.
    #[must_use]
    pub fn crate_at(&self, x: usize, y: usize) -> bool {
        Self::in_bounds(x, y) && self.crates[y][x]
    }

    /// Returns the id occupying the cell, if any.
    #[must_use]
    pub fn occupant(&self, x: usize, y: usize) -> Option<&RobotId> {
        if Self::in_bounds(x, y) {
            self.occupancy[y][x].as_ref()
        } else {
            None
        }
    }

    /// Takes a read-consistent copy of the world.
    ///
    /// Callers hold (at least) the read side of the world lock for the
    /// duration of this call, so the copy never reflects a
    /// half-applied transition.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut robots = Vec::with_capacity(self.registry.len());
        robots.extend(self.registry.iter().map(|record| RobotSummary {
            id: record.id.clone(),
            state: record.state,
        }));
        robots.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

        WorldSnapshot {
            grid_size: GRID_SIZE,
            crates: self.crates.iter().map(|row| row.to_vec()).collect(),
            robots,
        }
    }

    pub(crate) fn registry(&self) -> &RobotRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut RobotRegistry {
        &mut self.registry
    }

    /// Vacates the cell a departing robot occupies.
    ///
    /// Paired with registry removal during shutdown so the occupancy
    /// invariant holds for whatever remains registered.
    pub(crate) fn vacate(&mut self, state: RobotState) {
        self.occupancy[state.y][state.x] = None;
    }
}
