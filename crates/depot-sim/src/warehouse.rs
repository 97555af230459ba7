//! Warehouse - the public face of one simulated world.
//!
//! A [`Warehouse`] owns the shared world behind `Arc<RwLock<World>>`
//! and hands out [`RobotHandle`]s. Admission registers the robot and
//! spawns its worker; shutdown stops every worker and drains whatever
//! was still queued.

use crate::config::SimConfig;
use crate::handle::RobotHandle;
use crate::registry::RobotRecord;
use crate::render::render_snapshot;
use crate::runner::RobotRunner;
use crate::snapshot::WorldSnapshot;
use crate::world::{WarehouseKind, World};
use depot_types::{RobotId, RobotState, SimError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, RwLock};
use tracing::info;

/// Creates a plain warehouse with the default configuration.
///
/// Plain warehouses reject every crate operation with
/// [`SimError::InvalidWarehouseType`].
#[must_use]
pub fn new_warehouse() -> Warehouse {
    Warehouse::new(WarehouseKind::Plain, SimConfig::default())
}

/// Creates a plain warehouse with an explicit configuration.
///
/// Tests shrink the tick this way.
#[must_use]
pub fn new_warehouse_with_config(config: SimConfig) -> Warehouse {
    Warehouse::new(WarehouseKind::Plain, config)
}

/// Creates a crate-enabled warehouse with the default configuration.
#[must_use]
pub fn new_crate_warehouse() -> Warehouse {
    Warehouse::new(WarehouseKind::Crates, SimConfig::default())
}

/// Creates a crate-enabled warehouse with an explicit configuration.
#[must_use]
pub fn new_crate_warehouse_with_config(config: SimConfig) -> Warehouse {
    Warehouse::new(WarehouseKind::Crates, config)
}

/// A simulated warehouse.
///
/// Cloning is cheap and every clone drives the same world. The
/// warehouse must be used from within a tokio runtime: admission
/// spawns the robot's worker task.
///
/// Workers run until [`shutdown()`](Self::shutdown); dropping every
/// `Warehouse` clone without calling it leaves the workers parked on
/// their queues.
#[derive(Debug, Clone)]
pub struct Warehouse {
    kind: WarehouseKind,
    config: SimConfig,
    world: Arc<RwLock<World>>,
}

impl Warehouse {
    /// Creates an empty warehouse of the given kind.
    #[must_use]
    pub fn new(kind: WarehouseKind, config: SimConfig) -> Self {
        info!("new {:?} warehouse created", kind);
        Self {
            kind,
            config,
            world: Arc::new(RwLock::new(World::new(kind))),
        }
    }

    /// Returns the warehouse kind.
    #[must_use]
    pub fn kind(&self) -> WarehouseKind {
        self.kind
    }

    /// Returns this warehouse's configuration.
    #[must_use]
    pub fn config(&self) -> SimConfig {
        self.config
    }

    /// Admits a robot at the given cell and starts its worker.
    ///
    /// With an empty or absent `id_hint` a unique id is generated;
    /// otherwise the hint is used verbatim.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`], [`SimError::PositionOccupied`], or
    /// [`SimError::DuplicateId`].
    pub async fn admit_robot(
        &self,
        x: usize,
        y: usize,
        id_hint: Option<&str>,
    ) -> Result<RobotHandle, SimError> {
        self.admit(x, y, id_hint, false).await
    }

    /// Admits a diagonal-capable robot: its task programs pass through
    /// the diagonal rewriter before execution.
    ///
    /// # Errors
    ///
    /// Same as [`admit_robot()`](Self::admit_robot).
    pub async fn admit_diagonal_robot(
        &self,
        x: usize,
        y: usize,
        id_hint: Option<&str>,
    ) -> Result<RobotHandle, SimError> {
        self.admit(x, y, id_hint, true).await
    }

    async fn admit(
        &self,
        x: usize,
        y: usize,
        id_hint: Option<&str>,
        diagonal: bool,
    ) -> Result<RobotHandle, SimError> {
        let id = match id_hint {
            Some(hint) if !hint.is_empty() => RobotId::named(hint),
            _ => RobotId::generate(),
        };
        let crates_allowed = self.kind == WarehouseKind::Crates;

        let (task_tx, task_rx) = mpsc::channel(self.config.task_queue_capacity);
        let (stop_tx, stop_rx) = watch::channel(false);
        let cancellations = Arc::new(Mutex::new(HashMap::new()));

        let record = RobotRecord {
            id: id.clone(),
            state: RobotState::at(x, y),
            diagonal,
            crates_allowed,
            task_tx: task_tx.clone(),
            cancellations: Arc::clone(&cancellations),
            stop: Arc::new(stop_tx),
        };
        self.world.write().await.admit(record)?;

        let runner = RobotRunner::new(
            id.clone(),
            diagonal,
            Arc::clone(&self.world),
            task_rx,
            stop_rx,
            Arc::clone(&cancellations),
            self.config.tick,
        );
        tokio::spawn(runner.run());
        info!("robot {} admitted at ({}, {})", id, x, y);

        Ok(RobotHandle::new(
            id,
            diagonal,
            crates_allowed,
            Arc::clone(&self.world),
            task_tx,
            cancellations,
        ))
    }

    /// Returns handles for every robot currently in the warehouse.
    ///
    /// Handles stay valid until the owning robot's worker stops.
    pub async fn robots(&self) -> Vec<RobotHandle> {
        let world = self.world.read().await;
        world
            .registry()
            .iter()
            .map(|record| self.handle_from(record))
            .collect()
    }

    /// Looks up one robot by id.
    ///
    /// # Errors
    ///
    /// [`SimError::RobotNotFound`] for unknown ids.
    pub async fn robot(&self, id: &RobotId) -> Result<RobotHandle, SimError> {
        let world = self.world.read().await;
        world
            .registry()
            .get(id)
            .map(|record| self.handle_from(record))
            .ok_or_else(|| SimError::RobotNotFound(id.clone()))
    }

    fn handle_from(&self, record: &RobotRecord) -> RobotHandle {
        RobotHandle::new(
            record.id.clone(),
            record.diagonal,
            record.crates_allowed,
            Arc::clone(&self.world),
            record.task_tx.clone(),
            Arc::clone(&record.cancellations),
        )
    }

    /// Places a crate at the given cell.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidWarehouseType`], [`SimError::OutOfBounds`],
    /// or [`SimError::CrateExists`].
    pub async fn add_crate(&self, x: usize, y: usize) -> Result<(), SimError> {
        self.world.write().await.add_crate(x, y)
    }

    /// Removes the crate at the given cell.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidWarehouseType`], [`SimError::OutOfBounds`],
    /// or [`SimError::CrateNotFound`].
    pub async fn remove_crate(&self, x: usize, y: usize) -> Result<(), SimError> {
        self.world.write().await.remove_crate(x, y)
    }

    /// Takes a read-consistent snapshot of the world.
    pub async fn snapshot(&self) -> WorldSnapshot {
        self.world.read().await.snapshot()
    }

    /// Renders the current world state as a textual grid.
    ///
    /// `names` maps robot ids to operator-visible identifiers; robots
    /// without an entry are labelled by their id.
    pub async fn render(&self, names: &HashMap<RobotId, String>) -> String {
        render_snapshot(&self.snapshot().await, names)
    }

    /// Stops every robot worker and removes the robots from the world.
    ///
    /// Tasks still queued are dropped: their observer channels close
    /// without a value. Cancellation signals for unfinished tasks are
    /// discarded. The crate map survives; handles held by callers turn
    /// stale and report [`SimError::RobotNotFound`].
    pub async fn shutdown(&self) {
        let mut world = self.world.write().await;
        for id in world.registry().ids() {
            if let Some(record) = world.registry_mut().remove(&id) {
                let _ = record.stop.send(true);
                record.cancellations.lock().clear();
                world.vacate(record.state);
            }
        }
        info!("warehouse shut down");
    }
}
