//! Robot registry: id → record mapping inside the world.

use crate::task::{CancelFlag, RobotTask};
use depot_types::{RobotId, RobotState, TaskId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Everything the world tracks for one admitted robot.
///
/// The immutable capability flags and the executor plumbing are fixed
/// at admission; `state` is the only mutable field and changes only
/// under the world write lock, so occupancy and robot state cannot
/// disagree.
#[derive(Debug)]
pub(crate) struct RobotRecord {
    /// Unique identifier, fixed at admission.
    pub(crate) id: RobotId,
    /// Current position and carry flag.
    pub(crate) state: RobotState,
    /// Whether the command rewriter fuses diagonals for this robot.
    pub(crate) diagonal: bool,
    /// Whether the owning warehouse accepts crate operations.
    pub(crate) crates_allowed: bool,
    /// Producer side of the robot's bounded task queue.
    pub(crate) task_tx: mpsc::Sender<RobotTask>,
    /// Cancel flags for tasks that have not yet finished, keyed by
    /// task id. Shared with the worker, which prunes finished entries.
    pub(crate) cancellations: Arc<Mutex<HashMap<TaskId, CancelFlag>>>,
    /// One-shot stop signal for the worker.
    pub(crate) stop: Arc<watch::Sender<bool>>,
}

/// Mapping from robot id to [`RobotRecord`].
///
/// All access is serialised by the world lock; the registry itself is
/// a plain map. Insertion order is irrelevant.
#[derive(Debug, Default)]
pub(crate) struct RobotRegistry {
    robots: HashMap<RobotId, RobotRecord>,
}

impl RobotRegistry {
    pub(crate) fn new() -> Self {
        Self {
            robots: HashMap::new(),
        }
    }

    pub(crate) fn contains(&self, id: &RobotId) -> bool {
        self.robots.contains_key(id)
    }

    pub(crate) fn insert(&mut self, record: RobotRecord) {
        self.robots.insert(record.id.clone(), record);
    }

    pub(crate) fn get(&self, id: &RobotId) -> Option<&RobotRecord> {
        self.robots.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &RobotId) -> Option<&mut RobotRecord> {
        self.robots.get_mut(id)
    }

    pub(crate) fn remove(&mut self, id: &RobotId) -> Option<RobotRecord> {
        self.robots.remove(id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &RobotRecord> {
        self.robots.values()
    }

    pub(crate) fn ids(&self) -> Vec<RobotId> {
        self.robots.keys().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.robots.len()
    }
}

#[cfg(test)]
pub(crate) fn test_record(id: &str, x: usize, y: usize) -> RobotRecord {
    let (task_tx, _task_rx) = mpsc::channel(1);
    let (stop_tx, _stop_rx) = watch::channel(false);
    RobotRecord {
        id: RobotId::named(id),
        state: RobotState::at(x, y),
        diagonal: false,
        crates_allowed: true,
        task_tx,
        cancellations: Arc::new(Mutex::new(HashMap::new())),
        stop: Arc::new(stop_tx),
    }
}
