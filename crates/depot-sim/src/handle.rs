//! RobotHandle - the client-side surface of one robot.

use crate::task::{CancelFlag, RobotTask, TaskMonitor};
use crate::world::World;
use depot_types::{RobotId, RobotState, SimError, TaskId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// Handle for submitting work to a robot and observing its state.
///
/// Handles are cheap to clone; all clones drive the same robot. A
/// handle stays valid until the owning robot's worker stops (normally
/// at warehouse shutdown), after which submissions and state reads
/// fail with [`SimError::RobotNotFound`].
#[derive(Debug, Clone)]
pub struct RobotHandle {
    id: RobotId,
    diagonal: bool,
    crates_allowed: bool,
    world: Arc<RwLock<World>>,
    task_tx: mpsc::Sender<RobotTask>,
    cancellations: Arc<Mutex<HashMap<TaskId, CancelFlag>>>,
}

impl RobotHandle {
    pub(crate) fn new(
        id: RobotId,
        diagonal: bool,
        crates_allowed: bool,
        world: Arc<RwLock<World>>,
        task_tx: mpsc::Sender<RobotTask>,
        cancellations: Arc<Mutex<HashMap<TaskId, CancelFlag>>>,
    ) -> Self {
        Self {
            id,
            diagonal,
            crates_allowed,
            world,
            task_tx,
            cancellations,
        }
    }

    /// Returns this robot's id.
    #[must_use]
    pub fn id(&self) -> &RobotId {
        &self.id
    }

    /// Returns `true` if this robot's programs pass through the
    /// diagonal rewriter.
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        self.diagonal
    }

    /// Returns `true` if the owning warehouse accepts crate commands.
    #[must_use]
    pub fn crates_allowed(&self) -> bool {
        self.crates_allowed
    }

    /// Returns the robot's current state, read under the world lock.
    ///
    /// # Errors
    ///
    /// [`SimError::RobotNotFound`] once the robot has left the world
    /// (warehouse shut down).
    pub async fn current_state(&self) -> Result<RobotState, SimError> {
        self.world.read().await.robot_state(&self.id)
    }

    /// Submits a task program to this robot's queue.
    ///
    /// Tasks run strictly FIFO on the robot's worker. The queue is
    /// bounded: when it is full this call waits for space. The
    /// returned [`TaskMonitor`] carries the task id and the two
    /// observer channels.
    ///
    /// # Errors
    ///
    /// [`SimError::RobotNotFound`] if the robot's worker has stopped.
    pub async fn enqueue_task(&self, program: &str) -> Result<TaskMonitor, SimError> {
        let task_id = TaskId::new();
        let (position_tx, positions) = mpsc::channel(1);
        let (error_tx, errors) = mpsc::channel(1);
        let cancel = CancelFlag::new();

        // Register the cancel flag before the task becomes visible to
        // the worker so cancellation can never miss a queued task.
        self.cancellations.lock().insert(task_id, cancel.clone());

        let task = RobotTask {
            id: task_id,
            program: program.to_string(),
            position_tx,
            error_tx,
            cancel,
        };
        if self.task_tx.send(task).await.is_err() {
            self.cancellations.lock().remove(&task_id);
            return Err(SimError::RobotNotFound(self.id.clone()));
        }
        debug!("robot {}: enqueued {} {:?}", self.id, task_id, program);

        Ok(TaskMonitor {
            task_id,
            positions,
            errors,
        })
    }

    /// Cancels a queued or running task.
    ///
    /// The cancel signal latches; the worker observes it at the next
    /// command boundary, so an in-flight command finishes first. A
    /// queued task aborts the moment it is dequeued.
    ///
    /// # Errors
    ///
    /// [`SimError::TaskNotFound`] when the id is unknown, already
    /// cancelled, or already finished.
    pub fn cancel_task(&self, task_id: TaskId) -> Result<(), SimError> {
        match self.cancellations.lock().remove(&task_id) {
            Some(flag) => {
                flag.set();
                debug!("robot {}: cancelled {}", self.id, task_id);
                Ok(())
            }
            None => Err(SimError::TaskNotFound(task_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{new_warehouse_with_config, SimConfig};
    use depot_types::{RobotState, SimError};
    use std::time::Duration;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(5);

    fn test_config() -> SimConfig {
        SimConfig::new().tick(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn handle_reports_capabilities() {
        let warehouse = new_warehouse_with_config(test_config());
        let plain = warehouse.admit_robot(0, 0, Some("R1")).await.unwrap();
        let diagonal = warehouse.admit_diagonal_robot(5, 5, Some("R2")).await.unwrap();

        assert_eq!(plain.id().as_str(), "R1");
        assert!(!plain.is_diagonal());
        assert!(diagonal.is_diagonal());
        assert!(!plain.crates_allowed());
    }

    #[tokio::test]
    async fn clones_drive_the_same_robot() {
        let warehouse = new_warehouse_with_config(test_config());
        let robot = warehouse.admit_robot(0, 0, Some("R1")).await.unwrap();
        let clone = robot.clone();

        let mut monitor = clone.enqueue_task("N").await.unwrap();
        assert!(timeout(WAIT, monitor.positions.recv()).await.unwrap().is_some());
        assert_eq!(robot.current_state().await.unwrap(), RobotState::at(0, 1));
    }

    #[tokio::test]
    async fn cancel_unknown_task_fails() {
        let warehouse = new_warehouse_with_config(test_config());
        let robot = warehouse.admit_robot(0, 0, Some("R1")).await.unwrap();

        let stranger = depot_types::TaskId::new();
        assert_eq!(
            robot.cancel_task(stranger),
            Err(SimError::TaskNotFound(stranger))
        );
    }

    #[tokio::test]
    async fn cancel_is_single_shot() {
        let warehouse = new_warehouse_with_config(test_config());
        let robot = warehouse.admit_robot(0, 0, Some("R1")).await.unwrap();

        let monitor = robot.enqueue_task("NNNNNNNNN").await.unwrap();
        robot.cancel_task(monitor.task_id).unwrap();

        // The signal latched; a second cancel finds nothing.
        assert_eq!(
            robot.cancel_task(monitor.task_id),
            Err(SimError::TaskNotFound(monitor.task_id))
        );
    }

    #[tokio::test]
    async fn cancel_completed_task_fails() {
        let warehouse = new_warehouse_with_config(test_config());
        let robot = warehouse.admit_robot(0, 0, Some("R1")).await.unwrap();

        let mut monitor = robot.enqueue_task("N").await.unwrap();
        // Drain to completion.
        while timeout(WAIT, monitor.positions.recv()).await.unwrap().is_some() {}
        assert_eq!(timeout(WAIT, monitor.errors.recv()).await.unwrap(), None);

        assert_eq!(
            robot.cancel_task(monitor.task_id),
            Err(SimError::TaskNotFound(monitor.task_id))
        );
    }
}
