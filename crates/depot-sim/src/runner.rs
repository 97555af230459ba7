//! RobotRunner - the per-robot task worker.
//!
//! Each admitted robot owns exactly one runner, spawned as a tokio
//! task at admission. The runner drains the robot's bounded task queue
//! strictly FIFO; tasks on different robots proceed concurrently.
//!
//! # Architecture
//!
//! ```text
//!                          ┌─────────────────────────┐
//!                          │       RobotRunner       │
//!                          │                         │
//! RobotHandle ──enqueue──► │  task_rx ◄── mpsc(cap)  │
//!                          │                         │
//! Warehouse ───shutdown──► │  stop_rx ◄── watch      │
//!                          │                         │
//!                          │        │                │
//!                          │        ▼                │
//!                          │  execute_task()         │
//!                          │   parse → per command:  │
//!                          │   cancel poll → world   │
//!                          │   write → publish →     │
//!                          │   tick sleep            │
//!                          └─────────────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! 1. Created at admission, 1:1 with the robot
//! 2. Runs until the stop signal fires or every task sender is gone
//! 3. A task's first error is terminal for that task only; the runner
//!    moves on to the next task

use crate::command::{fuse_diagonals, parse_program};
use crate::task::{CancelFlag, RobotTask};
use crate::world::World;
use depot_types::{RobotId, SimError, TaskId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, RwLock};
use tracing::{debug, info, warn};

/// Execution context for a single robot.
pub(crate) struct RobotRunner {
    /// This robot's id.
    id: RobotId,
    /// Whether the diagonal rewriter applies to this robot's programs.
    diagonal: bool,
    /// Shared world; commands take the write side per transition.
    world: Arc<RwLock<World>>,
    /// Consumer side of the bounded task queue.
    task_rx: mpsc::Receiver<RobotTask>,
    /// One-shot stop signal.
    stop_rx: watch::Receiver<bool>,
    /// Cancel flags for unfinished tasks; the runner prunes an entry
    /// once its task terminates.
    cancellations: Arc<Mutex<HashMap<TaskId, CancelFlag>>>,
    /// Pause between consecutive commands.
    tick: Duration,
}

impl RobotRunner {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: RobotId,
        diagonal: bool,
        world: Arc<RwLock<World>>,
        task_rx: mpsc::Receiver<RobotTask>,
        stop_rx: watch::Receiver<bool>,
        cancellations: Arc<Mutex<HashMap<TaskId, CancelFlag>>>,
        tick: Duration,
    ) -> Self {
        Self {
            id,
            diagonal,
            world,
            task_rx,
            stop_rx,
            cancellations,
            tick,
        }
    }

    /// Runs the robot's task loop.
    ///
    /// Consumes the runner and processes tasks until the stop signal
    /// fires or all task senders are dropped. A task in flight when
    /// the stop signal arrives stops at the next command boundary;
    /// it and the tasks still queued are dropped, closing their
    /// channels without a value.
    pub(crate) async fn run(mut self) {
        info!("robot {} worker started", self.id);

        loop {
            tokio::select! {
                // Stop wins over further queue draining.
                biased;

                _ = self.stop_rx.changed() => {
                    info!("robot {} worker stopping", self.id);
                    break;
                }

                task = self.task_rx.recv() => {
                    match task {
                        Some(task) => {
                            self.execute_task(&task).await;
                            // Prune the cancel entry before the task
                            // drop closes the observer channels, so a
                            // task whose terminal signal was observed
                            // is already TaskNotFound to cancel_task.
                            self.cancellations.lock().remove(&task.id);
                        }
                        None => {
                            debug!("robot {} task queue closed", self.id);
                            break;
                        }
                    }
                }
            }
        }

        info!("robot {} worker stopped", self.id);
    }

    /// Executes a single task.
    ///
    /// The program is parsed once (and rewritten for diagonal-capable
    /// robots), then executed one command per tick. The cancel flag is
    /// polled before every command, so a cancelled queued task aborts
    /// the moment it is dequeued and a running one stops at the next
    /// command boundary. The caller drops the task afterwards, which
    /// closes both observer channels exactly once.
    async fn execute_task(&self, task: &RobotTask) {
        debug!(
            "robot {}: starting {} with program {:?}",
            self.id, task.id, task.program
        );

        let mut commands = parse_program(&task.program);
        if self.diagonal {
            commands = fuse_diagonals(&commands);
        }

        for command in commands {
            if *self.stop_rx.borrow() {
                debug!("robot {}: {} interrupted by shutdown", self.id, task.id);
                return;
            }
            if task.cancel.is_set() {
                info!("robot {}: {} cancelled", self.id, task.id);
                let _ = task.error_tx.try_send(SimError::Cancelled);
                return;
            }

            let result = {
                let mut world = self.world.write().await;
                world.execute(&self.id, command)
            };
            let state = match result {
                Ok(state) => state,
                Err(err) => {
                    // A shutdown can win the lock between the stop
                    // poll and this command; such tasks end by channel
                    // close, not by error.
                    if *self.stop_rx.borrow() {
                        return;
                    }
                    warn!("robot {}: {} aborted: {}", self.id, task.id, err);
                    let _ = task.error_tx.try_send(err);
                    return;
                }
            };

            // Advisory publish: dropped silently when no observer has
            // drained the previous update.
            let _ = task.position_tx.try_send(state);

            tokio::time::sleep(self.tick).await;
        }

        debug!("robot {}: {} completed", self.id, task.id);
    }
}

#[cfg(test)]
mod tests {
    use crate::{new_crate_warehouse_with_config, new_warehouse_with_config, SimConfig};
    use depot_types::{RobotState, SimError};
    use std::time::Duration;
    use tokio::time::timeout;

    const TEST_TICK: Duration = Duration::from_millis(5);
    const WAIT: Duration = Duration::from_secs(5);

    fn test_config() -> SimConfig {
        SimConfig::new().tick(TEST_TICK)
    }

    #[tokio::test]
    async fn task_runs_and_closes_channels() {
        let warehouse = new_warehouse_with_config(test_config());
        let robot = warehouse.admit_robot(0, 0, Some("R1")).await.unwrap();

        let mut monitor = robot.enqueue_task("N E").await.unwrap();

        let first = timeout(WAIT, monitor.positions.recv()).await.unwrap();
        assert_eq!(first, Some(RobotState::at(0, 1)));
        let second = timeout(WAIT, monitor.positions.recv()).await.unwrap();
        assert_eq!(second, Some(RobotState::at(1, 1)));

        // Task done: positions closes, errors closes without a value.
        assert_eq!(timeout(WAIT, monitor.positions.recv()).await.unwrap(), None);
        assert_eq!(timeout(WAIT, monitor.errors.recv()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unknown_command_aborts_at_offending_position() {
        let warehouse = new_warehouse_with_config(test_config());
        let robot = warehouse.admit_robot(0, 0, Some("R1")).await.unwrap();

        let mut monitor = robot.enqueue_task("NxN").await.unwrap();

        // The valid prefix ran.
        let first = timeout(WAIT, monitor.positions.recv()).await.unwrap();
        assert_eq!(first, Some(RobotState::at(0, 1)));

        let err = timeout(WAIT, monitor.errors.recv()).await.unwrap();
        assert_eq!(err, Some(SimError::UnknownCommand('x')));

        // The trailing N never executed.
        assert_eq!(robot.current_state().await.unwrap(), RobotState::at(0, 1));
    }

    #[tokio::test]
    async fn cancelled_queued_task_aborts_on_dequeue() {
        let warehouse = new_crate_warehouse_with_config(test_config());
        let robot = warehouse.admit_robot(0, 0, Some("R1")).await.unwrap();

        let mut running = robot.enqueue_task("N N N").await.unwrap();
        let mut queued = robot.enqueue_task("E E E").await.unwrap();

        robot.cancel_task(queued.task_id).unwrap();

        // The queued task dies the moment the worker picks it up,
        // without moving the robot east.
        let err = timeout(WAIT, queued.errors.recv()).await.unwrap();
        assert_eq!(err, Some(SimError::Cancelled));

        while timeout(WAIT, running.positions.recv()).await.unwrap().is_some() {}
        assert_eq!(robot.current_state().await.unwrap(), RobotState::at(0, 3));
    }

    #[tokio::test]
    async fn worker_continues_after_task_error() {
        let warehouse = new_warehouse_with_config(test_config());
        let robot = warehouse.admit_robot(0, 0, Some("R1")).await.unwrap();

        let mut failing = robot.enqueue_task("S").await.unwrap();
        assert_eq!(
            timeout(WAIT, failing.errors.recv()).await.unwrap(),
            Some(SimError::OutOfBounds)
        );

        // The next task runs normally on the same worker.
        let mut monitor = robot.enqueue_task("N").await.unwrap();
        assert_eq!(
            timeout(WAIT, monitor.positions.recv()).await.unwrap(),
            Some(RobotState::at(0, 1))
        );
    }

    #[tokio::test]
    async fn second_task_observation_follows_first_terminal() {
        let warehouse = new_warehouse_with_config(test_config());
        let robot = warehouse.admit_robot(0, 0, Some("R1")).await.unwrap();

        let mut first = robot.enqueue_task("N").await.unwrap();
        let mut second = robot.enqueue_task("E").await.unwrap();

        // Drain the first task to its terminal signal before the
        // second produces anything.
        assert!(timeout(WAIT, first.positions.recv()).await.unwrap().is_some());
        assert_eq!(timeout(WAIT, first.errors.recv()).await.unwrap(), None);

        let observed = timeout(WAIT, second.positions.recv()).await.unwrap();
        assert_eq!(observed, Some(RobotState { x: 1, y: 1, has_crate: false }));
    }
}
