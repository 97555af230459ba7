//! Task plumbing: the queued task payload, its cancel flag, and the
//! observer side returned to submitters.
//!
//! # Channel discipline
//!
//! - **Positions** are advisory: the worker publishes with a
//!   non-blocking send into a capacity-1 channel and drops the update
//!   silently when no observer has drained the previous one.
//! - **Errors** are lossless: the channel holds one slot and the
//!   worker sends at most one terminal value, so the terminal error
//!   survives even when nobody is listening yet.
//!
//! Both channels close exactly once, when the task ends; a closed
//! error channel with no value means clean completion.

use depot_types::{RobotState, SimError, TaskId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Latching cancellation flag, polled at command boundaries.
///
/// The flag only ever transitions unset → set; cancellation never
/// interrupts a command mid-tick.
#[derive(Debug, Clone, Default)]
pub(crate) struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Latches the flag. Idempotent.
    pub(crate) fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One queued unit of work for a robot worker.
#[derive(Debug)]
pub(crate) struct RobotTask {
    /// Unique task id, the key for cancellation.
    pub(crate) id: TaskId,
    /// The original command string; parsed once, on dequeue.
    pub(crate) program: String,
    /// Advisory position updates, one per completed command.
    pub(crate) position_tx: mpsc::Sender<RobotState>,
    /// Terminal error slot.
    pub(crate) error_tx: mpsc::Sender<SimError>,
    /// This task's cancel flag.
    pub(crate) cancel: CancelFlag,
}

/// Observer side of a submitted task.
///
/// Returned by `enqueue_task`. Position updates arrive in command
/// order and strictly precede the terminal signal; between two tasks
/// on the same robot, the second task's first update strictly follows
/// the first task's terminal signal.
///
/// # Example
///
/// ```ignore
/// let mut monitor = robot.enqueue_task("N E").await?;
/// while let Some(state) = monitor.positions.recv().await {
///     println!("robot at ({}, {})", state.x, state.y);
/// }
/// match monitor.errors.recv().await {
///     Some(err) => eprintln!("task {} failed: {err}", monitor.task_id),
///     None => println!("task {} completed", monitor.task_id),
/// }
/// ```
#[derive(Debug)]
pub struct TaskMonitor {
    /// Identifier of the submitted task.
    pub task_id: TaskId,
    /// Lazy sequence of post-command states; closes when the task ends.
    pub positions: mpsc::Receiver<RobotState>,
    /// Terminal error channel: at most one value, then closed. Closed
    /// without a value on clean completion.
    pub errors: mpsc::Receiver<SimError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_flag_latches() {
        let flag = CancelFlag::new();
        assert!(!flag.is_set());

        flag.set();
        assert!(flag.is_set());

        // Re-setting keeps it latched.
        flag.set();
        assert!(flag.is_set());
    }

    #[test]
    fn cancel_flag_is_shared_between_clones() {
        let flag = CancelFlag::new();
        let observer = flag.clone();

        flag.set();
        assert!(observer.is_set());
    }
}
