//! Simulation configuration.
//!
//! The grid dimension is a compile-time constant; everything that
//! tests legitimately shrink (the tick) or tune (queue depth) lives in
//! [`SimConfig`].

use std::time::Duration;

/// Dimension of the square warehouse grid.
///
/// Valid coordinates satisfy `0 <= c < GRID_SIZE`, uniformly for
/// admission and for movement.
pub const GRID_SIZE: usize = 10;

/// Real time taken to execute one command.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Pending tasks a robot's queue holds before submission blocks.
pub const DEFAULT_TASK_QUEUE_CAPACITY: usize = 100;

/// Tunable parameters for a warehouse.
///
/// # Example
///
/// ```
/// use depot_sim::SimConfig;
/// use std::time::Duration;
///
/// let config = SimConfig::new().tick(Duration::from_millis(10));
/// assert_eq!(config.tick, Duration::from_millis(10));
/// assert_eq!(config.task_queue_capacity, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Pause between consecutive commands within one task.
    pub tick: Duration,
    /// Capacity of each robot's pending-task queue.
    pub task_queue_capacity: usize,
}

impl SimConfig {
    /// Creates a config with the default tick and queue capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick: DEFAULT_TICK,
            task_queue_capacity: DEFAULT_TASK_QUEUE_CAPACITY,
        }
    }

    /// Sets the command tick duration.
    #[must_use]
    pub fn tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Sets the pending-task queue capacity.
    ///
    /// Clamped to at least 1; a zero-capacity mpsc queue is invalid.
    #[must_use]
    pub fn task_queue_capacity(mut self, capacity: usize) -> Self {
        self.task_queue_capacity = capacity.max(1);
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
