//! Depot simulation engine.
//!
//! A discrete-time robotic warehouse: a bounded square grid hosts
//! robots and crates; each robot executes string-encoded task programs
//! at a fixed real-time tick, with mutual exclusion on cell occupancy
//! and crate possession.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Client Surface                          │
//! │  Warehouse (factories, admission, crate ops, render)         │
//! │  RobotHandle (enqueue_task, cancel_task, current_state)      │
//! ├──────────────────────────────────────────────────────────────┤
//! │                      Execution Layer                         │
//! │  RobotRunner : one worker task per robot, FIFO queue,        │
//! │                tick pacing, cooperative cancellation         │
//! │  command     : parser + diagonal rewriter                    │
//! ├──────────────────────────────────────────────────────────────┤
//! │                      State Layer                             │
//! │  World       : occupancy grid + crate grid + registry,       │
//! │                atomic transitions under Arc<RwLock<World>>   │
//! │  snapshot / render : read-consistent views                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Concurrency Model
//!
//! One worker per robot; many robots run simultaneously. The world is
//! the only shared mutable structure, behind a readers-writer lock:
//! every command takes the write side for exactly one transition, so
//! occupancy and robot state can never disagree. Snapshots and
//! enumeration take the read side.
//!
//! Per task, observers get two channels: advisory position updates
//! (non-blocking publish, dropped when nobody listens) and a lossless
//! single-slot terminal error. Clean completion closes the error
//! channel without a value.
//!
//! # Example
//!
//! ```no_run
//! use depot_sim::{new_crate_warehouse_with_config, SimConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), depot_sim::SimError> {
//!     let warehouse = new_crate_warehouse_with_config(
//!         SimConfig::new().tick(Duration::from_millis(100)),
//!     );
//!     warehouse.add_crate(1, 1).await?;
//!
//!     let robot = warehouse.admit_robot(0, 0, Some("R1")).await?;
//!     let mut monitor = robot.enqueue_task("N E G").await?;
//!
//!     while let Some(state) = monitor.positions.recv().await {
//!         println!("R1 at ({}, {}) carrying={}", state.x, state.y, state.has_crate);
//!     }
//!     match monitor.errors.recv().await {
//!         Some(err) => eprintln!("task failed: {err}"),
//!         None => println!("task done"),
//!     }
//!
//!     warehouse.shutdown().await;
//!     Ok(())
//! }
//! ```

mod command;
mod config;
mod handle;
mod registry;
mod render;
mod runner;
mod snapshot;
mod task;
mod transition;
mod warehouse;
mod world;

pub use command::{fuse_diagonals, parse_program, Command};
pub use config::{SimConfig, DEFAULT_TASK_QUEUE_CAPACITY, DEFAULT_TICK, GRID_SIZE};
pub use handle::RobotHandle;
pub use render::render_snapshot;
pub use snapshot::{RobotSummary, WorldSnapshot};
pub use task::TaskMonitor;
pub use warehouse::{
    new_crate_warehouse, new_crate_warehouse_with_config, new_warehouse,
    new_warehouse_with_config, Warehouse,
};
pub use world::{WarehouseKind, World};

// Re-exported so downstream code needs only this crate.
pub use depot_types::{ErrorCode, RobotId, RobotState, SimError, TaskId};
