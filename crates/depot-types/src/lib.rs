//! Core types for the depot warehouse simulator.
//!
//! This crate is the foundation layer shared by every other depot
//! crate: identifier newtypes, the robot state value type, and the
//! unified error taxonomy.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  depot-types : RobotId, TaskId, RobotState,   ◄── HERE  │
//! │                SimError, ErrorCode                      │
//! ├─────────────────────────────────────────────────────────┤
//! │  depot-sim   : grid store, command parser,              │
//! │                task executor, renderer                  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifier Design
//!
//! Robot ids are strings: operators may name robots, and unnamed
//! robots receive generated UUIDs. Task ids are always UUID-backed.
//! Uniqueness of robot ids is a per-warehouse admission check, not a
//! construction-time property.
//!
//! # Error Design
//!
//! A single [`SimError`] enum covers the whole engine so errors travel
//! unchanged from the grid store through the task executor to
//! observers. Every variant carries a stable machine-readable code via
//! [`ErrorCode`].
//!
//! # Example
//!
//! ```
//! use depot_types::{ErrorCode, RobotId, RobotState, SimError};
//!
//! let id = RobotId::named("R1");
//! let state = RobotState::at(0, 0);
//! assert_eq!(id.as_str(), "R1");
//! assert!(!state.has_crate);
//! assert_eq!(SimError::Cancelled.code(), "SIM_CANCELLED");
//! ```

mod error;
mod id;
mod state;

pub use error::{assert_error_code, assert_error_codes, ErrorCode, SimError};
pub use id::{RobotId, TaskId};
pub use state::RobotState;
