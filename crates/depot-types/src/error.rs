//! Error taxonomy for the depot simulator.
//!
//! One enum covers every failure the engine can surface, so grid-store
//! errors bubble verbatim through the task executor to observers. All
//! kinds implement [`ErrorCode`] for standardized handling.
//!
//! # Error Codes
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`SimError::OutOfBounds`] | `SIM_OUT_OF_BOUNDS` | No |
//! | [`SimError::PositionOccupied`] | `SIM_POSITION_OCCUPIED` | Yes |
//! | [`SimError::DuplicateId`] | `SIM_DUPLICATE_ID` | No |
//! | [`SimError::RobotNotFound`] | `SIM_ROBOT_NOT_FOUND` | No |
//! | [`SimError::TaskNotFound`] | `SIM_TASK_NOT_FOUND` | No |
//! | [`SimError::UnknownCommand`] | `SIM_UNKNOWN_COMMAND` | No |
//! | [`SimError::Cancelled`] | `SIM_CANCELLED` | No |
//! | [`SimError::CrateNotFound`] | `SIM_CRATE_NOT_FOUND` | No |
//! | [`SimError::CrateExists`] | `SIM_CRATE_EXISTS` | No |
//! | [`SimError::RobotHasCrate`] | `SIM_ROBOT_HAS_CRATE` | No |
//! | [`SimError::RobotNotCarrying`] | `SIM_ROBOT_NOT_CARRYING` | No |
//! | [`SimError::InvalidWarehouseType`] | `SIM_INVALID_WAREHOUSE_TYPE` | No |

use crate::id::{RobotId, TaskId};
use thiserror::Error;

/// Unified error code interface for depot errors.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**, prefixed with the domain (`SIM_`)
/// - **Stable**: codes do not change once defined (API contract)
///
/// # Recoverability
///
/// An error is recoverable when retrying the same operation later may
/// succeed without changing the request.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying the operation may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Simulation error.
///
/// Every engine operation and every task-terminal failure is one of
/// these kinds; they are distinguishable by identity (variant), and
/// by [`ErrorCode::code`] for programmatic handling.
///
/// # Example
///
/// ```
/// use depot_types::{ErrorCode, SimError};
///
/// let err = SimError::OutOfBounds;
/// assert_eq!(err.code(), "SIM_OUT_OF_BOUNDS");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A coordinate falls outside `[0, GRID_SIZE)`.
    #[error("command would move robot out of bounds")]
    OutOfBounds,

    /// The target cell is already occupied by another robot.
    #[error("target position already occupied by another robot")]
    PositionOccupied,

    /// A robot with this id is already registered in the warehouse.
    #[error("robot id already in use: {0}")]
    DuplicateId(RobotId),

    /// No robot with this id is registered in the warehouse.
    #[error("robot not found: {0}")]
    RobotNotFound(RobotId),

    /// The task id is unknown, already cancelled, or already finished.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The program contains a character outside the command alphabet.
    ///
    /// Surfaces at execution time, aborting the task at the offending
    /// position; earlier commands in the program have already run.
    #[error("unknown command: {0}")]
    UnknownCommand(char),

    /// The task was terminated by cancellation.
    #[error("task cancelled")]
    Cancelled,

    /// No crate at the robot's current cell.
    #[error("crate not found at specified location")]
    CrateNotFound,

    /// A crate is already present at the target cell.
    #[error("crate already exists at specified location")]
    CrateExists,

    /// The robot is already carrying a crate.
    #[error("robot is already carrying a crate")]
    RobotHasCrate,

    /// The robot is not carrying a crate.
    #[error("robot is not carrying a crate")]
    RobotNotCarrying,

    /// A crate operation was attempted on a plain warehouse.
    #[error("invalid warehouse type")]
    InvalidWarehouseType,
}

impl ErrorCode for SimError {
    fn code(&self) -> &'static str {
        match self {
            Self::OutOfBounds => "SIM_OUT_OF_BOUNDS",
            Self::PositionOccupied => "SIM_POSITION_OCCUPIED",
            Self::DuplicateId(_) => "SIM_DUPLICATE_ID",
            Self::RobotNotFound(_) => "SIM_ROBOT_NOT_FOUND",
            Self::TaskNotFound(_) => "SIM_TASK_NOT_FOUND",
            Self::UnknownCommand(_) => "SIM_UNKNOWN_COMMAND",
            Self::Cancelled => "SIM_CANCELLED",
            Self::CrateNotFound => "SIM_CRATE_NOT_FOUND",
            Self::CrateExists => "SIM_CRATE_EXISTS",
            Self::RobotHasCrate => "SIM_ROBOT_HAS_CRATE",
            Self::RobotNotCarrying => "SIM_ROBOT_NOT_CARRYING",
            Self::InvalidWarehouseType => "SIM_INVALID_WAREHOUSE_TYPE",
        }
    }

    fn is_recoverable(&self) -> bool {
        // The blocking robot may vacate the cell; everything else needs
        // a different program or a different world.
        matches!(self, Self::PositionOccupied)
    }
}

/// Validates that an error code follows depot conventions.
///
/// # Panics
///
/// Panics with a descriptive message if the code is empty, lacks the
/// expected prefix, or is not UPPER_SNAKE_CASE.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates multiple error codes at once.
///
/// Use this to verify all variants of an error enum.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<SimError> {
        vec![
            SimError::OutOfBounds,
            SimError::PositionOccupied,
            SimError::DuplicateId(RobotId::named("R1")),
            SimError::RobotNotFound(RobotId::named("R1")),
            SimError::TaskNotFound(TaskId::new()),
            SimError::UnknownCommand('?'),
            SimError::Cancelled,
            SimError::CrateNotFound,
            SimError::CrateExists,
            SimError::RobotHasCrate,
            SimError::RobotNotCarrying,
            SimError::InvalidWarehouseType,
        ]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "SIM_");
    }

    #[test]
    fn codes_are_distinct() {
        let variants = all_variants();
        for (i, a) in variants.iter().enumerate() {
            for b in variants.iter().skip(i + 1) {
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn only_collision_is_recoverable() {
        for err in all_variants() {
            assert_eq!(
                err.is_recoverable(),
                matches!(err, SimError::PositionOccupied),
                "unexpected recoverability for {}",
                err.code()
            );
        }
    }

    #[test]
    fn unknown_command_carries_offender() {
        let err = SimError::UnknownCommand('x');
        assert_eq!(err.to_string(), "unknown command: x");
    }

    #[test]
    fn errors_compare_by_identity() {
        assert_eq!(SimError::OutOfBounds, SimError::OutOfBounds);
        assert_ne!(SimError::OutOfBounds, SimError::PositionOccupied);
        assert_ne!(
            SimError::DuplicateId(RobotId::named("a")),
            SimError::DuplicateId(RobotId::named("b")),
        );
    }
}
