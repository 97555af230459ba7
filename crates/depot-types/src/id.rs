//! Identifier types for the depot simulator.
//!
//! Robot identifiers are strings so that operators can assign
//! memorable names ("R1", "picker-3"); when no name is supplied a
//! UUID v4 is generated. Task identifiers are always generated.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier for a robot within a warehouse.
///
/// A `RobotId` is either operator-supplied (used verbatim) or
/// generated. Uniqueness is enforced per warehouse at admission time,
/// not by construction: two warehouses may both host a robot named
/// `"R1"`.
///
/// # Example
///
/// ```
/// use depot_types::RobotId;
///
/// let named = RobotId::named("R1");
/// assert_eq!(named.as_str(), "R1");
///
/// let generated = RobotId::generate();
/// assert_ne!(generated, RobotId::generate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RobotId(String);

impl RobotId {
    /// Creates a robot id from an operator-supplied name, used verbatim.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a robot id with a generated UUID v4 string.
    ///
    /// Used when admission receives no id hint.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Display is the bare name: robot ids surface directly in rendered
// grids and operator-facing messages.
impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RobotId {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

/// Identifier for a task submitted to a robot.
///
/// Each call to `enqueue_task` produces a fresh `TaskId`; the id is
/// the key for later cancellation.
///
/// # Example
///
/// ```
/// use depot_types::TaskId;
///
/// let a = TaskId::new();
/// let b = TaskId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - see below
impl TaskId {
    /// Creates a new [`TaskId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

// NOTE: TaskId intentionally does NOT implement Default.
// Default::default() would mint an id that no executor is tracking;
// ids are only meaningful when returned from enqueue_task.

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_id_is_verbatim() {
        let id = RobotId::named("R1");
        assert_eq!(id.as_str(), "R1");
        assert_eq!(id.to_string(), "R1");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = RobotId::generate();
        let b = RobotId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn robot_id_from_str() {
        let id: RobotId = "picker-3".into();
        assert_eq!(id, RobotId::named("picker-3"));
    }

    #[test]
    fn task_ids_are_unique() {
        assert_ne!(TaskId::new(), TaskId::new());
    }

    #[test]
    fn task_id_display_prefixed() {
        let id = TaskId::new();
        assert!(id.to_string().starts_with("task:"));
    }
}
