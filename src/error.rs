//! Error types for line balancing.
//!
//! Every failure is detected synchronously within a single balancing run.
//! Variants carry the offending task ids so callers can render precise
//! messages without parsing strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The result type used throughout u-linebalance.
pub type Result<T> = std::result::Result<T, BalanceError>;

/// A predecessor reference that does not resolve to a task in the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPredecessor {
    /// Task declaring the predecessor.
    pub task_id: String,
    /// The unknown predecessor id.
    pub predecessor_id: String,
}

impl fmt::Display for MissingPredecessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "task '{}' references unknown predecessor '{}'",
            self.task_id, self.predecessor_id
        )
    }
}

/// Errors that can occur while validating or balancing a line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BalanceError {
    /// One or more tasks reference predecessors that do not exist.
    #[error("invalid precedence: {}", join_missing(.missing))]
    InvalidPrecedence {
        /// Every unresolved reference, ordered by task id.
        missing: Vec<MissingPredecessor>,
    },

    /// The precedence graph contains a cycle.
    #[error("cyclic precedence among tasks: {}", join_ids(.cycle, " -> "))]
    CyclicPrecedence {
        /// Cycle members in traversal order.
        cycle: Vec<String>,
    },

    /// Daily demand or available time is not a positive number.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the rejected input.
        message: String,
    },

    /// A task is longer than the cycle time, so no station can hold it.
    #[error("task '{task_id}' takes {duration} but the cycle time is {cycle_time}")]
    InfeasibleCycleTime {
        /// The longest offending task.
        task_id: String,
        /// Its duration.
        duration: f64,
        /// The computed cycle time.
        cycle_time: f64,
    },

    /// A task with this id is already part of the line.
    #[error("duplicate task id: {task_id}")]
    DuplicateTask {
        /// The repeated id.
        task_id: String,
    },

    /// A task record is malformed (empty id, non-positive duration).
    #[error("invalid task '{task_id}': {reason}")]
    InvalidTask {
        /// The rejected task id (may be empty).
        task_id: String,
        /// Why the record was rejected.
        reason: String,
    },

    /// Balancing was requested for a line without tasks.
    #[error("production line has no tasks")]
    EmptyLine,

    /// The balancer could not place any remaining task even though the
    /// graph passed validation. Indicates a defect, not bad input.
    #[error("balancer stalled with unassigned tasks: {}", join_ids(.unassigned, ", "))]
    Stalled {
        /// Tasks left without a station.
        unassigned: Vec<String>,
    },
}

impl BalanceError {
    /// Whether this error signals an internal invariant violation rather
    /// than a problem with the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Stalled { .. })
    }

    /// Task ids the error points at, for highlighting in a UI.
    pub fn task_ids(&self) -> Vec<&str> {
        match self {
            Self::InvalidPrecedence { missing } => {
                missing.iter().map(|m| m.task_id.as_str()).collect()
            }
            Self::CyclicPrecedence { cycle } => cycle.iter().map(String::as_str).collect(),
            Self::InfeasibleCycleTime { task_id, .. }
            | Self::DuplicateTask { task_id }
            | Self::InvalidTask { task_id, .. } => vec![task_id.as_str()],
            Self::Stalled { unassigned } => unassigned.iter().map(String::as_str).collect(),
            Self::InvalidConfiguration { .. } | Self::EmptyLine => Vec::new(),
        }
    }
}

fn join_ids(ids: &[String], separator: &str) -> String {
    ids.join(separator)
}

fn join_missing(missing: &[MissingPredecessor]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
