//! Task model.
//!
//! A task is an indivisible unit of assembly work with a processing time
//! and a set of tasks that must be finished before it can start.
//!
//! # Reference
//! Groover (2015), "Automation, Production Systems, and Computer-Integrated
//! Manufacturing", Ch. 15: Manual Assembly Lines

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An assembly task.
///
/// Positional weights are not stored here: they are derived per balancing
/// run and reported on the run's `RankedTask` and `StationTask` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable description. Not used by the algorithms.
    #[serde(default)]
    pub description: String,
    /// Processing time, in the same unit as the line's available time.
    pub duration: f64,
    /// IDs of tasks that must complete before this one starts.
    #[serde(default)]
    pub predecessors: BTreeSet<String>,
}

impl Task {
    /// Creates a task with the given ID and duration.
    pub fn new(id: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            duration,
            predecessors: BTreeSet::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a predecessor task ID.
    pub fn with_predecessor(mut self, predecessor_id: impl Into<String>) -> Self {
        self.predecessors.insert(predecessor_id.into());
        self
    }

    /// Adds several predecessor task IDs.
    pub fn with_predecessors<I, S>(mut self, predecessor_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessors
            .extend(predecessor_ids.into_iter().map(Into::into));
        self
    }

    /// Whether the task can start without waiting on any other task.
    pub fn is_source(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Whether `task_id` is a direct predecessor.
    pub fn depends_on(&self, task_id: &str) -> bool {
        self.predecessors.contains(task_id)
    }
}
