//! Production line aggregate.
//!
//! Owns the task set and production targets and is the entry point for
//! validation and balancing. Balancing borrows the line immutably, so the
//! task set cannot change while a run is reading it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Task;
use crate::balancing::{LineBalance, RpwBalancer};
use crate::config::LineConfig;
use crate::error::{BalanceError, Result};
use crate::metrics::theoretical_min_stations;
use crate::validation::{validate_precedence, validate_task, validate_tasks, PrecedenceGraph};

/// An assembly line to be balanced.
///
/// # Example
///
/// ```
/// use u_linebalance::config::LineConfig;
/// use u_linebalance::models::{ProductionLine, Task};
///
/// let line = ProductionLine::new(LineConfig::new(100.0, 480.0))
///     .with_task(Task::new("A", 2.0))?
///     .with_task(Task::new("B", 1.5).with_predecessor("A"))?
///     .with_task(Task::new("C", 2.5).with_predecessor("A"))?;
///
/// let balance = line.balance()?;
/// assert_eq!(balance.station_count(), 2);
/// # Ok::<(), u_linebalance::BalanceError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLine {
    /// Production targets.
    pub config: LineConfig,
    tasks: BTreeMap<String, Task>,
}

impl ProductionLine {
    /// Creates an empty line.
    pub fn new(config: LineConfig) -> Self {
        Self {
            config,
            tasks: BTreeMap::new(),
        }
    }

    /// Adds a task.
    ///
    /// Rejects malformed records and ids already present. Predecessors
    /// may reference tasks added later; they are resolved at validation.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        validate_task(&task)?;
        if self.tasks.contains_key(&task.id) {
            return Err(BalanceError::DuplicateTask { task_id: task.id });
        }
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Adds a task, builder style.
    pub fn with_task(mut self, task: Task) -> Result<Self> {
        self.add_task(task)?;
        Ok(self)
    }

    /// Removes a task, returning it if present.
    ///
    /// Predecessor references to it are left in place and will fail
    /// validation until they are removed too.
    pub fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        self.tasks.remove(task_id)
    }

    /// Looks up a task.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// All tasks, keyed and ordered by id.
    pub fn tasks(&self) -> &BTreeMap<String, Task> {
        &self.tasks
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the line has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks without predecessors.
    pub fn source_tasks(&self) -> Vec<&Task> {
        self.tasks.values().filter(|t| t.is_source()).collect()
    }

    /// Sum of all task durations.
    pub fn total_work_time(&self) -> f64 {
        self.tasks.values().map(|t| t.duration).sum()
    }

    /// Cycle time derived from the production targets.
    pub fn cycle_time(&self) -> Result<f64> {
        self.config.cycle_time()
    }

    /// Lower bound on the number of stations.
    pub fn theoretical_min_stations(&self) -> Result<usize> {
        Ok(theoretical_min_stations(
            self.total_work_time(),
            self.cycle_time()?,
        ))
    }

    /// Validates task records and the precedence graph.
    pub fn validate(&self) -> Result<PrecedenceGraph> {
        validate_tasks(self.tasks.values())?;
        validate_precedence(&self.tasks)
    }

    /// Balances the line with the default RPW balancer.
    pub fn balance(&self) -> Result<LineBalance> {
        self.balance_with(&RpwBalancer::new())
    }

    /// Balances the line with a configured balancer.
    pub fn balance_with(&self, balancer: &RpwBalancer) -> Result<LineBalance> {
        balancer.balance(&self.tasks, &self.config)
    }
}
