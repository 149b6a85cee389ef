//! Input validation for line balancing.
//!
//! Checks structural integrity of the task set before balancing. Detects:
//! - Malformed task records (empty id, non-positive duration)
//! - Missing predecessor references
//! - Circular precedence dependencies (DAG validation)
//! - Tasks longer than the cycle time
//!
//! A successful precedence check yields a [`PrecedenceGraph`]: the
//! successor sets (graph transpose of the declared predecessors) and a
//! topological order, both consumed by the weight calculation.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{BalanceError, MissingPredecessor, Result};
use crate::models::{within_capacity, Task};

/// Validated precedence structure of a task set.
///
/// Built fresh by [`validate_precedence`] on every run; it never outlives
/// the task set it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecedenceGraph {
    successors: BTreeMap<String, BTreeSet<String>>,
    topological_order: Vec<String>,
}

impl PrecedenceGraph {
    /// Direct successors of a task (empty for sinks and unknown ids).
    pub fn successors(&self, task_id: &str) -> impl Iterator<Item = &str> {
        self.successors
            .get(task_id)
            .into_iter()
            .flat_map(|s| s.iter().map(String::as_str))
    }

    /// Number of direct successors.
    pub fn successor_count(&self, task_id: &str) -> usize {
        self.successors.get(task_id).map_or(0, BTreeSet::len)
    }

    /// Task ids ordered so that every predecessor precedes its successors.
    pub fn topological_order(&self) -> &[String] {
        &self.topological_order
    }

    /// Tasks without successors, in id order.
    pub fn sinks(&self) -> Vec<&str> {
        self.successors
            .iter()
            .filter(|(_, s)| s.is_empty())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Number of tasks in the graph.
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    /// Whether the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }
}

/// Checks a single task record.
pub fn validate_task(task: &Task) -> Result<()> {
    if task.id.trim().is_empty() {
        return Err(BalanceError::InvalidTask {
            task_id: task.id.clone(),
            reason: "task id must not be empty".into(),
        });
    }
    if !(task.duration.is_finite() && task.duration > 0.0) {
        return Err(BalanceError::InvalidTask {
            task_id: task.id.clone(),
            reason: format!("duration must be positive, got {}", task.duration),
        });
    }
    Ok(())
}

/// Checks every task record, stopping at the first malformed one.
pub fn validate_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Result<()> {
    tasks.into_iter().try_for_each(validate_task)
}

/// Validates the precedence relation of a task set.
///
/// Checks:
/// 1. Every task is stored under its own id, and no id repeats
/// 2. All predecessor references point to existing tasks
/// 3. No circular precedence dependencies
///
/// # Returns
/// The successor sets and a topological order on success.
/// `DuplicateTask` or `InvalidTask` for a mis-keyed map;
/// `InvalidPrecedence` lists every unresolved reference;
/// `CyclicPrecedence` lists the members of the first cycle found.
pub fn validate_precedence(tasks: &BTreeMap<String, Task>) -> Result<PrecedenceGraph> {
    check_keys(tasks)?;

    let mut missing = Vec::new();
    let mut successors: BTreeMap<String, BTreeSet<String>> = tasks
        .keys()
        .map(|id| (id.clone(), BTreeSet::new()))
        .collect();

    for task in tasks.values() {
        for pred in &task.predecessors {
            match successors.get_mut(pred) {
                Some(succ) => {
                    succ.insert(task.id.clone());
                }
                None => missing.push(MissingPredecessor {
                    task_id: task.id.clone(),
                    predecessor_id: pred.clone(),
                }),
            }
        }
    }

    if !missing.is_empty() {
        return Err(BalanceError::InvalidPrecedence { missing });
    }

    let topological_order = order_or_cycle(&successors)?;

    Ok(PrecedenceGraph {
        successors,
        topological_order,
    })
}

/// Maps built by hand or deserialized can store a task under a foreign key,
/// which would let one id appear twice.
fn check_keys(tasks: &BTreeMap<String, Task>) -> Result<()> {
    let mut seen = BTreeSet::new();
    for (key, task) in tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(BalanceError::DuplicateTask {
                task_id: task.id.clone(),
            });
        }
        if *key != task.id {
            return Err(BalanceError::InvalidTask {
                task_id: task.id.clone(),
                reason: format!("stored under key '{key}'"),
            });
        }
    }
    Ok(())
}

/// Rejects task sets containing a task longer than the cycle time.
///
/// Reports the longest offending task (ties by id).
pub fn check_cycle_time(
    tasks: &BTreeMap<String, Task>,
    cycle_time: f64,
    epsilon: f64,
) -> Result<()> {
    let longest = tasks.values().fold(None::<&Task>, |best, task| match best {
        Some(b) if b.duration >= task.duration => Some(b),
        _ => Some(task),
    });

    match longest {
        Some(task) if !within_capacity(task.duration, cycle_time, epsilon) => {
            Err(BalanceError::InfeasibleCycleTime {
                task_id: task.id.clone(),
                duration: task.duration,
                cycle_time,
            })
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// DFS over successor edges. A back edge (reaching an in-progress node)
/// is a cycle; otherwise reverse post-order is a topological order.
fn order_or_cycle(successors: &BTreeMap<String, BTreeSet<String>>) -> Result<Vec<String>> {
    let mut state: HashMap<&str, VisitState> = HashMap::with_capacity(successors.len());
    let mut path = Vec::new();
    let mut finished = Vec::with_capacity(successors.len());

    for node in successors.keys() {
        if !state.contains_key(node.as_str()) {
            if let Some(cycle) = visit(node, successors, &mut state, &mut path, &mut finished) {
                return Err(BalanceError::CyclicPrecedence { cycle });
            }
        }
    }

    Ok(finished.into_iter().rev().map(str::to_string).collect())
}

fn visit<'a>(
    node: &'a str,
    successors: &'a BTreeMap<String, BTreeSet<String>>,
    state: &mut HashMap<&'a str, VisitState>,
    path: &mut Vec<&'a str>,
    finished: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    state.insert(node, VisitState::InProgress);
    path.push(node);

    if let Some(next_nodes) = successors.get(node) {
        for next in next_nodes {
            match state.get(next.as_str()) {
                Some(VisitState::InProgress) => {
                    let start = path.iter().position(|&n| n == next.as_str()).unwrap_or(0);
                    return Some(path[start..].iter().map(|s| s.to_string()).collect());
                }
                Some(VisitState::Done) => {}
                None => {
                    if let Some(cycle) = visit(next, successors, state, path, finished) {
                        return Some(cycle);
                    }
                }
            }
        }
    }

    path.pop();
    state.insert(node, VisitState::Done);
    finished.push(node);
    None
}
