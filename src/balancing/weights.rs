//! Positional weight calculation.
//!
//! The positional weight of a task is its own duration plus the durations
//! of every task that transitively follows it. Each follower is counted
//! once, however many paths lead to it.
//!
//! # Algorithm
//! Visit tasks in reverse topological order (sinks first). The follower set
//! of a task is the union of its direct successors and their follower sets,
//! which are already known at that point.
//!
//! # Complexity
//! O(T²) time and memory in the worst case (a total order).
//!
//! # Reference
//! Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//! Positional Weight Technique"

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::Task;
use crate::validation::PrecedenceGraph;

/// Computes the positional weight of every task.
///
/// `graph` must come from [`validate_precedence`](crate::validation::validate_precedence)
/// on the same task set.
pub fn positional_weights(
    tasks: &BTreeMap<String, Task>,
    graph: &PrecedenceGraph,
) -> BTreeMap<String, f64> {
    let duration = |id: &str| tasks.get(id).map_or(0.0, |t| t.duration);

    let mut followers: HashMap<&str, BTreeSet<&str>> = HashMap::with_capacity(tasks.len());
    let mut weights = BTreeMap::new();

    for id in graph.topological_order().iter().rev() {
        let mut reachable = BTreeSet::new();
        for succ in graph.successors(id) {
            reachable.insert(succ);
            if let Some(further) = followers.get(succ) {
                reachable.extend(further.iter().copied());
            }
        }

        let weight = duration(id.as_str()) + reachable.iter().map(|&r| duration(r)).sum::<f64>();
        weights.insert(id.clone(), weight);
        followers.insert(id.as_str(), reachable);
    }

    weights
}
