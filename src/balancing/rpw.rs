//! Ranked Positional Weight (RPW) balancer.
//!
//! # Algorithm
//!
//! 1. Validate the task records, the precedence graph and the cycle time.
//! 2. Compute positional weights and rank tasks by weight (descending),
//!    breaking ties with the configured [`TieBreaker`].
//! 3. Repeatedly take the highest-ranked task whose predecessors are all
//!    placed. Scan stations in creation order, starting at the latest
//!    station that holds one of its predecessors, and place the task in
//!    the first one with enough remaining time. Open a new station when
//!    none fits.
//!
//! The heuristic is single-pass: it never moves a task once placed, so the
//! station count is an upper bound, not necessarily the optimum.
//!
//! # Complexity
//! O(T²) for ranking readiness scans plus O(T·S) for placement,
//! where T = tasks and S = stations.
//!
//! # Reference
//! Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//! Positional Weight Technique", Journal of Industrial Engineering 12(6)

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

use super::{positional_weights, LineBalance};
use crate::config::{BalancerConfig, LineConfig, TieBreaker};
use crate::error::{BalanceError, Result};
use crate::metrics::LineMetrics;
use crate::models::{Station, StationTask, Task};
use crate::validation::{check_cycle_time, validate_precedence, validate_tasks};

/// A task with its priority for one balancing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTask {
    /// 1-based position in the priority order.
    pub rank: usize,
    /// Task identifier.
    pub task_id: String,
    /// Task duration.
    pub duration: f64,
    /// Own duration plus all transitive successors' durations.
    pub positional_weight: f64,
    /// Number of direct predecessors.
    pub predecessor_count: usize,
}

/// RPW line balancer.
///
/// Stateless apart from its configuration: every call to
/// [`balance`](Self::balance) allocates a fresh result, so one balancer can
/// be shared across threads and runs.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use u_linebalance::balancing::RpwBalancer;
/// use u_linebalance::config::LineConfig;
/// use u_linebalance::models::Task;
///
/// let tasks: BTreeMap<String, Task> = [
///     Task::new("A", 5.0),
///     Task::new("B", 3.0).with_predecessor("A"),
///     Task::new("C", 4.0).with_predecessor("A"),
/// ]
/// .into_iter()
/// .map(|t| (t.id.clone(), t))
/// .collect();
///
/// let result = RpwBalancer::new()
///     .balance(&tasks, &LineConfig::new(1.0, 8.0))
///     .unwrap();
/// assert_eq!(result.station_task_ids(), vec![vec!["A", "B"], vec!["C"]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RpwBalancer {
    config: BalancerConfig,
}

impl RpwBalancer {
    /// Creates a balancer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a balancer with the given configuration.
    pub fn with_config(config: BalancerConfig) -> Self {
        Self { config }
    }

    /// Sets the tie breaker for equal positional weights.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.config.tie_breaker = tie_breaker;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    /// Validates the input and runs the full balancing pipeline.
    ///
    /// # Errors
    /// - `InvalidConfiguration` before any graph work
    /// - `EmptyLine`, `InvalidTask`
    /// - `InvalidPrecedence`, `CyclicPrecedence`
    /// - `InfeasibleCycleTime`
    /// - `Stalled` (internal defect)
    pub fn balance(
        &self,
        tasks: &BTreeMap<String, Task>,
        line_config: &LineConfig,
    ) -> Result<LineBalance> {
        let cycle_time = line_config.cycle_time()?;
        if tasks.is_empty() {
            return Err(BalanceError::EmptyLine);
        }
        validate_tasks(tasks.values())?;
        let graph = validate_precedence(tasks)?;
        check_cycle_time(tasks, cycle_time, self.config.epsilon)?;

        debug!(
            tasks = tasks.len(),
            cycle_time,
            tie_breaker = ?self.config.tie_breaker,
            "balancing line"
        );

        let weights = positional_weights(tasks, &graph);
        let ranking = self.rank(tasks, &weights);
        let stations = self.assign(tasks, &ranking, cycle_time)?;
        let metrics = LineMetrics::calculate(&stations, line_config)?;

        debug!(
            stations = stations.len(),
            theoretical_min = metrics.theoretical_min_stations,
            efficiency = metrics.efficiency,
            "line balanced"
        );

        Ok(LineBalance {
            cycle_time,
            ranking,
            stations,
            metrics,
        })
    }

    /// Orders tasks by positional weight (descending), then by the tie
    /// breaker. Tasks missing from `weights` rank by duration alone.
    pub fn rank(
        &self,
        tasks: &BTreeMap<String, Task>,
        weights: &BTreeMap<String, f64>,
    ) -> Vec<RankedTask> {
        let mut ranked: Vec<RankedTask> = tasks
            .values()
            .map(|t| RankedTask {
                rank: 0,
                task_id: t.id.clone(),
                duration: t.duration,
                positional_weight: weights.get(&t.id).copied().unwrap_or(t.duration),
                predecessor_count: t.predecessors.len(),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.positional_weight
                .total_cmp(&a.positional_weight)
                .then_with(|| match self.config.tie_breaker {
                    TieBreaker::ById => a.task_id.cmp(&b.task_id),
                    TieBreaker::FewestPredecessors => a
                        .predecessor_count
                        .cmp(&b.predecessor_count)
                        .then_with(|| a.task_id.cmp(&b.task_id)),
                })
        });

        for (i, r) in ranked.iter_mut().enumerate() {
            r.rank = i + 1;
        }
        ranked
    }

    /// Packs ranked tasks into stations of capacity `cycle_time`.
    ///
    /// Expects validated input; a task that can never become ready yields
    /// `Stalled`, a task longer than the cycle time `InfeasibleCycleTime`.
    pub fn assign(
        &self,
        tasks: &BTreeMap<String, Task>,
        ranking: &[RankedTask],
        cycle_time: f64,
    ) -> Result<Vec<Station>> {
        let epsilon = self.config.epsilon;
        let mut stations: Vec<Station> = Vec::new();
        // task id → position in `stations`
        let mut placed: HashMap<&str, usize> = HashMap::with_capacity(ranking.len());
        let mut pending: Vec<&RankedTask> = ranking.iter().collect();

        while !pending.is_empty() {
            let ready = pending.iter().position(|r| {
                tasks.get(&r.task_id).map_or(true, |t| {
                    t.predecessors
                        .iter()
                        .all(|p| placed.contains_key(p.as_str()))
                })
            });

            let Some(idx) = ready else {
                return Err(BalanceError::Stalled {
                    unassigned: pending.iter().map(|r| r.task_id.clone()).collect(),
                });
            };
            let next = pending.remove(idx);

            let earliest = tasks
                .get(&next.task_id)
                .and_then(|t| {
                    t.predecessors
                        .iter()
                        .filter_map(|p| placed.get(p.as_str()).copied())
                        .max()
                })
                .unwrap_or(0);

            let pos = match stations[earliest.min(stations.len())..]
                .iter()
                .position(|s| s.can_fit(next.duration, epsilon))
            {
                Some(offset) => earliest + offset,
                None => {
                    stations.push(Station::new(stations.len() + 1, cycle_time));
                    trace!(station = stations.len(), "opened station");
                    stations.len() - 1
                }
            };

            let entry = StationTask {
                task_id: next.task_id.clone(),
                duration: next.duration,
                positional_weight: next.positional_weight,
            };
            if !stations[pos].assign(entry, epsilon) {
                return Err(BalanceError::InfeasibleCycleTime {
                    task_id: next.task_id.clone(),
                    duration: next.duration,
                    cycle_time,
                });
            }

            trace!(
                task = %next.task_id,
                weight = next.positional_weight,
                station = pos + 1,
                "assigned task"
            );
            placed.insert(next.task_id.as_str(), pos);
        }

        Ok(stations)
    }
}
