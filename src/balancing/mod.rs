//! Line balancing with the Ranked Positional Weight heuristic.
//!
//! # Pipeline
//!
//! `validate_precedence` → [`positional_weights`] → [`RpwBalancer::rank`]
//! → [`RpwBalancer::assign`] → [`LineMetrics`]
//!
//! [`RpwBalancer::balance`] runs the whole pipeline and returns a
//! [`LineBalance`]. Each run is a pure function of its inputs.
//!
//! # References
//!
//! - Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//!   Positional Weight Technique"
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"

mod rpw;
mod weights;

pub use rpw::{RankedTask, RpwBalancer};
pub use weights::positional_weights;

use serde::{Deserialize, Serialize};

use crate::metrics::LineMetrics;
use crate::models::Station;

/// Outcome of one balancing run.
///
/// Owned and independent of the line it was computed from; presentation
/// layers may keep, clone or serialize it freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBalance {
    /// Cycle time the stations were packed against.
    pub cycle_time: f64,
    /// Tasks in priority order.
    pub ranking: Vec<RankedTask>,
    /// Stations in line order.
    pub stations: Vec<Station>,
    /// Metrics of this assignment.
    pub metrics: LineMetrics,
}

impl LineBalance {
    /// Number of stations opened.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// 1-based index of the station holding `task_id`.
    pub fn station_of(&self, task_id: &str) -> Option<usize> {
        self.stations
            .iter()
            .find(|s| s.contains(task_id))
            .map(|s| s.index)
    }

    /// Positional weight computed for `task_id` in this run.
    pub fn weight_of(&self, task_id: &str) -> Option<f64> {
        self.ranking
            .iter()
            .find(|r| r.task_id == task_id)
            .map(|r| r.positional_weight)
    }

    /// Task ids per station, in line order.
    pub fn station_task_ids(&self) -> Vec<Vec<&str>> {
        self.stations.iter().map(Station::task_ids).collect()
    }

    /// Station index of every task, keyed by task id.
    pub fn assignments(&self) -> Vec<(&str, usize)> {
        self.stations
            .iter()
            .flat_map(|s| s.tasks.iter().map(move |t| (t.task_id.as_str(), s.index)))
            .collect()
    }
}
