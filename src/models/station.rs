//! Workstation model.
//!
//! A station is a bin of capacity `cycle_time`. The balancer fills stations
//! in order; once created a station is never split or merged.

use serde::{Deserialize, Serialize};

/// Whether `load` fits a station of `cycle_time`. `epsilon` is relative to
/// the cycle time, so the slack never outgrows the capacity itself.
pub(crate) fn within_capacity(load: f64, cycle_time: f64, epsilon: f64) -> bool {
    load <= cycle_time + epsilon * cycle_time.abs()
}

/// A task as placed on a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationTask {
    /// Task identifier.
    pub task_id: String,
    /// Task duration.
    pub duration: f64,
    /// Positional weight computed for this run.
    pub positional_weight: f64,
}

/// A workstation holding an ordered list of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// 1-based position in the line.
    pub index: usize,
    /// Assigned tasks, in assignment order.
    pub tasks: Vec<StationTask>,
    /// Sum of assigned task durations.
    pub cumulative_time: f64,
    /// Capacity limit (the line's cycle time).
    pub cycle_time: f64,
}

impl Station {
    /// Creates an empty station.
    pub fn new(index: usize, cycle_time: f64) -> Self {
        Self {
            index,
            tasks: Vec::new(),
            cumulative_time: 0.0,
            cycle_time,
        }
    }

    /// Time still available in this station.
    #[inline]
    pub fn remaining_time(&self) -> f64 {
        self.cycle_time - self.cumulative_time
    }

    /// Whether a task of `duration` fits, with a relative `epsilon`
    /// tolerance for accumulated float error.
    #[inline]
    pub fn can_fit(&self, duration: f64, epsilon: f64) -> bool {
        within_capacity(self.cumulative_time + duration, self.cycle_time, epsilon)
    }

    /// Appends a task if it fits. Returns `false` and leaves the station
    /// unchanged otherwise.
    pub fn assign(&mut self, task: StationTask, epsilon: f64) -> bool {
        if !self.can_fit(task.duration, epsilon) {
            return false;
        }
        self.cumulative_time += task.duration;
        self.tasks.push(task);
        true
    }

    /// Idle time per cycle (never negative).
    pub fn idle_time(&self) -> f64 {
        self.remaining_time().max(0.0)
    }

    /// Utilization as a percentage of the cycle time.
    pub fn utilization(&self) -> f64 {
        if self.cycle_time <= 0.0 {
            return 0.0;
        }
        self.cumulative_time / self.cycle_time * 100.0
    }

    /// Number of assigned tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task has been assigned.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// IDs of assigned tasks in assignment order.
    pub fn task_ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.task_id.as_str()).collect()
    }

    /// Whether the station holds the given task.
    pub fn contains(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|t| t.task_id == task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, duration: f64) -> StationTask {
        StationTask {
            task_id: id.into(),
            duration,
            positional_weight: duration,
        }
    }

    #[test]
    fn test_assign_within_capacity() {
        let mut station = Station::new(1, 8.0);
        assert!(station.assign(entry("A", 5.0), 1e-9));
        assert!(station.assign(entry("B", 3.0), 1e-9));

        assert_eq!(station.task_ids(), vec!["A", "B"]);
        assert!((station.cumulative_time - 8.0).abs() < 1e-10);
        assert!((station.idle_time() - 0.0).abs() < 1e-10);
        assert!((station.utilization() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_assign_rejects_overflow() {
        let mut station = Station::new(1, 8.0);
        assert!(station.assign(entry("A", 5.0), 1e-9));
        assert!(!station.assign(entry("C", 4.0), 1e-9));

        assert_eq!(station.task_count(), 1);
        assert!(!station.contains("C"));
        assert!((station.remaining_time() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_float_tolerance() {
        // 0.1 + 0.2 > 0.3 in binary floating point
        let mut station = Station::new(1, 0.3);
        assert!(station.assign(entry("A", 0.1), 1e-9));
        assert!(station.assign(entry("B", 0.2), 1e-9));
    }

    #[test]
    fn test_tolerance_scales_with_cycle_time() {
        let mut station = Station::new(1, 1e-10);
        assert!(!station.assign(entry("A", 5e-10), 1e-9));
        assert!(station.assign(entry("B", 1e-10), 1e-9));
        assert!(!station.can_fit(1e-11, 1e-9));
    }

    #[test]
    fn test_empty_station() {
        let station = Station::new(3, 10.0);
        assert!(station.is_empty());
        assert_eq!(station.index, 3);
        assert!((station.utilization() - 0.0).abs() < 1e-10);
        assert!((station.idle_time() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_cycle_time_utilization() {
        let station = Station::new(1, 0.0);
        assert!((station.utilization() - 0.0).abs() < 1e-10);
    }
}
