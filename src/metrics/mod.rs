//! Line balance metrics.
//!
//! Computes the standard performance indicators of a station assignment.
//! Everything here is a pure function of the stations and the line
//! configuration; inputs are never mutated.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Cycle time (C) | available time / daily demand |
//! | Theoretical minimum | ceil(Σ t / C) |
//! | Efficiency | Σ t / (n × C) × 100 |
//! | Balance delay | 100 − efficiency |
//! | Utilization | station time / C × 100 |
//! | Smoothness index | sqrt(Σ (C − Tᵢ)² / n) |
//! | Throughput | available time / bottleneck station time |
//!
//! # Reference
//! Groover (2015), "Automation, Production Systems, and Computer-Integrated
//! Manufacturing", Ch. 15.2: Line Balancing Measures

mod quality;

pub use quality::{
    QualityIndicators, Recommendation, BALANCED_UTILIZATION, BOTTLENECK_UTILIZATION,
};

use serde::{Deserialize, Serialize};

use crate::config::LineConfig;
use crate::error::Result;
use crate::models::Station;

/// Relative slack removed before rounding up so that float noise such as
/// `9.6 / 4.8 = 2.0000000000000004` does not add a station.
const CEIL_TOLERANCE: f64 = 1e-9;

/// Theoretical minimum station count, `ceil(total_work / cycle_time)`.
///
/// Any positive amount of work needs at least one station.
pub fn theoretical_min_stations(total_work: f64, cycle_time: f64) -> usize {
    if cycle_time <= 0.0 || total_work <= 0.0 {
        return 0;
    }
    let ratio = total_work / cycle_time;
    ((ratio * (1.0 - CEIL_TOLERANCE)).ceil() as usize).max(1)
}

/// Line efficiency (%), `total_work / (stations × cycle_time) × 100`.
pub fn line_efficiency(total_work: f64, station_count: usize, cycle_time: f64) -> f64 {
    let capacity = station_count as f64 * cycle_time;
    if capacity <= 0.0 {
        return 0.0;
    }
    total_work / capacity * 100.0
}

/// Smoothness index, the root-mean-square gap between each station's
/// time and the cycle time. Zero for a perfectly filled line.
pub fn smoothness_index(station_times: &[f64], cycle_time: f64) -> f64 {
    if station_times.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = station_times.iter().map(|t| (cycle_time - t).powi(2)).sum();
    (sum_sq / station_times.len() as f64).sqrt()
}

/// Per-station figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMetrics {
    /// 1-based station position.
    pub index: usize,
    /// Number of tasks on the station.
    pub task_count: usize,
    /// Sum of task durations.
    pub cumulative_time: f64,
    /// `cumulative_time / cycle_time × 100`.
    pub utilization: f64,
    /// Unused time per cycle.
    pub idle_time: f64,
    /// Whether this station carries the longest workload.
    pub is_bottleneck: bool,
}

/// Performance snapshot of a balanced line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMetrics {
    /// Nominal cycle time.
    pub cycle_time: f64,
    /// Units required per period.
    pub daily_demand: f64,
    /// Productive time per period.
    pub available_time: f64,
    /// Sum of all task durations.
    pub total_work_time: f64,
    /// Stations produced by the balancer.
    pub station_count: usize,
    /// Lower bound on the station count.
    pub theoretical_min_stations: usize,
    /// Line efficiency (%).
    pub efficiency: f64,
    /// Idle share of total capacity (%).
    pub balance_delay: f64,
    /// Idle time summed over all stations.
    pub total_idle_time: f64,
    /// RMS gap between station times and the cycle time.
    pub smoothness_index: f64,
    /// Mean station utilization (%).
    pub avg_utilization: f64,
    /// Lowest station utilization (%).
    pub min_utilization: f64,
    /// Highest station utilization (%).
    pub max_utilization: f64,
    /// `max_utilization − min_utilization`.
    pub imbalance: f64,
    /// Bottleneck station time, the cycle the line actually achieves.
    pub realized_cycle_time: f64,
    /// Units per period at the realized cycle time.
    pub throughput: f64,
    /// Units per period at the nominal cycle time.
    pub theoretical_throughput: f64,
    /// Units per time unit at the realized cycle time.
    pub production_rate: f64,
    /// Share of realized capacity consumed by demand (%), capped at 100.
    pub capacity_utilization: f64,
    /// Per-station breakdown, in line order.
    pub stations: Vec<StationMetrics>,
    /// Qualitative indicators and recommendations.
    pub quality: QualityIndicators,
}

impl LineMetrics {
    /// Computes metrics from a finished station assignment.
    ///
    /// Fails with `InvalidConfiguration` when demand or available time is
    /// not positive. An empty station list yields zeroed metrics.
    pub fn calculate(stations: &[Station], config: &LineConfig) -> Result<Self> {
        let cycle_time = config.cycle_time()?;
        let total_work_time: f64 = stations.iter().map(|s| s.cumulative_time).sum();
        let theoretical_min = theoretical_min_stations(total_work_time, cycle_time);

        let station_times: Vec<f64> = stations.iter().map(|s| s.cumulative_time).collect();
        let realized_cycle_time = station_times.iter().copied().fold(0.0, f64::max);

        let station_metrics: Vec<StationMetrics> = stations
            .iter()
            .map(|s| StationMetrics {
                index: s.index,
                task_count: s.task_count(),
                cumulative_time: s.cumulative_time,
                utilization: s.cumulative_time / cycle_time * 100.0,
                idle_time: (cycle_time - s.cumulative_time).max(0.0),
                is_bottleneck: s.cumulative_time >= realized_cycle_time,
            })
            .collect();

        let utilizations: Vec<f64> = station_metrics.iter().map(|s| s.utilization).collect();
        let quality = QualityIndicators::evaluate(&utilizations, theoretical_min);

        if stations.is_empty() {
            return Ok(Self {
                cycle_time,
                daily_demand: config.daily_demand,
                available_time: config.available_time,
                total_work_time,
                station_count: 0,
                theoretical_min_stations: theoretical_min,
                efficiency: 0.0,
                balance_delay: 0.0,
                total_idle_time: 0.0,
                smoothness_index: 0.0,
                avg_utilization: 0.0,
                min_utilization: 0.0,
                max_utilization: 0.0,
                imbalance: 0.0,
                realized_cycle_time: 0.0,
                throughput: 0.0,
                theoretical_throughput: config.available_time / cycle_time,
                production_rate: 0.0,
                capacity_utilization: 0.0,
                stations: Vec::new(),
                quality,
            });
        }

        let efficiency = line_efficiency(total_work_time, stations.len(), cycle_time);
        let avg_utilization = utilizations.iter().sum::<f64>() / utilizations.len() as f64;
        let max_utilization = utilizations.iter().copied().fold(f64::MIN, f64::max);
        let min_utilization = utilizations.iter().copied().fold(f64::MAX, f64::min);

        let (throughput, production_rate) = if realized_cycle_time > 0.0 {
            (
                config.available_time / realized_cycle_time,
                1.0 / realized_cycle_time,
            )
        } else {
            (0.0, 0.0)
        };
        let capacity_utilization = if throughput > 0.0 {
            (config.daily_demand / throughput * 100.0).min(100.0)
        } else {
            0.0
        };

        Ok(Self {
            cycle_time,
            daily_demand: config.daily_demand,
            available_time: config.available_time,
            total_work_time,
            station_count: stations.len(),
            theoretical_min_stations: theoretical_min,
            efficiency,
            balance_delay: 100.0 - efficiency,
            total_idle_time: station_metrics.iter().map(|s| s.idle_time).sum(),
            smoothness_index: smoothness_index(&station_times, cycle_time),
            avg_utilization,
            min_utilization,
            max_utilization,
            imbalance: max_utilization - min_utilization,
            realized_cycle_time,
            throughput,
            theoretical_throughput: config.available_time / cycle_time,
            production_rate,
            capacity_utilization,
            stations: station_metrics,
            quality,
        })
    }

    /// Utilization (%) of each station, in line order.
    pub fn per_station_utilization(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.utilization).collect()
    }

    /// Stations carrying the longest workload.
    pub fn bottlenecks(&self) -> impl Iterator<Item = &StationMetrics> {
        self.stations.iter().filter(|s| s.is_bottleneck)
    }

    /// Whether the line reaches `min_efficiency` (%) and meets demand at
    /// its realized cycle time.
    pub fn meets_target(&self, min_efficiency: f64) -> bool {
        self.efficiency >= min_efficiency && self.throughput >= self.daily_demand
    }
}
