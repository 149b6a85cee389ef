//! Balance quality indicators and improvement hints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Utilization (%) every station must reach for a line to count as
/// perfectly balanced.
pub const BALANCED_UTILIZATION: f64 = 95.0;
/// Utilization (%) at or above which a station is a bottleneck.
pub const BOTTLENECK_UTILIZATION: f64 = 98.0;

/// Qualitative judgement of a station assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIndicators {
    /// Every station is at least 95% utilized.
    pub perfectly_balanced: bool,
    /// Stations at or above 98% utilization.
    pub bottleneck_count: usize,
    /// `max(0, 100 − variance of utilizations)`; 100 for a single station.
    pub smoothing_factor: f64,
    /// `min utilization / max utilization × 100`.
    pub distribution_index: f64,
    /// Suggested improvements, most severe first.
    pub recommendations: Vec<Recommendation>,
}

/// An improvement hint derived from station utilizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Some station runs above 95%; the line has no slack for variation.
    RelieveBottlenecks,
    /// Some station runs below 70%.
    ConsolidateStations,
    /// Utilization spread exceeds 20 points.
    Rebalance,
    /// Average utilization is below 80%.
    LowEfficiency,
    /// Far more stations than the theoretical minimum.
    TooManyStations {
        /// Stations produced by the balancer.
        achieved: usize,
        /// `ceil(total work / cycle time)`.
        theoretical_min: usize,
    },
    /// Nothing to improve.
    Satisfactory,
    /// No stations to judge.
    NoStations,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RelieveBottlenecks => f.write_str(
                "reduce the cycle load or redistribute tasks to avoid bottlenecks",
            ),
            Self::ConsolidateStations => {
                f.write_str("some stations are underused; consider consolidating tasks")
            }
            Self::Rebalance => {
                f.write_str("workload is significantly uneven; review the task distribution")
            }
            Self::LowEfficiency => {
                f.write_str("overall efficiency is low; consider fewer stations")
            }
            Self::TooManyStations {
                achieved,
                theoretical_min,
            } => write!(
                f,
                "station count ({achieved}) is high compared to the theoretical minimum ({theoretical_min})"
            ),
            Self::Satisfactory => f.write_str("the current balance is satisfactory"),
            Self::NoStations => f.write_str("no stations defined"),
        }
    }
}

impl QualityIndicators {
    /// Evaluates per-station utilizations (percent).
    pub fn evaluate(utilizations: &[f64], theoretical_min: usize) -> Self {
        if utilizations.is_empty() {
            return Self {
                perfectly_balanced: false,
                bottleneck_count: 0,
                smoothing_factor: 0.0,
                distribution_index: 0.0,
                recommendations: vec![Recommendation::NoStations],
            };
        }

        let n = utilizations.len() as f64;
        let avg = utilizations.iter().sum::<f64>() / n;
        let max = utilizations.iter().copied().fold(f64::MIN, f64::max);
        let min = utilizations.iter().copied().fold(f64::MAX, f64::min);

        let smoothing_factor = if utilizations.len() > 1 {
            let variance = utilizations.iter().map(|u| (u - avg).powi(2)).sum::<f64>() / n;
            (100.0 - variance).max(0.0)
        } else {
            100.0
        };

        let distribution_index = if max > 0.0 { min / max * 100.0 } else { 100.0 };

        let mut recommendations = Vec::new();
        if max > BALANCED_UTILIZATION {
            recommendations.push(Recommendation::RelieveBottlenecks);
        }
        if min < 70.0 {
            recommendations.push(Recommendation::ConsolidateStations);
        }
        if max - min > 20.0 {
            recommendations.push(Recommendation::Rebalance);
        }
        if avg < 80.0 {
            recommendations.push(Recommendation::LowEfficiency);
        }
        if utilizations.len() > theoretical_min + 2 {
            recommendations.push(Recommendation::TooManyStations {
                achieved: utilizations.len(),
                theoretical_min,
            });
        }
        if recommendations.is_empty() {
            recommendations.push(Recommendation::Satisfactory);
        }

        Self {
            perfectly_balanced: utilizations.iter().all(|&u| u >= BALANCED_UTILIZATION),
            bottleneck_count: utilizations
                .iter()
                .filter(|&&u| u >= BOTTLENECK_UTILIZATION)
                .count(),
            smoothing_factor,
            distribution_index,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_line() {
        let q = QualityIndicators::evaluate(&[100.0, 100.0], 2);
        assert!(q.perfectly_balanced);
        assert_eq!(q.bottleneck_count, 2);
        assert!((q.smoothing_factor - 100.0).abs() < 1e-10);
        assert!((q.distribution_index - 100.0).abs() < 1e-10);
        // Full stations leave no slack
        assert_eq!(q.recommendations, vec![Recommendation::RelieveBottlenecks]);
    }

    #[test]
    fn test_satisfactory_line() {
        let q = QualityIndicators::evaluate(&[90.0, 85.0, 88.0], 3);
        assert!(!q.perfectly_balanced);
        assert_eq!(q.bottleneck_count, 0);
        assert_eq!(q.recommendations, vec![Recommendation::Satisfactory]);
    }

    #[test]
    fn test_uneven_line() {
        let q = QualityIndicators::evaluate(&[100.0, 50.0], 2);
        assert!((q.distribution_index - 50.0).abs() < 1e-10);
        // variance = 625 → clamped at zero
        assert!((q.smoothing_factor - 0.0).abs() < 1e-10);
        assert!(q.recommendations.contains(&Recommendation::ConsolidateStations));
        assert!(q.recommendations.contains(&Recommendation::Rebalance));
        assert!(q.recommendations.contains(&Recommendation::LowEfficiency));
    }

    #[test]
    fn test_too_many_stations() {
        let q = QualityIndicators::evaluate(&[80.0; 6], 3);
        assert!(q.recommendations.contains(&Recommendation::TooManyStations {
            achieved: 6,
            theoretical_min: 3
        }));
    }

    #[test]
    fn test_single_station_smoothing() {
        let q = QualityIndicators::evaluate(&[60.0], 1);
        assert!((q.smoothing_factor - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_stations() {
        let q = QualityIndicators::evaluate(&[], 0);
        assert!(!q.perfectly_balanced);
        assert_eq!(q.recommendations, vec![Recommendation::NoStations]);
    }

    #[test]
    fn test_recommendation_text() {
        let r = Recommendation::TooManyStations {
            achieved: 7,
            theoretical_min: 4,
        };
        assert_eq!(
            r.to_string(),
            "station count (7) is high compared to the theoretical minimum (4)"
        );
    }
}
