//! Line and balancer configuration.
//!
//! `LineConfig` carries the production targets the cycle time is derived
//! from. `BalancerConfig` tunes the RPW heuristic itself.

use serde::{Deserialize, Serialize};

use crate::error::{BalanceError, Result};

/// Production targets for a line.
///
/// Time units are whatever the caller uses for task durations
/// (typically minutes per shift or per day).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    /// Units that must be produced per period.
    pub daily_demand: f64,
    /// Productive time available per period.
    pub available_time: f64,
}

impl LineConfig {
    /// Creates a configuration from demand and available time.
    pub fn new(daily_demand: f64, available_time: f64) -> Self {
        Self {
            daily_demand,
            available_time,
        }
    }

    /// Checks that both inputs are positive, finite numbers.
    pub fn validate(&self) -> Result<()> {
        if !(self.daily_demand.is_finite() && self.daily_demand > 0.0) {
            return Err(BalanceError::InvalidConfiguration {
                message: format!("daily demand must be positive, got {}", self.daily_demand),
            });
        }
        if !(self.available_time.is_finite() && self.available_time > 0.0) {
            return Err(BalanceError::InvalidConfiguration {
                message: format!(
                    "available time must be positive, got {}",
                    self.available_time
                ),
            });
        }
        Ok(())
    }

    /// Cycle time: `available_time / daily_demand`.
    pub fn cycle_time(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.available_time / self.daily_demand)
    }
}

/// How tasks with equal positional weight are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreaker {
    /// Lexicographic by task id.
    #[default]
    ById,
    /// Fewer direct predecessors first, then by id.
    FewestPredecessors,
}

/// Tuning knobs for the RPW balancer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancerConfig {
    /// Ordering among equal positional weights.
    pub tie_breaker: TieBreaker,
    /// Tolerance for capacity comparisons, as a fraction of the cycle time.
    pub epsilon: f64,
}

impl BalancerConfig {
    /// Sets the tie breaker.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Sets the relative comparison tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            tie_breaker: TieBreaker::ById,
            epsilon: 1e-9,
        }
    }
}
