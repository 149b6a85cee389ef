//! Assembly line balancing for the U-Engine ecosystem.
//!
//! Assigns precedence-constrained tasks to sequential workstations so that
//! no station exceeds the cycle time implied by demand, using the Ranked
//! Positional Weight (RPW) heuristic, and reports how well balanced the
//! result is.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Station`, `ProductionLine`
//! - **`config`**: Production targets and balancer settings
//! - **`validation`**: Task record checks, precedence DAG validation, cycle time feasibility
//! - **`balancing`**: Positional weights, RPW ranking and station assignment
//! - **`metrics`**: Efficiency, balance delay, smoothness, throughput, quality hints
//! - **`error`**: `BalanceError`, the single error type of the crate
//!
//! # Example
//!
//! ```
//! use u_linebalance::{LineConfig, ProductionLine, Task};
//!
//! let mut line = ProductionLine::new(LineConfig::new(1.0, 8.0));
//! line.add_task(Task::new("A", 5.0))?;
//! line.add_task(Task::new("B", 3.0).with_predecessor("A"))?;
//! line.add_task(Task::new("C", 4.0).with_predecessor("A"))?;
//!
//! let balance = line.balance()?;
//! assert_eq!(balance.station_task_ids(), vec![vec!["A", "B"], vec!["C"]]);
//! assert!((balance.metrics.efficiency - 75.0).abs() < 1e-9);
//! # Ok::<(), u_linebalance::BalanceError>(())
//! ```
//!
//! # References
//!
//! - Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//!   Positional Weight Technique"
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"
//! - Boysen, Fliedner & Scholl (2007), "A classification of assembly line
//!   balancing problems"

pub mod balancing;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod validation;

pub use balancing::{LineBalance, RpwBalancer};
pub use config::{BalancerConfig, LineConfig, TieBreaker};
pub use error::{BalanceError, Result};
pub use metrics::LineMetrics;
pub use models::{ProductionLine, Station, Task};
