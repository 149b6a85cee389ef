//! Line balancing domain models.
//!
//! # Domain Mappings
//!
//! | u-linebalance | Automotive | Electronics | Food Processing |
//! |---------------|------------|-------------|-----------------|
//! | Task | Assembly Step | Placement/Solder Step | Prep Step |
//! | Station | Workstation | Cell | Prep Table |
//! | ProductionLine | Assembly Line | SMT Line | Packing Line |

mod line;
mod station;
mod task;

pub use line::ProductionLine;
pub(crate) use station::within_capacity;
pub use station::{Station, StationTask};
pub use task::Task;
