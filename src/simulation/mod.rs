//! Workload simulation and seek metrics.
//!
//! Replays request arrivals through an elevator and measures head
//! movement, so C-LOOK can be compared against the arrival-order baseline.
//!
//! # Components
//!
//! - `WorkloadGenerator`: seeded random requests; `sequential_copy` for a
//!   block-by-block file copy pattern
//! - `Simulation`: batched arrivals interleaved with dispatches
//! - `SeekKpi`: total, maximum and average seek distance plus wrap count

mod kpi;
mod runner;
mod workload;

pub use kpi::SeekKpi;
pub use runner::{Simulation, SimulationOutcome};
pub use workload::{sequential_copy, WorkloadConfig, WorkloadGenerator};
