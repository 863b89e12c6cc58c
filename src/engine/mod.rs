//! Snapshot diffing, utilization and process ranking. Pure computation: no
//! I/O happens below this module.

pub mod aggregate;
pub mod delta;
pub mod rank;

pub use aggregate::{CpuSummary, core_usage, usage_percent};
pub use delta::{Delta, clamped_diff};
pub use rank::{DEFAULT_TOP_N, Priority, RankedProcess, rank_processes};
