//! Battery schedule computation and reporting.

/// Threshold-based dispatch over the hourly horizon.
pub mod scheduler;
/// Cost and utilization summary of a computed schedule.
pub mod summary;
pub mod types;

// Re-export the main types for convenience
pub use scheduler::ThresholdPolicy;
pub use scheduler::{schedule, schedule_with_policy};
pub use summary::ScheduleSummary;
pub use types::{BatterySpec, HourRecord, HourlyInputs, Schedule, ScheduleError};
