//! Input/output helpers: CSV telemetry and optional chart rendering.

pub mod export;
#[cfg(feature = "plot")]
pub mod plot;
