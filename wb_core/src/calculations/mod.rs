//! # Weight & Balance Calculations
//!
//! Pure, stateless calculation leaves. Nothing here holds session state;
//! the load modules and the engine feed these functions and consume their
//! results.
//!
//! - [`interpolate`] - Breakpoint interpolation over arm tables
//! - [`index`] - KLM index <-> (weight, arm) conversion
//! - [`mac`] - Arm to %MAC conversion
//! - [`trace`] - The four-point sequential balance trace
//! - [`limits`] - Certified weight limit checks

pub mod index;
pub mod interpolate;
pub mod limits;
pub mod mac;
pub mod trace;

// Re-export commonly used items
pub use index::{arm_from_index, index_from};
pub use interpolate::ArmTable;
pub use limits::{check_limits, LimitKind, LimitViolation, WeightLimits};
pub use mac::mac_percent;
pub use trace::{build_trace, BalancePoint, BalanceTrace, IndexBreakdown, TraceInput};
