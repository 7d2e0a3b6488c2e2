//! # wb_core - Aircraft Weight & Balance Calculation Engine
//!
//! `wb_core` is the computational heart of the weight & balance tool: a
//! deterministic engine that turns a load plan (passengers, ULD cargo, fuel)
//! into the four-point balance trace DOW -> +Pax -> ZFW -> TOW and checks it
//! against the certified weight limits. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: Every recalculation is a full, idempotent pass over
//!   current state; no caching, no hidden ordering
//! - **JSON-First**: Reference data and results implement
//!   Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Single-Threaded**: Plain function calls, external synchronization if
//!   shared
//!
//! ## Quick Start
//!
//! ```rust
//! use wb_core::aircraft::EngineConfig;
//! use wb_core::engine::BalanceEngine;
//! use wb_core::dataset;
//!
//! let mut engine =
//!     BalanceEngine::new(dataset::boeing_777_300er().clone(), EngineConfig::default()).unwrap();
//!
//! engine.passengers_mut().select_row(10);
//! engine.fuel_mut().set_liters("Center Tank", 25000.0).unwrap();
//!
//! let trace = engine.build_trace().unwrap();
//! println!("TOW {:.1} kg at {:.2} %MAC", trace.tow.weight_kg, trace.tow.mac_percent);
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - The [`BalanceEngine`] facade owning session state
//! - [`calculations`] - Pure calculation leaves (interpolation, index, %MAC,
//!   trace, limits)
//! - [`loads`] - The three load categories: seats, cargo slots, fuel tanks
//! - [`aircraft`] - Reference data records and runtime configuration
//! - [`dataset`] - Built-in 777-300ER reference tables
//! - [`file_io`] - JSON loaders for reference data directories
//! - [`errors`] - Structured error types

pub mod aircraft;
pub mod calculations;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod file_io;
pub mod loads;

// Re-export commonly used types at crate root for convenience
pub use aircraft::{AircraftData, EngineConfig};
pub use calculations::{BalanceTrace, LimitViolation, WeightLimits};
pub use engine::BalanceEngine;
pub use errors::{WbError, WbResult};
