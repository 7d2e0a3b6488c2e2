//! # Error Types
//!
//! Structured error types for the weight and balance engine. The taxonomy
//! follows three families:
//!
//! - **Configuration errors**: malformed or missing reference data (empty
//!   arm table, zero MAC length, zero-weight index reversal). Not recoverable
//!   by the engine.
//! - **Policy violations**: loading a blocked cargo slot, a weight outside
//!   the allowed ULD range, a fuel density outside the physical band. These
//!   reject the operation and leave state unchanged.
//! - **File errors**: reference data that could not be read or parsed.
//!
//! ## Example
//!
//! ```rust
//! use wb_core::errors::{WbError, WbResult};
//!
//! fn validate_density(density_kg_l: f64) -> WbResult<()> {
//!     if !(0.7309..=0.8507).contains(&density_kg_l) {
//!         return Err(WbError::invalid_input(
//!             "density_kg_l",
//!             density_kg_l.to_string(),
//!             "Fuel density must lie between 0.7309 and 0.8507 kg/L",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for engine operations
pub type WbResult<T> = Result<T, WbError>;

/// Structured error type for weight and balance operations.
///
/// Each variant carries enough context for the orchestration layer to
/// surface a useful message without string parsing.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum WbError {
    /// An input value is invalid (out of range, wrong shape, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Reference data or runtime configuration is unusable
    #[error("Configuration error in '{parameter}': {reason}")]
    ConfigError { parameter: String, reason: String },

    /// A cargo slot cannot be loaded because a blocking slot is occupied
    #[error("Slot {compartment}/{position} is blocked by loaded slot {blocked_by}")]
    SlotBlocked {
        compartment: String,
        position: String,
        blocked_by: String,
    },

    /// A cargo slot has no allowed ULD types
    #[error("No allowed ULDs for {position} in {compartment}")]
    NoUldAvailable {
        compartment: String,
        position: String,
    },

    /// A cargo slot key does not exist in the reference data
    #[error("Unknown cargo slot: {compartment}/{position}")]
    UnknownSlot {
        compartment: String,
        position: String,
    },

    /// A fuel tank name does not exist in the reference data
    #[error("Unknown fuel tank: {name}")]
    UnknownTank { name: String },

    /// A seat key does not exist in the seat map
    #[error("Unknown seat: row {row} seat {seat}")]
    UnknownSeat { row: u32, seat: String },

    /// An aircraft registration does not exist in the reference data
    #[error("Registration not found: {reg}")]
    RegistrationNotFound { reg: String },

    /// Reference data file could not be read
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl WbError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WbError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        WbError::ConfigError {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a SlotBlocked error
    pub fn slot_blocked(
        compartment: impl Into<String>,
        position: impl Into<String>,
        blocked_by: impl Into<String>,
    ) -> Self {
        WbError::SlotBlocked {
            compartment: compartment.into(),
            position: position.into(),
            blocked_by: blocked_by.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WbError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            WbError::InvalidInput { .. } => "INVALID_INPUT",
            WbError::ConfigError { .. } => "CONFIG_ERROR",
            WbError::SlotBlocked { .. } => "SLOT_BLOCKED",
            WbError::NoUldAvailable { .. } => "NO_ULD_AVAILABLE",
            WbError::UnknownSlot { .. } => "UNKNOWN_SLOT",
            WbError::UnknownTank { .. } => "UNKNOWN_TANK",
            WbError::UnknownSeat { .. } => "UNKNOWN_SEAT",
            WbError::RegistrationNotFound { .. } => "REGISTRATION_NOT_FOUND",
            WbError::FileError { .. } => "FILE_ERROR",
            WbError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }

    /// True for the policy-violation family: the operation was rejected and
    /// engine state is unchanged, so the caller may retry with new input.
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            WbError::SlotBlocked { .. }
                | WbError::NoUldAvailable { .. }
                | WbError::InvalidInput { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = WbError::invalid_input("weight_kg", "-5.0", "Weight must be non-negative");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: WbError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            WbError::config("mac_length_in", "zero").error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            WbError::slot_blocked("Forward", "11P", "Forward/11L").error_code(),
            "SLOT_BLOCKED"
        );
    }

    #[test]
    fn test_policy_violation_family() {
        assert!(WbError::slot_blocked("Aft", "31P", "Aft/31L").is_policy_violation());
        assert!(!WbError::config("mac_length_in", "zero").is_policy_violation());
    }

    #[test]
    fn test_display_messages() {
        let err = WbError::UnknownTank {
            name: "Wing Tank".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown fuel tank: Wing Tank");
    }
}
