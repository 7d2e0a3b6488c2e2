//! # Aircraft Reference Data and Runtime Configuration
//!
//! Immutable per-session reference data (registrations with certified DOW
//! and DOI, geometry, limits) and the runtime-adjustable [`EngineConfig`].
//!
//! Defaults are the 777-300ER figures the engine was built against; other
//! aircraft of the type are described entirely by their data tables.

use serde::{Deserialize, Serialize};

use crate::calculations::{ArmTable, WeightLimits};
use crate::errors::{WbError, WbResult};
use crate::loads::fuel::{DEFAULT_FUEL_DENSITY_KG_L, FUEL_DENSITY_MAX_KG_L, FUEL_DENSITY_MIN_KG_L};
use crate::loads::{CargoSlot, FuelTank, SeatMap};

/// Default uniform passenger weight, kg.
pub const DEFAULT_PASSENGER_WEIGHT_KG: f64 = 88.5;
/// Leading edge of the Mean Aerodynamic Chord, inches from datum.
pub const DEFAULT_LE_MAC_IN: f64 = 1174.5;
/// Mean Aerodynamic Chord length, inches.
pub const DEFAULT_MAC_LENGTH_IN: f64 = 278.5;
/// KLM index reference arm, inches.
pub const DEFAULT_KLM_REFERENCE_ARM_IN: f64 = 1258.0;
/// KLM index scale divisor.
pub const DEFAULT_KLM_SCALE: f64 = 200000.0;
/// KLM index offset.
pub const DEFAULT_KLM_OFFSET: f64 = 50.0;

/// Certified dry-operating figures for one registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowOption {
    /// Aircraft registration ("PH-BVA", ...)
    pub reg: String,
    /// Dry Operating Weight, kg
    pub dow_weight_kg: f64,
    /// Dry Operating Index (KLM index of the DOW)
    #[serde(default)]
    pub doi: f64,
    /// Optional per-registration fuel correction, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_factor_percent: Option<f64>,
}

/// Aircraft reference record: the selectable registrations plus optional
/// geometry overrides carried in the same file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftReference {
    pub dow_options: Vec<DowOption>,

    /// Leading edge of MAC, inches; overrides the engine default if present
    #[serde(rename = "LEMAC_in", default, skip_serializing_if = "Option::is_none")]
    pub le_mac_in: Option<f64>,

    /// MAC length, inches; overrides the engine default if present
    #[serde(rename = "MAC_length_in", default, skip_serializing_if = "Option::is_none")]
    pub mac_length_in: Option<f64>,
}

impl AircraftReference {
    /// Find a registration's DOW record.
    pub fn dow_option(&self, reg: &str) -> WbResult<&DowOption> {
        self.dow_options
            .iter()
            .find(|d| d.reg == reg)
            .ok_or_else(|| WbError::RegistrationNotFound {
                reg: reg.to_string(),
            })
    }

    /// Registrations in file order.
    pub fn registrations(&self) -> impl Iterator<Item = &str> {
        self.dow_options.iter().map(|d| d.reg.as_str())
    }
}

/// Runtime configuration, all overridable while the session runs.
///
/// Values are validated at the point of use (the fuel module checks the
/// density band on `set_density`, the converters reject zero MAC length and
/// zero scale); [`validate`](Self::validate) runs the same checks eagerly
/// for callers that want to fail fast after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Uniform weight per passenger, kg
    pub passenger_weight_kg: f64,
    /// Fuel density, kg/L
    pub fuel_density_kg_l: f64,
    /// Leading edge of MAC, inches
    pub le_mac_in: f64,
    /// MAC length, inches
    pub mac_length_in: f64,
    /// KLM index reference arm, inches
    pub klm_reference_arm_in: f64,
    /// KLM index scale divisor
    pub klm_scale: f64,
    /// KLM index offset
    pub klm_offset: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            passenger_weight_kg: DEFAULT_PASSENGER_WEIGHT_KG,
            fuel_density_kg_l: DEFAULT_FUEL_DENSITY_KG_L,
            le_mac_in: DEFAULT_LE_MAC_IN,
            mac_length_in: DEFAULT_MAC_LENGTH_IN,
            klm_reference_arm_in: DEFAULT_KLM_REFERENCE_ARM_IN,
            klm_scale: DEFAULT_KLM_SCALE,
            klm_offset: DEFAULT_KLM_OFFSET,
        }
    }
}

impl EngineConfig {
    /// Apply the geometry overrides an aircraft reference record carries.
    pub fn apply_reference(&mut self, reference: &AircraftReference) {
        if let Some(le_mac) = reference.le_mac_in {
            self.le_mac_in = le_mac;
        }
        if let Some(mac_length) = reference.mac_length_in {
            self.mac_length_in = mac_length;
        }
    }

    /// Check every configuration value against its valid range.
    pub fn validate(&self) -> WbResult<()> {
        if self.passenger_weight_kg <= 0.0 {
            return Err(WbError::config(
                "passenger_weight_kg",
                "Passenger weight must be positive",
            ));
        }
        if !(FUEL_DENSITY_MIN_KG_L..=FUEL_DENSITY_MAX_KG_L).contains(&self.fuel_density_kg_l) {
            return Err(WbError::config(
                "fuel_density_kg_l",
                format!(
                    "Fuel density must lie between {FUEL_DENSITY_MIN_KG_L} and {FUEL_DENSITY_MAX_KG_L} kg/L"
                ),
            ));
        }
        if self.mac_length_in == 0.0 {
            return Err(WbError::config("mac_length_in", "MAC length must be nonzero"));
        }
        if self.klm_scale == 0.0 {
            return Err(WbError::config("klm_scale", "Index scale must be nonzero"));
        }
        Ok(())
    }
}

/// Everything needed to start a session for one aircraft type: the five
/// reference tables the engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftData {
    pub seat_map: SeatMap,
    pub cargo_slots: Vec<CargoSlot>,
    pub fuel_tanks: Vec<FuelTank>,
    /// Arm table used when both combinable main tanks hold fuel
    pub combined_arm_table: ArmTable,
    pub reference: AircraftReference,
    pub limits: WeightLimits,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut config = EngineConfig::default();
        config.mac_length_in = 0.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.fuel_density_kg_l = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dow_option_lookup() {
        let reference = AircraftReference {
            dow_options: vec![DowOption {
                reg: "PH-BVA".to_string(),
                dow_weight_kg: 170200.0,
                doi: 45.3,
                fuel_factor_percent: None,
            }],
            le_mac_in: None,
            mac_length_in: None,
        };
        assert_eq!(reference.dow_option("PH-BVA").unwrap().doi, 45.3);
        assert_eq!(
            reference.dow_option("PH-XXX").unwrap_err().error_code(),
            "REGISTRATION_NOT_FOUND"
        );
    }

    #[test]
    fn test_reference_geometry_overrides() {
        let reference = AircraftReference {
            dow_options: vec![],
            le_mac_in: Some(1100.0),
            mac_length_in: None,
        };
        let mut config = EngineConfig::default();
        config.apply_reference(&reference);
        assert_eq!(config.le_mac_in, 1100.0);
        assert_eq!(config.mac_length_in, DEFAULT_MAC_LENGTH_IN);
    }

    #[test]
    fn test_reference_deserializes_from_file_shape() {
        let json = r#"{
            "dow_options": [
                {"reg": "PH-BVA", "dow_weight_kg": 170200, "doi": 45.3},
                {"reg": "PH-BVB", "dow_weight_kg": 170650, "doi": 46.1, "fuel_factor_percent": 0.2}
            ],
            "LEMAC_in": 1174.5,
            "MAC_length_in": 278.5
        }"#;
        let reference: AircraftReference = serde_json::from_str(json).unwrap();
        assert_eq!(reference.dow_options.len(), 2);
        assert_eq!(reference.le_mac_in, Some(1174.5));
        assert_eq!(
            reference.dow_options[1].fuel_factor_percent,
            Some(0.2)
        );
    }
}
