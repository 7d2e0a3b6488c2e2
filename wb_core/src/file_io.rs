//! # Reference Data Loading
//!
//! Read-only serde_json loaders for the five reference data files a session
//! needs. The engine never writes: load selections live in memory only.
//!
//! ## File layout
//!
//! A data directory holds:
//!
//! - `seat_map_new.json` - cabin rows with per-seat arms
//! - `cargo_positions.json` - ULD slots; pallet records carry a `blocks` list
//! - `fuel_tanks.json` - tanks with arm tables, plus one
//!   `main_tanks_combined_table` record holding the combined table
//! - `aircraft_reference.json` - registrations with DOW/DOI
//! - `limits.json` - certified weight limits
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wb_core::file_io::load_aircraft_data;
//!
//! let data = load_aircraft_data(Path::new("data")).unwrap();
//! println!("{} registrations", data.reference.dow_options.len());
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::aircraft::{AircraftData, AircraftReference};
use crate::calculations::{ArmTable, WeightLimits};
use crate::errors::{WbError, WbResult};
use crate::loads::{CargoSlot, FuelTank, SeatMap, TankRole};

/// Standard reference file names within a data directory.
pub const SEAT_MAP_FILE: &str = "seat_map_new.json";
pub const CARGO_POSITIONS_FILE: &str = "cargo_positions.json";
pub const FUEL_TANKS_FILE: &str = "fuel_tanks.json";
pub const AIRCRAFT_REFERENCE_FILE: &str = "aircraft_reference.json";
pub const LIMITS_FILE: &str = "limits.json";

/// Record name of the combined main-tank table inside `fuel_tanks.json`.
pub const COMBINED_TABLE_RECORD: &str = "main_tanks_combined_table";

/// Tank names treated as the combinable main pair.
pub const MAIN_TANK_NAMES: [&str; 2] = ["Main Tank 1", "Main Tank 2"];

fn read_json<T: DeserializeOwned>(path: &Path) -> WbResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| WbError::file_error("read", path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| WbError::SerializationError {
        reason: format!("{}: {e}", path.display()),
    })
}

/// Load the cabin seat map.
pub fn load_seat_map(path: &Path) -> WbResult<SeatMap> {
    read_json(path)
}

/// Load the cargo slot table. Container/pallet tagging happens in the
/// [`CargoSlot`] deserializer from the presence of a `blocks` list.
pub fn load_cargo_slots(path: &Path) -> WbResult<Vec<CargoSlot>> {
    read_json(path)
}

/// Wire shape of one `fuel_tanks.json` record. The combined-table record
/// carries only a name and a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTankRecord {
    tank: String,
    #[serde(default)]
    max_l: f64,
    #[serde(default)]
    max_kg: f64,
    arm_table: ArmTable,
}

/// Load the fuel tank table, splitting out the combined main-tank table
/// record and tagging the two main tanks as combinable.
pub fn load_fuel_tanks(path: &Path) -> WbResult<(Vec<FuelTank>, ArmTable)> {
    let records: Vec<RawTankRecord> = read_json(path)?;

    let mut tanks = Vec::new();
    let mut combined = None;
    for record in records {
        if record.tank == COMBINED_TABLE_RECORD {
            combined = Some(record.arm_table);
            continue;
        }
        let role = if MAIN_TANK_NAMES.contains(&record.tank.as_str()) {
            TankRole::CombinableMain
        } else {
            TankRole::Standalone
        };
        tanks.push(FuelTank {
            name: record.tank,
            max_l: record.max_l,
            max_kg: record.max_kg,
            arm_table: record.arm_table,
            role,
        });
    }

    let combined = combined.ok_or_else(|| {
        WbError::config(
            "fuel_tanks",
            format!("Missing '{COMBINED_TABLE_RECORD}' record"),
        )
    })?;
    Ok((tanks, combined))
}

/// Load the aircraft reference record.
pub fn load_aircraft_reference(path: &Path) -> WbResult<AircraftReference> {
    read_json(path)
}

/// Load the certified weight limits.
pub fn load_limits(path: &Path) -> WbResult<WeightLimits> {
    read_json(path)
}

/// Load all five reference files from a data directory.
pub fn load_aircraft_data(dir: &Path) -> WbResult<AircraftData> {
    let (fuel_tanks, combined_arm_table) = load_fuel_tanks(&dir.join(FUEL_TANKS_FILE))?;
    Ok(AircraftData {
        seat_map: load_seat_map(&dir.join(SEAT_MAP_FILE))?,
        cargo_slots: load_cargo_slots(&dir.join(CARGO_POSITIONS_FILE))?,
        fuel_tanks,
        combined_arm_table,
        reference: load_aircraft_reference(&dir.join(AIRCRAFT_REFERENCE_FILE))?,
        limits: load_limits(&dir.join(LIMITS_FILE))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("wb_core_{}_{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_fuel_tanks_splits_combined_record() {
        let path = temp_file(
            "fuel_tanks.json",
            r#"[
                {"tank": "Main Tank 1", "max_l": 41370, "max_kg": 33171,
                 "arm_table": [[0, 1350], [41370, 1335]]},
                {"tank": "Main Tank 2", "max_l": 41370, "max_kg": 33171,
                 "arm_table": [[0, 1350], [41370, 1335]]},
                {"tank": "Center Tank", "max_l": 103314, "max_kg": 87887,
                 "arm_table": [[0, 1180], [103314, 1205]]},
                {"tank": "main_tanks_combined_table",
                 "arm_table": [[0, 1348], [82740, 1334]]}
            ]"#,
        );
        let (tanks, combined) = load_fuel_tanks(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(tanks.len(), 3);
        assert_eq!(tanks[0].role, TankRole::CombinableMain);
        assert_eq!(tanks[2].role, TankRole::Standalone);
        assert_eq!(combined.lookup(0.0), 1348.0);
    }

    #[test]
    fn test_missing_combined_record_is_config_error() {
        let path = temp_file(
            "fuel_tanks_bad.json",
            r#"[{"tank": "Main Tank 1", "max_l": 41370, "max_kg": 33171,
                 "arm_table": [[0, 1350]]}]"#,
        );
        let err = load_fuel_tanks(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_load_limits() {
        let path = temp_file(
            "limits.json",
            r#"{"MZFW_kg": 237682, "MTOW_kg": 351534, "MTW_kg": 352441, "MFW_kg": 167829}"#,
        );
        let limits = load_limits(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(limits.mtow_kg, 351534.0);
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let err = load_limits(Path::new("/nonexistent/limits.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let path = temp_file("limits_bad.json", "{not json");
        let err = load_limits(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
