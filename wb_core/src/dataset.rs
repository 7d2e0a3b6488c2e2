//! # Built-in 777-300ER Dataset
//!
//! An embedded copy of the Boeing 777-300ER reference tables, so the engine
//! (and the demo CLI) can run without a data directory on disk. The same
//! tables can instead be loaded from JSON via [`file_io`](crate::file_io);
//! this module is the fallback and the fixture the test suite runs against.
//!
//! The cabin map is abridged to the forward rows of each class; cargo holds
//! and fuel tanks are complete.

use once_cell::sync::Lazy;

use crate::aircraft::{AircraftData, AircraftReference, DowOption};
use crate::calculations::{ArmTable, WeightLimits};
use crate::errors::WbResult;
use crate::loads::passengers::CabinSeat;
use crate::loads::{CargoSlot, FuelTank, SeatRow, TankRole, UldSpec};

static BOEING_777_300ER: Lazy<AircraftData> = Lazy::new(|| {
    // Literal tables below; a failure here is a defect in this module.
    match build() {
        Ok(data) => data,
        Err(e) => panic!("built-in 777-300ER dataset is invalid: {e}"),
    }
});

/// The built-in 777-300ER reference dataset.
pub fn boeing_777_300er() -> &'static AircraftData {
    &BOEING_777_300ER
}

fn seat_row(row: u32, class: &str, arm_in: f64, letters: &[&str]) -> SeatRow {
    SeatRow {
        row,
        class: class.to_string(),
        seats: letters
            .iter()
            .map(|letter| CabinSeat {
                seat: letter.to_string(),
                arm_in,
            })
            .collect(),
    }
}

fn seat_map() -> Vec<SeatRow> {
    const BUSINESS: [&str; 6] = ["A", "C", "D", "G", "H", "K"];
    const ECONOMY: [&str; 9] = ["A", "B", "C", "D", "E", "F", "G", "H", "K"];

    vec![
        seat_row(1, "F", 465.0, &BUSINESS),
        seat_row(2, "F", 504.0, &BUSINESS),
        seat_row(3, "F", 543.0, &BUSINESS),
        seat_row(4, "F", 582.0, &BUSINESS),
        seat_row(10, "Y", 1100.0, &ECONOMY),
        seat_row(11, "Y", 1132.0, &ECONOMY),
        seat_row(12, "Y", 1164.0, &ECONOMY),
        seat_row(13, "Y", 1196.0, &ECONOMY),
    ]
}

fn cargo_slots() -> Vec<CargoSlot> {
    let ake = || vec![UldSpec::new("AKE", 1587.0)];
    let pmc = || vec![UldSpec::new("PMC", 5035.0)];

    vec![
        // Forward hold: two container pairs, each shadowed by a pallet.
        CargoSlot::container("Forward", "11L", 860.0, ake()),
        CargoSlot::container("Forward", "11R", 860.0, ake()),
        CargoSlot::pallet(
            "Forward",
            "11P",
            860.0,
            pmc(),
            vec!["11L".to_string(), "11R".to_string()],
        ),
        CargoSlot::container("Forward", "12L", 925.0, ake()),
        CargoSlot::container("Forward", "12R", 925.0, ake()),
        CargoSlot::pallet(
            "Forward",
            "12P",
            925.0,
            pmc(),
            vec!["12L".to_string(), "12R".to_string()],
        ),
        // Aft hold
        CargoSlot::container("Aft", "31L", 1580.0, ake()),
        CargoSlot::container("Aft", "31R", 1580.0, ake()),
        CargoSlot::pallet(
            "Aft",
            "31P",
            1580.0,
            pmc(),
            vec!["31L".to_string(), "31R".to_string()],
        ),
        CargoSlot::container("Aft", "32L", 1645.0, ake()),
        CargoSlot::container("Aft", "32R", 1645.0, ake()),
        // Bulk hold, loose-loaded
        CargoSlot::container("Bulk", "53", 1741.0, vec![UldSpec::new("BULK", 2925.0)]),
    ]
}

fn fuel_tanks() -> WbResult<Vec<FuelTank>> {
    let main_table = ArmTable::new(vec![
        (0.0, 1361.5),
        (10000.0, 1357.9),
        (25000.0, 1352.6),
        (41370.0, 1349.8),
    ])?;

    Ok(vec![
        FuelTank {
            name: "Main Tank 1".to_string(),
            max_l: 41370.0,
            max_kg: 33171.0,
            arm_table: main_table.clone(),
            role: TankRole::CombinableMain,
        },
        FuelTank {
            name: "Main Tank 2".to_string(),
            max_l: 41370.0,
            max_kg: 33171.0,
            arm_table: main_table,
            role: TankRole::CombinableMain,
        },
        FuelTank {
            name: "Center Tank".to_string(),
            max_l: 103314.0,
            max_kg: 87887.0,
            arm_table: ArmTable::new(vec![
                (0.0, 1190.4),
                (30000.0, 1196.8),
                (70000.0, 1202.3),
                (103314.0, 1206.1),
            ])?,
            role: TankRole::Standalone,
        },
    ])
}

/// Combined arm table for both main tanks, indexed by their summed liters.
fn combined_main_table() -> WbResult<ArmTable> {
    ArmTable::new(vec![
        (0.0, 1360.7),
        (20000.0, 1356.4),
        (50000.0, 1351.9),
        (82740.0, 1349.2),
    ])
}

fn reference() -> AircraftReference {
    AircraftReference {
        dow_options: vec![
            DowOption {
                reg: "PH-BVA".to_string(),
                dow_weight_kg: 170200.0,
                doi: 45.3,
                fuel_factor_percent: None,
            },
            DowOption {
                reg: "PH-BVB".to_string(),
                dow_weight_kg: 170650.0,
                doi: 46.1,
                fuel_factor_percent: None,
            },
            DowOption {
                reg: "PH-BVC".to_string(),
                dow_weight_kg: 170450.0,
                doi: 45.8,
                fuel_factor_percent: None,
            },
        ],
        le_mac_in: Some(1174.5),
        mac_length_in: Some(278.5),
    }
}

fn build() -> WbResult<AircraftData> {
    Ok(AircraftData {
        seat_map: seat_map(),
        cargo_slots: cargo_slots(),
        fuel_tanks: fuel_tanks()?,
        combined_arm_table: combined_main_table()?,
        reference: reference(),
        limits: WeightLimits {
            mzfw_kg: 237682.0,
            mtow_kg: 351534.0,
            mtw_kg: 352441.0,
            mfw_kg: 167829.0,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{SlotKey, SlotKind};

    #[test]
    fn test_dataset_builds() {
        let data = boeing_777_300er();
        assert_eq!(data.fuel_tanks.len(), 3);
        assert_eq!(data.reference.dow_options[0].reg, "PH-BVA");
        assert_eq!(data.limits.mzfw_kg, 237682.0);
    }

    #[test]
    fn test_pallets_block_their_containers() {
        let data = boeing_777_300er();
        let pallet = data
            .cargo_slots
            .iter()
            .find(|s| s.key() == SlotKey::new("Forward", "11P"))
            .unwrap();
        match &pallet.kind {
            SlotKind::Pallet { blocks } => {
                assert_eq!(blocks, &["11L".to_string(), "11R".to_string()]);
            }
            SlotKind::Container => panic!("11P must be a pallet"),
        }
    }

    #[test]
    fn test_seat_map_shape() {
        let data = boeing_777_300er();
        let total: usize = data.seat_map.iter().map(|r| r.seats.len()).sum();
        assert_eq!(total, 60);
        assert!(data.seat_map.iter().any(|r| r.row == 10));
    }

    #[test]
    fn test_main_tanks_are_combinable_pair() {
        let data = boeing_777_300er();
        let mains: Vec<_> = data
            .fuel_tanks
            .iter()
            .filter(|t| t.role == TankRole::CombinableMain)
            .collect();
        assert_eq!(mains.len(), 2);
        assert!(mains.iter().all(|t| t.max_l == 41370.0));
    }

    #[test]
    fn test_dataset_serde_round_trip() {
        let data = boeing_777_300er();
        let json = serde_json::to_string(data).unwrap();
        let back: AircraftData = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, data);
    }
}
