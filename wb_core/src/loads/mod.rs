//! # Load Modules
//!
//! Mutable session state for the three payload categories. Each module owns
//! its immutable reference data (seat map, cargo slot table, fuel tank
//! table) plus the current load selection, mutated only through its exposed
//! operations and fully resettable with a clear operation.
//!
//! - [`passengers`] - Seat selection over the cabin seat map
//! - [`cargo`] - ULD slots with container/pallet mutual-exclusion blocking
//! - [`fuel`] - Per-tank fuel with the combined main-tank arm table
//!
//! Every module reports its contribution as a [`CategoryTotals`], the
//! (weight, moment, CG arm) triple the trace builder consumes.

pub mod cargo;
pub mod fuel;
pub mod passengers;

use serde::{Deserialize, Serialize};

pub use cargo::{CargoBay, CargoItem, CargoSlot, SlotKey, SlotKind, UldSpec};
pub use fuel::{FuelSystem, FuelTank, TankFill, TankRole};
pub use passengers::{SeatMap, SeatRow, SeatSelection};

/// Aggregate (weight, moment, CG arm) for one load category.
///
/// The CG arm is moment/weight, zero when the category is empty. Weights and
/// moments are additive across categories; arms are not.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Total weight in kilograms
    pub weight_kg: f64,
    /// Total moment in kilogram-inches
    pub moment_kgin: f64,
    /// CG arm in inches (0 when weight is 0)
    pub arm_in: f64,
}

impl CategoryTotals {
    /// Build totals from accumulated weight and moment.
    pub fn from_sums(weight_kg: f64, moment_kgin: f64) -> Self {
        let arm_in = if weight_kg > 0.0 {
            moment_kgin / weight_kg
        } else {
            0.0
        };
        CategoryTotals {
            weight_kg,
            moment_kgin,
            arm_in,
        }
    }

    /// True when nothing is loaded in this category.
    pub fn is_empty(&self) -> bool {
        self.weight_kg == 0.0
    }
}

/// Round to one decimal, the physical scale reporting convention used for
/// entered weights and liters.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_from_sums() {
        let totals = CategoryTotals::from_sums(200.0, 250000.0);
        assert_eq!(totals.arm_in, 1250.0);
        assert!(!totals.is_empty());
    }

    #[test]
    fn test_empty_totals_have_zero_arm() {
        let totals = CategoryTotals::from_sums(0.0, 0.0);
        assert_eq!(totals.arm_in, 0.0);
        assert!(totals.is_empty());
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(12.35), 12.4);
        assert_eq!(round1(-0.04), -0.0);
    }
}
