//! # Fuel Aggregator
//!
//! Per-tank fuel state with liters-to-arm and liters-to-weight derivation.
//! Each tank has its own arm table; the two main wing tanks are covered by a
//! combined arm table that takes over only while both of them hold fuel, in
//! which case their individual contributions are excluded from the totals.
//!
//! ## Example
//!
//! ```rust
//! use wb_core::calculations::ArmTable;
//! use wb_core::loads::{FuelSystem, FuelTank, TankRole};
//!
//! let tanks = vec![
//!     FuelTank {
//!         name: "Main Tank 1".to_string(),
//!         max_l: 41370.0,
//!         max_kg: 33171.0,
//!         arm_table: ArmTable::new(vec![(0.0, 1300.0), (41370.0, 1320.0)]).unwrap(),
//!         role: TankRole::CombinableMain,
//!     },
//!     FuelTank {
//!         name: "Main Tank 2".to_string(),
//!         max_l: 41370.0,
//!         max_kg: 33171.0,
//!         arm_table: ArmTable::new(vec![(0.0, 1300.0), (41370.0, 1320.0)]).unwrap(),
//!         role: TankRole::CombinableMain,
//!     },
//! ];
//! let combined = ArmTable::new(vec![(0.0, 1305.0), (82740.0, 1315.0)]).unwrap();
//!
//! let mut fuel = FuelSystem::new(tanks, combined).unwrap();
//! fuel.set_liters("Main Tank 1", 5000.0).unwrap();
//! assert!(!fuel.totals().is_empty());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculations::ArmTable;
use crate::errors::{WbError, WbResult};
use crate::loads::{round1, CategoryTotals};

/// Valid physical band for jet fuel density, kg per liter.
pub const FUEL_DENSITY_MIN_KG_L: f64 = 0.7309;
pub const FUEL_DENSITY_MAX_KG_L: f64 = 0.8507;

/// Default fuel density used until overridden.
pub const DEFAULT_FUEL_DENSITY_KG_L: f64 = 0.8507;

/// Standalone tank versus one of the pair covered by the combined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TankRole {
    /// Contributes its own (weight, arm) unconditionally
    Standalone,
    /// One of the two main tanks replaced by the combined table when both
    /// hold fuel
    CombinableMain,
}

/// One fuel tank from the reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelTank {
    /// Tank name ("Main Tank 1", "Center Tank", ...)
    pub name: String,
    /// Maximum capacity in liters
    pub max_l: f64,
    /// Maximum capacity in kilograms
    pub max_kg: f64,
    /// Fill level (liters) to arm (inches) table
    pub arm_table: ArmTable,
    /// Standalone or combinable-main
    pub role: TankRole,
}

/// Current fill of one tank: entered liters plus the derived arm and weight
/// at the current density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankFill {
    pub liters: f64,
    pub arm_in: f64,
    pub weight_kg: f64,
}

/// Fuel state over the tank table.
///
/// Owns the immutable tank list and combined arm table plus the per-tank
/// fills. Liters are clamped to tank capacity and rounded to one decimal;
/// weights are liters x density, rounded to one decimal. Changing the
/// density recomputes every fill.
#[derive(Debug, Clone)]
pub struct FuelSystem {
    tanks: Vec<FuelTank>,
    combined_table: ArmTable,
    density_kg_l: f64,
    state: BTreeMap<String, TankFill>,
}

impl FuelSystem {
    /// Take ownership of the tank table and the combined main-tank table.
    ///
    /// Exactly two tanks must carry [`TankRole::CombinableMain`]; anything
    /// else is a reference-data configuration error.
    pub fn new(tanks: Vec<FuelTank>, combined_table: ArmTable) -> WbResult<Self> {
        let mains = tanks
            .iter()
            .filter(|t| t.role == TankRole::CombinableMain)
            .count();
        if mains != 2 {
            return Err(WbError::config(
                "fuel_tanks",
                format!("Expected exactly 2 combinable main tanks, found {mains}"),
            ));
        }
        for tank in &tanks {
            tank.arm_table.validate()?;
        }
        combined_table.validate()?;
        Ok(FuelSystem {
            tanks,
            combined_table,
            density_kg_l: DEFAULT_FUEL_DENSITY_KG_L,
            state: BTreeMap::new(),
        })
    }

    /// The tank table.
    pub fn tanks(&self) -> &[FuelTank] {
        &self.tanks
    }

    /// Current fuel density in kg/L.
    pub fn density_kg_l(&self) -> f64 {
        self.density_kg_l
    }

    fn tank(&self, name: &str) -> WbResult<&FuelTank> {
        self.tanks
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| WbError::UnknownTank {
                name: name.to_string(),
            })
    }

    /// Set a tank's fill level in liters.
    ///
    /// Liters are clamped to `[0, max_l]` and rounded to one decimal. The
    /// arm comes from the tank's own table; the combined substitution
    /// happens only in [`totals`](Self::totals).
    pub fn set_liters(&mut self, name: &str, liters: f64) -> WbResult<()> {
        let tank = self.tank(name)?;
        let liters = round1(liters.clamp(0.0, tank.max_l));
        let fill = TankFill {
            liters,
            arm_in: tank.arm_table.lookup(liters),
            weight_kg: round1(liters * self.density_kg_l),
        };
        self.state.insert(name.to_string(), fill);
        Ok(())
    }

    /// Fill a tank to capacity.
    pub fn load_max(&mut self, name: &str) -> WbResult<()> {
        let max_l = self.tank(name)?.max_l;
        self.set_liters(name, max_l)
    }

    /// Change the fuel density and recompute every tank's weight at its
    /// current liters. Rejects densities outside the physical band and
    /// leaves all state unchanged.
    pub fn set_density(&mut self, density_kg_l: f64) -> WbResult<()> {
        if !(FUEL_DENSITY_MIN_KG_L..=FUEL_DENSITY_MAX_KG_L).contains(&density_kg_l) {
            return Err(WbError::invalid_input(
                "density_kg_l",
                density_kg_l.to_string(),
                format!(
                    "Fuel density must lie between {FUEL_DENSITY_MIN_KG_L} and {FUEL_DENSITY_MAX_KG_L} kg/L"
                ),
            ));
        }
        self.density_kg_l = density_kg_l;
        let names: Vec<String> = self.state.keys().cloned().collect();
        for name in names {
            let liters = self.state[&name].liters;
            self.set_liters(&name, liters)?;
        }
        Ok(())
    }

    /// Empty every tank.
    pub fn clear_all(&mut self) {
        self.state.clear();
    }

    /// Current fill of a tank, if any liters were ever set.
    pub fn fill(&self, name: &str) -> Option<&TankFill> {
        self.state.get(name)
    }

    fn liters_of(&self, name: &str) -> f64 {
        self.state.get(name).map(|f| f.liters).unwrap_or(0.0)
    }

    /// The combined main-tank fill, present only while both main tanks hold
    /// fuel. This is the figure that replaces their individual entries in
    /// the totals.
    pub fn combined_fill(&self) -> Option<TankFill> {
        // Constructor guarantees exactly two combinable mains.
        let mut mains = self
            .tanks
            .iter()
            .filter(|t| t.role == TankRole::CombinableMain);
        let m1 = mains.next()?;
        let m2 = mains.next()?;
        let l1 = self.liters_of(&m1.name);
        let l2 = self.liters_of(&m2.name);
        if l1 > 0.0 && l2 > 0.0 {
            let liters = l1 + l2;
            Some(TankFill {
                liters,
                arm_in: self.combined_table.lookup(liters),
                weight_kg: round1(liters * self.density_kg_l),
            })
        } else {
            None
        }
    }

    /// Fuel totals across all tanks.
    ///
    /// While both main tanks hold fuel, a single combined (weight, arm)
    /// evaluated over their summed liters replaces their individual
    /// contributions; the main tanks are then skipped so they are never
    /// counted twice. With at most one main tank fueled, every tank
    /// contributes its own table's arm independently.
    pub fn totals(&self) -> CategoryTotals {
        let mut weight = 0.0;
        let mut moment = 0.0;

        let combined = self.combined_fill();
        if let Some(fill) = &combined {
            weight += fill.weight_kg;
            moment += fill.weight_kg * fill.arm_in;
        }

        for tank in &self.tanks {
            if combined.is_some() && tank.role == TankRole::CombinableMain {
                continue;
            }
            if let Some(fill) = self.state.get(&tank.name) {
                weight += fill.weight_kg;
                moment += fill.weight_kg * fill.arm_in;
            }
        }

        CategoryTotals::from_sums(weight, moment)
    }

    /// Certified total fuel capacity, the sum of every tank's `max_kg`.
    pub fn max_total_kg(&self) -> f64 {
        self.tanks.iter().map(|t| t.max_kg).sum()
    }

    /// True when the current total fuel weight exceeds the certified
    /// capacity (possible with a density above the one the capacity figures
    /// assume).
    pub fn over_capacity(&self) -> bool {
        self.totals().weight_kg > self.max_total_kg()
    }
}
