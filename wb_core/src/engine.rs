//! # Balance Engine
//!
//! The facade the orchestration layer talks to. A [`BalanceEngine`] owns the
//! three load modules, the reference data, and the runtime configuration;
//! every recalculation is a full, idempotent pass over current state.
//!
//! ## Example
//!
//! ```rust
//! use wb_core::engine::BalanceEngine;
//! use wb_core::aircraft::EngineConfig;
//! use wb_core::dataset;
//!
//! let mut engine =
//!     BalanceEngine::new(dataset::boeing_777_300er().clone(), EngineConfig::default()).unwrap();
//!
//! engine.passengers_mut().select_row(10);
//! engine.fuel_mut().set_liters("Center Tank", 20000.0).unwrap();
//!
//! let trace = engine.build_trace().unwrap();
//! assert!(trace.tow.weight_kg > trace.zfw.weight_kg);
//! assert!(engine.check_limits(&trace).is_empty());
//! ```

use std::fmt::Write as _;

use crate::aircraft::{AircraftData, AircraftReference, EngineConfig};
use crate::calculations::{
    build_trace, check_limits, BalanceTrace, LimitViolation, TraceInput, WeightLimits,
};
use crate::errors::{WbError, WbResult};
use crate::loads::{CargoBay, CategoryTotals, FuelSystem, SeatSelection};

/// Owns session state and reference data for one aircraft.
///
/// Single-threaded by design: every operation is a plain function call with
/// no suspension points, and shared access requires external
/// synchronization.
#[derive(Debug, Clone)]
pub struct BalanceEngine {
    passengers: SeatSelection,
    cargo: CargoBay,
    fuel: FuelSystem,
    reference: AircraftReference,
    limits: WeightLimits,
    config: EngineConfig,
    selected_reg: String,
}

impl BalanceEngine {
    /// Build an engine from a full reference dataset.
    ///
    /// Applies the reference record's geometry overrides to the config,
    /// validates it, seeds the fuel module with the configured density, and
    /// selects the first registration.
    pub fn new(data: AircraftData, mut config: EngineConfig) -> WbResult<Self> {
        config.apply_reference(&data.reference);
        config.validate()?;

        let selected_reg = data
            .reference
            .dow_options
            .first()
            .map(|d| d.reg.clone())
            .ok_or_else(|| {
                WbError::config("aircraft_reference", "No registrations in reference data")
            })?;

        let mut fuel = FuelSystem::new(data.fuel_tanks, data.combined_arm_table)?;
        fuel.set_density(config.fuel_density_kg_l)?;

        Ok(BalanceEngine {
            passengers: SeatSelection::new(data.seat_map),
            cargo: CargoBay::new(data.cargo_slots),
            fuel,
            reference: data.reference,
            limits: data.limits,
            config,
            selected_reg,
        })
    }

    pub fn passengers(&self) -> &SeatSelection {
        &self.passengers
    }

    pub fn passengers_mut(&mut self) -> &mut SeatSelection {
        &mut self.passengers
    }

    pub fn cargo(&self) -> &CargoBay {
        &self.cargo
    }

    pub fn cargo_mut(&mut self) -> &mut CargoBay {
        &mut self.cargo
    }

    pub fn fuel(&self) -> &FuelSystem {
        &self.fuel
    }

    pub fn fuel_mut(&mut self) -> &mut FuelSystem {
        &mut self.fuel
    }

    pub fn reference(&self) -> &AircraftReference {
        &self.reference
    }

    pub fn limits(&self) -> &WeightLimits {
        &self.limits
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the runtime configuration. Validates first and propagates the
    /// new fuel density into the fuel module, recomputing every fill.
    pub fn set_config(&mut self, config: EngineConfig) -> WbResult<()> {
        config.validate()?;
        self.fuel.set_density(config.fuel_density_kg_l)?;
        self.config = config;
        Ok(())
    }

    /// Select the active registration.
    pub fn select_registration(&mut self, reg: &str) -> WbResult<()> {
        self.reference.dow_option(reg)?;
        self.selected_reg = reg.to_string();
        Ok(())
    }

    pub fn selected_registration(&self) -> &str {
        &self.selected_reg
    }

    /// Reset every load selection; reference data and config stay.
    pub fn clear_all(&mut self) {
        self.passengers.clear_all();
        self.cargo.clear_all();
        self.fuel.clear_all();
    }

    pub fn pax_totals(&self) -> CategoryTotals {
        self.passengers.totals(self.config.passenger_weight_kg)
    }

    pub fn cargo_totals(&self) -> CategoryTotals {
        self.cargo.totals()
    }

    pub fn fuel_totals(&self) -> CategoryTotals {
        self.fuel.totals()
    }

    /// Build the four-point balance trace from current state.
    pub fn build_trace(&self) -> WbResult<BalanceTrace> {
        let dow = self.reference.dow_option(&self.selected_reg)?;
        let input = TraceInput {
            dow_weight_kg: dow.dow_weight_kg,
            doi: dow.doi,
            pax: self.pax_totals(),
            cargo: self.cargo_totals(),
            fuel: self.fuel_totals(),
        };
        build_trace(&input, &self.config)
    }

    /// Check a trace's ZFW and TOW against the certified limits.
    pub fn check_limits(&self, trace: &BalanceTrace) -> Vec<LimitViolation> {
        check_limits(trace.zfw.weight_kg, trace.tow.weight_kg, &self.limits)
    }

    /// Render the plain-text load summary for the current state.
    pub fn summary(&self) -> WbResult<String> {
        let trace = self.build_trace()?;
        let violations = self.check_limits(&trace);
        let dow = self.reference.dow_option(&self.selected_reg)?;
        let pax = self.pax_totals();
        let cargo = self.cargo_totals();
        let fuel = self.fuel_totals();

        let mut out = String::new();
        let _ = writeln!(out, "Selected Aircraft: {}\n", self.selected_reg);
        let _ = writeln!(out, "------ Aircraft Load Summary ------\n");
        let _ = writeln!(
            out,
            "Operating (DOW):     {:.1} kg   @ {:.2} in (%MAC: {:.2})",
            trace.dow.weight_kg, trace.dow.arm_in, trace.dow.mac_percent
        );
        let _ = writeln!(
            out,
            "Passengers:          {:.1} kg   Moment: {:.1}",
            pax.weight_kg, pax.moment_kgin
        );
        let _ = writeln!(
            out,
            "Cargo:               {:.1} kg   Moment: {:.1}",
            cargo.weight_kg, cargo.moment_kgin
        );
        let _ = writeln!(
            out,
            "Fuel:                {:.1} kg   Moment: {:.1}\n",
            fuel.weight_kg, fuel.moment_kgin
        );
        let _ = writeln!(
            out,
            "ZERO FUEL WEIGHT:    {:.1} kg   ZFW CG: {:.2} in (%MAC: {:.2})",
            trace.zfw.weight_kg, trace.zfw.arm_in, trace.zfw.mac_percent
        );
        let _ = writeln!(
            out,
            "TAKEOFF WEIGHT:      {:.1} kg   TOW CG: {:.2} in (%MAC: {:.2})\n",
            trace.tow.weight_kg, trace.tow.arm_in, trace.tow.mac_percent
        );
        let _ = writeln!(
            out,
            "KLM INDEX (CGI) [ref {} in]:",
            self.config.klm_reference_arm_in
        );
        let _ = writeln!(out, "  ZFW Index:         {:.2}", trace.index.zfw);
        let _ = writeln!(out, "  TOW Index:         {:.2}", trace.index.tow);
        let _ = writeln!(out, "  Certified DOW Index: {}", dow.doi);
        let _ = writeln!(out, "\nBreakdown (KLM Index):");
        let _ = writeln!(out, "  DOW Index:         {:.2}", trace.index.dow);
        let _ = writeln!(out, "  Pax Index:         {:.2}", trace.index.pax);
        let _ = writeln!(out, "  Cargo Index:       {:.2}", trace.index.cargo);
        let _ = writeln!(out, "  Fuel Index:        {:.2}", trace.index.fuel);
        let _ = writeln!(out, "\n---------------------------------------------");

        if self.fuel.over_capacity() {
            let _ = writeln!(
                out,
                "\n!!! WARNING: Total fuel weight exceeds {} kg !!!",
                self.fuel.max_total_kg()
            );
        }

        if violations.is_empty() {
            let _ = writeln!(out, "\nAll gross weight limits within certified ranges.");
        } else {
            let _ = writeln!(out, "\n*** LIMITS VIOLATED ***");
            for violation in &violations {
                let _ = writeln!(out, "- {violation}");
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;
    use crate::loads::SlotKey;

    fn demo_engine() -> BalanceEngine {
        BalanceEngine::new(dataset::boeing_777_300er().clone(), EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_engine_matches_certified_dow() {
        let engine = demo_engine();
        let trace = engine.build_trace().unwrap();

        assert!((trace.dow.arm_in - 1252.48).abs() < 0.01);
        assert!((trace.dow.mac_percent - 28.0).abs() < 0.1);
        assert_eq!(trace.zfw.weight_kg, trace.tow.weight_kg);
        assert!(engine.check_limits(&trace).is_empty());
    }

    #[test]
    fn test_full_load_additivity() {
        let mut engine = demo_engine();
        engine.passengers_mut().select_all();
        engine.cargo_mut().load_max_all_containers();
        engine.fuel_mut().set_liters("Main Tank 1", 20000.0).unwrap();
        engine.fuel_mut().set_liters("Main Tank 2", 20000.0).unwrap();
        engine.fuel_mut().set_liters("Center Tank", 30000.0).unwrap();

        let trace = engine.build_trace().unwrap();
        let pax = engine.pax_totals();
        let cargo = engine.cargo_totals();
        let fuel = engine.fuel_totals();

        assert!(
            (trace.zfw.weight_kg - (trace.dow.weight_kg + pax.weight_kg + cargo.weight_kg)).abs()
                < 1e-9
        );
        assert!((trace.tow.weight_kg - (trace.zfw.weight_kg + fuel.weight_kg)).abs() < 1e-9);
        assert!(trace.tow.weight_kg > trace.dow.weight_kg);
    }

    #[test]
    fn test_registration_selection_changes_dow() {
        let mut engine = demo_engine();
        let dow_a = engine.build_trace().unwrap().dow.weight_kg;

        engine.select_registration("PH-BVB").unwrap();
        let dow_b = engine.build_trace().unwrap().dow.weight_kg;
        assert_ne!(dow_a, dow_b);

        assert_eq!(
            engine.select_registration("ZZ-ZZZ").unwrap_err().error_code(),
            "REGISTRATION_NOT_FOUND"
        );
        // Failed selection leaves the previous registration active.
        assert_eq!(engine.selected_registration(), "PH-BVB");
    }

    #[test]
    fn test_config_change_propagates_density() {
        let mut engine = demo_engine();
        engine.fuel_mut().set_liters("Center Tank", 10000.0).unwrap();
        let before = engine.fuel_totals().weight_kg;

        let mut config = *engine.config();
        config.fuel_density_kg_l = 0.7500;
        engine.set_config(config).unwrap();

        let after = engine.fuel_totals().weight_kg;
        assert!(after < before);
        assert_eq!(after, 7500.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut engine = demo_engine();
        let mut config = *engine.config();
        config.mac_length_in = 0.0;
        assert!(engine.set_config(config).is_err());
        // Old config survives.
        assert!(engine.config().mac_length_in > 0.0);
    }

    #[test]
    fn test_clear_all_returns_to_dow() {
        let mut engine = demo_engine();
        engine.passengers_mut().select_all();
        engine.cargo_mut().load_max(&SlotKey::new("Forward", "11P")).unwrap();
        engine.fuel_mut().load_max("Center Tank").unwrap();

        engine.clear_all();
        let trace = engine.build_trace().unwrap();
        assert_eq!(trace.tow.weight_kg, trace.dow.weight_kg);
    }

    #[test]
    fn test_summary_sections() {
        let mut engine = demo_engine();
        engine.passengers_mut().select_row(10);

        let summary = engine.summary().unwrap();
        assert!(summary.contains("Selected Aircraft: PH-BVA"));
        assert!(summary.contains("ZERO FUEL WEIGHT"));
        assert!(summary.contains("Breakdown (KLM Index)"));
        assert!(summary.contains("All gross weight limits within certified ranges."));
    }

    #[test]
    fn test_summary_reports_violations() {
        let mut engine = demo_engine();
        // A pathological passenger weight pushes ZFW past MZFW.
        let mut config = *engine.config();
        config.passenger_weight_kg = 2000.0;
        engine.set_config(config).unwrap();
        engine.passengers_mut().select_all();

        let summary = engine.summary().unwrap();
        assert!(summary.contains("*** LIMITS VIOLATED ***"));
        assert!(summary.contains("exceeds Maximum ZFW"));
    }
}
