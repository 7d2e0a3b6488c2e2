//! # Sequential Balance Trace
//!
//! Composes the DOW, passenger, cargo, and fuel contributions into the
//! four-point loading sequence:
//!
//! ```text
//! DOW  ->  DOW + Passengers  ->  ZFW (+ Cargo)  ->  TOW (+ Fuel)
//! ```
//!
//! Weight and moment accumulate strictly; each point's CG arm is the
//! running moment over the running weight, and each point is also expressed
//! as %MAC. The KLM index breakdown is derived independently per category
//! and reported alongside; it plays no part in the weight/arm arithmetic.

use serde::{Deserialize, Serialize};

use crate::aircraft::EngineConfig;
use crate::calculations::index::{arm_from_index, index_from};
use crate::calculations::mac::mac_percent;
use crate::errors::WbResult;
use crate::loads::CategoryTotals;

/// Inputs to the trace builder: the registration's certified figures plus
/// the three category totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceInput {
    /// Dry Operating Weight, kg
    pub dow_weight_kg: f64,
    /// Dry Operating Index for this registration
    pub doi: f64,
    pub pax: CategoryTotals,
    pub cargo: CategoryTotals,
    pub fuel: CategoryTotals,
}

/// One snapshot of the loading sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub weight_kg: f64,
    pub arm_in: f64,
    pub mac_percent: f64,
}

/// KLM index contribution of each load category and the running sums at
/// ZFW and TOW. Reported figures only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexBreakdown {
    pub dow: f64,
    pub pax: f64,
    pub cargo: f64,
    pub fuel: f64,
    /// dow + pax + cargo
    pub zfw: f64,
    /// zfw + fuel
    pub tow: f64,
}

/// The four-point loading sequence with its index breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceTrace {
    /// Point 1: Dry Operating Weight
    pub dow: BalancePoint,
    /// Point 2: DOW plus passengers
    pub dow_pax: BalancePoint,
    /// Point 3: Zero Fuel Weight (plus cargo)
    pub zfw: BalancePoint,
    /// Point 4: Takeoff Weight (plus fuel)
    pub tow: BalancePoint,
    pub index: IndexBreakdown,
}

/// Build the four-point trace.
///
/// The DOW arm is recovered from the certified DOI via the index converter,
/// which errors on a zero DOW (a reference-data configuration error). Later
/// points fall back to the previous point's arm if their running weight is
/// somehow zero.
pub fn build_trace(input: &TraceInput, config: &EngineConfig) -> WbResult<BalanceTrace> {
    let ref_arm = config.klm_reference_arm_in;
    let scale = config.klm_scale;
    let offset = config.klm_offset;

    let dow_arm = arm_from_index(input.doi, input.dow_weight_kg, ref_arm, scale, offset)?;
    let dow_moment = input.dow_weight_kg * dow_arm;

    let mut weight = input.dow_weight_kg;
    let mut moment = dow_moment;
    let mut prev_arm = dow_arm;

    let point = |weight: f64, moment: f64, prev_arm: &mut f64| -> WbResult<BalancePoint> {
        let arm = if weight > 0.0 { moment / weight } else { *prev_arm };
        *prev_arm = arm;
        Ok(BalancePoint {
            weight_kg: weight,
            arm_in: arm,
            mac_percent: mac_percent(arm, config.le_mac_in, config.mac_length_in)?,
        })
    };

    let dow = point(weight, moment, &mut prev_arm)?;

    weight += input.pax.weight_kg;
    moment += input.pax.moment_kgin;
    let dow_pax = point(weight, moment, &mut prev_arm)?;

    weight += input.cargo.weight_kg;
    moment += input.cargo.moment_kgin;
    let zfw = point(weight, moment, &mut prev_arm)?;

    weight += input.fuel.weight_kg;
    moment += input.fuel.moment_kgin;
    let tow = point(weight, moment, &mut prev_arm)?;

    let idx_dow = index_from(input.dow_weight_kg, dow_arm, ref_arm, scale, offset);
    let idx_pax = index_from(input.pax.weight_kg, input.pax.arm_in, ref_arm, scale, offset);
    let idx_cargo = index_from(input.cargo.weight_kg, input.cargo.arm_in, ref_arm, scale, offset);
    let idx_fuel = index_from(input.fuel.weight_kg, input.fuel.arm_in, ref_arm, scale, offset);
    let idx_zfw = idx_dow + idx_pax + idx_cargo;

    Ok(BalanceTrace {
        dow,
        dow_pax,
        zfw,
        tow,
        index: IndexBreakdown {
            dow: idx_dow,
            pax: idx_pax,
            cargo: idx_cargo,
            fuel: idx_fuel,
            zfw: idx_zfw,
            tow: idx_zfw + idx_fuel,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_input() -> TraceInput {
        TraceInput {
            dow_weight_kg: 170200.0,
            doi: 45.3,
            pax: CategoryTotals::default(),
            cargo: CategoryTotals::default(),
            fuel: CategoryTotals::default(),
        }
    }

    #[test]
    fn test_empty_aircraft_trace() {
        // DOW 170200 kg at DOI 45.3: derived arm ~1252.48 in, ~28.0 %MAC,
        // and ZFW == TOW == DOW with the arm carried through.
        let trace = build_trace(&empty_input(), &EngineConfig::default()).unwrap();

        assert!((trace.dow.arm_in - 1252.48).abs() < 0.01);
        assert!((trace.dow.mac_percent - 28.0).abs() < 0.1);

        assert_eq!(trace.zfw.weight_kg, 170200.0);
        assert_eq!(trace.tow.weight_kg, 170200.0);
        assert!((trace.tow.arm_in - trace.dow.arm_in).abs() < 1e-9);
        assert!((trace.index.dow - 45.3).abs() < 0.01);
    }

    #[test]
    fn test_trace_additivity() {
        let mut input = empty_input();
        input.pax = CategoryTotals::from_sums(177.0, 177.0 * 800.0);
        input.cargo = CategoryTotals::from_sums(2587.0, 2587.0 * 520.0);
        input.fuel = CategoryTotals::from_sums(8800.0, 8800.0 * 1260.0);

        let trace = build_trace(&input, &EngineConfig::default()).unwrap();

        assert_eq!(
            trace.zfw.weight_kg,
            trace.dow.weight_kg + input.pax.weight_kg + input.cargo.weight_kg
        );
        assert_eq!(trace.tow.weight_kg, trace.zfw.weight_kg + input.fuel.weight_kg);
        assert_eq!(trace.dow_pax.weight_kg, trace.dow.weight_kg + input.pax.weight_kg);
    }

    #[test]
    fn test_arms_shift_toward_added_load() {
        let mut input = empty_input();
        // Cargo far forward of the DOW arm pulls the ZFW CG forward.
        input.cargo = CategoryTotals::from_sums(5000.0, 5000.0 * 500.0);

        let trace = build_trace(&input, &EngineConfig::default()).unwrap();
        assert!(trace.zfw.arm_in < trace.dow.arm_in);
        assert!(trace.zfw.mac_percent < trace.dow.mac_percent);
    }

    #[test]
    fn test_index_breakdown_sums() {
        let mut input = empty_input();
        input.pax = CategoryTotals::from_sums(8850.0, 8850.0 * 1100.0);

        let config = EngineConfig::default();
        let trace = build_trace(&input, &config).unwrap();

        assert!((trace.index.zfw - (trace.index.dow + trace.index.pax + trace.index.cargo)).abs() < 1e-9);
        assert!((trace.index.tow - (trace.index.zfw + trace.index.fuel)).abs() < 1e-9);
        // Empty categories contribute the bare offset.
        assert_eq!(trace.index.cargo, config.klm_offset);
        assert_eq!(trace.index.fuel, config.klm_offset);
    }

    #[test]
    fn test_zero_dow_is_config_error() {
        let mut input = empty_input();
        input.dow_weight_kg = 0.0;
        assert!(build_trace(&input, &EngineConfig::default()).is_err());
    }

    #[test]
    fn test_agrees_with_direct_moment_arithmetic() {
        let mut input = empty_input();
        input.pax = CategoryTotals::from_sums(17700.0, 17700.0 * 1080.0);
        input.fuel = CategoryTotals::from_sums(50000.0, 50000.0 * 1300.0);

        let trace = build_trace(&input, &EngineConfig::default()).unwrap();

        let dow_moment = 170200.0 * trace.dow.arm_in;
        let tow_weight = 170200.0 + 17700.0 + 50000.0;
        let tow_moment = dow_moment + 17700.0 * 1080.0 + 50000.0 * 1300.0;
        assert!((trace.tow.arm_in - tow_moment / tow_weight).abs() < 1e-9);
    }
}
