//! # KLM Index Conversion
//!
//! Bidirectional conversion between a (weight, arm) pair and the scaled,
//! offset CG index used on KLM-style load sheets:
//!
//! ```text
//! index = weight * (arm - ref_arm) / scale + offset
//! ```
//!
//! The forward direction at zero weight degenerates to `offset`, the
//! continuous limit of the formula. The reverse direction has no sensible
//! answer at zero weight and errors instead.

use crate::errors::{WbError, WbResult};

/// Forward conversion: index from a weight and arm.
///
/// Returns `offset` unchanged when `weight_kg` is exactly zero. This is the
/// documented degenerate case for an empty load category, not an error.
pub fn index_from(weight_kg: f64, arm_in: f64, ref_arm_in: f64, scale: f64, offset: f64) -> f64 {
    if weight_kg == 0.0 {
        return offset;
    }
    weight_kg * (arm_in - ref_arm_in) / scale + offset
}

/// Reverse conversion: arm from an index and weight.
///
/// Used to recover the DOW arm from a registration's certified DOI.
/// Errors when `weight_kg` is zero; there is no arm to recover from a
/// weightless index.
pub fn arm_from_index(
    index: f64,
    weight_kg: f64,
    ref_arm_in: f64,
    scale: f64,
    offset: f64,
) -> WbResult<f64> {
    if weight_kg == 0.0 {
        return Err(WbError::config(
            "weight_kg",
            "Cannot derive an arm from an index at zero weight",
        ));
    }
    Ok((index - offset) * scale / weight_kg + ref_arm_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REF_ARM: f64 = 1258.0;
    const SCALE: f64 = 200000.0;
    const OFFSET: f64 = 50.0;

    #[test]
    fn test_certified_dow_index() {
        // Boeing certified example: DOW 170200 kg at arm 1252.48 in.
        let index = index_from(170200.0, 1252.48, REF_ARM, SCALE, OFFSET);
        assert!((index - 45.3).abs() < 0.05);
    }

    #[test]
    fn test_arm_from_doi() {
        let arm = arm_from_index(45.3, 170200.0, REF_ARM, SCALE, OFFSET).unwrap();
        assert!((arm - 1252.48).abs() < 0.01);
    }

    #[test]
    fn test_round_trip() {
        for &(weight, arm) in &[
            (170200.0, 1252.48),
            (88.5, 640.0),
            (1.0, 2000.0),
            (352441.0, 1174.5),
        ] {
            let index = index_from(weight, arm, REF_ARM, SCALE, OFFSET);
            let back = arm_from_index(index, weight, REF_ARM, SCALE, OFFSET).unwrap();
            assert!((back - arm).abs() < 1e-6, "round trip failed for {weight} kg");
        }
    }

    #[test]
    fn test_zero_weight_forward_returns_offset() {
        assert_eq!(index_from(0.0, 1234.0, REF_ARM, SCALE, OFFSET), OFFSET);
    }

    #[test]
    fn test_zero_weight_reverse_errors() {
        assert!(arm_from_index(45.3, 0.0, REF_ARM, SCALE, OFFSET).is_err());
    }
}
