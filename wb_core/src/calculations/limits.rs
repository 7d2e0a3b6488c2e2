//! # Certified Weight Limits
//!
//! Checks calculated ZFW and TOW against the aircraft's certified limits.
//! All four checks run independently; the result is the full list of
//! violations, empty meaning within all certified ranges.

use serde::{Deserialize, Serialize};

/// Certified structural weight limits for the aircraft type.
///
/// Field names match the keys of the reference `limits.json`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightLimits {
    /// Maximum Zero Fuel Weight
    #[serde(rename = "MZFW_kg")]
    pub mzfw_kg: f64,

    /// Maximum Takeoff Weight
    #[serde(rename = "MTOW_kg")]
    pub mtow_kg: f64,

    /// Maximum Taxi Weight
    #[serde(rename = "MTW_kg")]
    pub mtw_kg: f64,

    /// Minimum Flight Weight (ZFW must stay above this)
    #[serde(rename = "MFW_kg")]
    pub mfw_kg: f64,
}

/// Which certified limit a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitKind {
    /// ZFW above Maximum Zero Fuel Weight
    Mzfw,
    /// TOW above Maximum Takeoff Weight
    Mtow,
    /// TOW above Maximum Taxi Weight
    Mtw,
    /// ZFW below Minimum Flight Weight
    Mfw,
}

/// A single violated limit with the measured value and the signed margin.
///
/// `excess_kg` is positive by how far the measured weight is on the wrong
/// side of the limit, for both over- and under-weight violations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitViolation {
    pub kind: LimitKind,
    pub measured_kg: f64,
    pub limit_kg: f64,
    pub excess_kg: f64,
}

impl std::fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            LimitKind::Mzfw => write!(
                f,
                "Zero Fuel Weight ({:.1} kg) exceeds Maximum ZFW ({} kg) by {:.1} kg.",
                self.measured_kg, self.limit_kg, self.excess_kg
            ),
            LimitKind::Mtow => write!(
                f,
                "Takeoff Weight ({:.1} kg) exceeds Maximum TOW ({} kg) by {:.1} kg.",
                self.measured_kg, self.limit_kg, self.excess_kg
            ),
            LimitKind::Mtw => write!(
                f,
                "Takeoff Weight ({:.1} kg) exceeds Maximum Taxi Weight ({} kg) by {:.1} kg.",
                self.measured_kg, self.limit_kg, self.excess_kg
            ),
            LimitKind::Mfw => write!(
                f,
                "Zero Fuel Weight ({:.1} kg) is below Minimum Flight Weight ({} kg) by {:.1} kg.",
                self.measured_kg, self.limit_kg, self.excess_kg
            ),
        }
    }
}

/// Check ZFW and TOW against the certified limits.
///
/// Every check runs regardless of earlier failures; callers must inspect
/// the whole list. An empty list means all limits are respected.
pub fn check_limits(zfw_weight_kg: f64, tow_weight_kg: f64, limits: &WeightLimits) -> Vec<LimitViolation> {
    let mut violations = Vec::new();

    if zfw_weight_kg > limits.mzfw_kg {
        violations.push(LimitViolation {
            kind: LimitKind::Mzfw,
            measured_kg: zfw_weight_kg,
            limit_kg: limits.mzfw_kg,
            excess_kg: zfw_weight_kg - limits.mzfw_kg,
        });
    }
    if tow_weight_kg > limits.mtow_kg {
        violations.push(LimitViolation {
            kind: LimitKind::Mtow,
            measured_kg: tow_weight_kg,
            limit_kg: limits.mtow_kg,
            excess_kg: tow_weight_kg - limits.mtow_kg,
        });
    }
    if tow_weight_kg > limits.mtw_kg {
        violations.push(LimitViolation {
            kind: LimitKind::Mtw,
            measured_kg: tow_weight_kg,
            limit_kg: limits.mtw_kg,
            excess_kg: tow_weight_kg - limits.mtw_kg,
        });
    }
    if zfw_weight_kg < limits.mfw_kg {
        violations.push(LimitViolation {
            kind: LimitKind::Mfw,
            measured_kg: zfw_weight_kg,
            limit_kg: limits.mfw_kg,
            excess_kg: limits.mfw_kg - zfw_weight_kg,
        });
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn certified_limits() -> WeightLimits {
        WeightLimits {
            mzfw_kg: 237682.0,
            mtow_kg: 351534.0,
            mtw_kg: 352441.0,
            mfw_kg: 167829.0,
        }
    }

    #[test]
    fn test_within_all_limits() {
        let violations = check_limits(230000.0, 340000.0, &certified_limits());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_mzfw_exceeded() {
        let violations = check_limits(250000.0, 340000.0, &certified_limits());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, LimitKind::Mzfw);
        assert!((violations[0].excess_kg - 12318.0).abs() < 0.1);
        assert!(violations[0].to_string().contains("ZFW"));
    }

    #[test]
    fn test_no_short_circuit() {
        // TOW beyond both MTOW and MTW reports both, independently.
        let violations = check_limits(230000.0, 360000.0, &certified_limits());
        let kinds: Vec<LimitKind> = violations.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, vec![LimitKind::Mtow, LimitKind::Mtw]);
    }

    #[test]
    fn test_below_minimum_flight_weight() {
        let violations = check_limits(150000.0, 200000.0, &certified_limits());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, LimitKind::Mfw);
        assert!((violations[0].excess_kg - 17829.0).abs() < 0.1);
        assert!(violations[0].to_string().contains("below Minimum Flight Weight"));
    }

    #[test]
    fn test_limits_deserialize_from_reference_keys() {
        let json = r#"{"MZFW_kg": 237682, "MTOW_kg": 351534, "MTW_kg": 352441, "MFW_kg": 167829}"#;
        let limits: WeightLimits = serde_json::from_str(json).unwrap();
        assert_eq!(limits.mzfw_kg, 237682.0);
        assert_eq!(limits.mfw_kg, 167829.0);
    }
}
