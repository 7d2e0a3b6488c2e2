//! # %MAC Conversion
//!
//! Expresses a CG arm as a percentage of the Mean Aerodynamic Chord, the
//! form used on load sheets and the certified CG envelope.

use crate::errors::{WbError, WbResult};

/// Arm (inches from datum) to percentage of MAC.
///
/// `le_mac_in` is the leading edge of the MAC; `mac_length_in` is its
/// length. A zero MAC length is a configuration error.
pub fn mac_percent(arm_in: f64, le_mac_in: f64, mac_length_in: f64) -> WbResult<f64> {
    if mac_length_in == 0.0 {
        return Err(WbError::config(
            "mac_length_in",
            "MAC length must be nonzero",
        ));
    }
    Ok((arm_in - le_mac_in) * 100.0 / mac_length_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value() {
        // Known figure from the Boeing manual for the 777-300ER chord.
        let mac = mac_percent(1242.28, 1174.5, 278.5).unwrap();
        assert!((mac - 24.34).abs() < 0.01);
    }

    #[test]
    fn test_leading_edge_is_zero_percent() {
        assert_eq!(mac_percent(1174.5, 1174.5, 278.5).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_mac_length_errors() {
        assert!(mac_percent(1200.0, 1174.5, 0.0).is_err());
    }
}
