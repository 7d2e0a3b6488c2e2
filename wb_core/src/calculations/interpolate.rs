//! # Breakpoint Interpolation
//!
//! Piecewise-linear lookup over an [`ArmTable`], used for fuel-tank arm
//! tables where the center of mass shifts with fill level.
//!
//! Tables are small (2-10 points), so lookup is a linear scan.
//!
//! ## Example
//!
//! ```rust
//! use wb_core::calculations::ArmTable;
//!
//! let table = ArmTable::new(vec![(0.0, 1200.0), (10000.0, 1250.0), (20000.0, 1300.0)]).unwrap();
//! assert_eq!(table.lookup(5000.0), 1225.0);
//! assert_eq!(table.lookup(-100.0), 1200.0);   // clamped below
//! assert_eq!(table.lookup(30000.0), 1300.0);  // clamped above
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{WbError, WbResult};

/// Ordered sequence of (quantity, arm) breakpoints.
///
/// Quantity is in engineering units of the caller's choosing (liters for
/// fuel tables); arm is in inches from the reference datum. Breakpoints must
/// be ascending in quantity and the table must be non-empty.
///
/// Serializes to the `[[quantity, arm], ...]` shape used by the reference
/// data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArmTable {
    points: Vec<(f64, f64)>,
}

impl ArmTable {
    /// Build a table, validating that it is non-empty and sorted ascending
    /// by quantity.
    pub fn new(points: Vec<(f64, f64)>) -> WbResult<Self> {
        if points.is_empty() {
            return Err(WbError::config("arm_table", "Arm table must not be empty"));
        }
        for pair in points.windows(2) {
            if pair[1].0 < pair[0].0 {
                return Err(WbError::config(
                    "arm_table",
                    format!(
                        "Arm table breakpoints must be ascending (found {} after {})",
                        pair[1].0, pair[0].0
                    ),
                ));
            }
        }
        Ok(ArmTable { points })
    }

    /// Validate a table that arrived via deserialization.
    pub fn validate(&self) -> WbResult<()> {
        ArmTable::new(self.points.clone()).map(|_| ())
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the table holds no breakpoints. Only reachable on a table
    /// deserialized from bad data and not yet validated.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Interpolated arm for the given quantity.
    ///
    /// Clamps to the first/last arm outside the table's quantity range.
    /// A degenerate pair of equal quantities returns the earlier arm.
    ///
    /// # Panics
    ///
    /// Panics if the table is empty. An empty table is a constructor-level
    /// configuration error, not a runtime case.
    pub fn lookup(&self, quantity: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];

        if quantity <= first.0 {
            return first.1;
        }
        if quantity >= last.0 {
            return last.1;
        }

        for pair in self.points.windows(2) {
            let (q1, a1) = pair[0];
            let (q2, a2) = pair[1];
            if quantity < q2 {
                if q2 == q1 {
                    return a1;
                }
                return a1 + (a2 - a1) * (quantity - q1) / (q2 - q1);
            }
        }

        last.1
    }
}
