//! # Passenger Seat Selection
//!
//! Seat map reference data and the mutable seat selection. Every passenger
//! weighs the same configurable scalar (the engine config's
//! `passenger_weight_kg`); the seat map supplies each seat's arm.
//!
//! ## Example
//!
//! ```rust
//! use wb_core::loads::{SeatRow, SeatSelection};
//! use wb_core::loads::passengers::CabinSeat;
//!
//! let rows = vec![SeatRow {
//!     row: 1,
//!     class: "F".to_string(),
//!     seats: vec![
//!         CabinSeat { seat: "A".to_string(), arm_in: 600.0 },
//!         CabinSeat { seat: "C".to_string(), arm_in: 600.0 },
//!     ],
//! }];
//! let mut selection = SeatSelection::new(rows);
//! selection.toggle_seat(1, "A").unwrap();
//!
//! let totals = selection.totals(88.5);
//! assert_eq!(totals.weight_kg, 88.5);
//! assert_eq!(totals.arm_in, 600.0);
//! ```

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::{WbError, WbResult};
use crate::loads::CategoryTotals;

/// One physical seat within a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinSeat {
    /// Seat letter ("A", "K", ...)
    pub seat: String,
    /// Arm in inches from the reference datum
    pub arm_in: f64,
}

/// One cabin row of the seat map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatRow {
    /// Row number
    pub row: u32,
    /// Cabin class code ("F" business, "Y" economy in the reference data)
    pub class: String,
    /// Seats present in this row
    pub seats: Vec<CabinSeat>,
}

/// The full cabin seat map, in row order.
pub type SeatMap = Vec<SeatRow>;

/// Key identifying a single seat: (row, seat letter).
type SeatKey = (u32, String);

/// Mutable seat selection over an immutable seat map.
///
/// All mutation goes through the selection operations; `clear_all` resets
/// the session. Selecting a seat that does not exist in the map is rejected
/// and leaves the selection unchanged.
#[derive(Debug, Clone)]
pub struct SeatSelection {
    seat_map: SeatMap,
    /// Arm lookup, built once from the seat map
    arms: HashMap<SeatKey, f64>,
    /// Currently selected seats (ordered, for stable reporting)
    selected: BTreeSet<SeatKey>,
}

impl SeatSelection {
    /// Take ownership of a seat map and start with nothing selected.
    pub fn new(seat_map: SeatMap) -> Self {
        let mut arms = HashMap::new();
        for row in &seat_map {
            for seat in &row.seats {
                arms.insert((row.row, seat.seat.clone()), seat.arm_in);
            }
        }
        SeatSelection {
            seat_map,
            arms,
            selected: BTreeSet::new(),
        }
    }

    /// The seat map this selection is built over.
    pub fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    /// Toggle a single seat. Returns whether the seat is selected afterward.
    pub fn toggle_seat(&mut self, row: u32, seat: &str) -> WbResult<bool> {
        let key = (row, seat.to_string());
        if !self.arms.contains_key(&key) {
            return Err(WbError::UnknownSeat {
                row,
                seat: seat.to_string(),
            });
        }
        if self.selected.remove(&key) {
            Ok(false)
        } else {
            self.selected.insert(key);
            Ok(true)
        }
    }

    /// Select every seat in a row. Returns how many seats the row has;
    /// an unknown row selects nothing and returns 0.
    pub fn select_row(&mut self, row: u32) -> usize {
        let keys: Vec<SeatKey> = self
            .arms
            .keys()
            .filter(|(r, _)| *r == row)
            .cloned()
            .collect();
        let count = keys.len();
        self.selected.extend(keys);
        count
    }

    /// Select every seat with the given letter across all rows.
    /// Matching is case-insensitive; returns how many seats matched.
    pub fn select_seat_letter(&mut self, letter: &str) -> usize {
        let letter = letter.to_uppercase();
        let keys: Vec<SeatKey> = self
            .arms
            .keys()
            .filter(|(_, s)| s.eq_ignore_ascii_case(&letter))
            .cloned()
            .collect();
        let count = keys.len();
        self.selected.extend(keys);
        count
    }

    /// Select every seat on the aircraft. Returns the seat count.
    pub fn select_all(&mut self) -> usize {
        let keys: Vec<SeatKey> = self.arms.keys().cloned().collect();
        self.selected.extend(keys);
        self.selected.len()
    }

    /// Deselect everything.
    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    /// Whether a specific seat is currently selected.
    pub fn is_selected(&self, row: u32, seat: &str) -> bool {
        self.selected.contains(&(row, seat.to_string()))
    }

    /// Number of selected seats (= passengers).
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Selected seats in (row, letter) order.
    pub fn selected_seats(&self) -> impl Iterator<Item = (u32, &str)> {
        self.selected.iter().map(|(row, seat)| (*row, seat.as_str()))
    }

    /// Passenger totals at the given uniform passenger weight.
    pub fn totals(&self, passenger_weight_kg: f64) -> CategoryTotals {
        let mut weight = 0.0;
        let mut moment = 0.0;
        for key in &self.selected {
            // Selection ops validate seat existence, so the arm is present.
            let arm = self.arms.get(key).copied().unwrap_or(0.0);
            weight += passenger_weight_kg;
            moment += passenger_weight_kg * arm;
        }
        CategoryTotals::from_sums(weight, moment)
    }
}
