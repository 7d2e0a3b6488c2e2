//! # Cargo Slot Resolver
//!
//! ULD cargo positions with mutual-exclusion blocking between container and
//! pallet slots. A pallet occupies the footprint of several container
//! positions beneath it: while the pallet is loaded those containers cannot
//! be, and while any of them is loaded the pallet cannot be.
//!
//! Blocking is declared one-way in the reference data (pallets carry a
//! `blocks` list, containers never do) and is not transitive, so the
//! resolver precomputes the static adjacency in both directions once and
//! enforces it inside every mutation operation.
//!
//! ## Example
//!
//! ```rust
//! use wb_core::loads::{CargoBay, CargoSlot, SlotKey, SlotKind, UldSpec};
//!
//! let slots = vec![
//!     CargoSlot::container("Forward", "11L", 582.0, vec![UldSpec::new("AKE", 1587.0)]),
//!     CargoSlot::pallet("Forward", "11P", 582.0, vec![UldSpec::new("PMC", 5035.0)],
//!                       vec!["11L".to_string()]),
//! ];
//! let mut bay = CargoBay::new(slots);
//!
//! bay.load_max(&SlotKey::new("Forward", "11P")).unwrap();
//! assert!(bay.load_max(&SlotKey::new("Forward", "11L")).is_err());
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::{WbError, WbResult};
use crate::loads::{round1, CategoryTotals};

/// Key identifying a cargo slot: (compartment, position).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub compartment: String,
    pub position: String,
}

impl SlotKey {
    pub fn new(compartment: impl Into<String>, position: impl Into<String>) -> Self {
        SlotKey {
            compartment: compartment.into(),
            position: position.into(),
        }
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.compartment, self.position)
    }
}

/// An allowed ULD type for a slot, with its maximum gross weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UldSpec {
    /// ULD type label ("AKE", "PMC", ...)
    #[serde(rename = "type")]
    pub uld_type: String,
    /// Maximum gross weight for this ULD in this slot
    pub max_kg: f64,
}

impl UldSpec {
    pub fn new(uld_type: impl Into<String>, max_kg: f64) -> Self {
        UldSpec {
            uld_type: uld_type.into(),
            max_kg,
        }
    }
}

/// Container versus pallet, made explicit rather than inferred from the
/// presence of a `blocks` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotKind {
    /// A lower-deck container position; never blocks anything itself
    Container,
    /// A pallet position that occupies and blocks container positions
    /// (listed by position, within the same compartment)
    Pallet { blocks: Vec<String> },
}

/// One cargo position from the reference data.
///
/// Deserializes from the reference `cargo_positions.json` shape, where a
/// pallet is any record carrying a `blocks` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCargoSlot", into = "RawCargoSlot")]
pub struct CargoSlot {
    pub compartment: String,
    pub position: String,
    pub arm_in: f64,
    pub allowed_ulds: Vec<UldSpec>,
    pub kind: SlotKind,
}

impl CargoSlot {
    /// Build a container slot.
    pub fn container(
        compartment: impl Into<String>,
        position: impl Into<String>,
        arm_in: f64,
        allowed_ulds: Vec<UldSpec>,
    ) -> Self {
        CargoSlot {
            compartment: compartment.into(),
            position: position.into(),
            arm_in,
            allowed_ulds,
            kind: SlotKind::Container,
        }
    }

    /// Build a pallet slot blocking the given container positions.
    pub fn pallet(
        compartment: impl Into<String>,
        position: impl Into<String>,
        arm_in: f64,
        allowed_ulds: Vec<UldSpec>,
        blocks: Vec<String>,
    ) -> Self {
        CargoSlot {
            compartment: compartment.into(),
            position: position.into(),
            arm_in,
            allowed_ulds,
            kind: SlotKind::Pallet { blocks },
        }
    }

    /// This slot's key.
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.compartment.clone(), self.position.clone())
    }
}

/// Wire shape of a cargo position record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCargoSlot {
    compartment: String,
    position: String,
    #[serde(default)]
    arm_in: f64,
    #[serde(rename = "allowed_ULDs", default)]
    allowed_ulds: Vec<UldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    blocks: Option<Vec<String>>,
}

impl From<RawCargoSlot> for CargoSlot {
    fn from(raw: RawCargoSlot) -> Self {
        CargoSlot {
            compartment: raw.compartment,
            position: raw.position,
            arm_in: raw.arm_in,
            allowed_ulds: raw.allowed_ulds,
            kind: match raw.blocks {
                Some(blocks) => SlotKind::Pallet { blocks },
                None => SlotKind::Container,
            },
        }
    }
}

impl From<CargoSlot> for RawCargoSlot {
    fn from(slot: CargoSlot) -> Self {
        RawCargoSlot {
            compartment: slot.compartment,
            position: slot.position,
            arm_in: slot.arm_in,
            allowed_ulds: slot.allowed_ulds,
            blocks: match slot.kind {
                SlotKind::Pallet { blocks } => Some(blocks),
                SlotKind::Container => None,
            },
        }
    }
}

/// Load placed into a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoItem {
    pub weight_kg: f64,
    pub uld_type: String,
}

/// State machine over the cargo slot table.
///
/// Owns the immutable slot table plus the current loads, keyed by slot.
/// Absence from the load map means the slot is empty. All mutation checks
/// the blocked set first; `totals()` sums whatever is loaded without
/// re-checking, as blocking prevents new selections rather than
/// invalidating existing ones.
#[derive(Debug, Clone)]
pub struct CargoBay {
    slots: Vec<CargoSlot>,
    index: HashMap<SlotKey, usize>,
    /// Pallet key -> container keys it blocks (same compartment)
    pallet_blocks: HashMap<SlotKey, Vec<SlotKey>>,
    /// Container key -> pallet keys that block it
    blocked_by: HashMap<SlotKey, Vec<SlotKey>>,
    state: BTreeMap<SlotKey, CargoItem>,
}

impl CargoBay {
    /// Take ownership of the slot table and precompute the blocking
    /// adjacency in both directions.
    pub fn new(slots: Vec<CargoSlot>) -> Self {
        let mut index = HashMap::new();
        for (i, slot) in slots.iter().enumerate() {
            index.insert(slot.key(), i);
        }

        let mut pallet_blocks: HashMap<SlotKey, Vec<SlotKey>> = HashMap::new();
        let mut blocked_by: HashMap<SlotKey, Vec<SlotKey>> = HashMap::new();
        for slot in &slots {
            if let SlotKind::Pallet { blocks } = &slot.kind {
                let pallet_key = slot.key();
                for position in blocks {
                    let container_key = SlotKey::new(slot.compartment.clone(), position.clone());
                    blocked_by
                        .entry(container_key.clone())
                        .or_default()
                        .push(pallet_key.clone());
                    pallet_blocks
                        .entry(pallet_key.clone())
                        .or_default()
                        .push(container_key);
                }
            }
        }

        CargoBay {
            slots,
            index,
            pallet_blocks,
            blocked_by,
            state: BTreeMap::new(),
        }
    }

    /// The slot table.
    pub fn slots(&self) -> &[CargoSlot] {
        &self.slots
    }

    fn slot(&self, key: &SlotKey) -> WbResult<&CargoSlot> {
        self.index
            .get(key)
            .map(|&i| &self.slots[i])
            .ok_or_else(|| WbError::UnknownSlot {
                compartment: key.compartment.clone(),
                position: key.position.clone(),
            })
    }

    /// The first loaded slot that blocks `key`, if any.
    fn blocker_of(&self, key: &SlotKey) -> Option<&SlotKey> {
        // Containers are blocked by loaded pallets over them; pallets are
        // blocked by loaded containers beneath them.
        let neighbors = match &self.slot(key).ok()?.kind {
            SlotKind::Container => self.blocked_by.get(key),
            SlotKind::Pallet { .. } => self.pallet_blocks.get(key),
        };
        neighbors?.iter().find(|k| self.state.contains_key(*k))
    }

    fn ensure_not_blocked(&self, key: &SlotKey) -> WbResult<()> {
        if let Some(blocker) = self.blocker_of(key) {
            return Err(WbError::slot_blocked(
                key.compartment.clone(),
                key.position.clone(),
                blocker.to_string(),
            ));
        }
        Ok(())
    }

    /// Load the slot to its first allowed ULD's maximum weight.
    pub fn load_max(&mut self, key: &SlotKey) -> WbResult<()> {
        let slot = self.slot(key)?;
        let uld = slot
            .allowed_ulds
            .first()
            .ok_or_else(|| WbError::NoUldAvailable {
                compartment: key.compartment.clone(),
                position: key.position.clone(),
            })?;
        let item = CargoItem {
            weight_kg: uld.max_kg,
            uld_type: uld.uld_type.clone(),
        };
        self.ensure_not_blocked(key)?;
        self.state.insert(key.clone(), item);
        Ok(())
    }

    /// Load the slot with a custom weight within `[0, max]` of its first
    /// allowed ULD. The weight is rounded to one decimal.
    pub fn load_custom(&mut self, key: &SlotKey, weight_kg: f64) -> WbResult<()> {
        let slot = self.slot(key)?;
        let uld = slot
            .allowed_ulds
            .first()
            .ok_or_else(|| WbError::NoUldAvailable {
                compartment: key.compartment.clone(),
                position: key.position.clone(),
            })?;
        if weight_kg < 0.0 || weight_kg > uld.max_kg {
            return Err(WbError::invalid_input(
                "weight_kg",
                weight_kg.to_string(),
                format!("Weight must be between 0 and {} kg for {}", uld.max_kg, key),
            ));
        }
        let item = CargoItem {
            weight_kg: round1(weight_kg),
            uld_type: uld.uld_type.clone(),
        };
        self.ensure_not_blocked(key)?;
        self.state.insert(key.clone(), item);
        Ok(())
    }

    /// Clear the slot if loaded, otherwise load it to maximum.
    /// Returns whether the slot is loaded afterward.
    pub fn toggle(&mut self, key: &SlotKey) -> WbResult<bool> {
        if self.state.remove(key).is_some() {
            return Ok(false);
        }
        self.load_max(key)?;
        Ok(true)
    }

    /// Unload a single slot. Unloading an empty slot is a no-op.
    pub fn unload(&mut self, key: &SlotKey) -> WbResult<()> {
        self.slot(key)?;
        self.state.remove(key);
        Ok(())
    }

    /// Load every container slot to its maximum, skipping pallets and any
    /// container currently blocked by a loaded pallet. Returns how many
    /// slots were loaded.
    pub fn load_max_all_containers(&mut self) -> usize {
        let keys: Vec<SlotKey> = self
            .slots
            .iter()
            .filter(|s| matches!(s.kind, SlotKind::Container))
            .map(|s| s.key())
            .collect();
        let mut loaded = 0;
        for key in keys {
            if self.load_max(&key).is_ok() {
                loaded += 1;
            }
        }
        loaded
    }

    /// Reset every slot to empty.
    pub fn clear_all(&mut self) {
        self.state.clear();
    }

    /// Whether a slot currently holds a load.
    pub fn is_loaded(&self, key: &SlotKey) -> bool {
        self.state.contains_key(key)
    }

    /// Currently loaded slots in key order.
    pub fn loaded(&self) -> impl Iterator<Item = (&SlotKey, &CargoItem)> {
        self.state.iter()
    }

    /// The set of slot keys currently disabled by the blocking relation:
    /// containers under a loaded pallet, and pallets over a loaded
    /// container.
    pub fn blocked_set(&self) -> BTreeSet<SlotKey> {
        let mut blocked = BTreeSet::new();
        for key in self.state.keys() {
            let slot = &self.slots[self.index[key]];
            let neighbors = match &slot.kind {
                SlotKind::Pallet { .. } => self.pallet_blocks.get(key),
                SlotKind::Container => self.blocked_by.get(key),
            };
            if let Some(neighbors) = neighbors {
                blocked.extend(neighbors.iter().cloned());
            }
        }
        blocked
    }

    /// Cargo totals over all loaded slots.
    pub fn totals(&self) -> CategoryTotals {
        let mut weight = 0.0;
        let mut moment = 0.0;
        for (key, item) in &self.state {
            let arm = self.slots[self.index[key]].arm_in;
            weight += item.weight_kg;
            moment += item.weight_kg * arm;
        }
        CategoryTotals::from_sums(weight, moment)
    }
}
