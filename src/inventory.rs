// Inventories of decaying nuclides: ZAI plus activity
use crate::error::{SpectraError, SpectraResult};

/// A single inventory entry: nuclide identity and its activity in Bq.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryEntry {
    pub zai: u32,
    pub activity: f64,
}

/// An insertion-ordered inventory of decaying nuclides.
///
/// Holds `(ZAI, activity)` pairs where the ZAI encodes charge, mass number
/// and isomeric state as `Z*10000 + A*10 + I`. Appending an already-present
/// ZAI accumulates onto its existing activity rather than replacing it.
///
/// Only currently-decaying species belong here: a stable nuclide has no
/// emission spectrum, so every stored activity must be strictly positive.
/// Note that the inventory itself never checks a ZAI against decay data -
/// that happens when the inventory is aggregated against a database.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build an inventory from `(zai, activity)` pairs.
    ///
    /// Duplicate ZAIs accumulate. Fails with
    /// [`SpectraError::UnphysicalValue`] on a non-positive activity and
    /// [`SpectraError::Validation`] on a non-finite one.
    pub fn from_pairs<I>(pairs: I) -> SpectraResult<Self>
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        let mut inventory = Self::new();
        for (zai, activity) in pairs {
            inventory.append(zai, activity)?;
        }
        Ok(inventory)
    }

    /// Add activity for a nuclide, accumulating if the ZAI is already present.
    pub fn append(&mut self, zai: u32, activity: f64) -> SpectraResult<()> {
        if !activity.is_finite() {
            return Err(SpectraError::Validation(format!(
                "activity for ZAI {} must be a finite number, got {}",
                zai, activity
            )));
        }
        if activity <= 0.0 {
            return Err(SpectraError::UnphysicalValue(
                "only unstable nuclides are supported, activity must be positive".to_string(),
            ));
        }

        match self.entries.iter_mut().find(|e| e.zai == zai) {
            Some(entry) => entry.activity += activity,
            None => self.entries.push(InventoryEntry { zai, activity }),
        }
        Ok(())
    }

    /// Number of distinct nuclides held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, InventoryEntry> {
        self.entries.iter()
    }

    /// Activity (Bq) for a given ZAI, or 0.0 if the ZAI is not present.
    pub fn find_activity_by_zai(&self, zai: u32) -> f64 {
        self.entries
            .iter()
            .find(|e| e.zai == zai)
            .map(|e| e.activity)
            .unwrap_or(0.0)
    }

    /// All ZAIs in insertion order.
    pub fn zais(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.zai).collect()
    }

    /// All activities (Bq) in insertion order.
    pub fn activities(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.activity).collect()
    }

    /// Remove every entry.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a InventoryEntry;
    type IntoIter = std::slice::Iter<'a, InventoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
