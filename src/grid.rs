// Energy grid defining histogram bin edges
use std::ops::Index;

use crate::error::{SpectraError, SpectraResult};
use crate::utilities::linspace;

/// An immutable energy grid defining histogram bins, in eV.
///
/// The grid is a sequence of N bin boundaries `[E0, E1, ..., En-1]` creating
/// N-1 half-open bins `[E0, E1), [E1, E2), ...`. Boundaries are expected in
/// ascending order for meaningful bins; construction only enforces that no
/// boundary is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyGrid {
    bounds: Vec<f64>,
}

impl EnergyGrid {
    /// Create a grid from a sequence of bin boundaries in eV.
    ///
    /// Fails with [`SpectraError::UnphysicalValue`] if any boundary is
    /// negative.
    pub fn new(bounds: Vec<f64>) -> SpectraResult<Self> {
        if bounds.iter().any(|&b| b < 0.0) {
            return Err(SpectraError::UnphysicalValue(
                "energies cannot be negative".to_string(),
            ));
        }
        Ok(Self { bounds })
    }

    /// The number of bin boundaries.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// The number of bins, one less than the number of boundaries.
    pub fn nrofbins(&self) -> usize {
        self.bounds.len().saturating_sub(1)
    }

    /// The full boundary sequence.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Midpoint energy of every bin, in eV.
    pub fn midpoints(&self) -> Vec<f64> {
        self.bounds.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    /// Minimum energy over all boundaries.
    ///
    /// For a canonical ascending grid this is the first boundary, but the
    /// minimum is taken over the whole sequence.
    pub fn min_energy(&self) -> f64 {
        self.bounds.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Maximum energy over all boundaries.
    pub fn max_energy(&self) -> f64 {
        self.bounds
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Energy units of the grid. Only eV is supported.
    pub fn units(&self) -> &'static str {
        "eV"
    }

    /// Get the bin index holding a given energy, by binary search.
    ///
    /// Returns `None` if the energy is below the first boundary or at/above
    /// the last. Assumes an ascending grid.
    pub fn find_bin(&self, energy: f64) -> Option<usize> {
        let last = *self.bounds.last()?;
        if energy < self.bounds[0] || energy >= last {
            return None;
        }

        // find i such that bounds[i] <= energy < bounds[i+1]
        let result = self.bounds.binary_search_by(|&bound| {
            if bound <= energy {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            }
        });

        match result {
            Ok(i) => Some(i),
            Err(i) if i > 0 && i < self.bounds.len() => Some(i - 1),
            Err(_) => None,
        }
    }
}

impl Default for EnergyGrid {
    /// 10000 uniform boundaries from 0 to 10 MeV.
    fn default() -> Self {
        Self {
            bounds: linspace(0.0, 10e6, 10000),
        }
    }
}

impl Index<usize> for EnergyGrid {
    type Output = f64;

    // no bounds checking beyond the underlying Vec
    fn index(&self, i: usize) -> &f64 {
        &self.bounds[i]
    }
}
