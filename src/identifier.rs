// Bin-wise identification of nuclides from a binned spectrum
use crate::database::{sorted_lines, SpectralDatabase};
use crate::error::{SpectraError, SpectraResult};
use crate::grid::EnergyGrid;

/// Proposes which nuclides could explain each populated bin of a histogram.
///
/// Works bin by bin over one globally sorted pass of the database's lines
/// for a single decay mode. Matching is exact against the bin interval -
/// there is no energy tolerance, so a true line pushed across a bin
/// boundary by rounding will not match.
pub struct NuclideIdentifier<'a> {
    db: &'a dyn SpectralDatabase,
}

impl<'a> NuclideIdentifier<'a> {
    pub fn new(db: &'a dyn SpectralDatabase) -> Self {
        Self { db }
    }

    /// Candidate `(name, line energy)` lists, one per histogram bin.
    ///
    /// A bin with zero value yields an empty list. `excludes` suppresses
    /// nuclides known not to be present. Fails with
    /// [`SpectraError::Validation`] when the histogram length does not match
    /// the grid.
    pub fn identify(
        &self,
        values: &[f64],
        grid: &EnergyGrid,
        spectype: &str,
        excludes: &[&str],
    ) -> SpectraResult<Vec<Vec<(String, f64)>>> {
        if values.len() != grid.nrofbins() {
            return Err(SpectraError::Validation(format!(
                "histogram has {} bins but the grid defines {}",
                values.len(),
                grid.nrofbins()
            )));
        }

        let lines = sorted_lines(self.db, spectype, true);

        let mut found = Vec::with_capacity(values.len());
        // index of the first line not yet consumed by an earlier bin;
        // bins ascend in energy, so the scan never needs to back up
        let mut cursor = 0usize;

        for (ibin, &value) in values.iter().enumerate() {
            let mut nucs = Vec::new();

            if value > 0.0 {
                let lb = grid[ibin];
                let ub = grid[ibin + 1];

                while cursor < lines.len() {
                    let (name, energy) = &lines[cursor];
                    if *energy >= ub {
                        // belongs to a later bin, resume here next time
                        break;
                    }
                    if *energy >= lb && !excludes.contains(&name.as_str()) {
                        nucs.push((name.clone(), *energy));
                    }
                    cursor += 1;
                }
            }

            found.push(nucs);
        }

        Ok(found)
    }
}
