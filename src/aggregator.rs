// Line-to-bin accumulation of decay lines over an energy grid
use crate::database::SpectralDatabase;
use crate::error::{SpectraError, SpectraResult};
use crate::grid::EnergyGrid;
use crate::inventory::Inventory;

/// Decay modes gathered by [`MultiModeAggregator`] when the caller has no
/// particular preference.
pub const DEFAULT_MODES: &[&str] = &["gamma", "x-ray"];

/// Histogram and matching bin boundary sequence, as returned by every
/// aggregator. `histogram.len() + 1 == bounds.len()`.
pub type BinnedSpectrum = (Vec<f64>, Vec<f64>);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Weighting {
    Direct,
    AverageEnergy,
}

/// Gather `(energy, intensity * activity)` pairs for every line of every
/// inventory nuclide in one decay mode, appending onto `lines`.
fn gather_lines(
    db: &dyn SpectralDatabase,
    inventory: &Inventory,
    spectype: &str,
    lines: &mut Vec<(f64, f64)>,
) -> SpectraResult<()> {
    for entry in inventory {
        let name = db
            .name_of(entry.zai)
            .ok_or(SpectraError::UnknownNuclide(entry.zai))?;

        if !db.types_of(&name)?.iter().any(|t| t == spectype) {
            return Err(SpectraError::NoData {
                nuclide: name,
                spectype: spectype.to_string(),
            });
        }

        let energies = db.energies_of(&name, spectype)?;
        let intensities = db.intensities_of(&name, spectype)?;
        for (energy, intensity) in energies.into_iter().zip(intensities) {
            lines.push((energy, intensity * entry.activity));
        }
    }
    Ok(())
}

/// Sort the working set ascending by energy and accumulate each line into
/// its bin.
///
/// The bin cursor only ever moves forward: lines arrive in non-decreasing
/// energy order, so the search for the next line's bin resumes where the
/// previous line landed. Lines below the first boundary or at/above the
/// last are dropped. The working set lives and dies within this call.
fn bin_lines(grid: &EnergyGrid, mut lines: Vec<(f64, f64)>, weighting: Weighting) -> Vec<f64> {
    let mut hist = vec![0.0; grid.nrofbins()];
    if lines.is_empty() {
        return hist;
    }

    lines.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let midpoints = match weighting {
        Weighting::AverageEnergy => grid.midpoints(),
        Weighting::Direct => Vec::new(),
    };

    let mut ibin = 0;
    for (energy, value) in lines {
        for j in ibin..grid.nrofbins() {
            if energy >= grid[j] && energy < grid[j + 1] {
                hist[j] += match weighting {
                    Weighting::Direct => value,
                    Weighting::AverageEnergy => value * energy / midpoints[j],
                };
                ibin = j;
                break;
            }
        }
    }

    hist
}

/// Bins each line's `intensity * activity` directly into the bin holding
/// the line energy.
pub struct LineAggregator<'a> {
    db: &'a dyn SpectralDatabase,
    grid: &'a EnergyGrid,
}

impl<'a> LineAggregator<'a> {
    pub fn new(db: &'a dyn SpectralDatabase, grid: &'a EnergyGrid) -> Self {
        Self { db, grid }
    }

    /// Bin the lines of a whole inventory for one decay mode.
    ///
    /// Fails with [`SpectraError::UnknownNuclide`] when an inventory ZAI has
    /// no database entry and [`SpectraError::NoData`] when a nuclide lacks
    /// the requested mode; either aborts the whole histogram.
    pub fn aggregate(&self, inventory: &Inventory, spectype: &str) -> SpectraResult<BinnedSpectrum> {
        let mut lines = Vec::new();
        gather_lines(self.db, inventory, spectype, &mut lines)?;
        Ok((
            bin_lines(self.grid, lines, Weighting::Direct),
            self.grid.bounds().to_vec(),
        ))
    }
}

/// Like [`LineAggregator`], but each contribution is scaled by
/// `line_energy / bin_midpoint_energy`.
///
/// When a binned line is later represented by its bin's midpoint energy, the
/// rescale keeps the total energy flux of the spectrum unchanged, which
/// matters for dose calculations on coarse grids. As bins narrow the scale
/// factor tends to 1 and the result converges on the direct aggregator.
pub struct AverageEnergyAggregator<'a> {
    db: &'a dyn SpectralDatabase,
    grid: &'a EnergyGrid,
}

impl<'a> AverageEnergyAggregator<'a> {
    pub fn new(db: &'a dyn SpectralDatabase, grid: &'a EnergyGrid) -> Self {
        Self { db, grid }
    }

    pub fn aggregate(&self, inventory: &Inventory, spectype: &str) -> SpectraResult<BinnedSpectrum> {
        let mut lines = Vec::new();
        gather_lines(self.db, inventory, spectype, &mut lines)?;
        Ok((
            bin_lines(self.grid, lines, Weighting::AverageEnergy),
            self.grid.bounds().to_vec(),
        ))
    }
}

/// Direct binning over several decay modes at once, e.g. gamma + x-ray.
///
/// Lines from all requested modes are concatenated before the single
/// sort-and-bin pass, so the result equals the sum of per-mode direct
/// aggregations.
pub struct MultiModeAggregator<'a> {
    db: &'a dyn SpectralDatabase,
    grid: &'a EnergyGrid,
}

impl<'a> MultiModeAggregator<'a> {
    pub fn new(db: &'a dyn SpectralDatabase, grid: &'a EnergyGrid) -> Self {
        Self { db, grid }
    }

    /// Bin the lines of a whole inventory across `spectypes`, see
    /// [`DEFAULT_MODES`]. Every nuclide must carry every requested mode.
    pub fn aggregate(
        &self,
        inventory: &Inventory,
        spectypes: &[&str],
    ) -> SpectraResult<BinnedSpectrum> {
        let mut lines = Vec::new();
        for spectype in spectypes {
            gather_lines(self.db, inventory, spectype, &mut lines)?;
        }
        Ok((
            bin_lines(self.grid, lines, Weighting::Direct),
            self.grid.bounds().to_vec(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DecayDatabase;

    fn test_db() -> DecayDatabase {
        DecayDatabase::from_json_str(
            r#"{
                "A100": {
                    "zai": 101000,
                    "halflife": 100.0,
                    "gamma": {
                        "lines": {
                            "energies": [2500.0, 7500.0],
                            "intensities": [0.5, 0.25],
                            "norms": [1.0, 2.0]
                        },
                        "number": 2
                    },
                    "x-ray": {
                        "lines": {
                            "energies": [1500.0],
                            "intensities": [0.1],
                            "norms": [1.0]
                        },
                        "number": 1
                    }
                },
                "B200": {
                    "zai": 202000,
                    "halflife": 200.0,
                    "gamma": {
                        "lines": {
                            "energies": [2600.0, 99999.0],
                            "intensities": [1.0, 1.0],
                            "norms": [1.0, 1.0]
                        },
                        "number": 2
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_direct_single_line_lands_in_its_bin() {
        let db = test_db();
        let grid = EnergyGrid::new(vec![0.0, 5000.0, 10000.0]).unwrap();
        let inventory = Inventory::from_pairs(vec![(101000, 2.0)]).unwrap();

        let (hist, bounds) = LineAggregator::new(&db, &grid)
            .aggregate(&inventory, "gamma")
            .unwrap();

        assert_eq!(bounds, grid.bounds());
        assert_eq!(hist.len() + 1, bounds.len());
        // 0.5 * 2.0 in [0, 5000), 0.25 * 2.0 * 2.0 in [5000, 10000)
        assert_eq!(hist, vec![1.0, 1.0]);
    }

    #[test]
    fn test_direct_sums_across_nuclides() {
        let db = test_db();
        let grid = EnergyGrid::new(vec![0.0, 5000.0, 10000.0]).unwrap();
        let inventory = Inventory::from_pairs(vec![(101000, 2.0), (202000, 3.0)]).unwrap();

        let (hist, _) = LineAggregator::new(&db, &grid)
            .aggregate(&inventory, "gamma")
            .unwrap();

        // B200's 2600 eV line joins A100's 2500 eV line in the first bin,
        // its 99999 eV line is beyond the grid and dropped
        assert_eq!(hist, vec![1.0 + 3.0, 1.0]);
    }

    #[test]
    fn test_out_of_range_lines_are_dropped() {
        let db = test_db();
        let grid = EnergyGrid::new(vec![3000.0, 5000.0]).unwrap();
        let inventory = Inventory::from_pairs(vec![(101000, 1.0)]).unwrap();

        let (hist, _) = LineAggregator::new(&db, &grid)
            .aggregate(&inventory, "gamma")
            .unwrap();

        // 2500 below, 7500 above: nothing binned, no error
        assert_eq!(hist, vec![0.0]);
    }

    #[test]
    fn test_line_at_upper_bound_is_dropped() {
        let db = test_db();
        let grid = EnergyGrid::new(vec![0.0, 7500.0]).unwrap();
        let inventory = Inventory::from_pairs(vec![(101000, 1.0)]).unwrap();

        let (hist, _) = LineAggregator::new(&db, &grid)
            .aggregate(&inventory, "gamma")
            .unwrap();

        // bins are half-open, 7500 is at the last boundary
        assert_eq!(hist, vec![0.5]);
    }

    #[test]
    fn test_average_energy_rescales_by_midpoint() {
        let db = test_db();
        let grid = EnergyGrid::new(vec![0.0, 5000.0, 10000.0]).unwrap();
        let inventory = Inventory::from_pairs(vec![(101000, 2.0)]).unwrap();

        let (hist, _) = AverageEnergyAggregator::new(&db, &grid)
            .aggregate(&inventory, "gamma")
            .unwrap();

        // midpoints are 2500 and 7500, both lines sit exactly on them here
        assert_eq!(hist, vec![1.0 * 2500.0 / 2500.0, 1.0 * 7500.0 / 7500.0]);

        // with an off-centre bin the 2500 eV line is rescaled by 2500/3000
        let offset_grid = EnergyGrid::new(vec![2000.0, 4000.0]).unwrap();
        let (hist, _) = AverageEnergyAggregator::new(&db, &offset_grid)
            .aggregate(&inventory, "gamma")
            .unwrap();
        assert!((hist[0] - 1.0 * 2500.0 / 3000.0).abs() < 1e-12);
    }

    #[test]
    fn test_multi_mode_equals_sum_of_single_modes() {
        let db = test_db();
        let grid = EnergyGrid::new(vec![0.0, 2000.0, 5000.0, 10000.0]).unwrap();
        let inventory = Inventory::from_pairs(vec![(101000, 4.0)]).unwrap();

        let direct = LineAggregator::new(&db, &grid);
        let (gamma_hist, _) = direct.aggregate(&inventory, "gamma").unwrap();
        let (xray_hist, _) = direct.aggregate(&inventory, "x-ray").unwrap();

        let (multi_hist, _) = MultiModeAggregator::new(&db, &grid)
            .aggregate(&inventory, DEFAULT_MODES)
            .unwrap();

        for j in 0..grid.nrofbins() {
            assert!((multi_hist[j] - (gamma_hist[j] + xray_hist[j])).abs() < 1e-12);
        }
        // the x-ray line is really there
        assert_eq!(multi_hist[0], 0.1 * 4.0);
    }

    #[test]
    fn test_unknown_zai_aborts_aggregation() {
        let db = test_db();
        let grid = EnergyGrid::new(vec![0.0, 10000.0]).unwrap();
        let inventory = Inventory::from_pairs(vec![(101000, 1.0), (999999, 1.0)]).unwrap();

        let result = LineAggregator::new(&db, &grid).aggregate(&inventory, "gamma");
        assert_eq!(result, Err(SpectraError::UnknownNuclide(999999)));
    }

    #[test]
    fn test_missing_mode_aborts_aggregation() {
        let db = test_db();
        let grid = EnergyGrid::new(vec![0.0, 10000.0]).unwrap();
        // B200 has no x-ray mode
        let inventory = Inventory::from_pairs(vec![(101000, 1.0), (202000, 1.0)]).unwrap();

        let result = MultiModeAggregator::new(&db, &grid).aggregate(&inventory, DEFAULT_MODES);
        assert!(matches!(result, Err(SpectraError::NoData { .. })));
    }

    #[test]
    fn test_empty_inventory_gives_zero_histogram() {
        let db = test_db();
        let grid = EnergyGrid::new(vec![0.0, 5000.0, 10000.0]).unwrap();
        let inventory = Inventory::new();

        let (hist, _) = LineAggregator::new(&db, &grid)
            .aggregate(&inventory, "gamma")
            .unwrap();
        assert_eq!(hist, vec![0.0, 0.0]);
    }

    #[test]
    fn test_aggregator_reuse_does_not_leak_state() {
        let db = test_db();
        let grid = EnergyGrid::new(vec![0.0, 5000.0, 10000.0]).unwrap();
        let aggregator = LineAggregator::new(&db, &grid);

        let first = Inventory::from_pairs(vec![(101000, 2.0)]).unwrap();
        let (hist1, _) = aggregator.aggregate(&first, "gamma").unwrap();

        let second = Inventory::from_pairs(vec![(202000, 3.0)]).unwrap();
        let (hist2, _) = aggregator.aggregate(&second, "gamma").unwrap();

        // second call sees only the second inventory
        assert_eq!(hist1, vec![1.0, 1.0]);
        assert_eq!(hist2, vec![3.0, 0.0]);
    }
}
