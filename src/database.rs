// Spectral line database - per-nuclide decay line data read from JSON
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{SpectraError, SpectraResult};

/// The decay mode most callers want.
pub const GAMMA: &str = "gamma";

// datasets mark an unknown half-life with -1
fn unknown_halflife() -> f64 {
    -1.0
}

/// Discrete line data for one decay mode of one nuclide.
///
/// Parallel arrays of equal length: `energies[i]` (eV) pairs with
/// `intensities[i]` (probability per decay, 0-1 before normalisation) and
/// `norms[i]` (normalisation multiplier). The `_unc` arrays carry the
/// matching uncertainties and may be absent from a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineData {
    pub energies: Vec<f64>,
    #[serde(default)]
    pub energies_unc: Vec<f64>,
    pub intensities: Vec<f64>,
    #[serde(default)]
    pub intensities_unc: Vec<f64>,
    pub norms: Vec<f64>,
    #[serde(default)]
    pub norms_unc: Vec<f64>,
}

/// Spectral data for a single decay mode of a nuclide.
///
/// A mode present in the dataset without a `lines` block means the decay
/// channel exists but has no tabulated discrete lines - distinct from the
/// mode being absent entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayModeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineData>,
    pub mean_energy: Option<f64>,
    pub mean_energy_unc: Option<f64>,
    pub mean_normalisation: Option<f64>,
    pub mean_normalisation_unc: Option<f64>,
    /// Tabulated line count for this mode.
    pub number: Option<u32>,
}

/// The raw record held per nuclide name.
///
/// Mirrors the dataset schema: the reserved keys `zai` and `halflife` are
/// typed fields, and every other key is an open-ended decay mode name
/// ("gamma", "beta", "x-ray", "alpha", "SF", ...) captured into `modes`.
/// Mode names are open-ended strings rather than a closed enum so new
/// datasets can introduce modes without a schema change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NuclideRecord {
    /// Z*10000 + A*10 + I.
    pub zai: u32,
    /// Half-life in seconds, -1 when unknown.
    #[serde(default = "unknown_halflife")]
    pub halflife: f64,
    #[serde(flatten)]
    pub modes: BTreeMap<String, DecayModeRecord>,
}

/// The full dataset: nuclide name to record.
pub type NuclideMap = BTreeMap<String, NuclideRecord>;

/// A source that can load the nuclide line dataset.
///
/// Implementations open their backing store, read the full mapping and
/// release the store before returning. The database depends only on the
/// returned shape, not on how it is stored.
pub trait LineDataSource {
    fn load(&self) -> SpectraResult<NuclideMap>;
}

/// Loads the dataset from a JSON file on disk.
///
/// Expects a single JSON object keyed by nuclide name:
///
/// ```json
/// {
///     "H3": {
///         "zai": 10030,
///         "halflife": 389105000.0,
///         "beta": {
///             "lines": {
///                 "energies": [18571.0],
///                 "energies_unc": [6.0],
///                 "intensities": [1.0],
///                 "intensities_unc": [0.0],
///                 "norms": [1.0],
///                 "norms_unc": [0.0]
///             },
///             "mean_energy": 5707.4,
///             "mean_energy_unc": 1.84,
///             "mean_normalisation": 1.0,
///             "mean_normalisation_unc": 0.0,
///             "number": 1
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LineDataSource for JsonFileLoader {
    fn load(&self) -> SpectraResult<NuclideMap> {
        let file = File::open(&self.path).map_err(|e| {
            SpectraError::NotFound(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            SpectraError::Validation(format!(
                "failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Read-only lookup contract over a spectral line dataset.
///
/// The database is loaded once and never mutated, so implementations are
/// safe to share across concurrent readers.
pub trait SpectralDatabase {
    /// Check if a nuclide name exists in the database.
    fn contains(&self, nuclide: &str) -> bool;

    /// All nuclide names in the database.
    fn all_nuclides(&self) -> Vec<String>;

    /// All nuclide names having the given decay mode.
    fn all_nuclides_of_type(&self, spectype: &str) -> Vec<String>;

    /// All unique decay mode names across the whole database, sorted.
    fn all_types(&self) -> Vec<String>;

    /// Decay mode names for one nuclide, sorted. Fails if the name is absent.
    fn types_of(&self, nuclide: &str) -> SpectraResult<Vec<String>>;

    /// Whether the nuclide has the given decay mode. Fails if the name is
    /// absent.
    fn has_type(&self, nuclide: &str, spectype: &str) -> SpectraResult<bool>;

    /// Whether discrete line data exists for the nuclide and mode. Fails if
    /// the name or mode is absent.
    fn has_lines(&self, nuclide: &str, spectype: &str) -> SpectraResult<bool>;

    /// The name for a ZAI, or `None` if no record carries it.
    fn name_of(&self, zai: u32) -> Option<String>;

    /// The ZAI for a name. Fails if the name is absent.
    fn zai_of(&self, nuclide: &str) -> SpectraResult<u32>;

    /// Half-life in seconds. Fails if the name is absent.
    ///
    /// A stored value of -1 means the dataset does not know the half-life;
    /// it is returned as-is.
    fn halflife_of(&self, nuclide: &str) -> SpectraResult<f64>;

    /// Line energies in eV for a nuclide and mode, empty when the mode has
    /// no tabulated lines. Fails if the name or mode is absent.
    fn energies_of(&self, nuclide: &str, spectype: &str) -> SpectraResult<Vec<f64>>;

    /// Line energy uncertainties in eV, same emptiness rules as
    /// [`SpectralDatabase::energies_of`].
    fn energies_unc_of(&self, nuclide: &str, spectype: &str) -> SpectraResult<Vec<f64>>;

    /// Normalised line intensities, each raw intensity multiplied by its
    /// paired normalisation constant. Same length and emptiness rules as
    /// [`SpectralDatabase::energies_of`].
    fn intensities_of(&self, nuclide: &str, spectype: &str) -> SpectraResult<Vec<f64>>;
}

/// The JSON-backed spectral database.
#[derive(Debug, Clone)]
pub struct DecayDatabase {
    raw: NuclideMap,
}

impl DecayDatabase {
    /// Load the database from any [`LineDataSource`].
    pub fn new(source: &dyn LineDataSource) -> SpectraResult<Self> {
        Ok(Self { raw: source.load()? })
    }

    /// Wrap an already-loaded mapping.
    pub fn from_map(raw: NuclideMap) -> Self {
        Self { raw }
    }

    /// Parse the database from a JSON string.
    pub fn from_json_str(json: &str) -> SpectraResult<Self> {
        let raw = serde_json::from_str(json)
            .map_err(|e| SpectraError::Validation(format!("failed to parse dataset: {}", e)))?;
        Ok(Self { raw })
    }

    /// Load the database from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SpectraResult<Self> {
        Self::new(&JsonFileLoader::new(path))
    }

    /// Load the database from the globally configured dataset path.
    pub fn from_config() -> SpectraResult<Self> {
        let path = Config::global().get_decay_lines().ok_or_else(|| {
            SpectraError::Validation(
                "no decay line dataset configured - set one via Config::global() first"
                    .to_string(),
            )
        })?;
        Self::from_file(path)
    }

    /// The underlying mapping, for custom read-only queries.
    pub fn raw(&self) -> &NuclideMap {
        &self.raw
    }

    fn record(&self, nuclide: &str) -> SpectraResult<&NuclideRecord> {
        self.raw
            .get(nuclide)
            .ok_or_else(|| SpectraError::NotFound(nuclide.to_string()))
    }

    fn mode(&self, nuclide: &str, spectype: &str) -> SpectraResult<&DecayModeRecord> {
        self.record(nuclide)?.modes.get(spectype).ok_or_else(|| {
            SpectraError::NotFound(format!("{}/{}", nuclide, spectype))
        })
    }
}

impl SpectralDatabase for DecayDatabase {
    fn contains(&self, nuclide: &str) -> bool {
        self.raw.contains_key(nuclide)
    }

    fn all_nuclides(&self) -> Vec<String> {
        self.raw.keys().cloned().collect()
    }

    fn all_nuclides_of_type(&self, spectype: &str) -> Vec<String> {
        self.raw
            .iter()
            .filter(|(_, record)| record.modes.contains_key(spectype))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn all_types(&self) -> Vec<String> {
        let mut spectypes = BTreeSet::new();
        for record in self.raw.values() {
            for mode in record.modes.keys() {
                spectypes.insert(mode.clone());
            }
        }
        spectypes.into_iter().collect()
    }

    fn types_of(&self, nuclide: &str) -> SpectraResult<Vec<String>> {
        Ok(self.record(nuclide)?.modes.keys().cloned().collect())
    }

    fn has_type(&self, nuclide: &str, spectype: &str) -> SpectraResult<bool> {
        Ok(self.record(nuclide)?.modes.contains_key(spectype))
    }

    fn has_lines(&self, nuclide: &str, spectype: &str) -> SpectraResult<bool> {
        Ok(self.mode(nuclide, spectype)?.lines.is_some())
    }

    fn name_of(&self, zai: u32) -> Option<String> {
        // linear scan, the dataset is small enough that an index is not worth it
        self.raw
            .iter()
            .find(|(_, record)| record.zai == zai)
            .map(|(name, _)| name.clone())
    }

    fn zai_of(&self, nuclide: &str) -> SpectraResult<u32> {
        Ok(self.record(nuclide)?.zai)
    }

    fn halflife_of(&self, nuclide: &str) -> SpectraResult<f64> {
        Ok(self.record(nuclide)?.halflife)
    }

    fn energies_of(&self, nuclide: &str, spectype: &str) -> SpectraResult<Vec<f64>> {
        Ok(self
            .mode(nuclide, spectype)?
            .lines
            .as_ref()
            .map(|lines| lines.energies.clone())
            .unwrap_or_default())
    }

    fn energies_unc_of(&self, nuclide: &str, spectype: &str) -> SpectraResult<Vec<f64>> {
        Ok(self
            .mode(nuclide, spectype)?
            .lines
            .as_ref()
            .map(|lines| lines.energies_unc.clone())
            .unwrap_or_default())
    }

    fn intensities_of(&self, nuclide: &str, spectype: &str) -> SpectraResult<Vec<f64>> {
        Ok(self
            .mode(nuclide, spectype)?
            .lines
            .as_ref()
            .map(|lines| {
                lines
                    .intensities
                    .iter()
                    .zip(&lines.norms)
                    .map(|(intensity, norm)| intensity * norm)
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Every `(name, line energy)` pair for a decay mode across the whole
/// database, flattened and sorted.
///
/// Sorted ascending by energy when `by_energy` is true (ties keep the
/// database gather order), otherwise alphabetically by name. Empty when no
/// nuclide has the mode.
pub fn sorted_lines(
    db: &dyn SpectralDatabase,
    spectype: &str,
    by_energy: bool,
) -> Vec<(String, f64)> {
    let mut all_lines = Vec::new();
    for nuclide in db.all_nuclides_of_type(spectype) {
        if let Ok(energies) = db.energies_of(&nuclide, spectype) {
            for energy in energies {
                all_lines.push((nuclide.clone(), energy));
            }
        }
    }

    if by_energy {
        all_lines.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    } else {
        all_lines.sort_by(|a, b| a.0.cmp(&b.0));
    }
    all_lines
}
