// Import the modules and re-export the types for library usage
mod aggregator;
mod config;
mod database;
mod decay;
mod error;
mod grid;
mod identifier;
mod inventory;
mod utilities;

pub use aggregator::{
    AverageEnergyAggregator, BinnedSpectrum, LineAggregator, MultiModeAggregator, DEFAULT_MODES,
};
pub use config::Config;
pub use database::{
    sorted_lines, DecayDatabase, DecayModeRecord, JsonFileLoader, LineData, LineDataSource,
    NuclideMap, NuclideRecord, SpectralDatabase, GAMMA,
};
pub use decay::{activity_from_atoms, atoms_from_activity, zai_props};
pub use error::{SpectraError, SpectraResult};
pub use grid::EnergyGrid;
pub use identifier::NuclideIdentifier;
pub use inventory::{Inventory, InventoryEntry};
pub use utilities::{linspace, logspace, step_points};
