// Build a spectrum, then ask which nuclides could explain each bin
use decay_spectra::{
    DecayDatabase, EnergyGrid, Inventory, LineAggregator, NuclideIdentifier, GAMMA,
};

fn main() {
    let db = DecayDatabase::from_file("tests/data/lines_test.min.json")
        .expect("Failed to load decay line dataset");

    let inventory = Inventory::from_pairs(vec![(270600, 5.0e8), (561371, 1.0e9)]).unwrap();
    let grid = EnergyGrid::new(decay_spectra::linspace(0.0, 2e6, 101)).unwrap();

    let (hist, _) = LineAggregator::new(&db, &grid)
        .aggregate(&inventory, GAMMA)
        .unwrap();

    let identifier = NuclideIdentifier::new(&db);
    let found = identifier.identify(&hist, &grid, GAMMA, &[]).unwrap();

    for (j, nucs) in found.iter().enumerate() {
        if nucs.is_empty() {
            continue;
        }
        println!("bin [{:.0}, {:.0}) eV:", grid[j], grid[j + 1]);
        for (name, energy) in nucs {
            println!("  {:<8} line at {:.1} eV", name, energy);
        }
    }
}
