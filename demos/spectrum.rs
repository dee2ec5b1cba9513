// Bin a gamma spectrum from a small mixed inventory and print it
use decay_spectra::{
    DecayDatabase, EnergyGrid, Inventory, LineAggregator, MultiModeAggregator, DEFAULT_MODES,
    GAMMA,
};

fn main() {
    let db = DecayDatabase::from_file("tests/data/lines_test.min.json")
        .expect("Failed to load decay line dataset");

    // 1 kBq of Ba137m and 2 kBq of Co60
    let mut inventory = Inventory::new();
    inventory.append(561371, 1.0e3).unwrap();
    inventory.append(270600, 2.0e3).unwrap();

    // 100 keV bins up to 2 MeV
    let grid = EnergyGrid::new(decay_spectra::linspace(0.0, 2e6, 21)).unwrap();

    let aggregator = LineAggregator::new(&db, &grid);
    let (hist, bounds) = aggregator.aggregate(&inventory, GAMMA).unwrap();

    println!("gamma spectrum ({}):", grid.units());
    for (j, value) in hist.iter().enumerate() {
        if *value > 0.0 {
            println!("  [{:>9.0}, {:>9.0})  {:.4e}", bounds[j], bounds[j + 1], value);
        }
    }

    // the same inventory including x-rays
    let multi = MultiModeAggregator::new(&db, &grid);
    let (hist, _) = multi.aggregate(&inventory, DEFAULT_MODES).unwrap();
    let total: f64 = hist.iter().sum();
    println!("total binned intensity over {:?}: {:.4e}", DEFAULT_MODES, total);
}
