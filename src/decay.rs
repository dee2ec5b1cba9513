// Decay arithmetic: atoms <-> activity via half-life
use std::f64::consts::LN_2;

use crate::database::SpectralDatabase;
use crate::error::SpectraResult;

/// Activity (Bq) of a population of `atoms` of one nuclide.
///
/// Fails if the nuclide is absent from the database. Undefined for a stable
/// species - the database cannot flag stability, so that check is the
/// caller's responsibility.
pub fn activity_from_atoms(
    db: &dyn SpectralDatabase,
    nuclide: &str,
    atoms: f64,
) -> SpectraResult<f64> {
    Ok(LN_2 * atoms / db.halflife_of(nuclide)?)
}

/// Number of atoms corresponding to an `activity` (Bq) of one nuclide.
///
/// Inverse of [`activity_from_atoms`], with the same caveats.
pub fn atoms_from_activity(
    db: &dyn SpectralDatabase,
    nuclide: &str,
    activity: f64,
) -> SpectraResult<f64> {
    Ok(db.halflife_of(nuclide)? * activity / LN_2)
}

/// The charge (Z), mass number (A) and isomeric state (I) of a nuclide.
///
/// Decomposed from the database's ZAI, `Z*10000 + A*10 + I`.
pub fn zai_props(db: &dyn SpectralDatabase, nuclide: &str) -> SpectraResult<(u32, u32, u32)> {
    let zai = db.zai_of(nuclide)?;
    Ok((zai / 10000, (zai / 10) % 1000, zai % 10))
}
