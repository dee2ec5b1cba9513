pub type SpectraResult<T> = Result<T, SpectraError>;

/// Errors that can occur while querying line data or binning spectra
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpectraError {
    #[error("Unphysical value: {0}")]
    UnphysicalValue(String),

    #[error("'{0}' not found in database")]
    NotFound(String),

    #[error("ZAI {0} has no entry in the database - too exotic, or is it stable?")]
    UnknownNuclide(u32),

    #[error("{nuclide} has no '{spectype}' decay mode")]
    NoData { nuclide: String, spectype: String },

    #[error("Invalid input: {0}")]
    Validation(String),
}
