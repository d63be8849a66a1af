//! Error type shared by the library.

use thiserror::Error;

/// Errors raised while loading data or selecting courses.
///
/// Running out of solutions is not an error: infeasible and exhausted runs
/// come back as short solution lists. Only `SolverMalfunction` comes out of
/// the optimization core itself.
#[derive(Debug, Error)]
pub enum CoverError {
    #[error("solver `{backend}` failed: {reason}")]
    SolverMalfunction {
        backend: &'static str,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("course table has no `{0}` column")]
    MissingColumn(String),

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("catalog cache error: {0}")]
    Cache(#[from] savefile::SavefileError),

    #[error("export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl CoverError {
    pub(crate) fn malfunction(backend: &'static str, reason: impl Into<String>) -> Self {
        CoverError::SolverMalfunction {
            backend,
            reason: reason.into(),
        }
    }
}
