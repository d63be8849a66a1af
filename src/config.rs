//! Run configuration loaded from TOML.
//!
//! ```
//! use hub_select::config::RunConfig;
//!
//! let config = RunConfig::from_toml_str(r#"
//!     max_solutions = 5
//!
//!     [[requirements]]
//!     name = "Ethical Reasoning"
//!     count = 1
//!
//!     [filters]
//!     departments = ["SAR", "QST"]
//! "#).unwrap();
//!
//! assert_eq!(config.max_solutions, 5);
//! assert_eq!(config.requirements.get("Ethical Reasoning"), Some(1));
//! ```

use crate::error::CoverError;
use crate::filter::ExclusionFilters;
use crate::requirements::RequirementCounts;
use crate::solver::{Backend, SolverOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_max_solutions() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunConfig {
    /// Course table (`.csv` or `.xlsx`). The command line may override it.
    #[serde(default)]
    pub data: Option<PathBuf>,

    #[serde(default = "default_max_solutions")]
    pub max_solutions: usize,

    #[serde(default)]
    pub requirements: RequirementCounts,

    #[serde(default)]
    pub filters: ExclusionFilters,

    #[serde(default)]
    pub solver: SolverOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data: None,
            max_solutions: default_max_solutions(),
            requirements: RequirementCounts::default(),
            filters: ExclusionFilters::default(),
            solver: SolverOptions::default(),
        }
    }
}

impl RunConfig {
    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoverError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CoverError> {
        let config: RunConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoverError> {
        if self.max_solutions == 0 {
            return Err(CoverError::Invalid("max_solutions must be at least 1".into()));
        }
        if let Some(limit) = self.solver.time_limit_seconds
            && (limit.is_nan() || limit <= 0.0)
        {
            return Err(CoverError::Invalid(format!(
                "time_limit_seconds must be positive, got {limit}"
            )));
        }
        if self.solver.backend == Backend::CpSat && !cfg!(feature = "cp-sat") {
            return Err(CoverError::Invalid(
                "backend `cp-sat` needs the `cp-sat` cargo feature".into(),
            ));
        }
        Ok(())
    }
}
