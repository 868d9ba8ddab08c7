//! Solver configuration loaded from TOML.
//!
//! ```
//! use rotor16::config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     [limits]
//!     max_expansions = 500000
//!     time_limit_secs = 2.5
//!
//!     [scramble]
//!     moves = 12
//!     seed = 7
//! "#).unwrap();
//!
//! let limits = config.search_limits();
//! assert_eq!(limits.max_expansions, Some(500_000));
//! assert_eq!(limits.time_limit, Some(Duration::from_millis(2500)));
//! assert_eq!(config.scramble.moves, 12);
//! ```

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::SearchLimits;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub limits: LimitsConfig,
    pub scramble: ScrambleConfig,
}

/// Bounds on a search. Absent values mean unbounded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_expansions: Option<usize>,
    pub time_limit_secs: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrambleConfig {
    /// Random rotations applied to the solved board.
    pub moves: usize,
    /// Fixed seed; a random one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            moves: 10,
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(secs) = self.limits.time_limit_secs {
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "time_limit_secs must be a non-negative number of seconds, got {}",
                    secs
                )));
            }
        }
        if self.limits.max_expansions == Some(0) {
            return Err(ConfigError::Invalid(
                "max_expansions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Limits for the search. A time limit that does not fit in a
    /// `Duration` is treated as absent; `validate` rejects it up front.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.limits.max_expansions,
            time_limit: self
                .limits
                .time_limit_secs
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok()),
        }
    }
}
