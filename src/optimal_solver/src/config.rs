use crate::GODS_NUMBER;
use serde::{Deserialize, Serialize};
use std::{fs, num::NonZeroUsize, path::Path, time::Duration};
use thiserror::Error;

/// Solver configuration, usually read from a TOML file. Every field may be
/// omitted to keep its default.
///
/// ```toml
/// [pruning]
/// distance_table_capacity = 180000017
/// depth_limit = 8
///
/// [search]
/// max_solution_length = 18
/// time_limit_secs = 30.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub pruning: PruningTableConfig,
    pub search: SearchConfig,
}

/// Sizing of the corner pattern database and the structures used to build it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PruningTableConfig {
    /// Slots in the distance table. Should be a prime comfortably above the
    /// number of states recorded.
    pub distance_table_capacity: NonZeroUsize,
    /// Bits in each of the six discovery tables.
    pub discovery_capacity: NonZeroUsize,
    /// States the breadth-first frontier can hold before it starts dropping
    /// the oldest ones.
    pub queue_capacity: NonZeroUsize,
    /// Record states up to this many moves from solved and stop expanding.
    /// `None` enumerates every corner state.
    pub depth_limit: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// The deepest iteration the search attempts.
    pub max_solution_length: u8,
    /// Give up after visiting this many nodes.
    pub node_budget: Option<u64>,
    /// Give up after this many seconds of searching.
    pub time_limit_secs: Option<f64>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read the configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("The time limit must be a finite, non-negative number of seconds, got {0}")]
    InvalidTimeLimit(f64),
}

const fn non_zero(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("capacity must be non-zero"),
    }
}

impl PruningTableConfig {
    pub const DEFAULT_DISTANCE_TABLE_CAPACITY: NonZeroUsize = non_zero(180_000_017);
    pub const DEFAULT_DISCOVERY_CAPACITY: NonZeroUsize = non_zero(500_000_003);
    pub const DEFAULT_QUEUE_CAPACITY: NonZeroUsize =
        non_zero(crate::pruning::CORNER_STATE_COUNT as usize);
}

impl Default for PruningTableConfig {
    fn default() -> Self {
        Self {
            distance_table_capacity: Self::DEFAULT_DISTANCE_TABLE_CAPACITY,
            discovery_capacity: Self::DEFAULT_DISCOVERY_CAPACITY,
            queue_capacity: Self::DEFAULT_QUEUE_CAPACITY,
            depth_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_solution_length: GODS_NUMBER,
            node_budget: None,
            time_limit_secs: None,
        }
    }
}

impl SolverConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// If the text is not valid TOML, names an unknown field, or holds a value
    /// out of range for its field.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        if let Some(secs) = config.search.time_limit_secs
            && Duration::try_from_secs_f64(secs).is_err()
        {
            return Err(ConfigError::InvalidTimeLimit(secs));
        }
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    ///
    /// # Errors
    ///
    /// If the file cannot be read or does not parse. See `ConfigError`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}
