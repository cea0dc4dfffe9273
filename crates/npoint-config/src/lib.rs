//! Configuration system for npoint.
//!
//! Load matcher configuration from TOML or YAML files to describe the
//! template (arity, distance ranges, permutations) and how batches of node
//! tuples are executed, without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use npoint_config::{MatcherConfig, PermutationConfig, ThreadCountConfig};
//!
//! let config = MatcherConfig::from_toml_str(r#"
//!     tuple_size = 3
//!     num_random = 1
//!
//!     [bounds]
//!     lower = [[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]]
//!     upper = [[0.0, 2.0, 2.0], [2.0, 0.0, 2.0], [2.0, 2.0, 0.0]]
//!
//!     [permutations]
//!     type = "symmetric_group"
//!
//!     [execution]
//!     thread_count = { specific = 4 }
//! "#).unwrap();
//!
//! assert_eq!(config.tuple_size, 3);
//! assert_eq!(config.permutations, PermutationConfig::SymmetricGroup);
//! assert_eq!(config.execution.thread_count, ThreadCountConfig::Specific(4));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use npoint_config::MatcherConfig;
//!
//! let config = MatcherConfig::load("matcher.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main matcher configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatcherConfig {
    /// Number of points in each matched tuple.
    #[serde(default = "default_tuple_size")]
    pub tuple_size: usize,

    /// Number of tuple positions designated random (background).
    #[serde(default)]
    pub num_random: usize,

    /// Pairwise distance ranges.
    #[serde(default)]
    pub bounds: BoundsConfig,

    /// Permutations under which the template is equivalent.
    #[serde(default)]
    pub permutations: PermutationConfig,

    /// Batch execution settings.
    #[serde(default)]
    pub execution: ExecutionConfig,
}

fn default_tuple_size() -> usize {
    2
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            tuple_size: default_tuple_size(),
            num_random: 0,
            bounds: BoundsConfig::default(),
            permutations: PermutationConfig::default(),
            execution: ExecutionConfig::default(),
        }
    }
}

impl MatcherConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the tuple size.
    pub fn with_tuple_size(mut self, tuple_size: usize) -> Self {
        self.tuple_size = tuple_size;
        self
    }

    /// Sets the number of random positions.
    pub fn with_num_random(mut self, num_random: usize) -> Self {
        self.num_random = num_random;
        self
    }

    /// Uses the same distance range `[lower, upper]` for every pair.
    ///
    /// Distances are plain (not squared); the current `tuple_size` fixes the
    /// matrix size, so call this after [`MatcherConfig::with_tuple_size`].
    pub fn with_uniform_bounds(mut self, lower: f64, upper: f64) -> Self {
        let n = self.tuple_size;
        let fill = |value: f64| -> Vec<Vec<f64>> {
            (0..n)
                .map(|i| (0..n).map(|j| if i == j { 0.0 } else { value }).collect())
                .collect()
        };
        self.bounds = BoundsConfig {
            squared: false,
            lower: fill(lower),
            upper: fill(upper),
        };
        self
    }

    /// Sets the permutation configuration.
    pub fn with_permutations(mut self, permutations: PermutationConfig) -> Self {
        self.permutations = permutations;
        self
    }

    /// Sets the worker thread count.
    pub fn with_thread_count(mut self, thread_count: ThreadCountConfig) -> Self {
        self.execution.thread_count = thread_count;
        self
    }

    /// Checks shapes and counts against `tuple_size`.
    ///
    /// Value-level checks (symmetry, ordering of lower and upper bounds,
    /// permutation closure) happen when the template is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.tuple_size;
        if n < 2 {
            return Err(ConfigError::Invalid(format!(
                "tuple_size must be at least 2, got {n}"
            )));
        }
        if self.num_random > n {
            return Err(ConfigError::Invalid(format!(
                "num_random ({}) exceeds tuple_size ({n})",
                self.num_random
            )));
        }
        for (name, matrix) in [("lower", &self.bounds.lower), ("upper", &self.bounds.upper)] {
            if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
                return Err(ConfigError::Invalid(format!(
                    "bounds.{name} must be a {n}x{n} matrix"
                )));
            }
        }
        match &self.permutations {
            PermutationConfig::ByLabel(by_label) if by_label.labels.len() != n => {
                Err(ConfigError::Invalid(format!(
                    "permutations.labels has {} entries, expected {n}",
                    by_label.labels.len()
                )))
            }
            PermutationConfig::Explicit(explicit)
                if explicit.list.iter().any(|perm| perm.len() != n) =>
            {
                Err(ConfigError::Invalid(format!(
                    "every permutation in permutations.list must have {n} entries"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Pairwise distance ranges of the template.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BoundsConfig {
    /// Whether `lower` and `upper` already hold squared distances.
    #[serde(default)]
    pub squared: bool,

    /// Lower distance bound matrix (`tuple_size` x `tuple_size`).
    #[serde(default)]
    pub lower: Vec<Vec<f64>>,

    /// Upper distance bound matrix (`tuple_size` x `tuple_size`).
    #[serde(default)]
    pub upper: Vec<Vec<f64>>,
}

/// Permutation set configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PermutationConfig {
    /// Only the identity: positions are matched in order.
    Identity,

    /// Every relabeling of positions.
    #[default]
    SymmetricGroup,

    /// Relabelings among positions sharing a label.
    ByLabel(ByLabelConfig),

    /// An explicit list of permutations.
    Explicit(ExplicitPermutationConfig),
}

/// Labels for [`PermutationConfig::ByLabel`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ByLabelConfig {
    /// One label per tuple position, typically the point set's name.
    pub labels: Vec<String>,
}

/// Permutations for [`PermutationConfig::Explicit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExplicitPermutationConfig {
    /// Each entry maps tuple position `i` to template position `entry[i]`.
    pub list: Vec<Vec<usize>>,
}

/// Batch execution configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExecutionConfig {
    /// Number of worker threads for batch evaluation.
    #[serde(default)]
    pub thread_count: ThreadCountConfig,
}

/// Worker thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCountConfig {
    /// Automatically determine thread count.
    #[default]
    Auto,

    /// Use all available CPU cores.
    Unlimited,

    /// Specific number of threads.
    Specific(usize),
}
