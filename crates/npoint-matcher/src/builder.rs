//! Builder module for constructing matcher components from configuration
//!
//! This module provides the wiring between configuration types and
//! the matcher's template and execution settings.

use npoint_config::{ExecutionConfig, MatcherConfig, PermutationConfig, ThreadCountConfig};
use npoint_core::error::{NpointError, Result};
use npoint_core::{DistanceBounds, MatcherTemplate, Permutations};

use crate::parallel::ThreadCount;

/// Builder for constructing templates from configuration.
pub struct TemplateBuilder;

impl TemplateBuilder {
    /// Builds a template from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NpointError::Config`] for shape errors caught by
    /// [`MatcherConfig::validate`], and the template or permutation error
    /// for invalid values.
    pub fn build(config: &MatcherConfig) -> Result<MatcherTemplate> {
        config
            .validate()
            .map_err(|e| NpointError::Config(e.to_string()))?;

        let lower = config.bounds.lower.clone();
        let upper = config.bounds.upper.clone();
        let bounds = if config.bounds.squared {
            DistanceBounds::from_squared(lower, upper)?
        } else {
            DistanceBounds::from_distances(lower, upper)?
        };

        let permutations = Self::permutations(config.tuple_size, &config.permutations)?;
        MatcherTemplate::new(bounds, config.num_random, permutations)
    }

    /// Builds the permutation set for `tuple_size` positions.
    pub fn permutations(tuple_size: usize, config: &PermutationConfig) -> Result<Permutations> {
        match config {
            PermutationConfig::Identity => Ok(Permutations::identity(tuple_size)),
            PermutationConfig::SymmetricGroup => Ok(Permutations::symmetric_group(tuple_size)),
            PermutationConfig::ByLabel(by_label) => Ok(Permutations::from_labels(&by_label.labels)),
            PermutationConfig::Explicit(explicit) => {
                Permutations::from_list(tuple_size, &explicit.list)
            }
        }
    }

    /// Maps the configured worker count onto [`ThreadCount`].
    pub fn thread_count(config: &ExecutionConfig) -> ThreadCount {
        match config.thread_count {
            ThreadCountConfig::Auto => ThreadCount::Auto,
            ThreadCountConfig::Unlimited => ThreadCount::Unlimited,
            ThreadCountConfig::Specific(n) => ThreadCount::Specific(n),
        }
    }
}
