//! Configuration for a single `match_character` call (§6, §10.6).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::MatchError;

/// Tunable weights and GA controls for one match call. All fields have the
/// defaults from §6; a caller may override any subset via `..Default::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Weight on center-of-mass distance in the fitness function.
    pub alpha: f64,
    /// Weight on arc-length difference.
    pub beta: f64,
    /// Weight on chord-angle difference.
    pub gamma: f64,
    /// Weight on relative-position difference.
    pub epsilon: f64,

    /// GA population size. `None` means `8 * written.len()` (computed at call time).
    pub population_size: Option<usize>,
    /// Maximum number of GA generations to run.
    pub max_generations: usize,
    /// Stop once this many generations pass with no all-time-best improvement.
    pub convergence_generations: usize,
    /// Tournament selection sample size.
    pub tournament_size: usize,
    /// Probability of single-point crossover (vs. copying parents verbatim).
    pub crossover_rate: f64,
    /// Per-gene probability of mutation.
    pub mutation_rate: f64,

    /// Orientation-classifier threshold, in radians.
    pub angle_threshold: f64,

    /// Whether to run the §4.1 normalizer before feature extraction.
    pub normalize: bool,
    /// Target size (max of width/height) for normalization.
    pub target_size: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
            gamma: 1.0,
            epsilon: 1.0,
            population_size: None,
            max_generations: 100,
            convergence_generations: 10,
            tournament_size: 3,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            angle_threshold: PI / 4.0,
            normalize: true,
            target_size: 100.0,
        }
    }
}

impl MatchConfig {
    /// Resolve the effective population size for a given written-stroke count.
    pub fn resolved_population_size(&self, written_len: usize) -> usize {
        self.population_size.unwrap_or((8 * written_len).max(1))
    }

    /// Validate GA controls per §7. Run before the GA starts; numeric edge
    /// cases in the geometry (degenerate bounding boxes, zero-length chords)
    /// are handled inline elsewhere and never surface as `ConfigError`.
    pub fn validate(&self, written_len: usize) -> Result<(), MatchError> {
        let population_size = self.resolved_population_size(written_len);

        if population_size == 0 {
            return Err(MatchError::ConfigError {
                reason: "population_size must be positive".to_string(),
            });
        }
        if self.tournament_size == 0 {
            return Err(MatchError::ConfigError {
                reason: "tournament_size must be positive".to_string(),
            });
        }
        if self.tournament_size > population_size {
            return Err(MatchError::ConfigError {
                reason: format!(
                    "tournament_size ({}) exceeds population_size ({population_size})",
                    self.tournament_size
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(MatchError::ConfigError {
                reason: format!("crossover_rate {} outside [0, 1]", self.crossover_rate),
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(MatchError::ConfigError {
                reason: format!("mutation_rate {} outside [0, 1]", self.mutation_rate),
            });
        }

        Ok(())
    }
}
