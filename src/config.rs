//! Scenario configuration.
//!
//! A scenario is a list of batches and a list of policy combinations; every
//! combination is simulated on every batch. Scenarios are read from JSON:
//!
//! ```json
//! {
//!   "batches": [
//!     { "explicit": { "sizes": [10, 10, 10] } },
//!     { "uniform": { "count": 10, "low": 0, "high": 100, "seed": 1 } },
//!     { "geometric": { "count": 10 } }
//!   ],
//!   "combinations": [
//!     {
//!       "discipline": "fsp",
//!       "frequency_scaling": { "inverse_root": { "root": 2 } },
//!       "turbocharging": { "strong": { "reference": "ps" } },
//!       "power": { "alpha": 2 }
//!     }
//!   ]
//! }
//! ```

use std::fmt;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::generation::{geometric_batch, uniform_batch, MAX_GEOMETRIC_JOBS};
use crate::models::WorkSizeBatch;
use crate::policies::Polynomial;
use crate::simulator::{DisciplineKind, FrequencyScalingKind, PolicyCombination, TurbochargingKind};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Seed of the uniform batch in the built-in scenario.
pub const DEFAULT_UNIFORM_SEED: u64 = 2024;

/// Errors raised while loading a scenario.
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the scenario or writing results failed.
    Io(std::io::Error),
    /// The scenario is not valid JSON for [`ScenarioConfig`].
    Parse(serde_json::Error),
    /// The scenario parsed but describes invalid batches or policies.
    Invalid(Vec<ValidationError>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "scenario I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse scenario: {e}"),
            ConfigError::Invalid(errors) => {
                write!(f, "invalid scenario:")?;
                for e in errors {
                    write!(f, " [{e}]")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<Vec<ValidationError>> for ConfigError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ConfigError::Invalid(errors)
    }
}

/// How to obtain one work-size batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchSpec {
    /// Literal sizes (sorted on build).
    Explicit {
        /// Work sizes.
        sizes: Vec<f64>,
    },
    /// Integer-valued sizes uniform in `[low, high]`, from a seeded generator.
    Uniform {
        /// Number of jobs.
        count: usize,
        /// Smallest size.
        low: u32,
        /// Largest size.
        high: u32,
        /// Generator seed.
        seed: u64,
    },
    /// Sizes `1, 2, 4, ..., 2^(count - 1)`.
    Geometric {
        /// Number of jobs.
        count: usize,
    },
}

impl BatchSpec {
    /// Materializes the batch.
    pub fn build(&self) -> Result<WorkSizeBatch, Vec<ValidationError>> {
        match self {
            BatchSpec::Explicit { sizes } => WorkSizeBatch::new(sizes.clone()),
            BatchSpec::Uniform {
                count,
                low,
                high,
                seed,
            } => {
                if low > high {
                    return Err(vec![ValidationError::new(
                        ValidationErrorKind::InvalidParameter,
                        format!("Uniform batch range [{low}, {high}] is empty"),
                    )]);
                }
                let mut rng = StdRng::seed_from_u64(*seed);
                Ok(uniform_batch(&mut rng, *count, *low, *high))
            }
            BatchSpec::Geometric { count } => {
                if *count > MAX_GEOMETRIC_JOBS {
                    return Err(vec![ValidationError::new(
                        ValidationErrorKind::InvalidParameter,
                        format!("Geometric batch of {count} jobs overflows f64 sizes"),
                    )]);
                }
                Ok(geometric_batch(*count))
            }
        }
    }
}

/// Batches × policy combinations to simulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Input batches.
    pub batches: Vec<BatchSpec>,
    /// Policy combinations run on each batch.
    pub combinations: Vec<PolicyCombination>,
}

impl ScenarioConfig {
    /// Parses a scenario from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a scenario from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Builds every batch and validates every combination.
    ///
    /// # Returns
    /// The materialized batches, or every error found across the scenario.
    pub fn prepare(&self) -> Result<Vec<WorkSizeBatch>, ConfigError> {
        let mut errors = Vec::new();
        let mut batches = Vec::with_capacity(self.batches.len());

        for spec in &self.batches {
            match spec.build() {
                Ok(batch) => batches.push(batch),
                Err(mut e) => errors.append(&mut e),
            }
        }
        for combination in &self.combinations {
            if let Err(mut e) = combination.validate() {
                errors.append(&mut e);
            }
        }

        if errors.is_empty() {
            Ok(batches)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// The standard evaluation matrix.
    ///
    /// Batches: six equal jobs, five equal jobs plus one huge job, `1..=10`,
    /// ten uniform sizes in `[0, 100]`, ten doubling sizes. Combinations:
    /// PS and FSP without turbocharging under inverse-root scaling, FSP with
    /// naive and strong turbocharging against PS, and both disciplines at a
    /// constant rate with the default power law.
    pub fn standard() -> Self {
        use DisciplineKind::{Fsp, Ps};
        use FrequencyScalingKind::InverseRoot;

        let inv = |root| InverseRoot { root };
        let naive_ps = TurbochargingKind::Naive { reference: Ps };
        let strong_ps = TurbochargingKind::Strong { reference: Ps };
        let combo = |discipline, frequency_scaling, turbocharging, alpha| {
            PolicyCombination::new(discipline, frequency_scaling)
                .with_turbocharging(turbocharging)
                .with_power(Polynomial::new(alpha))
        };

        Self {
            batches: vec![
                BatchSpec::Explicit {
                    sizes: vec![10.0; 6],
                },
                BatchSpec::Explicit {
                    sizes: vec![10.0, 10.0, 10.0, 10.0, 10.0, 100_000.0],
                },
                BatchSpec::Explicit {
                    sizes: (1..=10u32).map(f64::from).collect(),
                },
                BatchSpec::Uniform {
                    count: 10,
                    low: 0,
                    high: 100,
                    seed: DEFAULT_UNIFORM_SEED,
                },
                BatchSpec::Geometric { count: 10 },
            ],
            combinations: vec![
                combo(Ps, inv(1), TurbochargingKind::Off, 1),
                combo(Ps, inv(2), TurbochargingKind::Off, 2),
                combo(Fsp, inv(1), TurbochargingKind::Off, 1),
                combo(Fsp, inv(2), TurbochargingKind::Off, 2),
                combo(Fsp, inv(1), naive_ps, 1),
                combo(Fsp, inv(2), naive_ps, 2),
                combo(Fsp, inv(1), strong_ps, 1),
                combo(Fsp, inv(2), strong_ps, 2),
                combo(Fsp, inv(3), strong_ps, 3),
                PolicyCombination::new(Ps, FrequencyScalingKind::Constant),
                PolicyCombination::new(Fsp, FrequencyScalingKind::Constant),
            ],
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_matrix_shape() {
        let config = ScenarioConfig::standard();
        assert_eq!(config.batches.len(), 5);
        assert_eq!(config.combinations.len(), 11);
        let batches = config.prepare().unwrap();
        assert_eq!(batches[0].as_slice(), &[10.0; 6]);
        assert_eq!(batches[2].len(), 10);
        assert_eq!(batches[4].as_slice()[9], 512.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ScenarioConfig::standard();
        let json = serde_json::to_string(&config).unwrap();
        let back = ScenarioConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_parse_documented_example() {
        let json = r#"{
            "batches": [
                { "explicit": { "sizes": [10, 10, 10] } },
                { "uniform": { "count": 10, "low": 0, "high": 100, "seed": 1 } },
                { "geometric": { "count": 10 } }
            ],
            "combinations": [
                {
                    "discipline": "fsp",
                    "frequency_scaling": { "inverse_root": { "root": 2 } },
                    "turbocharging": { "strong": { "reference": "ps" } },
                    "power": { "alpha": 2 }
                }
            ]
        }"#;
        let config = ScenarioConfig::from_json_str(json).unwrap();
        let batches = config.prepare().unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[1].len(), 10);
    }

    #[test]
    fn test_parse_error() {
        let err = ScenarioConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse scenario"));
    }

    #[test]
    fn test_missing_file() {
        let err = ScenarioConfig::from_file("/nonexistent/scenario.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_prepare_collects_all_errors() {
        let config = ScenarioConfig {
            batches: vec![
                BatchSpec::Explicit {
                    sizes: vec![-1.0, 2.0],
                },
                BatchSpec::Uniform {
                    count: 3,
                    low: 10,
                    high: 1,
                    seed: 0,
                },
            ],
            combinations: vec![PolicyCombination::new(
                DisciplineKind::Ps,
                FrequencyScalingKind::Linear { factor: -2.0 },
            )],
        };
        match config.prepare() {
            Err(ConfigError::Invalid(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected invalid scenario, got {other:?}"),
        }
    }
}
