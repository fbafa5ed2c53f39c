//! Runtime-selectable policy combinations.
//!
//! [`Simulator`] composes policies at compile time. When the combination is
//! only known at runtime (configuration files, sweeps), [`PolicyCombination`]
//! selects each policy by value and dispatches with a `match`, reusing the
//! same generic simulator.
//!
//! # Usage
//!
//! ```
//! use u_turbosim::models::WorkSizeBatch;
//! use u_turbosim::simulator::{
//!     DisciplineKind, FrequencyScalingKind, PolicyCombination, TurbochargingKind,
//! };
//!
//! let combination = PolicyCombination::new(DisciplineKind::Fsp, FrequencyScalingKind::InverseRoot { root: 2 })
//!     .with_turbocharging(TurbochargingKind::Strong { reference: DisciplineKind::Ps });
//!
//! let batch = WorkSizeBatch::new(vec![1.0, 2.0, 3.0]).unwrap();
//! let result = combination.simulate(&batch).unwrap();
//! assert!(result.turbo_rate >= 1.0);
//! ```

use serde::{Deserialize, Serialize};

use super::Simulator;
use crate::models::{SimulationResult, WorkSizeBatch};
use crate::policies::turbo::{naive_speedup, strong_speedup};
use crate::policies::{
    Constant, FairSharePartition, FrequencyScaling, InverseRoot, Linear, Off, Polynomial,
    ProcessorSharing, SchedulingDiscipline, Turbocharging,
};
use crate::validation::{ValidationError, ValidationErrorKind, ValidationResult};

/// Scheduling discipline selected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisciplineKind {
    /// Processor-Sharing.
    Ps,
    /// Fair-Share Partition.
    Fsp,
}

impl SchedulingDiscipline for DisciplineKind {
    fn name(&self) -> &'static str {
        match self {
            DisciplineKind::Ps => ProcessorSharing.name(),
            DisciplineKind::Fsp => FairSharePartition.name(),
        }
    }

    fn finish_time<F: FrequencyScaling + ?Sized>(
        &self,
        k: usize,
        work_sizes: &[f64],
        freq: &F,
    ) -> f64 {
        match self {
            DisciplineKind::Ps => ProcessorSharing.finish_time(k, work_sizes, freq),
            DisciplineKind::Fsp => FairSharePartition.finish_time(k, work_sizes, freq),
        }
    }

    fn finish_times<F: FrequencyScaling + ?Sized>(&self, work_sizes: &[f64], freq: &F) -> Vec<f64> {
        match self {
            DisciplineKind::Ps => ProcessorSharing.finish_times(work_sizes, freq),
            DisciplineKind::Fsp => FairSharePartition.finish_times(work_sizes, freq),
        }
    }
}

/// Frequency-scaling law selected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyScalingKind {
    /// `rate(j) = 1`.
    Constant,
    /// `rate(j) = factor * j`.
    Linear {
        /// Proportionality constant.
        factor: f64,
    },
    /// `rate(j) = j^(1/root)`.
    InverseRoot {
        /// Root degree.
        root: u32,
    },
}

impl FrequencyScaling for FrequencyScalingKind {
    fn name(&self) -> String {
        match *self {
            FrequencyScalingKind::Constant => Constant.name(),
            FrequencyScalingKind::Linear { factor } => Linear::new(factor).name(),
            FrequencyScalingKind::InverseRoot { root } => InverseRoot::new(root).name(),
        }
    }

    fn rate(&self, jobs_remaining: usize) -> f64 {
        match *self {
            FrequencyScalingKind::Constant => Constant.rate(jobs_remaining),
            FrequencyScalingKind::Linear { factor } => Linear::new(factor).rate(jobs_remaining),
            FrequencyScalingKind::InverseRoot { root } => {
                InverseRoot::new(root).rate(jobs_remaining)
            }
        }
    }
}

/// Turbocharging policy selected at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurbochargingKind {
    /// No speed-up.
    #[default]
    Off,
    /// Makespan parity against `reference`.
    Naive {
        /// Reference discipline.
        reference: DisciplineKind,
    },
    /// Per-departure parity against `reference`.
    Strong {
        /// Reference discipline.
        reference: DisciplineKind,
    },
}

impl Turbocharging for TurbochargingKind {
    fn name(&self) -> String {
        match self {
            TurbochargingKind::Off => Off.name(),
            TurbochargingKind::Naive { reference } => crate::policies::Naive::new(*reference).name(),
            TurbochargingKind::Strong { reference } => {
                crate::policies::Strong::new(*reference).name()
            }
        }
    }

    fn speedup<S, F>(&self, target: &S, freq: &F, work_sizes: &[f64]) -> f64
    where
        S: SchedulingDiscipline + ?Sized,
        F: FrequencyScaling + ?Sized,
    {
        match self {
            TurbochargingKind::Off => 1.0,
            TurbochargingKind::Naive { reference } => {
                naive_speedup(reference, target, freq, work_sizes)
            }
            TurbochargingKind::Strong { reference } => {
                strong_speedup(reference, target, freq, work_sizes)
            }
        }
    }
}

/// One policy from each family, chosen by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyCombination {
    /// Scheduling discipline under test.
    pub discipline: DisciplineKind,
    /// Frequency-scaling law shared by the discipline and its reference.
    pub frequency_scaling: FrequencyScalingKind,
    /// Turbocharging policy (default: off).
    #[serde(default)]
    pub turbocharging: TurbochargingKind,
    /// Power law (default: quadratic).
    #[serde(default)]
    pub power: Polynomial,
}

impl PolicyCombination {
    /// Creates a combination without turbocharging and with a quadratic power law.
    pub fn new(discipline: DisciplineKind, frequency_scaling: FrequencyScalingKind) -> Self {
        Self {
            discipline,
            frequency_scaling,
            turbocharging: TurbochargingKind::Off,
            power: Polynomial::default(),
        }
    }

    /// Sets the turbocharging policy.
    pub fn with_turbocharging(mut self, turbocharging: TurbochargingKind) -> Self {
        self.turbocharging = turbocharging;
        self
    }

    /// Sets the power law.
    pub fn with_power(mut self, power: Polynomial) -> Self {
        self.power = power;
        self
    }

    /// Checks policy parameters.
    ///
    /// Checks:
    /// 1. Linear factor is finite and > 0
    /// 2. Inverse-root degree is >= 1
    /// 3. Power exponent is >= 1
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        match self.frequency_scaling {
            FrequencyScalingKind::Linear { factor } if !(factor.is_finite() && factor > 0.0) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidParameter,
                    format!("Linear frequency factor must be positive, got {factor}"),
                ));
            }
            FrequencyScalingKind::InverseRoot { root: 0 } => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidParameter,
                    "Inverse-root degree must be at least 1",
                ));
            }
            _ => {}
        }

        if self.power.alpha == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidParameter,
                "Power exponent must be at least 1",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The statically composed simulator for this combination.
    pub fn simulator(
        &self,
    ) -> Simulator<DisciplineKind, FrequencyScalingKind, TurbochargingKind, Polynomial> {
        Simulator::from_policies(
            self.discipline,
            self.frequency_scaling,
            self.turbocharging,
            self.power,
        )
    }

    /// Validates the parameters, then simulates `batch`.
    ///
    /// # Errors
    /// The first parameter error from [`validate`](Self::validate), or the
    /// simulator's own rate check.
    pub fn simulate(&self, batch: &WorkSizeBatch) -> Result<SimulationResult, ValidationError> {
        if let Err(errors) = self.validate() {
            if let Some(first) = errors.into_iter().next() {
                return Err(first);
            }
        }
        self.simulator().simulate(batch)
    }
}
