//! Result reporting.
//!
//! Pairs a [`SimulationResult`] with the names of the policies that produced
//! it. A [`ScenarioReport`] renders as one fixed-format text line or
//! serializes to JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::SimulationResult;

/// Human-readable names of a policy combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyNames {
    /// Scheduling discipline.
    pub discipline: String,
    /// Frequency-scaling law.
    pub frequency_scaling: String,
    /// Turbocharging policy.
    pub turbocharging: String,
    /// Power law.
    pub power: String,
}

/// One simulated combination on one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Policies used.
    pub policies: PolicyNames,
    /// Simulation outcome.
    pub result: SimulationResult,
}

impl ScenarioReport {
    /// Creates a report.
    pub fn new(policies: PolicyNames, result: SimulationResult) -> Self {
        Self { policies, result }
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.policies;
        let r = &self.result;
        write!(
            f,
            "{}, {}, {}, {}, ",
            p.discipline, p.frequency_scaling, p.turbocharging, p.power
        )?;
        write!(f, "Turbocharging rate: {:.2}, ", r.turbo_rate)?;
        write!(f, "Energy Consumed: {:>5.2}, ", r.energy_consumed)?;
        write!(f, "Mean Response Time: {:.2}, ", r.mean_response_time)?;
        write!(f, "Departure Times:")?;
        for finish in r.job_finish_times() {
            write!(f, " {finish:>5.2},")?;
        }
        Ok(())
    }
}

/// Formats a batch header line: sizes separated by spaces.
pub fn batch_header(work_sizes: &[f64]) -> String {
    work_sizes
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
