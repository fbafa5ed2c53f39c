//! Simulation result model.

use serde::{Deserialize, Serialize};

/// Outcome of one simulation run.
///
/// # Time Representation
/// `departure_times` are raw (un-boosted) times as computed by the
/// discipline; `finish_times` are the wall-clock times once the server runs
/// `turbo_rate` times faster. Both have `n + 1` entries with index 0 = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Uniform speed-up applied to the discipline (>= 1).
    pub turbo_rate: f64,
    /// Power integrated over the raw time each rate level is held.
    pub energy_consumed: f64,
    /// Mean of the departure times, in wall-clock time. 0 for an empty batch.
    pub mean_response_time: f64,
    /// Raw departure times, `n + 1` entries.
    pub departure_times: Vec<f64>,
    /// Departure times divided by `turbo_rate`, `n + 1` entries.
    pub finish_times: Vec<f64>,
}

impl SimulationResult {
    /// Number of jobs simulated.
    pub fn job_count(&self) -> usize {
        self.finish_times.len().saturating_sub(1)
    }

    /// Wall-clock completion time of each job, in departure order.
    pub fn job_finish_times(&self) -> &[f64] {
        self.finish_times.get(1..).unwrap_or(&[])
    }

    /// Wall-clock completion time of the last job (0 for an empty batch).
    pub fn makespan(&self) -> f64 {
        self.finish_times.last().copied().unwrap_or(0.0)
    }
}
