//! Simulation engine.
//!
//! Combines one policy from each family into departure times, turbo rate,
//! energy, and mean response time for a single batch.
//!
//! # Data Flow
//!
//! ```text
//! batch ─► discipline (driven by frequency law) ─► raw departure times ─┐
//!   └────► turbocharging (target vs. reference) ─► turbo rate ──────────┤
//!                                                                       ▼
//!                      power law ─► energy,  rescaled finish times, mean response time
//! ```
//!
//! # Composition
//!
//! - [`Simulator`]: policies as generic parameters (compile-time composition).
//! - [`PolicyCombination`]: policies as enum values (runtime selection); builds
//!   a `Simulator` over the enum types.
//!
//! Every computation is a pure function of its inputs, so simulations can be
//! run concurrently without synchronization.

mod combination;
mod engine;
pub mod metrics;

pub use combination::{DisciplineKind, FrequencyScalingKind, PolicyCombination, TurbochargingKind};
pub use engine::Simulator;

use crate::models::{SimulationResult, WorkSizeBatch};
use crate::validation::ValidationError;

/// Simulates `work_sizes` under `combination`.
///
/// Equivalent to [`PolicyCombination::simulate`].
pub fn simulate(
    work_sizes: &WorkSizeBatch,
    combination: &PolicyCombination,
) -> Result<SimulationResult, ValidationError> {
    combination.simulate(work_sizes)
}
