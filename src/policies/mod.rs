//! Policy families composed by the simulator.
//!
//! Four independent, stateless policy families parameterize one simulation:
//!
//! | Trait | Maps | Built-in variants |
//! |-------|------|-------------------|
//! | [`FrequencyScaling`] | jobs in system → processing rate | `Constant`, `Linear`, `InverseRoot` |
//! | [`PowerCost`] | effective rate → energy-cost rate | `Polynomial` |
//! | [`SchedulingDiscipline`] | (k, batch, freq) → k-th departure time | `ProcessorSharing`, `FairSharePartition` |
//! | [`Turbocharging`] | (target, freq, batch) → uniform speed-up ≥ 1 | `Off`, `Naive`, `Strong` |
//!
//! Policies are injected into [`Simulator`](crate::simulator::Simulator) as
//! generic parameters, so every call is statically dispatched.
//!
//! # Usage
//!
//! ```
//! use u_turbosim::policies::{FrequencyScaling, SchedulingDiscipline};
//! use u_turbosim::policies::discipline::ProcessorSharing;
//! use u_turbosim::policies::frequency::Constant;
//!
//! assert_eq!(Constant.rate(5), 1.0);
//! let t = ProcessorSharing.finish_time(1, &[1.0, 2.0, 3.0, 4.0], &Constant);
//! assert!((t - 4.0).abs() < 1e-10);
//! ```

pub mod discipline;
pub mod frequency;
pub mod power;
pub mod turbo;

pub use discipline::{FairSharePartition, ProcessorSharing};
pub use frequency::{Constant, InverseRoot, Linear};
pub use power::Polynomial;
pub use turbo::{Naive, Off, Strong};

/// Maps the number of jobs still in the system to a processing rate.
///
/// Must return a strictly positive rate for every count in `1..=n + 1` that a
/// simulation of `n` jobs reaches; `rate(0)` is never used as a divisor.
pub trait FrequencyScaling {
    /// Policy name for reports.
    fn name(&self) -> String;

    /// Processing rate with `jobs_remaining` jobs present.
    fn rate(&self, jobs_remaining: usize) -> f64;
}

/// Converts an effective processing rate into an energy-cost rate.
pub trait PowerCost {
    /// Policy name for reports.
    fn name(&self) -> String;

    /// Power drawn while running at `effective_rate`.
    fn cost(&self, effective_rate: f64) -> f64;
}

/// A single-server scheduling discipline over a static batch.
///
/// All jobs are present at time 0; `work_sizes` is sorted ascending.
pub trait SchedulingDiscipline {
    /// Discipline name (e.g., "PS", "FSP").
    fn name(&self) -> &'static str;

    /// Time of the k-th departure, `k` in `0..=work_sizes.len()`.
    ///
    /// `finish_time(0, ..)` is always 0.
    ///
    /// # Panics
    /// If `k > work_sizes.len()`.
    fn finish_time<F: FrequencyScaling + ?Sized>(
        &self,
        k: usize,
        work_sizes: &[f64],
        freq: &F,
    ) -> f64;

    /// The full finish-time sequence: `n + 1` entries, index 0 = 0.
    ///
    /// The default evaluates [`finish_time`](Self::finish_time) per prefix
    /// (O(n²)); built-in disciplines accumulate in a single pass.
    fn finish_times<F: FrequencyScaling + ?Sized>(&self, work_sizes: &[f64], freq: &F) -> Vec<f64> {
        (0..=work_sizes.len())
            .map(|k| self.finish_time(k, work_sizes, freq))
            .collect()
    }
}

/// Computes the minimum uniform speed multiplier (≥ 1) applied to a target
/// discipline so that it keeps up with a reference discipline.
///
/// The reference discipline is part of the turbocharging policy itself
/// (e.g., `Strong::new(ProcessorSharing)`).
pub trait Turbocharging {
    /// Policy name for reports.
    fn name(&self) -> String;

    /// Speed-up required by `target` under `freq` on `work_sizes`.
    fn speedup<S, F>(&self, target: &S, freq: &F, work_sizes: &[f64]) -> f64
    where
        S: SchedulingDiscipline + ?Sized,
        F: FrequencyScaling + ?Sized;
}
