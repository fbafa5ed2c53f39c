//! Turbocharging strategies.
//!
//! A turbocharging policy answers: by what uniform factor must the target
//! discipline's server be sped up so that it never falls behind a reference
//! discipline run on the same batch under the same frequency-scaling law?
//!
//! | Policy | Guarantee | Cost |
//! |--------|-----------|------|
//! | `Off` | none (rate 1) | O(1) |
//! | `Naive` | makespan parity | O(n) |
//! | `Strong` | k-th departure parity for every k | O(n) |
//!
//! `Naive` only compares the final departure. It is cheaper to reason about
//! but admits intermediate departures later than the reference's; `Strong`
//! is the dominant variant and always returns at least the `Naive` rate.

use log::trace;
use serde::{Deserialize, Serialize};

use super::{FrequencyScaling, SchedulingDiscipline, Turbocharging};

/// Speed-up that aligns the target's makespan with the reference's.
///
/// Returns `max(1, target(n) / reference(n))`, or 1 for an empty batch or a
/// zero-length reference makespan.
pub fn naive_speedup<R, S, F>(reference: &R, target: &S, freq: &F, work_sizes: &[f64]) -> f64
where
    R: SchedulingDiscipline + ?Sized,
    S: SchedulingDiscipline + ?Sized,
    F: FrequencyScaling + ?Sized,
{
    let n = work_sizes.len();
    let old_end = reference.finish_time(n, work_sizes, freq);
    let new_end = target.finish_time(n, work_sizes, freq);
    if old_end <= 0.0 {
        trace!("naive turbocharging: reference makespan is {old_end}, no speed-up");
        return 1.0;
    }
    f64::max(1.0, new_end / old_end)
}

/// Smallest speed-up such that every target departure is no later than the
/// matching reference departure.
///
/// Returns `max(1, max_k target(k) / reference(k))`. Prefixes where the
/// reference has not spent any time yet (always k = 0, and any leading
/// zero-size jobs) carry no constraint and are skipped.
pub fn strong_speedup<R, S, F>(reference: &R, target: &S, freq: &F, work_sizes: &[f64]) -> f64
where
    R: SchedulingDiscipline + ?Sized,
    S: SchedulingDiscipline + ?Sized,
    F: FrequencyScaling + ?Sized,
{
    let old = reference.finish_times(work_sizes, freq);
    let new = target.finish_times(work_sizes, freq);

    let mut max_rate_needed: f64 = 1.0;
    for (k, (&old_end, &new_end)) in old.iter().zip(&new).enumerate() {
        if old_end <= 0.0 {
            trace!("strong turbocharging: skipping prefix {k} (reference time {old_end})");
            continue;
        }
        max_rate_needed = max_rate_needed.max(new_end / old_end);
    }
    max_rate_needed
}

/// No turbocharging: the speed-up is always 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Off;

impl Turbocharging for Off {
    fn name(&self) -> String {
        "Turbocharging OFF".to_string()
    }

    fn speedup<S, F>(&self, _target: &S, _freq: &F, _work_sizes: &[f64]) -> f64
    where
        S: SchedulingDiscipline + ?Sized,
        F: FrequencyScaling + ?Sized,
    {
        1.0
    }
}

/// Makespan-parity turbocharging against `reference`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Naive<R> {
    /// Discipline the target must keep up with.
    pub reference: R,
}

impl<R> Naive<R> {
    /// Creates a naive policy against the given reference discipline.
    pub fn new(reference: R) -> Self {
        Self { reference }
    }
}

impl<R: SchedulingDiscipline> Turbocharging for Naive<R> {
    fn name(&self) -> String {
        "Turbocharging ON".to_string()
    }

    fn speedup<S, F>(&self, target: &S, freq: &F, work_sizes: &[f64]) -> f64
    where
        S: SchedulingDiscipline + ?Sized,
        F: FrequencyScaling + ?Sized,
    {
        naive_speedup(&self.reference, target, freq, work_sizes)
    }
}

/// Per-departure (dominant) turbocharging against `reference`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strong<R> {
    /// Discipline the target must dominate.
    pub reference: R,
}

impl<R> Strong<R> {
    /// Creates a strong policy against the given reference discipline.
    pub fn new(reference: R) -> Self {
        Self { reference }
    }
}

impl<R: SchedulingDiscipline> Turbocharging for Strong<R> {
    fn name(&self) -> String {
        "Turbocharging Strong".to_string()
    }

    fn speedup<S, F>(&self, target: &S, freq: &F, work_sizes: &[f64]) -> f64
    where
        S: SchedulingDiscipline + ?Sized,
        F: FrequencyScaling + ?Sized,
    {
        strong_speedup(&self.reference, target, freq, work_sizes)
    }
}
