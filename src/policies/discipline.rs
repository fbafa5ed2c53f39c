//! Scheduling disciplines for a static batch.
//!
//! # Model
//!
//! `n` jobs with sizes `w[0] <= w[1] <= ... <= w[n-1]` are all present at
//! time 0. While `m` jobs are present the server runs at `freq.rate(m)`.
//! Jobs depart in size order under both disciplines.
//!
//! # Processor-Sharing (PS)
//!
//! Every present job receives an equal share of the server. The first
//! threshold `w[0]` is absorbed by all `n` jobs; every later marginal
//! `w[j] - w[j-1]` is charged to `m(j) = n - j + 1` jobs at collective rate
//! `rate(m(j))`:
//!
//! ```text
//! finish(k) = Σ_{j<k} (w[j] - w[j-1]) · m(j) / rate(m(j)),   w[-1] = 0
//! m(0) = n,  m(j) = n - j + 1 for j >= 1
//! ```
//!
//! # Fair-Share Partition (FSP)
//!
//! Jobs are served one at a time in size order, job `j` at `rate(n - j + 1)`:
//!
//! ```text
//! finish(k) = Σ_{j<k} w[j] / rate(n - j + 1)
//! ```
//!
//! The first FSP job is charged at `rate(n + 1)`, so a frequency law must be
//! positive on `1..=n + 1` (see
//! [`validate_frequency_scaling`](crate::validation::validate_frequency_scaling)).
//!
//! # Complexity
//! `finish_time` is O(k); `finish_times` is O(n).
//!
//! # Reference
//! Friedman & Henderson (2003), "Fairness and Efficiency in Web Server Protocols"

use serde::{Deserialize, Serialize};

use super::{FrequencyScaling, SchedulingDiscipline};

fn check_prefix(k: usize, work_sizes: &[f64]) {
    assert!(
        k <= work_sizes.len(),
        "departure index {k} out of range for batch of {} jobs",
        work_sizes.len()
    );
}

/// Processor-Sharing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorSharing;

impl ProcessorSharing {
    /// Jobs sharing the `j`-th size threshold.
    #[inline]
    fn sharing(n: usize, j: usize) -> usize {
        if j == 0 {
            n
        } else {
            n - j + 1
        }
    }

    /// Time for `present` survivors to each absorb `size - previous` more work.
    #[inline]
    fn stage<F: FrequencyScaling + ?Sized>(present: usize, size: f64, previous: f64, freq: &F) -> f64 {
        (size - previous) * present as f64 / freq.rate(present)
    }
}

impl SchedulingDiscipline for ProcessorSharing {
    fn name(&self) -> &'static str {
        "PS"
    }

    fn finish_time<F: FrequencyScaling + ?Sized>(
        &self,
        k: usize,
        work_sizes: &[f64],
        freq: &F,
    ) -> f64 {
        check_prefix(k, work_sizes);
        let n = work_sizes.len();
        let mut acc = 0.0;
        let mut previous = 0.0;
        for (j, &size) in work_sizes[..k].iter().enumerate() {
            acc += Self::stage(Self::sharing(n, j), size, previous, freq);
            previous = size;
        }
        acc
    }

    fn finish_times<F: FrequencyScaling + ?Sized>(&self, work_sizes: &[f64], freq: &F) -> Vec<f64> {
        let mut out = Vec::with_capacity(work_sizes.len() + 1);
        out.push(0.0);
        let n = work_sizes.len();
        let mut acc = 0.0;
        let mut previous = 0.0;
        for (j, &size) in work_sizes.iter().enumerate() {
            acc += Self::stage(Self::sharing(n, j), size, previous, freq);
            previous = size;
            out.push(acc);
        }
        out
    }
}

/// Fair-Share Partition: one job at a time, smallest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairSharePartition;

impl FairSharePartition {
    #[inline]
    fn stage<F: FrequencyScaling + ?Sized>(present: usize, size: f64, freq: &F) -> f64 {
        size / freq.rate(present)
    }
}

impl SchedulingDiscipline for FairSharePartition {
    fn name(&self) -> &'static str {
        "FSP"
    }

    fn finish_time<F: FrequencyScaling + ?Sized>(
        &self,
        k: usize,
        work_sizes: &[f64],
        freq: &F,
    ) -> f64 {
        check_prefix(k, work_sizes);
        let n = work_sizes.len();
        work_sizes[..k]
            .iter()
            .enumerate()
            .fold(0.0, |acc, (j, &size)| acc + Self::stage(n - j + 1, size, freq))
    }

    fn finish_times<F: FrequencyScaling + ?Sized>(&self, work_sizes: &[f64], freq: &F) -> Vec<f64> {
        let mut out = Vec::with_capacity(work_sizes.len() + 1);
        out.push(0.0);
        let n = work_sizes.len();
        let mut acc = 0.0;
        for (j, &size) in work_sizes.iter().enumerate() {
            acc += Self::stage(n - j + 1, size, freq);
            out.push(acc);
        }
        out
    }
}
