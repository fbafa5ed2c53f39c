//! Aggregate metrics of a simulation run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Energy | Σ_{i=1..n} (d[i] - d[i-1]) · cost(turbo · rate(n - i + 1)) |
//! | Mean response time | Σ d[i] / (turbo · n) |
//!
//! `d` is the raw departure-time sequence (`n + 1` entries, `d[0] = 0`).
//! Energy integrates power over raw time; the response time is converted to
//! wall-clock time by dividing out the speed-up.

use crate::policies::{FrequencyScaling, PowerCost};

/// Energy consumed over a raw departure-time sequence.
///
/// Between departures `i - 1` and `i` there are `n - i + 1` jobs present,
/// so the server draws `cost(turbo_rate * rate(n - i + 1))`.
/// Returns 0 for an empty batch.
pub fn energy_consumed<F, P>(departure_times: &[f64], turbo_rate: f64, freq: &F, power: &P) -> f64
where
    F: FrequencyScaling + ?Sized,
    P: PowerCost + ?Sized,
{
    let n = departure_times.len().saturating_sub(1);
    departure_times
        .windows(2)
        .enumerate()
        .map(|(stage, pair)| {
            let present = n - stage;
            (pair[1] - pair[0]) * power.cost(turbo_rate * freq.rate(present))
        })
        .sum()
}

/// Mean wall-clock response time over a raw departure-time sequence.
///
/// Returns 0 for an empty batch.
pub fn mean_response_time(departure_times: &[f64], turbo_rate: f64) -> f64 {
    let n = departure_times.len().saturating_sub(1);
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = departure_times.iter().sum();
    sum / (turbo_rate * n as f64)
}
