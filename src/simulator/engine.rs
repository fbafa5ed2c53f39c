//! Statically composed simulator.

use log::{debug, trace};

use super::metrics::{energy_consumed, mean_response_time};
use crate::models::{SimulationResult, WorkSizeBatch};
use crate::policies::{
    FrequencyScaling, Off, Polynomial, PowerCost, SchedulingDiscipline, Turbocharging,
};
use crate::report::PolicyNames;
use crate::validation::{validate_frequency_scaling, ValidationError};

/// A simulator composed of one policy from each family.
///
/// Policies are generic parameters, so a `Simulator` is a zero-cost
/// composition: every policy call is statically dispatched and the
/// simulator holds no state beyond the policies themselves.
///
/// Defaults: no turbocharging, quadratic power law.
///
/// # Example
///
/// ```
/// use u_turbosim::models::WorkSizeBatch;
/// use u_turbosim::policies::{Constant, FairSharePartition, Polynomial};
/// use u_turbosim::simulator::Simulator;
///
/// let batch = WorkSizeBatch::new(vec![10.0; 6]).unwrap();
/// let simulator = Simulator::new(FairSharePartition, Constant).with_power(Polynomial::new(1));
///
/// let result = simulator.simulate(&batch).unwrap();
/// assert_eq!(result.turbo_rate, 1.0);
/// assert!((result.mean_response_time - 35.0).abs() < 1e-10);
/// assert!((result.energy_consumed - 60.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator<S, F, T = Off, P = Polynomial> {
    discipline: S,
    frequency_scaling: F,
    turbocharging: T,
    power: P,
}

impl<S, F> Simulator<S, F> {
    /// Creates a simulator without turbocharging and with a quadratic power law.
    pub fn new(discipline: S, frequency_scaling: F) -> Self {
        Self {
            discipline,
            frequency_scaling,
            turbocharging: Off,
            power: Polynomial::default(),
        }
    }
}

impl<S, F, T, P> Simulator<S, F, T, P> {
    /// Creates a simulator from all four policies.
    pub fn from_policies(discipline: S, frequency_scaling: F, turbocharging: T, power: P) -> Self {
        Self {
            discipline,
            frequency_scaling,
            turbocharging,
            power,
        }
    }

    /// Replaces the turbocharging policy.
    pub fn with_turbocharging<T2>(self, turbocharging: T2) -> Simulator<S, F, T2, P> {
        Simulator {
            discipline: self.discipline,
            frequency_scaling: self.frequency_scaling,
            turbocharging,
            power: self.power,
        }
    }

    /// Replaces the power policy.
    pub fn with_power<P2>(self, power: P2) -> Simulator<S, F, T, P2> {
        Simulator {
            discipline: self.discipline,
            frequency_scaling: self.frequency_scaling,
            turbocharging: self.turbocharging,
            power,
        }
    }

    /// The scheduling discipline.
    pub fn discipline(&self) -> &S {
        &self.discipline
    }

    /// The frequency-scaling law.
    pub fn frequency_scaling(&self) -> &F {
        &self.frequency_scaling
    }

    /// The turbocharging policy.
    pub fn turbocharging(&self) -> &T {
        &self.turbocharging
    }

    /// The power law.
    pub fn power(&self) -> &P {
        &self.power
    }
}

impl<S, F, T, P> Simulator<S, F, T, P>
where
    S: SchedulingDiscipline,
    F: FrequencyScaling,
    T: Turbocharging,
    P: PowerCost,
{
    /// Names of the composed policies, for reporting.
    pub fn policy_names(&self) -> PolicyNames {
        PolicyNames {
            discipline: self.discipline.name().to_string(),
            frequency_scaling: self.frequency_scaling.name(),
            turbocharging: self.turbocharging.name(),
            power: self.power.name(),
        }
    }

    /// Speed-up this simulator's discipline needs under its turbocharging policy.
    pub fn turbo_rate(&self, work_sizes: &[f64]) -> f64 {
        self.turbocharging
            .speedup(&self.discipline, &self.frequency_scaling, work_sizes)
    }

    /// Raw (un-boosted) departure times, `n + 1` entries with index 0 = 0.
    pub fn departure_times(&self, work_sizes: &[f64]) -> Vec<f64> {
        self.discipline
            .finish_times(work_sizes, &self.frequency_scaling)
    }

    /// Runs the simulation on a batch.
    ///
    /// # Algorithm
    /// 1. Check the frequency law is positive for every job count `1..=n + 1`.
    /// 2. Compute the turbo rate against the turbocharging reference.
    /// 3. Compute raw departure times under the discipline.
    /// 4. Integrate power over each inter-departure stage.
    /// 5. Rescale departures and the mean response time by the turbo rate.
    ///
    /// An empty batch yields turbo rate 1, zero energy and zero mean
    /// response time.
    ///
    /// # Errors
    /// `NonPositiveRate` if the frequency-scaling law would be divided by a
    /// rate that is not strictly positive and finite.
    pub fn simulate(&self, batch: &WorkSizeBatch) -> Result<SimulationResult, ValidationError> {
        let work_sizes = batch.as_slice();
        let n = work_sizes.len();
        validate_frequency_scaling(&self.frequency_scaling, n)?;

        if n == 0 {
            trace!("empty batch, nothing to schedule");
        }

        let turbo_rate = self.turbo_rate(work_sizes);
        let departure_times = self.departure_times(work_sizes);
        let energy = energy_consumed(
            &departure_times,
            turbo_rate,
            &self.frequency_scaling,
            &self.power,
        );
        let mean_response = mean_response_time(&departure_times, turbo_rate);
        let finish_times = departure_times.iter().map(|d| d / turbo_rate).collect();

        debug!(
            "{}, {}, {}, {}: n={n} turbo={turbo_rate:.4} energy={energy:.4} mean_response={mean_response:.4}",
            self.discipline.name(),
            self.frequency_scaling.name(),
            self.turbocharging.name(),
            self.power.name(),
        );

        Ok(SimulationResult {
            turbo_rate,
            energy_consumed: energy,
            mean_response_time: mean_response,
            departure_times,
            finish_times,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::{
        Constant, FairSharePartition, InverseRoot, Linear, Naive, ProcessorSharing, Strong,
    };
    use crate::validation::ValidationErrorKind;
    use proptest::prelude::*;

    const PROPTEST_CASES: u32 = 64;

    fn batch(sizes: &[f64]) -> WorkSizeBatch {
        WorkSizeBatch::new(sizes.to_vec()).unwrap()
    }

    #[test]
    fn test_six_equal_jobs_fsp() {
        let sim = Simulator::new(FairSharePartition, Constant).with_power(Polynomial::new(1));
        let result = sim.simulate(&batch(&[10.0; 6])).unwrap();

        assert_eq!(result.turbo_rate, 1.0);
        assert_eq!(
            result.departure_times,
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0]
        );
        assert_eq!(result.finish_times, result.departure_times);
        assert!((result.mean_response_time - 35.0).abs() < 1e-10);
        assert!((result.energy_consumed - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_ps_constant_departures() {
        let sim = Simulator::new(ProcessorSharing, Constant);
        let result = sim.simulate(&batch(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(result.departure_times, vec![0.0, 4.0, 8.0, 11.0, 13.0]);
        assert_eq!(result.job_finish_times(), &[4.0, 8.0, 11.0, 13.0]);
        // alpha = 2 at rate 1 draws 1 per unit time.
        assert!((result.energy_consumed - 13.0).abs() < 1e-10);
        assert!((result.mean_response_time - 36.0 / 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_batch() {
        let sim = Simulator::new(FairSharePartition, InverseRoot::new(2))
            .with_turbocharging(Strong::new(ProcessorSharing));
        let result = sim.simulate(&WorkSizeBatch::empty()).unwrap();

        assert_eq!(result.turbo_rate, 1.0);
        assert_eq!(result.energy_consumed, 0.0);
        assert_eq!(result.mean_response_time, 0.0);
        assert_eq!(result.departure_times, vec![0.0]);
        assert!(result.job_finish_times().is_empty());
    }

    #[test]
    fn test_turbo_rescales_finish_times() {
        // Reference FSP [0, 1, 3, 6, 10]; PS needs 4x to match the first departure.
        let sim = Simulator::new(ProcessorSharing, Constant)
            .with_turbocharging(Strong::new(FairSharePartition))
            .with_power(Polynomial::new(1));
        let result = sim.simulate(&batch(&[1.0, 2.0, 3.0, 4.0])).unwrap();

        assert!((result.turbo_rate - 4.0).abs() < 1e-10);
        let expected = [1.0, 2.0, 2.75, 3.25];
        for (actual, e) in result.job_finish_times().iter().zip(expected) {
            assert!((actual - e).abs() < 1e-10);
        }
        // Energy: raw time 13 at power 4.
        assert!((result.energy_consumed - 52.0).abs() < 1e-10);
        assert!((result.mean_response_time - 36.0 / 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_fsp_departures_under_linear() {
        let sim = Simulator::new(FairSharePartition, Linear::new(1.0))
            .with_turbocharging(Naive::new(ProcessorSharing));
        let result = sim.simulate(&batch(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        // FSP makespan 3.7 already beats PS at 4.
        assert_eq!(result.turbo_rate, 1.0);
        let expected = [0.0, 0.2, 0.7, 1.7, 3.7];
        for (actual, e) in result.departure_times.iter().zip(expected) {
            assert!((actual - e).abs() < 1e-10);
        }
    }

    #[test]
    fn test_naive_turbo_for_ps_under_linear() {
        let sim = Simulator::new(ProcessorSharing, Linear::new(1.0))
            .with_turbocharging(Naive::new(FairSharePartition));
        let result = sim.simulate(&batch(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert!((result.turbo_rate - 4.0 / 3.7).abs() < 1e-10);
        assert!((result.makespan() - 3.7).abs() < 1e-10);
    }

    #[test]
    fn test_rate_checked_one_past_batch_size() {
        // Positive for up to 3 jobs only; FSP on 3 jobs consults rate(4).
        #[derive(Debug)]
        struct Capped;
        impl FrequencyScaling for Capped {
            fn name(&self) -> String {
                "capped".to_string()
            }
            fn rate(&self, jobs_remaining: usize) -> f64 {
                if jobs_remaining <= 3 {
                    1.0
                } else {
                    0.0
                }
            }
        }
        let sim = Simulator::new(FairSharePartition, Capped);
        let err = sim.simulate(&batch(&[1.0, 2.0, 3.0])).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonPositiveRate);
        assert!(sim.simulate(&batch(&[1.0, 2.0])).is_ok());
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let sim = Simulator::new(ProcessorSharing, Linear::new(-1.0));
        let err = sim.simulate(&batch(&[1.0])).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonPositiveRate);
    }

    #[test]
    fn test_policy_names() {
        let sim = Simulator::new(FairSharePartition, InverseRoot::new(2))
            .with_turbocharging(Strong::new(ProcessorSharing))
            .with_power(Polynomial::new(3));
        let names = sim.policy_names();
        assert_eq!(names.discipline, "FSP");
        assert_eq!(names.frequency_scaling, "Freq_scaling: j_rem**(1/2)");
        assert_eq!(names.turbocharging, "Turbocharging Strong");
        assert_eq!(names.power, "Power: r**3");
    }

    fn sized_batch() -> impl Strategy<Value = WorkSizeBatch> {
        prop::collection::vec(0.0f64..500.0, 0..20)
            .prop_map(|sizes| WorkSizeBatch::new(sizes).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

        #[test]
        fn finish_times_non_decreasing(b in sized_batch(), root in 1u32..4, ps in any::<bool>()) {
            let freq = InverseRoot::new(root);
            let result = if ps {
                Simulator::new(ProcessorSharing, freq)
                    .with_turbocharging(Strong::new(FairSharePartition))
                    .simulate(&b)
            } else {
                Simulator::new(FairSharePartition, freq)
                    .with_turbocharging(Strong::new(ProcessorSharing))
                    .simulate(&b)
            }
            .unwrap();

            prop_assert_eq!(result.departure_times[0], 0.0);
            prop_assert_eq!(result.finish_times[0], 0.0);
            prop_assert_eq!(result.finish_times.len(), b.len() + 1);
            for pair in result.finish_times.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
            prop_assert!(result.turbo_rate >= 1.0);
        }

        #[test]
        fn constant_rate_linear_power_energy_is_elapsed_time(b in sized_batch(), ps in any::<bool>()) {
            let result = if ps {
                Simulator::new(ProcessorSharing, Constant).with_power(Polynomial::new(1)).simulate(&b)
            } else {
                Simulator::new(FairSharePartition, Constant).with_power(Polynomial::new(1)).simulate(&b)
            }
            .unwrap();
            let elapsed = result.departure_times[b.len()] - result.departure_times[0];
            prop_assert!((result.energy_consumed - elapsed).abs() <= 1e-9 * elapsed.max(1.0));
        }

        #[test]
        fn simulate_is_idempotent(b in sized_batch(), factor in 0.1f64..5.0) {
            let sim = Simulator::new(FairSharePartition, Linear::new(factor))
                .with_turbocharging(Naive::new(ProcessorSharing))
                .with_power(Polynomial::new(3));
            let first = sim.simulate(&b).unwrap();
            let second = sim.simulate(&b).unwrap();
            prop_assert_eq!(first.turbo_rate.to_bits(), second.turbo_rate.to_bits());
            prop_assert_eq!(first.energy_consumed.to_bits(), second.energy_consumed.to_bits());
            prop_assert_eq!(first.mean_response_time.to_bits(), second.mean_response_time.to_bits());
            prop_assert_eq!(first, second);
        }
    }
}
