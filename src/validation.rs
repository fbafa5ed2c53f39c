//! Input validation for simulations.
//!
//! Checks the integrity of a work-size batch and of the policies before
//! they are combined. Detects:
//! - Negative or non-finite work sizes
//! - Frequency-scaling policies that yield a non-positive rate for a
//!   reachable job count (division by zero in the finish-time recurrences)
//! - Out-of-range policy parameters (zero power exponent, zero root, ...)

use std::fmt;

use crate::policies::FrequencyScaling;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A job has a negative service requirement.
    NegativeWorkSize,
    /// A job size is NaN or infinite.
    NonFiniteWorkSize,
    /// A frequency-scaling policy yields a rate <= 0 (or non-finite) for a
    /// job count the simulation will divide by.
    NonPositiveRate,
    /// A policy parameter is outside its domain.
    InvalidParameter,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates raw work sizes.
///
/// Checks:
/// 1. Every size is finite
/// 2. Every size is non-negative
///
/// Ordering is not checked here; [`WorkSizeBatch::new`](crate::models::WorkSizeBatch::new)
/// sorts the sizes itself.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_work_sizes(work_sizes: &[f64]) -> ValidationResult {
    let mut errors = Vec::new();

    for (index, &size) in work_sizes.iter().enumerate() {
        if !size.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteWorkSize,
                format!("Job {index} has non-finite work size {size}"),
            ));
        } else if size < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeWorkSize,
                format!("Job {index} has negative work size {size}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that `freq` yields a strictly positive, finite rate for every job
/// count a batch of `jobs` jobs reaches: `1..=jobs + 1`, or none when empty.
///
/// FSP charges its first job at `rate(jobs + 1)`; PS and the energy model stay
/// within `1..=jobs`. `rate(0)` is never consulted.
///
/// Fails fast on the first offending count.
pub fn validate_frequency_scaling<F: FrequencyScaling + ?Sized>(
    freq: &F,
    jobs: usize,
) -> Result<(), ValidationError> {
    if jobs == 0 {
        return Ok(());
    }
    for present in 1..=jobs + 1 {
        let rate = freq.rate(present);
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveRate,
                format!(
                    "'{}' yields rate {rate} for {present} jobs in system",
                    freq.name()
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::frequency::{Constant, InverseRoot, Linear};

    #[test]
    fn test_valid_work_sizes() {
        assert!(validate_work_sizes(&[0.0, 1.0, 2.5, 100.0]).is_ok());
        assert!(validate_work_sizes(&[]).is_ok());
    }

    #[test]
    fn test_negative_work_size() {
        let errors = validate_work_sizes(&[1.0, -2.0]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeWorkSize);
        assert!(errors[0].message.contains("Job 1"));
    }

    #[test]
    fn test_non_finite_work_size() {
        let errors = validate_work_sizes(&[f64::NAN, f64::INFINITY]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::NonFiniteWorkSize));
    }

    #[test]
    fn test_multiple_errors() {
        let errors = validate_work_sizes(&[-1.0, f64::NAN, 3.0, -0.5]).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_builtin_frequency_policies_are_positive() {
        assert!(validate_frequency_scaling(&Constant, 10).is_ok());
        assert!(validate_frequency_scaling(&Linear::new(0.5), 10).is_ok());
        assert!(validate_frequency_scaling(&InverseRoot::new(3), 10).is_ok());
    }

    #[test]
    fn test_zero_linear_factor_rejected() {
        let err = validate_frequency_scaling(&Linear::new(0.0), 3).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonPositiveRate);
        assert!(err.message.contains("1 jobs"));
    }

    #[test]
    fn test_checks_one_past_batch_size() {
        // FSP on three jobs reaches rate(4).
        struct ZeroAbove(usize);
        impl FrequencyScaling for ZeroAbove {
            fn name(&self) -> String {
                format!("zero above {}", self.0)
            }
            fn rate(&self, jobs_remaining: usize) -> f64 {
                if jobs_remaining > self.0 {
                    0.0
                } else {
                    1.0
                }
            }
        }
        let err = validate_frequency_scaling(&ZeroAbove(3), 3).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonPositiveRate);
        assert!(err.message.contains("4 jobs"));
        assert!(validate_frequency_scaling(&ZeroAbove(3), 2).is_ok());
    }

    #[test]
    fn test_rate_zero_never_consulted() {
        // Linear yields rate(0) = 0, which must not trip the check.
        assert!(validate_frequency_scaling(&Linear::new(1.0), 0).is_ok());
    }

    #[test]
    fn test_display() {
        let err = ValidationError::new(ValidationErrorKind::InvalidParameter, "alpha must be >= 1");
        assert_eq!(err.to_string(), "InvalidParameter: alpha must be >= 1");
    }
}
