//! Work-size batch model.
//!
//! A batch is the static input of one simulation: the total service
//! requirement of each of `n` jobs, all present at time 0.

use serde::Serialize;

use crate::validation::{validate_work_sizes, ValidationError};

/// An ordered batch of job work sizes.
///
/// Invariants (enforced by [`WorkSizeBatch::new`]):
/// - every size is finite and `>= 0`
/// - sizes are sorted ascending (smallest job first)
///
/// Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WorkSizeBatch {
    sizes: Vec<f64>,
}

impl WorkSizeBatch {
    /// Validates and sorts the given sizes.
    ///
    /// # Returns
    /// `Err(errors)` with every negative or non-finite size found.
    pub fn new(mut sizes: Vec<f64>) -> Result<Self, Vec<ValidationError>> {
        validate_work_sizes(&sizes)?;
        sizes.sort_by(f64::total_cmp);
        Ok(Self { sizes })
    }

    /// Wraps sizes already known to be valid and ascending.
    pub(crate) fn from_sorted_unchecked(sizes: Vec<f64>) -> Self {
        debug_assert!(validate_work_sizes(&sizes).is_ok());
        debug_assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
        Self { sizes }
    }

    /// The degenerate batch with no jobs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Work sizes, ascending.
    pub fn as_slice(&self) -> &[f64] {
        &self.sizes
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the batch has no jobs.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Sum of all work sizes.
    pub fn total_work(&self) -> f64 {
        self.sizes.iter().sum()
    }
}

impl AsRef<[f64]> for WorkSizeBatch {
    fn as_ref(&self) -> &[f64] {
        &self.sizes
    }
}

impl TryFrom<Vec<f64>> for WorkSizeBatch {
    type Error = Vec<ValidationError>;

    fn try_from(sizes: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_new_sorts_ascending() {
        let batch = WorkSizeBatch::new(vec![5.0, 1.0, 3.0, 1.0]).unwrap();
        assert_eq!(batch.as_slice(), &[1.0, 1.0, 3.0, 5.0]);
        assert_eq!(batch.len(), 4);
        assert!((batch.total_work() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_negative() {
        let errors = WorkSizeBatch::new(vec![1.0, -1.0]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeWorkSize);
    }

    #[test]
    fn test_empty() {
        let batch = WorkSizeBatch::empty();
        assert!(batch.is_empty());
        assert_eq!(batch.total_work(), 0.0);
        assert_eq!(WorkSizeBatch::new(Vec::new()).unwrap(), batch);
    }

    #[test]
    fn test_try_from() {
        let batch: WorkSizeBatch = vec![2.0, 0.0].try_into().unwrap();
        assert_eq!(batch.as_ref(), &[0.0, 2.0]);
        assert!(WorkSizeBatch::try_from(vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let batch = WorkSizeBatch::new(vec![2.0, 1.0]).unwrap();
        assert_eq!(serde_json::to_string(&batch).unwrap(), "[1.0,2.0]");
    }
}
