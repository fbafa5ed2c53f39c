//! Work-size batch sources.
//!
//! The simulator itself is deterministic and takes no randomness; random
//! batches are drawn from a generator owned and passed in by the caller.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use u_turbosim::generation::{geometric_batch, uniform_batch};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let random = uniform_batch(&mut rng, 10, 0, 100);
//! assert_eq!(random.len(), 10);
//!
//! let doubling = geometric_batch(4);
//! assert_eq!(doubling.as_slice(), &[1.0, 2.0, 4.0, 8.0]);
//! ```

use rand::Rng;

use crate::models::WorkSizeBatch;

/// `count` integer-valued sizes drawn uniformly from `[low, high]`, sorted.
///
/// # Panics
/// If `low > high`.
pub fn uniform_batch<R: Rng>(rng: &mut R, count: usize, low: u32, high: u32) -> WorkSizeBatch {
    assert!(low <= high, "empty size range [{low}, {high}]");
    let mut sizes: Vec<f64> = (0..count)
        .map(|_| {
            let size: u32 = rng.random_range(low..=high);
            f64::from(size)
        })
        .collect();
    sizes.sort_by(f64::total_cmp);
    WorkSizeBatch::from_sorted_unchecked(sizes)
}

/// Longest doubling batch whose sizes stay finite (`2^1023` is the largest
/// power of two an `f64` holds).
pub const MAX_GEOMETRIC_JOBS: usize = 1024;

/// Doubling sizes `1, 2, 4, ..., 2^(count - 1)`.
///
/// # Panics
/// If `count > MAX_GEOMETRIC_JOBS`.
pub fn geometric_batch(count: usize) -> WorkSizeBatch {
    assert!(
        count <= MAX_GEOMETRIC_JOBS,
        "geometric batch of {count} jobs exceeds {MAX_GEOMETRIC_JOBS}"
    );
    let sizes = (0..count as i32).map(|i| 2f64.powi(i)).collect();
    WorkSizeBatch::from_sorted_unchecked(sizes)
}
