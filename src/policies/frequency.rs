//! Frequency-scaling laws.
//!
//! Each law maps the number of jobs in the system `j` to the total
//! processing rate of the server.
//!
//! | Law | rate(j) | rate(0) |
//! |-----|---------|---------|
//! | `Constant` | 1 | 1 |
//! | `Linear(c)` | c·j | 0 |
//! | `InverseRoot(p)` | j^(1/p) | 0 |

use serde::{Deserialize, Serialize};

use super::FrequencyScaling;

/// No scaling: the server always runs at rate 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Constant;

impl FrequencyScaling for Constant {
    fn name(&self) -> String {
        "Freq_scaling=OFF".to_string()
    }

    fn rate(&self, _jobs_remaining: usize) -> f64 {
        1.0
    }
}

/// Rate grows proportionally with congestion: `rate(j) = factor * j`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Linear {
    /// Proportionality constant. Must be > 0.
    pub factor: f64,
}

impl Linear {
    /// Creates a linear law with the given factor.
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl FrequencyScaling for Linear {
    fn name(&self) -> String {
        format!("Freq_scaling: j_rem*{}", self.factor)
    }

    fn rate(&self, jobs_remaining: usize) -> f64 {
        self.factor * jobs_remaining as f64
    }
}

/// Sub-linear growth: `rate(j) = j^(1/root)`.
///
/// `root = 1` is equivalent to `Linear::new(1.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverseRoot {
    /// Root degree. Must be >= 1.
    pub root: u32,
}

impl InverseRoot {
    /// Creates an inverse-root law of the given degree.
    pub fn new(root: u32) -> Self {
        Self { root }
    }
}

impl FrequencyScaling for InverseRoot {
    fn name(&self) -> String {
        format!("Freq_scaling: j_rem**(1/{})", self.root)
    }

    fn rate(&self, jobs_remaining: usize) -> f64 {
        if self.root == 1 {
            return jobs_remaining as f64;
        }
        (jobs_remaining as f64).powf(1.0 / self.root as f64)
    }
}
