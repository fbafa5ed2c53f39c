//! Power-cost laws.

use serde::{Deserialize, Serialize};

use super::PowerCost;

/// Polynomial power law: `cost(r) = r^alpha`.
///
/// `alpha = 1` makes energy equal to work done; the classic CMOS
/// dynamic-power approximation uses `alpha` between 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polynomial {
    /// Exponent. Must be >= 1.
    pub alpha: u32,
}

impl Polynomial {
    /// Creates a polynomial power law.
    pub fn new(alpha: u32) -> Self {
        Self { alpha }
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self { alpha: 2 }
    }
}

impl PowerCost for Polynomial {
    fn name(&self) -> String {
        format!("Power: r**{}", self.alpha)
    }

    fn cost(&self, effective_rate: f64) -> f64 {
        effective_rate.powi(self.alpha as i32)
    }
}
