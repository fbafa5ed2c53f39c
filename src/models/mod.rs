//! Simulation data models.
//!
//! | Type | Role |
//! |------|------|
//! | `WorkSizeBatch` | Validated, ascending job sizes; the input of one run |
//! | `SimulationResult` | Turbo rate, energy, mean response time, departure/finish times |

mod batch;
mod result;

pub use batch::WorkSizeBatch;
pub use result::SimulationResult;
