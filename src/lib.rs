//! Policy-composable single-server scheduling simulator.
//!
//! Evaluates a static batch of jobs under a combination of four policies
//! and reports departure times, the speed-up ("turbo rate") needed to keep
//! up with a reference discipline, energy consumed, and mean response time.
//!
//! # Modules
//!
//! - **`policies`**: Policy traits and built-in variants: frequency scaling
//!   (`Constant`, `Linear`, `InverseRoot`), power (`Polynomial`), disciplines
//!   (`ProcessorSharing`, `FairSharePartition`), turbocharging (`Off`,
//!   `Naive`, `Strong`)
//! - **`simulator`**: `Simulator` (compile-time composition), `PolicyCombination`
//!   (runtime selection), aggregate metrics
//! - **`models`**: `WorkSizeBatch`, `SimulationResult`
//! - **`validation`**: Input integrity checks (work sizes, rate positivity, parameters)
//! - **`generation`**: Batch sources (uniform random with caller-owned RNG, geometric)
//! - **`config`**: JSON scenario files (batches × combinations)
//! - **`report`**: Text and JSON rendering of results
//!
//! # Example
//!
//! ```
//! use u_turbosim::models::WorkSizeBatch;
//! use u_turbosim::policies::{FairSharePartition, InverseRoot, Polynomial, ProcessorSharing, Strong};
//! use u_turbosim::simulator::Simulator;
//!
//! let batch = WorkSizeBatch::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let simulator = Simulator::new(FairSharePartition, InverseRoot::new(2))
//!     .with_turbocharging(Strong::new(ProcessorSharing))
//!     .with_power(Polynomial::new(2));
//!
//! let result = simulator.simulate(&batch).unwrap();
//! assert!(result.turbo_rate >= 1.0);
//! assert_eq!(result.job_finish_times().len(), 4);
//! ```
//!
//! # References
//!
//! - Harchol-Balter (2013), "Performance Modeling and Design of Computer Systems"
//! - Friedman & Henderson (2003), "Fairness and Efficiency in Web Server Protocols"
//! - Yao, Demers & Shenker (1995), "A Scheduling Model for Reduced CPU Energy"

pub mod config;
pub mod generation;
pub mod models;
pub mod policies;
pub mod report;
pub mod simulator;
pub mod validation;

pub use models::{SimulationResult, WorkSizeBatch};
pub use simulator::{simulate, PolicyCombination, Simulator};
