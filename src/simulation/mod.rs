//! Simulation driver and control
//!
//! This module contains the round-based simulation, statistics collection,
//! visualizers, logging setup and error handling.
//!
//! # Overview
//!
//! - **Simulation**: Owns the building and runs the five phases of every round
//! - **SimulationStatistics**: Rounds, people and wait-time figures for a run
//! - **Visualizer**: Read-only observer notified of every phase
//! - **SimulationError**: Errors that stop a run from starting or abort it
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dispatch_sim::algorithms::{EndToEndLoop, ScheduledArrivals};
//! use elevator_dispatch_sim::simulation::*;
//! use elevator_dispatch_sim::types::SimulationConfig;
//!
//! let config = SimulationConfig { num_floors: 6, num_elevators: 2, ..Default::default() };
//! let arrivals = ScheduledArrivals::new().with_arrival(0, 3, 6);
//!
//! let mut simulation = Simulation::new(
//!     config,
//!     Box::new(arrivals),
//!     Box::new(EndToEndLoop),
//!     Box::new(NullVisualizer),
//! )
//! .unwrap();
//!
//! let stats = simulation.run(20).unwrap();
//! assert_eq!(stats.people_completed, 1);
//! ```

pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod statistics;
pub mod visualizer;

// Re-export all public types for convenience
pub use error::*;
pub use logging::*;
pub use orchestrator::*;
pub use statistics::*;
pub use visualizer::*;
