//! Elevator Dispatch Simulator
//!
//! A round-based simulation of elevators serving people in a multi-floor
//! building, with pluggable arrival and dispatch policies.
//!
//! # Overview
//!
//! People appear on floors with a target floor and queue up first come, first
//! served. Elevators of fixed capacity move one floor per round toward a
//! target chosen by a moving algorithm. At the end of a run the simulator
//! reports how long delivered people waited.
//!
//! ## Key Features
//!
//! - **Deterministic Rounds**: Disembark, arrive, board, move and wait phases in a fixed order
//! - **Pluggable Policies**: Arrival generators and moving algorithms behind traits
//! - **Reproducible Runs**: Randomized policies take an optional seed
//! - **Arrival Schedules**: Replay fixed arrivals from a CSV file
//! - **Configurable Simulation**: JSON configuration files with CLI overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use elevator_dispatch_sim::*;
//!
//! let config = SimulationConfig {
//!     num_floors: 8,
//!     num_elevators: 2,
//!     arrival_policy: ArrivalPolicy::Single,
//!     moving_policy: MovingPolicy::FurthestFloor,
//!     ..Default::default()
//! };
//!
//! let mut simulation = Simulation::from_config(config)?;
//! let stats = simulation.run(30)?;
//! println!("{}", stats.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, policy selectors and configuration
//! - [`building`]: People, elevators and waiting queues
//! - [`algorithms`]: Arrival generators and moving algorithms
//! - [`simulation`]: Round driver, statistics, visualizers and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Building   │    │ Algorithms  │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Person      │◄───┤ Arrivals    │
//! │ Enums       │    │ Elevator    │    │ Moving      │
//! │ Config      │    │ Waiting     │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                  ▲                  ▲
//!        │                  │                  │
//!        │           ┌─────────────┐           │
//!        └───────────┤ Simulation  ├───────────┘
//!                    │             │
//!                    │ Rounds      │
//!                    │ Statistics  │
//!                    │ Visualizer  │
//!                    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod algorithms;
pub mod building;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    ArrivalPolicy, CliArgs, ConfigError, ConfigValidationError, Direction, ElevatorId,
    MovingPolicy, PersonId, SimulationConfig,
};

// Building state
pub use building::{Elevator, Person, WaitingRegistry};

// Policies
pub use algorithms::{
    ArrivalGenerator, Arrivals, EndToEndLoop, FurthestFloor, MovingAlgorithm, RandomAlgorithm,
    RandomArrivals, ScheduledArrivals, SingleArrivals,
};

// Simulation types and functionality
pub use simulation::{
    ConsoleVisualizer, LoggingConfig, NullVisualizer, RunReport, Simulation, SimulationError,
    SimulationResult, SimulationStatistics, TracingVisualizer, Visualizer,
};
