//! Core types and identifiers for the elevator simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: UUID-based person identifiers and index-based elevator identifiers
//! - **Enums**: Movement direction and policy selectors
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dispatch_sim::types::*;
//!
//! let config = SimulationConfig {
//!     num_floors: 10,
//!     moving_policy: MovingPolicy::FurthestFloor,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//!
//! let person_id = PersonId::new();
//! assert!(person_id.to_string().starts_with("PERSON_"));
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
