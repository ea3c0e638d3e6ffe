//! Building state: people, elevators and waiting queues
//!
//! This module holds the mutable state a simulation round operates on.
//!
//! # Overview
//!
//! - **Person**: A rider with an origin floor, a target floor and a wait counter
//! - **Elevator**: Capacity-bounded passenger list that moves one floor per round
//! - **WaitingRegistry**: Per-floor FIFO queues of people not yet boarded
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dispatch_sim::building::*;
//! use elevator_dispatch_sim::types::{Direction, ElevatorId};
//!
//! let mut waiting = WaitingRegistry::new(6);
//! waiting.extend(1, vec![Person::new(1, 4)]).unwrap();
//!
//! // Outside the crate a moving algorithm may only steer elevators
//! let mut elevator = Elevator::new(ElevatorId(0), 2);
//! let next = waiting
//!     .queue(elevator.current_floor())
//!     .and_then(|queue| queue.front())
//!     .map(Person::target_floor);
//! elevator.set_target_floor(next.unwrap_or(START_FLOOR));
//! assert_eq!(elevator.target_floor(), 4);
//! assert!(Direction::Up.to_string() == "Up");
//! ```

pub mod elevator;
pub mod person;
pub mod waiting;

// Re-export all public types for convenience
pub use elevator::{CapacityExceeded, Elevator, START_FLOOR};
pub use person::Person;
pub use waiting::WaitingRegistry;
