//! Enumeration types for the elevator simulator
//!
//! This module contains the movement direction reported each round and the
//! policy selectors used by the configuration layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction an elevator moved during a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Moved one floor up
    Up,
    /// Moved one floor down
    Down,
    /// Did not move
    Stay,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Stay => write!(f, "Stay"),
        }
    }
}

/// Arrival policy used to introduce new people each round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalPolicy {
    /// A fixed number of people with random origin and target every round
    Random,
    /// A schedule loaded from a CSV file
    File,
    /// One person per round departing from the ground floor
    Single,
}

impl fmt::Display for ArrivalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalPolicy::Random => write!(f, "random"),
            ArrivalPolicy::File => write!(f, "file"),
            ArrivalPolicy::Single => write!(f, "single"),
        }
    }
}

impl FromStr for ArrivalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(ArrivalPolicy::Random),
            "file" | "csv" => Ok(ArrivalPolicy::File),
            "single" => Ok(ArrivalPolicy::Single),
            _ => Err(format!("Unknown arrival policy: {}", s)),
        }
    }
}

/// Dispatch policy used to assign elevator target floors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovingPolicy {
    /// Sweep between the bottom and top floors
    EndToEnd,
    /// Head for the furthest passenger target or waiting floor
    FurthestFloor,
    /// Pick a random new target whenever the current one is reached
    Random,
}

impl fmt::Display for MovingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovingPolicy::EndToEnd => write!(f, "end-to-end"),
            MovingPolicy::FurthestFloor => write!(f, "furthest-floor"),
            MovingPolicy::Random => write!(f, "random"),
        }
    }
}

impl FromStr for MovingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "end-to-end" | "endtoend" | "loop" => Ok(MovingPolicy::EndToEnd),
            "furthest-floor" | "furthestfloor" | "furthest" => Ok(MovingPolicy::FurthestFloor),
            "random" => Ok(MovingPolicy::Random),
            _ => Err(format!("Unknown moving policy: {}", s)),
        }
    }
}
