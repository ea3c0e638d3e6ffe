//! Error types and handling
//!
//! This module contains error types for the simulation. Full elevators and
//! empty queues are normal steady states and never show up here; everything
//! below either stops a run from starting or aborts it.

use thiserror::Error;

use crate::types::{ConfigValidationError, ElevatorId};

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// A moving algorithm assigned a target floor outside the building
    #[error("Moving algorithm assigned {elevator} target floor {target}, outside 1..={num_floors}")]
    TargetFloorOutOfRange {
        /// Elevator that received the target
        elevator: ElevatorId,
        /// The rejected target floor
        target: usize,
        /// Number of floors in the building
        num_floors: usize,
    },

    /// A moving algorithm changed elevator state other than the target floor
    #[error("Moving algorithm changed {elevator} beyond its target floor: {reason}")]
    ElevatorModified {
        /// Elevator found changed after targets were assigned
        elevator: ElevatorId,
        /// What changed
        reason: String,
    },

    /// An arrival generator produced people for a floor that does not exist
    #[error("Arrival generator produced people for floor {floor}, outside 1..={num_floors}")]
    UnknownArrivalFloor {
        /// The undefined floor
        floor: usize,
        /// Number of floors in the building
        num_floors: usize,
    },

    /// An arrival generator produced a person with an inconsistent trip
    #[error("Invalid arrival: {0}")]
    InvalidArrival(String),

    /// Arrival schedule file could not be used
    #[error("Arrival file error: {0}")]
    ArrivalFileError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an invalid arrival error
    pub fn invalid_arrival(msg: impl Into<String>) -> Self {
        Self::InvalidArrival(msg.into())
    }

    /// Create an arrival file error
    pub fn arrival_file_error(msg: impl Into<String>) -> Self {
        Self::ArrivalFileError(msg.into())
    }

    /// Whether the error came from a policy collaborator breaking its contract
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            SimulationError::TargetFloorOutOfRange { .. }
                | SimulationError::ElevatorModified { .. }
                | SimulationError::UnknownArrivalFloor { .. }
                | SimulationError::InvalidArrival(_)
        )
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::TargetFloorOutOfRange { .. }
            | SimulationError::ElevatorModified { .. } => "Moving Policy",
            SimulationError::UnknownArrivalFloor { .. } | SimulationError::InvalidArrival(_) => {
                "Arrival Policy"
            }
            SimulationError::ArrivalFileError(_) | SimulationError::CsvError(_) => "Arrival File",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
