//! Configuration structures for the elevator simulator
//!
//! This module contains the simulation configuration structure, the CLI
//! argument surface and the validation logic applied before a run starts.

use super::{ArrivalPolicy, MovingPolicy};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "elevator-dispatch-sim",
    version = "0.1.0",
    about = "Elevator Dispatch Simulator - round-based elevator dispatch in a multi-floor building",
    long_about = "Simulates people arriving at the floors of a building and elevators carrying them to their target floors under a pluggable dispatch policy, then reports wait-time statistics.

EXAMPLES:
    # Run with default settings
    elevator-dispatch-sim

    # Use a configuration file
    elevator-dispatch-sim --config config.json

    # Override specific settings
    elevator-dispatch-sim --num-floors 10 --num-elevators 3 --moving-policy furthest-floor

    # Replay a fixed arrival schedule
    elevator-dispatch-sim --arrival-policy file --arrival-file arrivals.csv

    # Generate configuration template
    elevator-dispatch-sim --print-config > my-config.json

    # Validate configuration without running
    elevator-dispatch-sim --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of floors in the building
    #[arg(
        long,
        help = "Number of floors",
        long_help = "Number of floors in the building, numbered from 1. Must be at least 2. Default: 6"
    )]
    pub num_floors: Option<usize>,

    /// Number of elevators
    #[arg(long, help = "Number of elevators (at least 1)")]
    pub num_elevators: Option<usize>,

    /// Passenger capacity of each elevator
    #[arg(long, help = "Passenger capacity per elevator (at least 1)")]
    pub elevator_capacity: Option<usize>,

    /// Number of rounds to simulate
    #[arg(long, help = "Number of rounds to simulate (at least 1)")]
    pub num_rounds: Option<usize>,

    /// Arrival policy
    #[arg(
        long,
        help = "Arrival policy (random, file or single)",
        long_help = "Policy used to introduce new people each round. Supported: random, file, single. Default: random"
    )]
    pub arrival_policy: Option<ArrivalPolicy>,

    /// People generated per round by the random arrival policy
    #[arg(long, help = "People generated per round by the random arrival policy")]
    pub max_arrivals: Option<usize>,

    /// CSV arrival schedule used by the file arrival policy
    #[arg(
        long,
        help = "CSV arrival schedule for the file arrival policy",
        long_help = "CSV file where each line is `round, origin, target, origin, target, ...`. Required when --arrival-policy is file."
    )]
    pub arrival_file: Option<String>,

    /// Moving (dispatch) policy
    #[arg(
        long,
        help = "Moving policy (end-to-end, furthest-floor or random)",
        long_help = "Policy used to assign elevator target floors every round. Supported: end-to-end, furthest-floor, random. Default: end-to-end"
    )]
    pub moving_policy: Option<MovingPolicy>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Render a text snapshot of the building every round
    #[arg(long, help = "Render a text snapshot of the building every round")]
    pub visualize: bool,

    /// Pause between rounds in milliseconds
    #[arg(long, help = "Pause between rounds in milliseconds (only with --visualize)")]
    pub round_delay_ms: Option<u64>,

    /// Write the final statistics report as JSON
    #[arg(long, help = "Output path for the JSON statistics report")]
    pub stats_output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of floors in the building
    pub num_floors: Option<usize>,
    /// Number of elevators
    pub num_elevators: Option<usize>,
    /// Passenger capacity of each elevator
    pub elevator_capacity: Option<usize>,
    /// Number of rounds to simulate
    pub num_rounds: Option<usize>,
    /// Arrival policy
    pub arrival_policy: Option<ArrivalPolicy>,
    /// People generated per round by the random arrival policy
    pub max_arrivals: Option<usize>,
    /// CSV arrival schedule used by the file arrival policy
    pub arrival_file: Option<String>,
    /// Moving (dispatch) policy
    pub moving_policy: Option<MovingPolicy>,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
    /// Render a text snapshot of the building every round
    pub visualize: Option<bool>,
    /// Pause between rounds in milliseconds
    pub round_delay_ms: Option<u64>,
}

/// Configuration for an elevator simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of floors in the building (floors are numbered 1..=num_floors)
    pub num_floors: usize,

    /// Number of elevators
    pub num_elevators: usize,

    /// Passenger capacity of each elevator
    pub elevator_capacity: usize,

    /// Number of rounds to simulate
    pub num_rounds: usize,

    /// Arrival policy
    pub arrival_policy: ArrivalPolicy,

    /// People generated per round by the random arrival policy
    pub max_arrivals: usize,

    /// CSV arrival schedule used by the file arrival policy
    pub arrival_file: Option<String>,

    /// Moving (dispatch) policy
    pub moving_policy: MovingPolicy,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Render a text snapshot of the building every round
    pub visualize: bool,

    /// Pause between rounds in milliseconds
    pub round_delay_ms: u64,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigValidationError {
    /// Floor count is invalid
    #[error("Number of floors must be at least 2, got {0}")]
    InvalidFloorCount(usize),

    /// Elevator count is invalid
    #[error("Number of elevators must be at least 1, got {0}")]
    InvalidElevatorCount(usize),

    /// Elevator capacity is invalid
    #[error("Elevator capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// Round count is invalid
    #[error("Number of rounds must be at least 1, got {0}")]
    InvalidRoundCount(usize),

    /// Random arrivals need a positive per-round count
    #[error("Random arrival policy requires max_arrivals of at least 1, got {0}")]
    InvalidMaxArrivals(usize),

    /// File arrivals need a schedule path
    #[error("File arrival policy requires an arrival_file")]
    MissingArrivalFile,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_floors: 6,
            num_elevators: 2,
            elevator_capacity: 2,
            num_rounds: 20,
            arrival_policy: ArrivalPolicy::Random,
            max_arrivals: 2,
            arrival_file: None,
            moving_policy: MovingPolicy::EndToEnd,
            seed: None,
            visualize: false,
            round_delay_ms: 0,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file, filling missing fields with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            num_floors: config_file.num_floors.unwrap_or(defaults.num_floors),
            num_elevators: config_file.num_elevators.unwrap_or(defaults.num_elevators),
            elevator_capacity: config_file
                .elevator_capacity
                .unwrap_or(defaults.elevator_capacity),
            num_rounds: config_file.num_rounds.unwrap_or(defaults.num_rounds),
            arrival_policy: config_file.arrival_policy.unwrap_or(defaults.arrival_policy),
            max_arrivals: config_file.max_arrivals.unwrap_or(defaults.max_arrivals),
            arrival_file: config_file.arrival_file.or(defaults.arrival_file),
            moving_policy: config_file.moving_policy.unwrap_or(defaults.moving_policy),
            seed: config_file.seed.or(defaults.seed),
            visualize: config_file.visualize.unwrap_or(defaults.visualize),
            round_delay_ms: config_file.round_delay_ms.unwrap_or(defaults.round_delay_ms),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.num_floors {
            config.num_floors = value;
        }
        if let Some(value) = args.num_elevators {
            config.num_elevators = value;
        }
        if let Some(value) = args.elevator_capacity {
            config.elevator_capacity = value;
        }
        if let Some(value) = args.num_rounds {
            config.num_rounds = value;
        }
        if let Some(value) = args.arrival_policy {
            config.arrival_policy = value;
        }
        if let Some(value) = args.max_arrivals {
            config.max_arrivals = value;
        }
        if let Some(value) = args.arrival_file {
            config.arrival_file = Some(value);
        }
        if let Some(value) = args.moving_policy {
            config.moving_policy = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if args.visualize {
            config.visualize = true;
        }
        if let Some(value) = args.round_delay_ms {
            config.round_delay_ms = value;
        }
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.validate_building()?;

        if self.num_rounds == 0 {
            return Err(ConfigValidationError::InvalidRoundCount(self.num_rounds));
        }

        match self.arrival_policy {
            ArrivalPolicy::Random if self.max_arrivals == 0 => {
                Err(ConfigValidationError::InvalidMaxArrivals(self.max_arrivals))
            }
            ArrivalPolicy::File if self.arrival_file.is_none() => {
                Err(ConfigValidationError::MissingArrivalFile)
            }
            _ => Ok(()),
        }
    }

    /// Validate only the building shape (floors, elevators, capacity)
    ///
    /// This is the subset checked again when a simulation is constructed.
    pub fn validate_building(&self) -> Result<(), ConfigValidationError> {
        if self.num_floors < 2 {
            return Err(ConfigValidationError::InvalidFloorCount(self.num_floors));
        }
        if self.num_elevators == 0 {
            return Err(ConfigValidationError::InvalidElevatorCount(self.num_elevators));
        }
        if self.elevator_capacity == 0 {
            return Err(ConfigValidationError::InvalidCapacity(self.elevator_capacity));
        }
        Ok(())
    }

    /// Total passenger capacity across all elevators
    pub fn total_capacity(&self) -> usize {
        self.num_elevators * self.elevator_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs::try_parse_from(["test"]).unwrap()
    }

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();

        assert_eq!(config.num_floors, 6);
        assert_eq!(config.num_elevators, 2);
        assert_eq!(config.elevator_capacity, 2);
        assert_eq!(config.num_rounds, 20);
        assert_eq!(config.arrival_policy, ArrivalPolicy::Random);
        assert_eq!(config.max_arrivals, 2);
        assert_eq!(config.moving_policy, MovingPolicy::EndToEnd);
        assert!(config.arrival_file.is_none());
        assert!(config.seed.is_none());
        assert!(!config.visualize);
        assert_eq!(config.total_capacity(), 4);
        config.validate().unwrap();
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "num_floors": 10,
            "num_elevators": 3,
            "moving_policy": "furthest_floor",
            "seed": 42
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.num_floors, 10);
        assert_eq!(config.num_elevators, 3);
        assert_eq!(config.moving_policy, MovingPolicy::FurthestFloor);
        assert_eq!(config.seed, Some(42));
        // Untouched fields keep their defaults
        assert_eq!(config.elevator_capacity, 2);
        assert_eq!(config.num_rounds, 20);
    }

    #[test]
    fn test_config_file_errors() {
        let missing = SimulationConfig::from_file("/definitely/not/here.json");
        assert!(matches!(missing, Err(ConfigError::FileNotFound(_))));

        let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let unsupported = SimulationConfig::from_file(temp_file.path());
        assert!(matches!(unsupported, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let mut args = empty_args();
        args.num_floors = Some(12);
        args.moving_policy = Some(MovingPolicy::Random);
        args.seed = Some(7);
        args.visualize = true;

        let config = SimulationConfig::from_cli_args(args).unwrap();
        assert_eq!(config.num_floors, 12);
        assert_eq!(config.moving_policy, MovingPolicy::Random);
        assert_eq!(config.seed, Some(7));
        assert!(config.visualize);
        assert_eq!(config.num_elevators, 2);
    }

    #[test]
    fn test_validation_building_shape() {
        let mut config = SimulationConfig::default();
        config.num_floors = 1;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidFloorCount(1)));

        let mut config = SimulationConfig::default();
        config.num_elevators = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidElevatorCount(0)));

        let mut config = SimulationConfig::default();
        config.elevator_capacity = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidCapacity(0)));
    }

    #[test]
    fn test_validation_rounds_and_policies() {
        let mut config = SimulationConfig::default();
        config.num_rounds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidRoundCount(0)));

        let mut config = SimulationConfig::default();
        config.max_arrivals = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidMaxArrivals(0)));

        // max_arrivals only matters for the random policy
        config.arrival_policy = ArrivalPolicy::Single;
        assert!(config.validate().is_ok());

        let mut config = SimulationConfig::default();
        config.arrival_policy = ArrivalPolicy::File;
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingArrivalFile));
        config.arrival_file = Some("arrivals.csv".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_simulation_config_serialization() {
        let config = SimulationConfig::default();
        let json = config.print_json().unwrap();
        assert!(json.contains("\"num_floors\": 6"));
        assert!(json.contains("\"end_to_end\""));

        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
