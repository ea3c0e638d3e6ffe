//! Arrival and dispatch policies
//!
//! The simulation talks to its policies through two traits:
//!
//! - **ArrivalGenerator**: returns the people arriving on each floor in a round
//! - **MovingAlgorithm**: assigns every elevator's target floor before it moves
//!
//! Reference implementations are provided for both, and the `build_*`
//! functions pick one from a [`SimulationConfig`].
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dispatch_sim::algorithms::*;
//!
//! let mut arrivals = ScheduledArrivals::new().with_arrival(0, 3, 6);
//! let round0 = arrivals.generate(0);
//! assert_eq!(round0[&3].len(), 1);
//! ```

pub mod arrivals;
pub mod moving;

pub use arrivals::{ArrivalGenerator, Arrivals, RandomArrivals, ScheduledArrivals, SingleArrivals};
pub use moving::{EndToEndLoop, FurthestFloor, MovingAlgorithm, RandomAlgorithm};

use tracing::{info, warn};

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{ArrivalPolicy, MovingPolicy, SimulationConfig};

/// Build the arrival generator selected by `config`
pub fn build_arrival_generator(
    config: &SimulationConfig,
) -> SimulationResult<Box<dyn ArrivalGenerator>> {
    info!("Using {} arrival policy", config.arrival_policy);

    let generator: Box<dyn ArrivalGenerator> = match config.arrival_policy {
        ArrivalPolicy::Random => {
            Box::new(RandomArrivals::new(config.num_floors, config.max_arrivals, config.seed))
        }
        ArrivalPolicy::File => {
            let path = config.arrival_file.as_deref().ok_or_else(|| {
                SimulationError::configuration_error("file arrival policy requires arrival_file")
            })?;
            let schedule = ScheduledArrivals::from_csv_file(path, config.num_floors)?;
            if let Some(last) = schedule.last_round().filter(|&last| last >= config.num_rounds) {
                warn!(
                    "Arrival schedule runs until round {}, but only {} rounds are configured",
                    last, config.num_rounds
                );
            }
            Box::new(schedule)
        }
        ArrivalPolicy::Single => Box::new(SingleArrivals::new(config.num_floors)),
    };
    Ok(generator)
}

/// Build the moving algorithm selected by `config`
///
/// The random policy is seeded with `seed + 1` so its stream differs from the
/// random arrival policy's.
pub fn build_moving_algorithm(config: &SimulationConfig) -> Box<dyn MovingAlgorithm> {
    info!("Using {} moving policy", config.moving_policy);

    match config.moving_policy {
        MovingPolicy::EndToEnd => Box::new(EndToEndLoop),
        MovingPolicy::FurthestFloor => Box::new(FurthestFloor),
        MovingPolicy::Random => {
            Box::new(RandomAlgorithm::new(config.seed.map(|seed| seed.wrapping_add(1))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_build_arrival_generator_from_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "0, 3, 6").unwrap();
        file.flush().unwrap();

        let config = SimulationConfig {
            arrival_policy: ArrivalPolicy::File,
            arrival_file: Some(file.path().display().to_string()),
            ..Default::default()
        };
        let mut generator = build_arrival_generator(&config).unwrap();
        assert_eq!(generator.generate(0)[&3].len(), 1);
        assert!(generator.generate(1).is_empty());
    }

    #[test]
    fn test_schedule_longer_than_the_run_still_loads() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "0, 1, 2").unwrap();
        writeln!(file, "40, 2, 1").unwrap();
        file.flush().unwrap();

        let config = SimulationConfig {
            num_rounds: 10,
            arrival_policy: ArrivalPolicy::File,
            arrival_file: Some(file.path().display().to_string()),
            ..Default::default()
        };
        let mut generator = build_arrival_generator(&config).unwrap();
        assert_eq!(generator.generate(40)[&2].len(), 1);
    }

    #[test]
    fn test_build_arrival_generator_missing_file() {
        let config = SimulationConfig {
            arrival_policy: ArrivalPolicy::File,
            arrival_file: None,
            ..Default::default()
        };
        let err = build_arrival_generator(&config).err().unwrap();
        assert!(matches!(err, SimulationError::ConfigurationError(_)));

        let config = SimulationConfig {
            arrival_policy: ArrivalPolicy::File,
            arrival_file: Some("/no/such/arrivals.csv".to_string()),
            ..Default::default()
        };
        let err = build_arrival_generator(&config).err().unwrap();
        assert!(matches!(err, SimulationError::IoError(_)));
    }

    #[test]
    fn test_build_single_and_random_generators() {
        let config = SimulationConfig {
            arrival_policy: ArrivalPolicy::Single,
            ..Default::default()
        };
        let mut single = build_arrival_generator(&config).unwrap();
        assert_eq!(single.generate(0)[&1][0].target_floor(), 2);

        let config = SimulationConfig { seed: Some(3), max_arrivals: 5, ..Default::default() };
        let mut random = build_arrival_generator(&config).unwrap();
        assert_eq!(random.generate(0).values().map(Vec::len).sum::<usize>(), 5);
    }
}
