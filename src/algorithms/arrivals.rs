//! Arrival policies
//!
//! An [`ArrivalGenerator`] decides who shows up on which floor each round.
//! The simulation appends the returned people to the back of each floor's
//! waiting queue, in the order given.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::building::Person;
use crate::simulation::{SimulationError, SimulationResult};

/// New people for one round, keyed by the floor they arrive on
pub type Arrivals = BTreeMap<usize, Vec<Person>>;

/// Produces the people arriving in a given round
///
/// Implementations only read the round number and their own state. Every
/// returned person has a wait time of 0 and an origin equal to its floor key.
pub trait ArrivalGenerator {
    /// People arriving in `round`
    fn generate(&mut self, round: usize) -> Arrivals;
}

/// Creates a fixed number of people per round with random origin and target
#[derive(Debug)]
pub struct RandomArrivals {
    num_floors: usize,
    max_arrivals: usize,
    rng: StdRng,
}

impl RandomArrivals {
    /// Create a generator producing `max_arrivals` people per round
    ///
    /// With a seed the sequence of arrivals is reproducible.
    pub fn new(num_floors: usize, max_arrivals: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                debug!("Random arrivals using deterministic seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self { num_floors, max_arrivals, rng }
    }
}

impl ArrivalGenerator for RandomArrivals {
    fn generate(&mut self, _round: usize) -> Arrivals {
        let mut arrivals = Arrivals::new();
        if self.num_floors < 2 {
            return arrivals;
        }

        for _ in 0..self.max_arrivals {
            let origin = self.rng.gen_range(1..=self.num_floors);
            // Uniform over the other floors
            let mut target = self.rng.gen_range(1..self.num_floors);
            if target >= origin {
                target += 1;
            }
            arrivals.entry(origin).or_default().push(Person::new(origin, target));
        }
        arrivals
    }
}

/// Replays a fixed schedule of `(origin, target)` trips per round
#[derive(Debug, Clone, Default)]
pub struct ScheduledArrivals {
    schedule: BTreeMap<usize, Vec<(usize, usize)>>,
}

impl ScheduledArrivals {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trip arriving in `round` and return the schedule
    pub fn with_arrival(mut self, round: usize, origin: usize, target: usize) -> Self {
        self.add_arrival(round, origin, target);
        self
    }

    /// Add a trip arriving in `round`
    pub fn add_arrival(&mut self, round: usize, origin: usize, target: usize) {
        self.schedule.entry(round).or_default().push((origin, target));
    }

    /// Total number of people in the schedule
    pub fn total_people(&self) -> usize {
        self.schedule.values().map(Vec::len).sum()
    }

    /// Last round with at least one scheduled arrival
    pub fn last_round(&self) -> Option<usize> {
        self.schedule.iter().rev().find(|(_, trips)| !trips.is_empty()).map(|(round, _)| *round)
    }

    /// Load a schedule from a CSV file
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_csv_file<P: AsRef<Path>>(path: P, num_floors: usize) -> SimulationResult<Self> {
        let file = File::open(path.as_ref())?;
        let schedule = Self::from_csv_reader(file, num_floors)?;
        info!(
            "Loaded arrival schedule with {} people from {}",
            schedule.total_people(),
            path.as_ref().display()
        );
        Ok(schedule)
    }

    /// Parse a schedule from CSV text
    ///
    /// Each line is `round, origin1, target1, origin2, target2, ...`. Lines
    /// starting with `#` are ignored. Every floor must be in
    /// `1..=num_floors` and no trip may start and end on the same floor.
    pub fn from_csv_reader<R: Read>(reader: R, num_floors: usize) -> SimulationResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut schedule = Self::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |position| position.line());

            let values = record
                .iter()
                .filter(|field| !field.is_empty())
                .map(|field| {
                    field.parse::<usize>().map_err(|_| {
                        SimulationError::arrival_file_error(format!(
                            "line {}: '{}' is not a non-negative integer",
                            line, field
                        ))
                    })
                })
                .collect::<SimulationResult<Vec<usize>>>()?;

            let Some((&round, floors)) = values.split_first() else {
                continue;
            };
            if floors.len() % 2 != 0 {
                return Err(SimulationError::arrival_file_error(format!(
                    "line {}: expected origin/target pairs after the round number",
                    line
                )));
            }

            for pair in floors.chunks_exact(2) {
                let (origin, target) = (pair[0], pair[1]);
                for floor in [origin, target] {
                    if !(1..=num_floors).contains(&floor) {
                        return Err(SimulationError::arrival_file_error(format!(
                            "line {}: floor {} is outside 1..={}",
                            line, floor, num_floors
                        )));
                    }
                }
                if origin == target {
                    return Err(SimulationError::arrival_file_error(format!(
                        "line {}: origin and target are both floor {}",
                        line, origin
                    )));
                }
                schedule.add_arrival(round, origin, target);
            }
        }

        Ok(schedule)
    }
}

impl ArrivalGenerator for ScheduledArrivals {
    fn generate(&mut self, round: usize) -> Arrivals {
        let mut arrivals = Arrivals::new();
        if let Some(trips) = self.schedule.get(&round) {
            for &(origin, target) in trips {
                arrivals.entry(origin).or_default().push(Person::new(origin, target));
            }
        }
        arrivals
    }
}

/// One person per round on the ground floor, cycling through the upper floors
#[derive(Debug, Clone)]
pub struct SingleArrivals {
    num_floors: usize,
}

impl SingleArrivals {
    /// Create a generator for a building with `num_floors` floors
    pub fn new(num_floors: usize) -> Self {
        Self { num_floors }
    }
}

impl ArrivalGenerator for SingleArrivals {
    fn generate(&mut self, round: usize) -> Arrivals {
        let mut arrivals = Arrivals::new();
        if self.num_floors >= 2 {
            let target = round % (self.num_floors - 1) + 2;
            arrivals.insert(1, vec![Person::new(1, target)]);
        }
        arrivals
    }
}
