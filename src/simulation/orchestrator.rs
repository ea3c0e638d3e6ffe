//! Main simulation driver
//!
//! This module contains the [`Simulation`] that owns the building state and
//! steps it forward one round at a time.
//!
//! Every round runs five phases in a fixed order:
//!
//! 1. **Disembark**: passengers whose target is the current floor leave
//! 2. **Arrive**: the arrival generator adds people to the floor queues
//! 3. **Board**: each elevator takes people from its floor's queue, oldest first
//! 4. **Move**: the moving algorithm sets targets, then every elevator moves one floor
//! 5. **Wait**: waiting people and passengers not yet at their floor age by one round

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use tracing::{debug, error, info, instrument};

use crate::algorithms::{
    build_arrival_generator, build_moving_algorithm, ArrivalGenerator, Arrivals, MovingAlgorithm,
};
use crate::building::{Elevator, Person, WaitingRegistry};
use crate::simulation::{
    ConsoleVisualizer, SimulationError, SimulationResult, SimulationStatistics, TracingVisualizer,
    Visualizer,
};
use crate::types::{Direction, ElevatorId, PersonId, SimulationConfig};
use crate::{round_event, round_span, run_span};

/// Round-based elevator simulation
pub struct Simulation {
    /// Configuration for the simulation
    config: SimulationConfig,
    num_floors: usize,
    elevators: Vec<Elevator>,
    waiting: WaitingRegistry,
    /// Everyone delivered so far, in delivery order
    completed: Vec<Person>,
    /// Ids of everyone the arrival generator has introduced
    introduced: HashSet<PersonId>,
    /// Index of the next round to run
    round: usize,
    arrivals: Box<dyn ArrivalGenerator>,
    moving: Box<dyn MovingAlgorithm>,
    visualizer: Box<dyn Visualizer>,
    statistics: SimulationStatistics,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("round", &self.round)
            .field("elevators", &self.elevators)
            .field("waiting", &self.waiting.total_waiting())
            .field("completed", &self.completed.len())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Create a simulation with explicit policies
    ///
    /// All elevators start empty on floor 1 and every floor starts with an
    /// empty queue. Only the building shape of `config` is checked here.
    #[instrument(
        skip_all,
        fields(
            num_floors = config.num_floors,
            num_elevators = config.num_elevators,
            capacity = config.elevator_capacity
        )
    )]
    pub fn new(
        config: SimulationConfig,
        arrivals: Box<dyn ArrivalGenerator>,
        moving: Box<dyn MovingAlgorithm>,
        visualizer: Box<dyn Visualizer>,
    ) -> SimulationResult<Self> {
        config.validate_building()?;

        info!(
            "Initializing {}-floor building with {} elevators of capacity {}",
            config.num_floors, config.num_elevators, config.elevator_capacity
        );

        let elevators = (0..config.num_elevators)
            .map(|index| Elevator::new(ElevatorId(index), config.elevator_capacity))
            .collect();

        Ok(Self {
            num_floors: config.num_floors,
            elevators,
            waiting: WaitingRegistry::new(config.num_floors),
            completed: Vec::new(),
            introduced: HashSet::new(),
            round: 0,
            arrivals,
            moving,
            visualizer,
            statistics: SimulationStatistics::new(),
            config,
        })
    }

    /// Create a simulation with the policies and visualizer `config` selects
    pub fn from_config(config: SimulationConfig) -> SimulationResult<Self> {
        let arrivals = build_arrival_generator(&config)?;
        let moving = build_moving_algorithm(&config);
        let visualizer: Box<dyn Visualizer> = if config.visualize {
            Box::new(ConsoleVisualizer::stderr(config.num_floors, config.round_delay_ms > 0))
        } else {
            Box::new(TracingVisualizer::new())
        };
        Self::new(config, arrivals, moving, visualizer)
    }

    /// Run `num_rounds` rounds and return the final statistics
    ///
    /// A policy breaking its contract aborts the run with the error; the
    /// state reached so far stays inspectable through the accessors.
    pub fn run(&mut self, num_rounds: usize) -> SimulationResult<SimulationStatistics> {
        if num_rounds == 0 {
            return Err(SimulationError::configuration_error(
                "number of rounds must be at least 1",
            ));
        }

        let span = run_span!(num_rounds, start_round = self.round);
        let _enter = span.enter();

        info!("Running {} rounds starting at round {}", num_rounds, self.round);
        let delay = Duration::from_millis(self.config.round_delay_ms);

        for _ in 0..num_rounds {
            if let Err(e) = self.run_round() {
                error!(round = self.round, category = e.category(), "Simulation aborted: {}", e);
                return Err(e);
            }
            self.visualizer.wait(delay);
        }
        self.visualizer.wait_for_exit();

        let statistics = self.statistics();
        info!("Simulation finished: {}", statistics.summary());
        Ok(statistics)
    }

    /// Run a single round through all five phases
    pub fn run_round(&mut self) -> SimulationResult<()> {
        let round = self.round;
        let span = round_span!(round);
        let _enter = span.enter();
        self.visualizer.render_header(round);

        self.disembark_passengers();
        self.receive_arrivals(round)?;
        self.board_passengers();
        self.move_elevators()?;
        self.update_wait_times();

        self.round += 1;
        self.statistics.increment_rounds();

        round_event!(
            debug,
            round,
            "Round complete",
            waiting = self.waiting.total_waiting(),
            in_transit = self.people_in_transit(),
            completed = self.completed.len(),
        );
        Ok(())
    }

    fn disembark_passengers(&mut self) {
        for elevator in &mut self.elevators {
            let leaving = elevator.disembark();
            if leaving.is_empty() {
                continue;
            }
            for person in leaving {
                self.visualizer.show_disembarking(&person, elevator);
                self.statistics.record_completion(person.wait_time());
                self.completed.push(person);
            }
            self.visualizer.refresh_elevator(elevator);
        }
    }

    fn receive_arrivals(&mut self, round: usize) -> SimulationResult<()> {
        let arrivals = self.arrivals.generate(round);
        // Nothing is queued unless the whole batch is valid
        self.check_arrivals(&arrivals)?;

        let count: usize = arrivals.values().map(Vec::len).sum();
        if count == 0 {
            return Ok(());
        }
        debug!(round, count, "People arrived");

        self.introduced.extend(arrivals.values().flatten().map(Person::id));
        self.visualizer.show_arrivals(&arrivals);
        self.statistics.record_arrivals(count);
        for (floor, people) in arrivals {
            self.waiting.extend(floor, people)?;
        }
        Ok(())
    }

    fn check_arrivals(&self, arrivals: &Arrivals) -> SimulationResult<()> {
        let num_floors = self.num_floors;
        let mut batch = HashSet::new();
        for (&floor, people) in arrivals {
            if !self.waiting.contains_floor(floor) {
                return Err(SimulationError::UnknownArrivalFloor { floor, num_floors });
            }
            for person in people {
                if person.origin_floor() != floor {
                    return Err(SimulationError::invalid_arrival(format!(
                        "{} starts at floor {} but arrived on floor {}",
                        person.id(),
                        person.origin_floor(),
                        floor
                    )));
                }
                if !(1..=num_floors).contains(&person.target_floor()) {
                    return Err(SimulationError::invalid_arrival(format!(
                        "{} targets floor {}, outside 1..={}",
                        person.id(),
                        person.target_floor(),
                        num_floors
                    )));
                }
                if person.target_floor() == floor {
                    return Err(SimulationError::invalid_arrival(format!(
                        "{} targets their own floor {}",
                        person.id(),
                        floor
                    )));
                }
                if person.wait_time() != 0 {
                    return Err(SimulationError::invalid_arrival(format!(
                        "{} arrived having already waited {} rounds",
                        person.id(),
                        person.wait_time()
                    )));
                }
                if self.introduced.contains(&person.id()) || !batch.insert(person.id()) {
                    return Err(SimulationError::invalid_arrival(format!(
                        "{} was already introduced",
                        person.id()
                    )));
                }
            }
        }
        Ok(())
    }

    fn board_passengers(&mut self) {
        for elevator in &mut self.elevators {
            let floor = elevator.current_floor();
            let mut boarded = 0;

            while elevator.has_space() {
                let Some(person) = self.waiting.pop_front(floor) else {
                    break;
                };
                match elevator.board(person) {
                    Ok(()) => {
                        boarded += 1;
                        if let Some(person) = elevator.passengers().last() {
                            self.visualizer.show_boarding(person, elevator);
                        }
                    }
                    Err(full) => {
                        self.waiting.return_to_front(floor, full.person);
                        break;
                    }
                }
            }

            if boarded > 0 {
                self.visualizer.refresh_elevator(elevator);
            }
        }
    }

    fn move_elevators(&mut self) -> SimulationResult<()> {
        let before = self.elevators.clone();
        self.moving.update_target_floors(&mut self.elevators, &self.waiting, self.num_floors);

        // Only targets may change during dispatch. Anything else is undone
        // before the run aborts.
        let changed = before
            .iter()
            .zip(&self.elevators)
            .find_map(|(prior, current)| elevator_changes(prior, current).map(|r| (prior.id(), r)));
        if let Some((elevator, reason)) = changed {
            self.elevators = before;
            return Err(SimulationError::ElevatorModified { elevator, reason });
        }

        for elevator in &self.elevators {
            let target = elevator.target_floor();
            if !(1..=self.num_floors).contains(&target) {
                return Err(SimulationError::TargetFloorOutOfRange {
                    elevator: elevator.id(),
                    target,
                    num_floors: self.num_floors,
                });
            }
        }

        let directions: Vec<Direction> = self.elevators.iter_mut().map(Elevator::advance).collect();
        self.visualizer.show_elevator_moves(&self.elevators, &directions);
        Ok(())
    }

    fn update_wait_times(&mut self) {
        self.waiting.tick_waits();
        for elevator in &mut self.elevators {
            elevator.tick_passenger_waits();
        }
    }

    fn people_in_transit(&self) -> usize {
        self.elevators.iter().map(Elevator::passenger_count).sum()
    }

    /// Configuration the simulation was created with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of floors in the building
    pub fn num_floors(&self) -> usize {
        self.num_floors
    }

    /// All elevators, in id order
    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    /// People waiting on each floor
    pub fn waiting(&self) -> &WaitingRegistry {
        &self.waiting
    }

    /// People delivered so far, in delivery order
    pub fn completed(&self) -> &[Person] {
        &self.completed
    }

    /// Number of rounds run so far
    pub fn round(&self) -> usize {
        self.round
    }

    /// Statistics for the rounds run so far
    pub fn statistics(&self) -> SimulationStatistics {
        let mut statistics = self.statistics.clone();
        statistics.record_end_state(
            self.waiting.total_waiting(),
            self.people_in_transit(),
            self.elevators.iter().map(Elevator::floors_travelled).sum(),
        );
        statistics
    }
}

/// Describe how `after` differs from `before`, ignoring the target floor
fn elevator_changes(before: &Elevator, after: &Elevator) -> Option<String> {
    if before.id() != after.id() || before.capacity() != after.capacity() {
        Some(format!("replaced by {} with capacity {}", after.id(), after.capacity()))
    } else if before.current_floor() != after.current_floor()
        || before.floors_travelled() != after.floors_travelled()
    {
        Some(format!(
            "moved from floor {} to floor {}",
            before.current_floor(),
            after.current_floor()
        ))
    } else if before.passengers() != after.passengers() {
        Some(format!(
            "passengers changed from {} to {}",
            before.passenger_count(),
            after.passenger_count()
        ))
    } else {
        None
    }
}
