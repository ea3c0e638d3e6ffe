//! Elevator state and its per-round transitions

use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::building::Person;
use crate::types::{Direction, ElevatorId};

/// Floor every elevator starts on
pub const START_FLOOR: usize = 1;

/// Boarding was refused because the elevator is full
///
/// The refused person is handed back so the caller can keep them queued.
#[derive(Debug, Error)]
#[error("{elevator} is full ({capacity} passengers), {} must keep waiting", .person.id())]
pub struct CapacityExceeded {
    /// Elevator that refused the boarding
    pub elevator: ElevatorId,
    /// Capacity of that elevator
    pub capacity: usize,
    /// The person who could not board
    pub person: Person,
}

/// An elevator carrying passengers between floors
///
/// Outside this crate only the target floor can be changed. Boarding,
/// disembarking and moving belong to the simulation's round phases.
#[derive(Debug, Clone, Serialize)]
pub struct Elevator {
    id: ElevatorId,
    capacity: usize,
    current_floor: usize,
    target_floor: usize,
    /// Boarding order is preserved
    passengers: Vec<Person>,
    floors_travelled: usize,
}

impl Elevator {
    /// Create an empty elevator parked on the start floor
    pub fn new(id: ElevatorId, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            current_floor: START_FLOOR,
            target_floor: START_FLOOR,
            passengers: Vec::with_capacity(capacity),
            floors_travelled: 0,
        }
    }

    /// Identifier of this elevator
    pub fn id(&self) -> ElevatorId {
        self.id
    }

    /// Maximum number of passengers
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Floor the elevator is on
    pub fn current_floor(&self) -> usize {
        self.current_floor
    }

    /// Floor the elevator is heading for
    pub fn target_floor(&self) -> usize {
        self.target_floor
    }

    /// Assign a new target floor
    ///
    /// Range checking is the simulation's job; it rejects out-of-range targets
    /// before any elevator moves.
    pub fn set_target_floor(&mut self, floor: usize) {
        self.target_floor = floor;
    }

    /// Passengers in boarding order
    pub fn passengers(&self) -> &[Person] {
        &self.passengers
    }

    /// Number of passengers on board
    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    /// Whether another person can board
    pub fn has_space(&self) -> bool {
        self.passengers.len() < self.capacity
    }

    /// Whether the elevator carries nobody
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Fraction of capacity in use, between 0.0 and 1.0
    pub fn fullness(&self) -> f64 {
        self.passengers.len() as f64 / self.capacity as f64
    }

    /// Total single-floor moves made so far
    pub fn floors_travelled(&self) -> usize {
        self.floors_travelled
    }

    /// Remove every passenger whose target is the current floor
    ///
    /// Remaining passengers keep their boarding order. A fresh list is built
    /// instead of removing in place.
    pub(crate) fn disembark(&mut self) -> Vec<Person> {
        let floor = self.current_floor;
        let (leaving, staying): (Vec<Person>, Vec<Person>) =
            std::mem::take(&mut self.passengers)
                .into_iter()
                .partition(|person| person.target_floor() == floor);
        self.passengers = staying;

        if !leaving.is_empty() {
            trace!("{} dropped {} passengers at floor {}", self.id, leaving.len(), floor);
        }
        leaving
    }

    /// Board a person if there is room, otherwise hand them back
    pub(crate) fn board(&mut self, person: Person) -> Result<(), CapacityExceeded> {
        if !self.has_space() {
            return Err(CapacityExceeded { elevator: self.id, capacity: self.capacity, person });
        }
        self.passengers.push(person);
        Ok(())
    }

    /// Move one floor toward `target_floor`, or stay if already there
    pub(crate) fn move_toward(&mut self, target_floor: usize) -> Direction {
        let direction = if self.current_floor < target_floor {
            self.current_floor += 1;
            Direction::Up
        } else if self.current_floor > target_floor {
            self.current_floor -= 1;
            Direction::Down
        } else {
            Direction::Stay
        };

        if direction != Direction::Stay {
            self.floors_travelled += 1;
        }
        direction
    }

    /// Move one floor toward the assigned target floor
    pub(crate) fn advance(&mut self) -> Direction {
        self.move_toward(self.target_floor)
    }

    /// Add a round of waiting to every passenger not yet at their floor
    pub(crate) fn tick_passenger_waits(&mut self) {
        let floor = self.current_floor;
        for person in self.passengers.iter_mut().filter(|p| p.target_floor() != floor) {
            person.tick_wait();
        }
    }
}
