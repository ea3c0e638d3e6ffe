//! Per-floor FIFO queues of people waiting for an elevator

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use crate::building::Person;
use crate::simulation::{SimulationError, SimulationResult};

/// Registry of people waiting on each floor
///
/// Every floor `1..=num_floors` has a queue from construction on, possibly
/// empty. Floors are never added or removed afterwards. The front of a queue
/// is the person who has waited longest.
#[derive(Debug, Clone, Serialize)]
pub struct WaitingRegistry {
    queues: BTreeMap<usize, VecDeque<Person>>,
}

impl WaitingRegistry {
    /// Create empty queues for floors `1..=num_floors`
    pub fn new(num_floors: usize) -> Self {
        let queues = (1..=num_floors).map(|floor| (floor, VecDeque::new())).collect();
        Self { queues }
    }

    /// Number of floors tracked
    pub fn num_floors(&self) -> usize {
        self.queues.len()
    }

    /// Whether `floor` is one of the building's floors
    pub fn contains_floor(&self, floor: usize) -> bool {
        self.queues.contains_key(&floor)
    }

    /// The queue for `floor`, front first
    pub fn queue(&self, floor: usize) -> Option<&VecDeque<Person>> {
        self.queues.get(&floor)
    }

    /// Number of people waiting on `floor` (0 for unknown floors)
    pub fn waiting_at(&self, floor: usize) -> usize {
        self.queues.get(&floor).map_or(0, VecDeque::len)
    }

    /// Number of people waiting across all floors
    pub fn total_waiting(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Floors that currently have at least one person waiting, lowest first
    pub fn floors_with_waiting(&self) -> impl Iterator<Item = usize> + '_ {
        self.queues.iter().filter(|(_, queue)| !queue.is_empty()).map(|(floor, _)| *floor)
    }

    /// Iterate over every floor's queue, lowest floor first
    pub fn iter(&self) -> impl Iterator<Item = (usize, &VecDeque<Person>)> {
        self.queues.iter().map(|(floor, queue)| (*floor, queue))
    }

    /// Append new arrivals to the back of a floor's queue
    pub fn extend(&mut self, floor: usize, people: Vec<Person>) -> SimulationResult<()> {
        let num_floors = self.num_floors();
        let queue = self
            .queues
            .get_mut(&floor)
            .ok_or(SimulationError::UnknownArrivalFloor { floor, num_floors })?;
        queue.extend(people);
        Ok(())
    }

    /// Take the longest-waiting person on `floor`
    pub fn pop_front(&mut self, floor: usize) -> Option<Person> {
        self.queues.get_mut(&floor)?.pop_front()
    }

    /// Put a person back at the head of their floor's queue
    pub(crate) fn return_to_front(&mut self, floor: usize, person: Person) {
        if let Some(queue) = self.queues.get_mut(&floor) {
            queue.push_front(person);
        }
    }

    /// Add a round of waiting to everyone in every queue
    pub(crate) fn tick_waits(&mut self) {
        for person in self.queues.values_mut().flat_map(|queue| queue.iter_mut()) {
            person.tick_wait();
        }
    }
}
