//! A single rider travelling between two floors

use serde::{Deserialize, Serialize};

use crate::types::PersonId;

/// A person waiting for, or riding in, an elevator
///
/// A person is owned by exactly one place at a time: a floor's waiting queue,
/// an elevator's passenger list, or the simulation's completed list once they
/// have reached their target floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    origin_floor: usize,
    target_floor: usize,
    wait_time: u32,
}

impl Person {
    /// Create a new person who has not waited yet
    pub fn new(origin_floor: usize, target_floor: usize) -> Self {
        Self { id: PersonId::new(), origin_floor, target_floor, wait_time: 0 }
    }

    /// Unique identifier of this person
    pub fn id(&self) -> PersonId {
        self.id
    }

    /// Floor the person arrived at
    pub fn origin_floor(&self) -> usize {
        self.origin_floor
    }

    /// Floor the person wants to reach
    pub fn target_floor(&self) -> usize {
        self.target_floor
    }

    /// Rounds this person has spent waiting or riding so far
    pub fn wait_time(&self) -> u32 {
        self.wait_time
    }

    /// Count one more round of waiting
    pub(crate) fn tick_wait(&mut self) {
        self.wait_time += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_person_has_not_waited() {
        let person = Person::new(3, 6);
        assert_eq!(person.origin_floor(), 3);
        assert_eq!(person.target_floor(), 6);
        assert_eq!(person.wait_time(), 0);
    }

    #[test]
    fn test_tick_wait_is_monotonic() {
        let mut person = Person::new(1, 2);
        person.tick_wait();
        person.tick_wait();
        assert_eq!(person.wait_time(), 2);
    }

    #[test]
    fn test_people_have_distinct_ids() {
        assert_ne!(Person::new(1, 2).id(), Person::new(1, 2).id());
    }
}
