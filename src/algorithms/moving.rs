//! Moving (dispatch) policies
//!
//! A [`MovingAlgorithm`] runs once per round, before the elevators move, and
//! assigns every elevator's target floor. Elevators then move one floor toward
//! their target.

use std::cmp::Reverse;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::building::{Elevator, WaitingRegistry};

/// Assigns target floors to elevators
///
/// Implementations must be deterministic given their inputs (and their seed,
/// for randomized policies) so a run can be reproduced. Every assigned target
/// must lie in `1..=num_floors`; the simulation aborts the run otherwise.
/// Targets are the only thing an implementation may change. Swapping or
/// replacing elevators also aborts the run.
pub trait MovingAlgorithm {
    /// Update each elevator's target floor in place
    fn update_target_floors(
        &mut self,
        elevators: &mut [Elevator],
        waiting: &WaitingRegistry,
        num_floors: usize,
    );
}

/// Sweeps every elevator between the bottom and the top floor
///
/// Ignores waiting queues entirely, which makes it a baseline for other
/// policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndToEndLoop;

impl MovingAlgorithm for EndToEndLoop {
    fn update_target_floors(
        &mut self,
        elevators: &mut [Elevator],
        _waiting: &WaitingRegistry,
        num_floors: usize,
    ) {
        for elevator in elevators.iter_mut() {
            if elevator.current_floor() == 1 {
                elevator.set_target_floor(num_floors);
            } else if elevator.current_floor() == num_floors {
                elevator.set_target_floor(1);
            }
        }
    }
}

/// Heads for the furthest floor that has work
///
/// A loaded elevator targets the passenger destination furthest from its
/// current floor. An empty elevator targets the floor with waiting people
/// furthest from it. Ties go to the lower floor. With nothing to do the
/// elevator stays where it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct FurthestFloor;

impl FurthestFloor {
    fn furthest(current: usize, floors: impl Iterator<Item = usize>) -> Option<usize> {
        floors.min_by_key(|&floor| (Reverse(floor.abs_diff(current)), floor))
    }
}

impl MovingAlgorithm for FurthestFloor {
    fn update_target_floors(
        &mut self,
        elevators: &mut [Elevator],
        waiting: &WaitingRegistry,
        _num_floors: usize,
    ) {
        for elevator in elevators.iter_mut() {
            let current = elevator.current_floor();
            let target = if elevator.is_empty() {
                Self::furthest(current, waiting.floors_with_waiting())
            } else {
                Self::furthest(current, elevator.passengers().iter().map(|p| p.target_floor()))
            };
            elevator.set_target_floor(target.unwrap_or(current));
        }
    }
}

/// Picks a random new target whenever an elevator reaches its current one
#[derive(Debug)]
pub struct RandomAlgorithm {
    rng: StdRng,
}

impl RandomAlgorithm {
    /// Create the policy, seeded for reproducible runs when a seed is given
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl MovingAlgorithm for RandomAlgorithm {
    fn update_target_floors(
        &mut self,
        elevators: &mut [Elevator],
        _waiting: &WaitingRegistry,
        num_floors: usize,
    ) {
        if num_floors < 2 {
            return;
        }
        for elevator in elevators.iter_mut() {
            let current = elevator.current_floor();
            if current != elevator.target_floor() {
                continue;
            }
            let mut target = self.rng.gen_range(1..num_floors);
            if target >= current {
                target += 1;
            }
            trace!("{} picked random target {}", elevator.id(), target);
            elevator.set_target_floor(target);
        }
    }
}
