//! Round-by-round invariant checks
//!
//! Each test steps a seeded simulation one round at a time and checks the
//! building state between rounds: elevator capacity, people conservation,
//! single-floor moves and monotonic wait times.

use std::collections::HashMap;

use elevator_dispatch_sim::simulation::Simulation;
use elevator_dispatch_sim::types::*;

fn seeded_config(moving_policy: MovingPolicy, seed: u64) -> SimulationConfig {
    SimulationConfig {
        num_floors: 7,
        num_elevators: 3,
        elevator_capacity: 2,
        max_arrivals: 3,
        moving_policy,
        seed: Some(seed),
        ..Default::default()
    }
}

fn wait_times(sim: &Simulation) -> HashMap<PersonId, u32> {
    let waiting = sim.waiting().iter().flat_map(|(_, queue)| queue.iter());
    let riding = sim.elevators().iter().flat_map(|e| e.passengers().iter());
    waiting.chain(riding).map(|p| (p.id(), p.wait_time())).collect()
}

fn check_invariants_for(moving_policy: MovingPolicy, seed: u64, rounds: usize) {
    let mut sim = Simulation::from_config(seeded_config(moving_policy, seed)).unwrap();
    let num_floors = sim.num_floors();

    let mut previous_floors: Vec<usize> = sim.elevators().iter().map(|e| e.current_floor()).collect();
    let mut previous_waits = wait_times(&sim);

    for _ in 0..rounds {
        sim.run_round().unwrap();

        for (elevator, &before) in sim.elevators().iter().zip(&previous_floors) {
            assert!(elevator.passenger_count() <= elevator.capacity());
            assert!((1..=num_floors).contains(&elevator.current_floor()));
            assert!(elevator.current_floor().abs_diff(before) <= 1);
        }

        let stats = sim.statistics();
        let in_transit: usize = sim.elevators().iter().map(|e| e.passenger_count()).sum();
        assert_eq!(
            sim.waiting().total_waiting() + in_transit + sim.completed().len(),
            stats.total_people
        );

        let waits = wait_times(&sim);
        for (id, wait) in &waits {
            if let Some(&before) = previous_waits.get(id) {
                assert!(*wait == before || *wait == before + 1);
            }
        }
        for person in sim.completed() {
            assert!(person.wait_time() <= stats.max_wait_time);
        }

        previous_floors = sim.elevators().iter().map(|e| e.current_floor()).collect();
        previous_waits = waits;
    }

    assert_eq!(sim.round(), rounds);
}

#[test]
fn test_invariants_hold_for_end_to_end() {
    check_invariants_for(MovingPolicy::EndToEnd, 7, 60);
}

#[test]
fn test_invariants_hold_for_furthest_floor() {
    check_invariants_for(MovingPolicy::FurthestFloor, 11, 60);
}

#[test]
fn test_invariants_hold_for_random_moves() {
    check_invariants_for(MovingPolicy::Random, 23, 60);
}

#[test]
fn test_waiting_people_always_age() {
    let mut sim = Simulation::from_config(seeded_config(MovingPolicy::EndToEnd, 5)).unwrap();

    for _ in 0..20 {
        let before = wait_times(&sim);
        sim.run_round().unwrap();

        for (_, queue) in sim.waiting().iter() {
            for person in queue {
                if let Some(&wait) = before.get(&person.id()) {
                    assert_eq!(person.wait_time(), wait + 1);
                }
            }
        }
    }
}

#[test]
fn test_completed_people_were_delivered_to_their_floor() {
    let mut sim = Simulation::from_config(seeded_config(MovingPolicy::FurthestFloor, 3)).unwrap();
    let stats = sim.run(80).unwrap();

    assert!(stats.people_completed > 0);
    assert_eq!(sim.completed().len(), stats.people_completed);
    assert!(sim.completed().iter().all(|p| p.origin_floor() != p.target_floor()));

    let total: u64 = sim.completed().iter().map(|p| u64::from(p.wait_time())).sum();
    assert_eq!(total, stats.total_wait_time);
}
