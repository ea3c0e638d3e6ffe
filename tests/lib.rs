// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use elevator_dispatch_sim::*;

mod invariant_tests;

#[test]
fn test_core_id_types() {
    let person_id = PersonId::new();
    assert_ne!(person_id, PersonId::new());
    assert!(person_id.to_string().starts_with("PERSON_"));

    assert_eq!(ElevatorId(0).to_string(), "ELEV_1");
    assert_eq!(ElevatorId(2).index(), 2);
}

#[test]
fn test_crate_root_reexports() {
    let config = SimulationConfig {
        num_floors: 4,
        num_elevators: 1,
        arrival_policy: ArrivalPolicy::Single,
        moving_policy: MovingPolicy::EndToEnd,
        ..Default::default()
    };
    let mut simulation = Simulation::from_config(config).unwrap();
    let stats: SimulationStatistics = simulation.run(4).unwrap();

    assert_eq!(stats.num_rounds, 4);
    assert_eq!(stats.total_people, 4);
    assert_eq!(simulation.elevators().len(), 1);
}

#[test]
fn test_building_state_reexports() {
    let mut waiting = WaitingRegistry::new(3);
    waiting.extend(2, vec![Person::new(2, 3)]).unwrap();
    assert_eq!(waiting.total_waiting(), 1);

    let mut elevator = Elevator::new(ElevatorId(0), 1);
    elevator.set_target_floor(3);
    assert_eq!(elevator.target_floor(), 3);
    assert_eq!(elevator.current_floor(), 1);
    assert!(elevator.has_space());
    assert_eq!(Direction::Up.to_string(), "Up");
}
