//! Observers of simulation rounds
//!
//! The simulation reports every round to a [`Visualizer`]. Visualizers only
//! see read-only views of people and elevators and cannot feed anything back
//! into the simulation.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::algorithms::Arrivals;
use crate::building::{Elevator, Person};
use crate::types::Direction;

/// Receives per-round events from the simulation
///
/// Every method has a no-op default so implementations only override what
/// they care about.
pub trait Visualizer {
    /// A new round is starting
    fn render_header(&mut self, _round: usize) {}

    /// `person` left `elevator` at its current floor
    fn show_disembarking(&mut self, _person: &Person, _elevator: &Elevator) {}

    /// `elevator` changed load; redraw how full it is
    fn refresh_elevator(&mut self, _elevator: &Elevator) {}

    /// New people arrived on their floors
    fn show_arrivals(&mut self, _arrivals: &Arrivals) {}

    /// `person` boarded `elevator`
    fn show_boarding(&mut self, _person: &Person, _elevator: &Elevator) {}

    /// Every elevator moved; `directions[i]` belongs to `elevators[i]`
    fn show_elevator_moves(&mut self, _elevators: &[Elevator], _directions: &[Direction]) {}

    /// Pause between rounds
    fn wait(&mut self, _duration: Duration) {}

    /// The run is over; block until the viewer is done, if applicable
    fn wait_for_exit(&mut self) {}
}

/// Ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVisualizer;

impl Visualizer for NullVisualizer {}

/// Reports every event as a structured `debug!` log line
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingVisualizer {
    round: usize,
}

impl TracingVisualizer {
    /// Create a tracing visualizer
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visualizer for TracingVisualizer {
    fn render_header(&mut self, round: usize) {
        self.round = round;
        debug!(round, "Round started");
    }

    fn show_disembarking(&mut self, person: &Person, elevator: &Elevator) {
        debug!(
            round = self.round,
            person = %person.id(),
            elevator = %elevator.id(),
            floor = elevator.current_floor(),
            wait_time = person.wait_time(),
            "Disembarked"
        );
    }

    fn refresh_elevator(&mut self, elevator: &Elevator) {
        debug!(
            round = self.round,
            elevator = %elevator.id(),
            passengers = elevator.passenger_count(),
            fullness = elevator.fullness(),
            "Load changed"
        );
    }

    fn show_arrivals(&mut self, arrivals: &Arrivals) {
        for (floor, people) in arrivals {
            for person in people {
                debug!(
                    round = self.round,
                    person = %person.id(),
                    floor,
                    target = person.target_floor(),
                    "Arrived"
                );
            }
        }
    }

    fn show_boarding(&mut self, person: &Person, elevator: &Elevator) {
        debug!(
            round = self.round,
            person = %person.id(),
            elevator = %elevator.id(),
            floor = elevator.current_floor(),
            "Boarded"
        );
    }

    fn show_elevator_moves(&mut self, elevators: &[Elevator], directions: &[Direction]) {
        for (elevator, direction) in elevators.iter().zip(directions) {
            debug!(
                round = self.round,
                elevator = %elevator.id(),
                direction = %direction,
                floor = elevator.current_floor(),
                target = elevator.target_floor(),
                passengers = elevator.passenger_count(),
                "Moved"
            );
        }
    }
}

/// Draws a text snapshot of the building after every round
///
/// Waiting counts are reconstructed from arrival and boarding events.
#[derive(Debug)]
pub struct ConsoleVisualizer<W: Write> {
    out: W,
    num_floors: usize,
    round: usize,
    waiting: BTreeMap<usize, usize>,
    pacing: bool,
}

impl ConsoleVisualizer<io::Stderr> {
    /// Draw to stderr, sleeping between rounds when `pacing` is set
    pub fn stderr(num_floors: usize, pacing: bool) -> Self {
        Self::new(io::stderr(), num_floors, pacing)
    }
}

impl<W: Write> ConsoleVisualizer<W> {
    /// Draw to `out`
    pub fn new(out: W, num_floors: usize, pacing: bool) -> Self {
        Self { out, num_floors, round: 0, waiting: BTreeMap::new(), pacing }
    }

    /// Consume the visualizer and return its writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            warn!("Failed to write building snapshot: {}", e);
        }
    }

    fn snapshot(&self, elevators: &[Elevator], directions: &[Direction]) -> String {
        let mut text = format!("--- Round {} ---\n", self.round);
        for floor in (1..=self.num_floors).rev() {
            let cars: Vec<String> = elevators
                .iter()
                .zip(directions)
                .filter(|(elevator, _)| elevator.current_floor() == floor)
                .map(|(elevator, direction)| {
                    let arrow = match direction {
                        Direction::Up => '^',
                        Direction::Down => 'v',
                        Direction::Stay => '-',
                    };
                    let load = if elevator.fullness() >= 1.0 { " full" } else { "" };
                    format!(
                        "[{} {}/{} {}{}]",
                        elevator.id(),
                        elevator.passenger_count(),
                        elevator.capacity(),
                        arrow,
                        load
                    )
                })
                .collect();
            let waiting = self.waiting.get(&floor).copied().unwrap_or(0);
            text.push_str(&format!("{:>3} | waiting {:>3} | {}\n", floor, waiting, cars.join(" ")));
        }
        text
    }
}

impl<W: Write> Visualizer for ConsoleVisualizer<W> {
    fn render_header(&mut self, round: usize) {
        self.round = round;
    }

    fn show_arrivals(&mut self, arrivals: &Arrivals) {
        for (floor, people) in arrivals {
            *self.waiting.entry(*floor).or_default() += people.len();
        }
    }

    fn show_boarding(&mut self, person: &Person, _elevator: &Elevator) {
        if let Some(count) = self.waiting.get_mut(&person.origin_floor()) {
            *count = count.saturating_sub(1);
        }
    }

    fn show_elevator_moves(&mut self, elevators: &[Elevator], directions: &[Direction]) {
        let text = self.snapshot(elevators, directions);
        self.emit(&text);
    }

    fn wait(&mut self, duration: Duration) {
        if self.pacing && !duration.is_zero() {
            thread::sleep(duration);
        }
    }

    fn wait_for_exit(&mut self) {
        let text = format!("=== Finished after {} rounds ===\n", self.round + 1);
        self.emit(&text);
        if let Err(e) = self.out.flush() {
            warn!("Failed to flush building snapshot: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElevatorId;

    #[test]
    fn test_console_visualizer_tracks_waiting_counts() {
        let mut viz = ConsoleVisualizer::new(Vec::new(), 3, false);
        let mut elevator = Elevator::new(ElevatorId(0), 2);

        viz.render_header(0);
        let mut arrivals = Arrivals::new();
        arrivals.insert(1, vec![Person::new(1, 3), Person::new(1, 2)]);
        viz.show_arrivals(&arrivals);

        let person = Person::new(1, 3);
        viz.show_boarding(&person, &elevator);
        elevator.board(person).unwrap();
        let direction = elevator.move_toward(3);
        viz.show_elevator_moves(std::slice::from_ref(&elevator), &[direction]);
        viz.wait_for_exit();

        let output = String::from_utf8(viz.into_inner()).unwrap();
        assert!(output.contains("--- Round 0 ---"));
        assert!(output.contains("  1 | waiting   1 |"));
        assert!(output.contains("[ELEV_1 1/2 ^]"));
        assert!(output.contains("Finished after 1 rounds"));
    }

    #[test]
    fn test_console_visualizer_marks_full_elevators() {
        let mut viz = ConsoleVisualizer::new(Vec::new(), 4, false);
        let mut full = Elevator::new(ElevatorId(0), 1);
        full.board(Person::new(1, 4)).unwrap();
        let half = Elevator::new(ElevatorId(1), 2);

        viz.render_header(2);
        viz.show_elevator_moves(&[full, half], &[Direction::Stay, Direction::Stay]);

        let output = String::from_utf8(viz.into_inner()).unwrap();
        assert!(output.contains("[ELEV_1 1/1 - full]"));
        assert!(output.contains("[ELEV_2 0/2 -]"));
    }

    #[test]
    fn test_tracing_visualizer_accepts_every_event() {
        let mut viz = TracingVisualizer::new();
        let mut elevator = Elevator::new(ElevatorId(0), 2);
        let person = Person::new(1, 2);

        viz.render_header(0);
        viz.show_boarding(&person, &elevator);
        elevator.board(person).unwrap();
        viz.refresh_elevator(&elevator);
        assert_eq!(elevator.fullness(), 0.5);
        viz.show_elevator_moves(std::slice::from_ref(&elevator), &[Direction::Stay]);
    }

    #[test]
    fn test_default_methods_are_noops() {
        let mut viz = NullVisualizer;
        let elevator = Elevator::new(ElevatorId(0), 1);
        viz.render_header(3);
        viz.refresh_elevator(&elevator);
        viz.wait(Duration::from_secs(5));
        viz.wait_for_exit();
    }
}
