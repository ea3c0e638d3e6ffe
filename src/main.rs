// Elevator Dispatch Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/elevator-dispatch-sim
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/elevator-dispatch-sim --num-floors 10 --moving-policy furthest-floor --verbose
// ```

use std::process;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use elevator_dispatch_sim::simulation::{LoggingConfig, RunReport, Simulation, SimulationStatistics};
use elevator_dispatch_sim::types::{CliArgs, SimulationConfig};
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = LoggingConfig::from_cli_flags(args.verbose, args.debug).init() {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Elevator Dispatch Simulator");

    let stats_output = args.stats_output.clone();
    let dry_run = args.dry_run;

    let config = match SimulationConfig::from_cli_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_configuration_summary(&config);

    match run_simulation(config, stats_output.as_deref()) {
        Ok(statistics) => {
            eprintln!("{}", statistics.detailed_breakdown());
            info!("Elevator Dispatch Simulator completed successfully");
        }
        Err(e) => {
            error!("Simulation failed: {:#}", e);
            eprintln!("Simulation failed: {:#}", e);
            process::exit(1);
        }
    }
}

/// Build the simulation, run it and optionally write the JSON report
fn run_simulation(
    config: SimulationConfig,
    stats_output: Option<&str>,
) -> anyhow::Result<SimulationStatistics> {
    let start_time = Instant::now();

    let mut simulation =
        Simulation::from_config(config.clone()).context("Failed to initialize simulation")?;
    let statistics = simulation
        .run(config.num_rounds)
        .with_context(|| format!("Run aborted after {} rounds", simulation.round()))?;

    if let Some(path) = stats_output {
        let report = RunReport::new(config, statistics.clone(), start_time.elapsed().as_millis());
        report
            .write_to_file(path)
            .with_context(|| format!("Failed to write statistics report to {}", path))?;
        info!("Statistics report written to {}", path);
        eprintln!("Statistics report written to: {}", path);
    }

    Ok(statistics)
}

fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Floors: {}", config.num_floors);
    eprintln!(
        "  Elevators: {} (capacity {}, {} in total)",
        config.num_elevators,
        config.elevator_capacity,
        config.total_capacity()
    );
    eprintln!("  Rounds: {}", config.num_rounds);
    eprintln!("  Arrival Policy: {}", config.arrival_policy);
    if let Some(path) = &config.arrival_file {
        eprintln!("  Arrival File: {}", path);
    }
    eprintln!("  Moving Policy: {}", config.moving_policy);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
