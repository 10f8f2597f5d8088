//! Cadence - Guided Workout Runner
//!
//! Terminal front end for the cadence-core sequencing engine. Loads a
//! workout from TOML, compiles it into a flat step sequence, and runs the
//! countdown session on an embassy executor.

use std::env;
use std::path::PathBuf;
use std::process;

use embassy_executor::Spawner;
use embassy_time::Duration;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use static_cell::StaticCell;

use cadence_core::sequence::Sequence;

use crate::config::load_workout;

mod channels;
mod config;
mod display;
mod input;
mod tasks;

#[cfg(test)]
#[path = "../build/validate.rs"]
mod workout_check;

const USAGE: &str = "usage: cadence [-v] [workout.toml]";

// The controller borrows the sequence for the life of the process
static SEQUENCE: StaticCell<Sequence> = StaticCell::new();

/// Command line options
#[derive(Debug, Default)]
struct Options {
    verbose: bool,
    workout: Option<PathBuf>,
}

fn parse_args() -> Options {
    let mut options = Options::default();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => options.verbose = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            flag if flag.starts_with('-') => {
                eprintln!("unknown option {}\n{}", flag, USAGE);
                process::exit(2);
            }
            path => {
                if options.workout.is_some() {
                    eprintln!("{}", USAGE);
                    process::exit(2);
                }
                options.workout = Some(PathBuf::from(path));
            }
        }
    }

    options
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let options = parse_args();

    let level = if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // Logs go to stderr so they never tear the status line
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);

    info!("Cadence starting...");

    let workout = match load_workout(options.workout.as_deref()) {
        Ok(workout) => workout,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let tick_interval = Duration::from_millis(workout.runner.tick_interval_ms);
    let autostart = workout.runner.autostart;
    let sequence: &'static Sequence = SEQUENCE.init(workout.sequence);

    if let Err(e) = tasks::spawn_stdin_reader() {
        error!("Failed to start input reader: {}", e);
        process::exit(1);
    }

    if let Err(e) = spawner.spawn(tasks::tick_task(tick_interval)) {
        error!("Failed to spawn tick task: {:?}", e);
        process::exit(1);
    }
    if let Err(e) = spawner.spawn(tasks::controller_task(sequence, autostart)) {
        error!("Failed to spawn controller task: {:?}", e);
        process::exit(1);
    }

    info!("All tasks spawned");
}
