//! Workout loading
//!
//! Reads a workout file (or the embedded default), deserializes it, and
//! compiles it into a step sequence.

use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use cadence_core::program::{Program, SectionSpec};
use cadence_core::sequence::{compile, CompileError, Sequence};

/// Embedded default workout (compiled into the binary)
pub const EMBEDDED_WORKOUT: &str = include_str!("../../workout.toml");

/// Default tick period: one second
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    /// Workout file could not be read
    Io(std::io::Error),
    /// Workout file is not valid TOML or has the wrong shape
    Parse(toml::de::Error),
    /// Workout parsed but does not compile
    Compile(CompileError),
    /// Tick interval of zero
    InvalidTickInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read workout file: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid workout file: {e}"),
            ConfigError::Compile(e) => write!(f, "invalid workout: {e}"),
            ConfigError::InvalidTickInterval => f.write_str("tick_interval_ms must be > 0"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Compile(e) => Some(e),
            ConfigError::InvalidTickInterval => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<CompileError> for ConfigError {
    fn from(e: CompileError) -> Self {
        ConfigError::Compile(e)
    }
}

/// `[runner]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Milliseconds per countdown second (1000 in normal use)
    pub tick_interval_ms: u64,
    /// Start the first step's countdown without waiting for the user
    pub autostart: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            autostart: false,
        }
    }
}

/// On-disk layout of a workout file
#[derive(Debug, Deserialize)]
struct WorkoutFile {
    #[serde(default)]
    title: String,
    #[serde(default)]
    runner: RunnerConfig,
    #[serde(default)]
    section: Vec<SectionSpec>,
}

/// A loaded and compiled workout
#[derive(Debug)]
pub struct Workout {
    pub runner: RunnerConfig,
    pub program: Program,
    pub sequence: Sequence,
}

/// Parse and compile a workout from TOML text
pub fn parse_workout(text: &str) -> Result<Workout, ConfigError> {
    let file: WorkoutFile = toml::from_str(text)?;

    if file.runner.tick_interval_ms == 0 {
        return Err(ConfigError::InvalidTickInterval);
    }

    let program = Program {
        title: file.title,
        sections: file.section,
    };
    for (i, section) in program.sections.iter().enumerate() {
        debug!("Section {}: {}", i + 1, section.label());
    }
    let sequence = compile(&program)?;
    debug!(
        "Compiled {} sections into {} steps",
        program.sections.len(),
        sequence.len()
    );

    Ok(Workout {
        runner: file.runner,
        program,
        sequence,
    })
}

/// Load a workout from `path`, or the embedded default when `None`
pub fn load_workout(path: Option<&Path>) -> Result<Workout, ConfigError> {
    let workout = match path {
        Some(path) => {
            info!("Loading workout from {}", path.display());
            let text = fs::read_to_string(path)?;
            parse_workout(&text)?
        }
        None => {
            info!("Using embedded workout");
            parse_workout(EMBEDDED_WORKOUT)?
        }
    };

    info!(
        "Workout \"{}\": {} steps, {}s of timed work",
        workout.program.title,
        workout.sequence.len(),
        workout.sequence.timed_total()
    );
    Ok(workout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::sequence::{SpecFault, StepKind};

    #[test]
    fn test_embedded_workout() {
        let workout = parse_workout(EMBEDDED_WORKOUT).unwrap();
        assert_eq!(workout.program.title, "Full Body Dumbbell");
        assert_eq!(workout.runner, RunnerConfig::default());

        // 2 warm-up + 3 circuits of 3x2 + 2 rests + 1 cool down
        assert_eq!(workout.sequence.len(), 23);
        assert_eq!(workout.sequence.spans().len(), 7);

        let first = &workout.sequence[0];
        assert_eq!(first.name, "Cycling Machine");
        assert_eq!(first.kind, StepKind::Timed { duration_s: 240 });
        assert_eq!(first.section.as_deref(), Some("Warm-Up"));

        let taps = &workout.sequence[4];
        assert_eq!(taps.name, "Plank Shoulder Taps");
        assert_eq!(taps.reps_label(), Some("8 per side"));
        assert_eq!((taps.round, taps.total_rounds), (1, 2));

        let rest = &workout.sequence[8];
        assert_eq!(rest.name, "Rest Between Circuits");
        assert_eq!(rest.section, None);
        assert_eq!(rest.duration_s(), Some(60));

        let last = &workout.sequence[workout.sequence.last_index()];
        assert_eq!(last.name, "Cool Down Stretching");
        assert_eq!(last.duration_s(), Some(360));
    }

    #[test]
    fn test_runner_table() {
        let text = r#"
            [runner]
            tick_interval_ms = 100
            autostart = true

            [[section]]
            type = "rest"
            name = "Breathe"
            duration = 30
        "#;
        let workout = parse_workout(text).unwrap();
        assert_eq!(workout.runner.tick_interval_ms, 100);
        assert!(workout.runner.autostart);
        assert_eq!(workout.program.title, "");
        assert_eq!(workout.sequence.len(), 1);
    }

    #[test]
    fn test_zero_tick_interval() {
        let text = r#"
            [runner]
            tick_interval_ms = 0

            [[section]]
            type = "rest"
            name = "Breathe"
            duration = 30
        "#;
        assert!(matches!(
            parse_workout(text),
            Err(ConfigError::InvalidTickInterval)
        ));
    }

    #[test]
    fn test_missing_duration_reports_location() {
        let text = r#"
            [[section]]
            type = "group"
            label = "Core"
            rounds = 3

            [[section.exercise]]
            name = "Plank"
            kind = "timed"
        "#;
        match parse_workout(text) {
            Err(ConfigError::Compile(CompileError::InvalidStepSpec {
                section,
                exercise,
                fault,
            })) => {
                assert_eq!(section, 0);
                assert_eq!(exercise, Some(0));
                assert_eq!(fault, SpecFault::MissingDuration);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_workout() {
        assert!(matches!(
            parse_workout("title = \"Nothing\""),
            Err(ConfigError::Compile(CompileError::EmptyProgram))
        ));
    }

    #[test]
    fn test_unknown_section_type() {
        let text = r#"
            [[section]]
            type = "superset"
            label = "X"
        "#;
        assert!(matches!(parse_workout(text), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_workout(Some(Path::new("/nonexistent/cadence/workout.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
