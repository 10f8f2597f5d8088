//! Terminal commands
//!
//! Parses lines typed by the user into session intents and runner
//! commands.

use std::fmt;

use cadence_core::session::Intent;

/// Something the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to the session
    Intent(Intent),
    /// Jump to a step addressed by section, round, and exercise
    Goto(Position),
    /// Go back to the first step
    Restart,
    /// Show the section outline
    Outline,
    /// Show the command list
    Help,
    /// Leave the runner
    Quit,
}

/// Input parse errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Command word not recognized
    Unknown(String),
    /// Jump target missing or not a step number
    BadStepNumber,
    /// Section/round/exercise target missing or malformed
    BadPosition,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Unknown(word) => write!(f, "unknown command '{word}'"),
            InputError::BadStepNumber => f.write_str("usage: j <step number>"),
            InputError::BadPosition => f.write_str("usage: g <section> <round> <exercise>"),
        }
    }
}

impl std::error::Error for InputError {}

/// A section/round/exercise address typed as `g 3 2 1`
///
/// Typed 1-based. `section` and `exercise` are stored 0-based, `round`
/// stays 1-based to match [`Sequence::position_of`](cadence_core::sequence::Sequence::position_of).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub section: usize,
    pub round: u32,
    pub exercise: usize,
}

/// Command summary shown by `help`
pub const HELP: &str = "\
commands:
  <enter> or p   start / pause the countdown
  r              reset the current step
  n or c         complete the current step
  j <step>       jump to step number (1-based)
  g <s> <r> <e>  jump to section s, round r, exercise e (1-based)
  o              show the workout outline
  restart        start the workout over
  h              this help
  q              quit";

/// Parse one input line
///
/// Step numbers are typed 1-based and converted to 0-based indexes.
pub fn parse_line(line: &str) -> Result<Command, InputError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        // Bare <enter> toggles the countdown
        return Ok(Command::Intent(Intent::ToggleRun));
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "p" | "play" | "pause" => Command::Intent(Intent::ToggleRun),
        "r" | "reset" => Command::Intent(Intent::Reset),
        "n" | "c" | "next" | "complete" => Command::Intent(Intent::Advance),
        "j" | "jump" => {
            let step: usize = words
                .next()
                .and_then(|w| w.parse().ok())
                .filter(|n| *n >= 1)
                .ok_or(InputError::BadStepNumber)?;
            Command::Intent(Intent::JumpTo(step - 1))
        }
        "g" | "goto" => Command::Goto(parse_position(words)?),
        "o" | "outline" => Command::Outline,
        "restart" => Command::Restart,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };

    Ok(command)
}

fn parse_position<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<Position, InputError> {
    let mut next = || -> Result<usize, InputError> {
        words
            .next()
            .and_then(|w| w.parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .ok_or(InputError::BadPosition)
    };

    let section = next()? - 1;
    let round = u32::try_from(next()?).map_err(|_| InputError::BadPosition)?;
    let exercise = next()? - 1;

    Ok(Position {
        section,
        round,
        exercise,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        parse_line(line).unwrap()
    }

    #[test]
    fn test_toggle() {
        assert_eq!(command(""), Command::Intent(Intent::ToggleRun));
        assert_eq!(command("   "), Command::Intent(Intent::ToggleRun));
        assert_eq!(command("p"), Command::Intent(Intent::ToggleRun));
        assert_eq!(command("PAUSE"), Command::Intent(Intent::ToggleRun));
    }

    #[test]
    fn test_basic_intents() {
        assert_eq!(command("r"), Command::Intent(Intent::Reset));
        assert_eq!(command("n"), Command::Intent(Intent::Advance));
        assert_eq!(command("complete"), Command::Intent(Intent::Advance));
    }

    #[test]
    fn test_jump_is_one_based() {
        assert_eq!(command("j 1"), Command::Intent(Intent::JumpTo(0)));
        assert_eq!(command("jump 23"), Command::Intent(Intent::JumpTo(22)));
        assert_eq!(parse_line("j"), Err(InputError::BadStepNumber));
        assert_eq!(parse_line("j 0"), Err(InputError::BadStepNumber));
        assert_eq!(parse_line("j x"), Err(InputError::BadStepNumber));
    }

    #[test]
    fn test_goto() {
        assert_eq!(
            parse_line("g 3 2 1"),
            Ok(Command::Goto(Position {
                section: 2,
                round: 2,
                exercise: 0,
            }))
        );
        assert_eq!(parse_line("g 3 2"), Err(InputError::BadPosition));
        assert_eq!(parse_line("g 0 1 1"), Err(InputError::BadPosition));
    }

    #[test]
    fn test_runner_commands() {
        assert_eq!(command("o"), Command::Outline);
        assert_eq!(command("restart"), Command::Restart);
        assert_eq!(command("?"), Command::Help);
        assert_eq!(command("quit"), Command::Quit);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(parse_line("dance"), Err(InputError::Unknown("dance".to_string())));
    }
}
