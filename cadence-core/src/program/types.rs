//! Program type definitions
//!
//! These types mirror the workout file format. They are deliberately
//! permissive (optional fields, plain integers) so that a malformed file
//! still deserializes and the compiler can report exactly which exercise
//! is wrong.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an exercise is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseKind {
    /// Held for a fixed number of seconds
    Timed,
    /// Performed for a number of repetitions, confirmed by the user
    Reps,
}

/// Repetition target
///
/// Either a plain count (`10`) or free text (`"8 per side"`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RepCount {
    Count(u32),
    Text(String),
}

impl RepCount {
    /// A zero count or blank text carries no target
    pub fn is_empty(&self) -> bool {
        match self {
            RepCount::Count(n) => *n == 0,
            RepCount::Text(text) => text.trim().is_empty(),
        }
    }

    /// Display form of the target
    pub fn label(&self) -> String {
        match self {
            RepCount::Count(n) => n.to_string(),
            RepCount::Text(text) => text.trim().to_string(),
        }
    }
}

impl From<u32> for RepCount {
    fn from(n: u32) -> Self {
        RepCount::Count(n)
    }
}

impl From<&str> for RepCount {
    fn from(text: &str) -> Self {
        RepCount::Text(text.to_string())
    }
}

/// A single exercise inside a group
///
/// `duration_s` must be present iff `kind` is [`ExerciseKind::Timed`];
/// `reps` must be present iff `kind` is [`ExerciseKind::Reps`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExerciseSpec {
    /// Display name
    pub name: String,
    /// Timed or rep-based
    pub kind: ExerciseKind,
    /// Hold duration in seconds
    #[cfg_attr(
        feature = "serde",
        serde(rename = "duration", default, skip_serializing_if = "Option::is_none")
    )]
    pub duration_s: Option<u32>,
    /// Repetition target
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub reps: Option<RepCount>,
    /// How to perform the exercise
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl ExerciseSpec {
    /// Create a timed exercise
    pub fn timed(name: &str, duration_s: u32, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ExerciseKind::Timed,
            duration_s: Some(duration_s),
            reps: None,
            description: description.to_string(),
        }
    }

    /// Create a rep-based exercise
    pub fn reps(name: &str, reps: impl Into<RepCount>, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ExerciseKind::Reps,
            duration_s: None,
            reps: Some(reps.into()),
            description: description.to_string(),
        }
    }
}

/// A labelled group whose exercises repeat once per round
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupSpec {
    /// Section label (e.g. "Circuit 1 - Legs + Core")
    pub label: String,
    /// Number of rounds, at least 1
    #[cfg_attr(feature = "serde", serde(default = "default_rounds"))]
    pub rounds: u32,
    /// Exercises in the order performed within each round
    #[cfg_attr(feature = "serde", serde(rename = "exercise", default))]
    pub exercises: Vec<ExerciseSpec>,
}

#[cfg(feature = "serde")]
fn default_rounds() -> u32 {
    1
}

/// A standalone timed rest outside any group
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RestSpec {
    /// Display name
    pub name: String,
    /// Rest duration in seconds
    #[cfg_attr(feature = "serde", serde(rename = "duration"))]
    pub duration_s: u32,
    /// Optional instruction text
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

/// One top-level entry of a program
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum SectionSpec {
    Group(GroupSpec),
    Rest(RestSpec),
}

impl SectionSpec {
    /// Create a group section
    pub fn group(label: &str, rounds: u32, exercises: Vec<ExerciseSpec>) -> Self {
        SectionSpec::Group(GroupSpec {
            label: label.to_string(),
            rounds,
            exercises,
        })
    }

    /// Create a standalone rest
    pub fn rest(name: &str, duration_s: u32) -> Self {
        SectionSpec::Rest(RestSpec {
            name: name.to_string(),
            duration_s,
            description: String::new(),
        })
    }

    /// Label shown in outlines: the group label or the rest name
    pub fn label(&self) -> &str {
        match self {
            SectionSpec::Group(group) => &group.label,
            SectionSpec::Rest(rest) => &rest.name,
        }
    }
}

/// A complete workout program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Program {
    /// Workout title
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    /// Sections in the order performed
    #[cfg_attr(feature = "serde", serde(rename = "section", default))]
    pub sections: Vec<SectionSpec>,
}

impl Program {
    /// Create a program from its sections
    pub fn new(title: &str, sections: Vec<SectionSpec>) -> Self {
        Self {
            title: title.to_string(),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rep_count_label() {
        assert_eq!(RepCount::from(10u32).label(), "10");
        assert_eq!(RepCount::from(" 8 per side ").label(), "8 per side");
    }

    #[test]
    fn test_rep_count_empty() {
        assert!(RepCount::Count(0).is_empty());
        assert!(RepCount::from("   ").is_empty());
        assert!(!RepCount::from("8 per arm").is_empty());
    }

    #[test]
    fn test_exercise_constructors() {
        let hold = ExerciseSpec::timed("Plank", 45, "");
        assert_eq!(hold.kind, ExerciseKind::Timed);
        assert_eq!(hold.duration_s, Some(45));
        assert!(hold.reps.is_none());

        let squat = ExerciseSpec::reps("Goblet Squat", 10u32, "");
        assert_eq!(squat.kind, ExerciseKind::Reps);
        assert_eq!(squat.reps, Some(RepCount::Count(10)));
        assert!(squat.duration_s.is_none());
    }

    #[test]
    fn test_section_label() {
        assert_eq!(SectionSpec::group("Warm-Up", 1, Vec::new()).label(), "Warm-Up");
        assert_eq!(SectionSpec::rest("Rest", 60).label(), "Rest");
    }
}
