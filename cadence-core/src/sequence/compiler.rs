//! Program compiler
//!
//! Expands a [`Program`] into a [`Sequence`]. Groups expand round-major:
//! every exercise of round 1 in listed order, then round 2, and so on.
//! Standalone rests become a single timed step with no section or round.

use alloc::vec::Vec;
use core::fmt;

use super::step::{SectionSpan, Sequence, Step, StepKind};
use crate::program::{ExerciseKind, ExerciseSpec, Program, SectionSpec};

/// Upper bound on compiled steps for a whole program
pub const MAX_STEPS: usize = 10_000;

/// What is wrong with an exercise or section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpecFault {
    /// Timed step without a duration
    MissingDuration,
    /// Timed step with a zero duration
    ZeroDuration,
    /// Rep-based step without a rep target
    MissingReps,
    /// Rep-based step with a zero or blank rep target
    EmptyReps,
    /// Timed step that also names a rep target
    UnexpectedReps,
    /// Rep-based step that also names a duration
    UnexpectedDuration,
    /// Group with zero rounds
    ZeroRounds,
    /// Group without any exercises
    NoExercises,
    /// Section would push the program past [`MAX_STEPS`]
    TooManySteps,
}

impl fmt::Display for SpecFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SpecFault::MissingDuration => "timed step has no duration",
            SpecFault::ZeroDuration => "timed step has a zero duration",
            SpecFault::MissingReps => "rep step has no rep target",
            SpecFault::EmptyReps => "rep step has an empty rep target",
            SpecFault::UnexpectedReps => "timed step also sets reps",
            SpecFault::UnexpectedDuration => "rep step also sets a duration",
            SpecFault::ZeroRounds => "group has zero rounds",
            SpecFault::NoExercises => "group has no exercises",
            SpecFault::TooManySteps => "section exceeds the step limit",
        };
        f.write_str(msg)
    }
}

/// Compilation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompileError {
    /// The program produced no steps
    EmptyProgram,
    /// A section or exercise is malformed
    InvalidStepSpec {
        /// Section position in the program (0-based)
        section: usize,
        /// Exercise position in the group, `None` for section-level faults
        exercise: Option<usize>,
        fault: SpecFault,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::EmptyProgram => f.write_str("program has no steps"),
            CompileError::InvalidStepSpec {
                section,
                exercise: Some(exercise),
                fault,
            } => write!(f, "section {section}, exercise {exercise}: {fault}"),
            CompileError::InvalidStepSpec {
                section,
                exercise: None,
                fault,
            } => write!(f, "section {section}: {fault}"),
        }
    }
}

impl core::error::Error for CompileError {}

/// Compile a program into a flat step sequence
///
/// Pure and deterministic. Every exercise is validated before any round is
/// expanded, so an error always names the first malformed entry.
pub fn compile(program: &Program) -> Result<Sequence, CompileError> {
    let mut steps = Vec::new();
    let mut spans = Vec::with_capacity(program.sections.len());

    for (section_index, section) in program.sections.iter().enumerate() {
        let invalid = |exercise, fault| CompileError::InvalidStepSpec {
            section: section_index,
            exercise,
            fault,
        };

        match section {
            SectionSpec::Rest(rest) => {
                if rest.duration_s == 0 {
                    return Err(invalid(None, SpecFault::ZeroDuration));
                }
                if steps.len() >= MAX_STEPS {
                    return Err(invalid(None, SpecFault::TooManySteps));
                }

                spans.push(SectionSpan {
                    label: rest.name.clone(),
                    start: steps.len(),
                    rounds: 1,
                    per_round: 1,
                });
                steps.push(Step {
                    name: rest.name.clone(),
                    description: rest.description.clone(),
                    kind: StepKind::Timed {
                        duration_s: rest.duration_s,
                    },
                    section: None,
                    round: 1,
                    total_rounds: 1,
                });
            }
            SectionSpec::Group(group) => {
                if group.rounds == 0 {
                    return Err(invalid(None, SpecFault::ZeroRounds));
                }
                if group.exercises.is_empty() {
                    return Err(invalid(None, SpecFault::NoExercises));
                }
                let expanded = usize::try_from(group.rounds)
                    .ok()
                    .and_then(|rounds| rounds.checked_mul(group.exercises.len()))
                    .and_then(|count| count.checked_add(steps.len()))
                    .filter(|total| *total <= MAX_STEPS);
                if expanded.is_none() {
                    return Err(invalid(None, SpecFault::TooManySteps));
                }

                let kinds = group
                    .exercises
                    .iter()
                    .enumerate()
                    .map(|(i, exercise)| step_kind(exercise).map_err(|f| invalid(Some(i), f)))
                    .collect::<Result<Vec<_>, _>>()?;

                spans.push(SectionSpan {
                    label: group.label.clone(),
                    start: steps.len(),
                    rounds: group.rounds,
                    per_round: group.exercises.len(),
                });

                for round in 1..=group.rounds {
                    for (exercise, kind) in group.exercises.iter().zip(&kinds) {
                        steps.push(Step {
                            name: exercise.name.clone(),
                            description: exercise.description.clone(),
                            kind: kind.clone(),
                            section: Some(group.label.clone()),
                            round,
                            total_rounds: group.rounds,
                        });
                    }
                }
            }
        }
    }

    if steps.is_empty() {
        return Err(CompileError::EmptyProgram);
    }

    Ok(Sequence::new(steps, spans))
}

/// Validate an exercise and build its step payload
fn step_kind(exercise: &ExerciseSpec) -> Result<StepKind, SpecFault> {
    match exercise.kind {
        ExerciseKind::Timed => {
            if exercise.reps.is_some() {
                return Err(SpecFault::UnexpectedReps);
            }
            match exercise.duration_s {
                None => Err(SpecFault::MissingDuration),
                Some(0) => Err(SpecFault::ZeroDuration),
                Some(duration_s) => Ok(StepKind::Timed { duration_s }),
            }
        }
        ExerciseKind::Reps => {
            if exercise.duration_s.is_some() {
                return Err(SpecFault::UnexpectedDuration);
            }
            let reps = exercise.reps.as_ref().ok_or(SpecFault::MissingReps)?;
            if reps.is_empty() {
                return Err(SpecFault::EmptyReps);
            }
            Ok(StepKind::Reps {
                label: reps.label(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::RepCount;
    use alloc::vec;
    use proptest::prelude::*;

    /// Warm (1 round: A timed 10), rest 30, Main (2 rounds: B reps 8, C timed 20)
    fn sample_program() -> Program {
        Program::new(
            "Sample",
            vec![
                SectionSpec::group("Warm", 1, vec![ExerciseSpec::timed("A", 10, "")]),
                SectionSpec::rest("Rest", 30),
                SectionSpec::group(
                    "Main",
                    2,
                    vec![ExerciseSpec::reps("B", "8", ""), ExerciseSpec::timed("C", 20, "")],
                ),
            ],
        )
    }

    #[test]
    fn test_sample_layout() {
        let seq = compile(&sample_program()).unwrap();
        assert_eq!(seq.len(), 6);

        let names: Vec<&str> = seq.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "Rest", "B", "C", "B", "C"]);

        assert_eq!(seq[0].section.as_deref(), Some("Warm"));
        assert_eq!((seq[0].round, seq[0].total_rounds), (1, 1));

        assert_eq!(seq[1].section, None);
        assert_eq!(seq[1].duration_s(), Some(30));
        assert_eq!((seq[1].round, seq[1].total_rounds), (1, 1));

        assert_eq!(seq[2].reps_label(), Some("8"));
        assert_eq!((seq[2].round, seq[2].total_rounds), (1, 2));
        assert_eq!(seq[3].duration_s(), Some(20));
        assert_eq!((seq[3].round, seq[3].total_rounds), (1, 2));
        assert_eq!((seq[4].round, seq[4].total_rounds), (2, 2));
        assert_eq!((seq[5].round, seq[5].total_rounds), (2, 2));
    }

    #[test]
    fn test_single_round_group_has_no_rounds() {
        let seq = compile(&sample_program()).unwrap();
        assert!(!seq[0].has_rounds());
        assert!(seq[2].has_rounds());
    }

    #[test]
    fn test_empty_program() {
        let program = Program::new("Nothing", Vec::new());
        assert_eq!(compile(&program), Err(CompileError::EmptyProgram));
    }

    #[test]
    fn test_missing_duration() {
        let mut broken = ExerciseSpec::timed("Hold", 30, "");
        broken.duration_s = None;
        let program = Program::new(
            "Broken",
            vec![
                SectionSpec::rest("Rest", 30),
                SectionSpec::group("G", 2, vec![ExerciseSpec::reps("Ok", 5u32, ""), broken]),
            ],
        );

        assert_eq!(
            compile(&program),
            Err(CompileError::InvalidStepSpec {
                section: 1,
                exercise: Some(1),
                fault: SpecFault::MissingDuration,
            })
        );
    }

    #[test]
    fn test_reps_faults() {
        let mut blank = ExerciseSpec::reps("Row", "  ", "");
        let program = Program::new("P", vec![SectionSpec::group("G", 1, vec![blank.clone()])]);
        assert!(matches!(
            compile(&program),
            Err(CompileError::InvalidStepSpec { fault: SpecFault::EmptyReps, .. })
        ));

        blank.reps = Some(RepCount::Count(10));
        blank.duration_s = Some(30);
        let program = Program::new("P", vec![SectionSpec::group("G", 1, vec![blank])]);
        assert!(matches!(
            compile(&program),
            Err(CompileError::InvalidStepSpec { fault: SpecFault::UnexpectedDuration, .. })
        ));
    }

    #[test]
    fn test_missing_reps() {
        let mut squat = ExerciseSpec::reps("Squat", 10u32, "");
        squat.reps = None;
        let program = Program::new(
            "P",
            vec![SectionSpec::group("G", 2, vec![ExerciseSpec::timed("A", 5, ""), squat])],
        );
        assert_eq!(
            compile(&program),
            Err(CompileError::InvalidStepSpec {
                section: 0,
                exercise: Some(1),
                fault: SpecFault::MissingReps,
            })
        );
    }

    #[test]
    fn test_timed_with_reps() {
        let mut hold = ExerciseSpec::timed("Plank", 30, "");
        hold.reps = Some(RepCount::Count(5));
        let program = Program::new(
            "P",
            vec![SectionSpec::rest("Rest", 30), SectionSpec::group("G", 1, vec![hold])],
        );
        assert_eq!(
            compile(&program),
            Err(CompileError::InvalidStepSpec {
                section: 1,
                exercise: Some(0),
                fault: SpecFault::UnexpectedReps,
            })
        );
    }

    #[test]
    fn test_too_many_steps() {
        let program = Program::new(
            "P",
            vec![SectionSpec::group(
                "G",
                u32::MAX,
                vec![ExerciseSpec::timed("A", 5, ""), ExerciseSpec::timed("B", 5, "")],
            )],
        );
        assert_eq!(
            compile(&program),
            Err(CompileError::InvalidStepSpec {
                section: 0,
                exercise: None,
                fault: SpecFault::TooManySteps,
            })
        );

        // Exactly at the limit still compiles
        let program = Program::new(
            "P",
            vec![SectionSpec::group(
                "G",
                (MAX_STEPS / 2) as u32,
                vec![ExerciseSpec::timed("A", 5, ""), ExerciseSpec::timed("B", 5, "")],
            )],
        );
        assert_eq!(compile(&program).map(|seq| seq.len()), Ok(MAX_STEPS));

        let mut sections = vec![SectionSpec::group(
            "G",
            (MAX_STEPS / 2) as u32,
            vec![ExerciseSpec::timed("A", 5, ""), ExerciseSpec::timed("B", 5, "")],
        )];
        sections.push(SectionSpec::rest("Rest", 30));
        assert!(matches!(
            compile(&Program::new("P", sections)),
            Err(CompileError::InvalidStepSpec { section: 1, fault: SpecFault::TooManySteps, .. })
        ));
    }

    #[test]
    fn test_group_faults() {
        let program = Program::new(
            "P",
            vec![SectionSpec::group("G", 0, vec![ExerciseSpec::timed("A", 5, "")])],
        );
        assert_eq!(
            compile(&program),
            Err(CompileError::InvalidStepSpec {
                section: 0,
                exercise: None,
                fault: SpecFault::ZeroRounds,
            })
        );

        let program = Program::new("P", vec![SectionSpec::group("G", 3, Vec::new())]);
        assert!(matches!(
            compile(&program),
            Err(CompileError::InvalidStepSpec { fault: SpecFault::NoExercises, .. })
        ));
    }

    #[test]
    fn test_zero_rest() {
        let program = Program::new("P", vec![SectionSpec::rest("Rest", 0)]);
        assert!(matches!(
            compile(&program),
            Err(CompileError::InvalidStepSpec { fault: SpecFault::ZeroDuration, .. })
        ));
    }

    #[test]
    fn test_spans_and_positions() {
        let seq = compile(&sample_program()).unwrap();
        let spans = seq.spans();
        assert_eq!(spans.len(), 3);
        assert_eq!((spans[2].start, spans[2].len()), (2, 4));

        assert_eq!(seq.position_of(0, 1, 0), Some(0));
        assert_eq!(seq.position_of(1, 1, 0), Some(1));
        assert_eq!(seq.position_of(2, 2, 1), Some(5));
        assert_eq!(seq.position_of(2, 3, 0), None);
        assert_eq!(seq.position_of(2, 0, 0), None);
        assert_eq!(seq.position_of(2, 1, 2), None);
        assert_eq!(seq.position_of(3, 1, 0), None);

        assert_eq!(seq.span_of(4).map(|(i, _)| i), Some(2));
        assert_eq!(seq.span_of(1).map(|(_, s)| s.label.as_str()), Some("Rest"));
        assert!(seq.span_of(6).is_none());
    }

    #[test]
    fn test_timed_total() {
        let seq = compile(&sample_program()).unwrap();
        // 10 + 30 + 2 * 20
        assert_eq!(seq.timed_total(), 80);
    }

    #[test]
    fn test_error_display() {
        let err = CompileError::InvalidStepSpec {
            section: 2,
            exercise: Some(0),
            fault: SpecFault::MissingReps,
        };
        assert_eq!(err.to_string(), "section 2, exercise 0: rep step has no rep target");
        assert_eq!(CompileError::EmptyProgram.to_string(), "program has no steps");
    }

    proptest! {
        #[test]
        fn prop_group_expands_round_major(rounds in 1u32..6, count in 1usize..6, lead in 0usize..3) {
            let exercises: Vec<ExerciseSpec> = (0..count)
                .map(|i| ExerciseSpec::timed(&i.to_string(), 5, ""))
                .collect();
            let mut sections: Vec<SectionSpec> =
                (0..lead).map(|_| SectionSpec::rest("Rest", 10)).collect();
            sections.push(SectionSpec::group("G", rounds, exercises));

            let seq = compile(&Program::new("P", sections)).unwrap();
            prop_assert_eq!(seq.len(), lead + rounds as usize * count);

            for (offset, step) in seq.steps()[lead..].iter().enumerate() {
                prop_assert_eq!(step.round as usize, offset / count + 1);
                prop_assert_eq!(step.total_rounds, rounds);
                prop_assert_eq!(step.name.clone(), (offset % count).to_string());
                prop_assert_eq!(
                    seq.position_of(lead, step.round, offset % count),
                    Some(lead + offset)
                );
            }
        }
    }
}
