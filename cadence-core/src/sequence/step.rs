//! Compiled steps
//!
//! Steps are the atomic units of a session. Each one is either timed (a
//! countdown that advances on its own) or rep-based (waits for the user to
//! confirm completion).

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;

/// What completes a step
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepKind {
    /// Counts down from `duration_s`
    Timed { duration_s: u32 },
    /// Waits for confirmation; `label` is the rep target ("10", "8 per side")
    Reps { label: String },
}

/// A single flattened unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Exercise or rest name
    pub name: String,
    /// Instruction text
    pub description: String,
    /// Timed or rep-based payload
    pub kind: StepKind,
    /// Owning group label, `None` for standalone rests
    pub section: Option<String>,
    /// Round this step belongs to (1-based)
    pub round: u32,
    /// Rounds in the owning group
    pub total_rounds: u32,
}

impl Step {
    /// Full countdown length, if timed
    pub fn duration_s(&self) -> Option<u32> {
        match self.kind {
            StepKind::Timed { duration_s } => Some(duration_s),
            StepKind::Reps { .. } => None,
        }
    }

    /// Rep target, if rep-based
    pub fn reps_label(&self) -> Option<&str> {
        match &self.kind {
            StepKind::Timed { .. } => None,
            StepKind::Reps { label } => Some(label),
        }
    }

    /// Check if this step counts down
    pub fn is_timed(&self) -> bool {
        matches!(self.kind, StepKind::Timed { .. })
    }

    /// Check if round numbering should be shown for this step
    pub fn has_rounds(&self) -> bool {
        self.total_rounds > 1
    }
}

/// Where a program section landed in the flat sequence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SectionSpan {
    /// Group label or rest name
    pub label: String,
    /// Index of the section's first step
    pub start: usize,
    /// Rounds in the section (1 for rests)
    pub rounds: u32,
    /// Steps per round (1 for rests)
    pub per_round: usize,
}

impl SectionSpan {
    /// Number of steps the section expanded to
    pub fn len(&self) -> usize {
        self.rounds as usize * self.per_round
    }

    /// Always false for compiled sections
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a flat index falls inside this section
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.start + self.len()
    }
}

/// Flat, non-empty, read-only list of steps
///
/// Only [`compile`](super::compile) produces a `Sequence`, so a sequence
/// always holds at least one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    steps: Vec<Step>,
    spans: Vec<SectionSpan>,
}

impl Sequence {
    pub(super) fn new(steps: Vec<Step>, spans: Vec<SectionSpan>) -> Self {
        debug_assert!(!steps.is_empty());
        Self { steps, spans }
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for compiled sequences
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the final step
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Get a step by index
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// All steps in order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Iterate over steps in order
    pub fn iter(&self) -> core::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// One span per program section, in program order
    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    /// Find the section containing a flat index
    ///
    /// Returns the section's position in the program along with its span.
    pub fn span_of(&self, index: usize) -> Option<(usize, &SectionSpan)> {
        self.spans
            .iter()
            .enumerate()
            .find(|(_, span)| span.contains(index))
    }

    /// Flat index of an exercise addressed structurally
    ///
    /// - `section`: position of the section in the program (0-based)
    /// - `round`: round number (1-based)
    /// - `exercise`: position of the exercise within the round (0-based)
    pub fn position_of(&self, section: usize, round: u32, exercise: usize) -> Option<usize> {
        let span = self.spans.get(section)?;
        if round == 0 || round > span.rounds || exercise >= span.per_round {
            return None;
        }
        Some(span.start + (round - 1) as usize * span.per_round + exercise)
    }

    /// Sum of all countdown durations (rep steps contribute nothing)
    pub fn timed_total(&self) -> u64 {
        self.steps
            .iter()
            .filter_map(Step::duration_s)
            .map(u64::from)
            .sum()
    }
}

impl Index<usize> for Sequence {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Step;
    type IntoIter = core::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
