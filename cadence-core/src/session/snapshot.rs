//! Read-only view for presentation

use super::machine::{Phase, Session};
use crate::progress::{progress_fraction, visible_window, Window};
use crate::sequence::Step;

/// Everything a renderer needs, captured at one instant
#[derive(Debug, Clone)]
pub struct Snapshot<'s> {
    /// Active step
    pub step: &'s Step,
    /// Active step index
    pub index: usize,
    /// Total steps
    pub len: usize,
    /// Seconds left (timed steps)
    pub remaining_s: u32,
    pub running: bool,
    pub phase: Phase,
    /// Whether the complete control is available
    pub can_advance: bool,
    /// Completion fraction in `(0, 1]`
    pub progress: f32,
    /// Nearby steps for navigation
    pub window: Window<'s>,
}

impl<'s> Session<'s> {
    /// Capture the current state for rendering
    pub fn snapshot(&self) -> Snapshot<'s> {
        let sequence = self.sequence();
        let index = self.active_index();
        Snapshot {
            step: self.current_step(),
            index,
            len: sequence.len(),
            remaining_s: self.remaining_s(),
            running: self.is_running(),
            phase: self.phase(),
            can_advance: self.can_advance(),
            progress: progress_fraction(sequence, index),
            window: visible_window(sequence, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::program::{ExerciseSpec, Program, SectionSpec};
    use crate::sequence::compile;
    use crate::session::{Phase, Session};
    use alloc::vec;

    #[test]
    fn test_snapshot_after_jump_to_last() {
        let seq = compile(&Program::new(
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
        ))
        .unwrap();
        let mut session = Session::new(&seq);
        session.jump_to(5).unwrap();

        let snap = session.snapshot();
        assert_eq!(snap.index, 5);
        assert_eq!(snap.len, 6);
        assert_eq!(snap.step.name, "C");
        assert_eq!(snap.remaining_s, 20);
        assert!(!snap.running);
        assert_eq!(snap.phase, Phase::Idle);
        assert!(!snap.can_advance);
        assert_eq!(snap.progress, 1.0);

        let indices: alloc::vec::Vec<usize> = snap.window.iter().map(|e| e.index).collect();
        assert_eq!(indices, [4, 5]);
        assert!(snap.window[1].is_current);
    }
}
