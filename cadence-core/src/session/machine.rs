//! Session state machine
//!
//! Per active step the session is in one of three phases:
//!
//! - `Idle`: not running; a timed step shows its remaining time
//! - `Counting`: running, only ever for a timed step with time left
//! - `Completed`: the last countdown ran out; terminal until reset or jump
//!
//! A countdown that reaches zero is resolved inside the same tick, so the
//! expired state is never observable.
//!
//! Auto-advance and manual advance differ. When a countdown
//! runs out into another timed step the countdown keeps running; a manual
//! advance always stops and starts the next step from its full duration.

use core::fmt;

use super::events::SessionEvent;
use crate::sequence::{Sequence, Step, StepKind};

/// Coarse session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Idle,
    Counting,
    Completed,
}

/// Errors raised by session intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// `jump_to` target outside `[0, len)`
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::IndexOutOfRange { index, len } => {
                write!(f, "step {index} is out of range (workout has {len} steps)")
            }
        }
    }
}

impl core::error::Error for SessionError {}

/// Run-time state for one pass through a sequence
#[derive(Debug, Clone)]
pub struct Session<'s> {
    /// Compiled steps, shared read-only
    sequence: &'s Sequence,
    /// Active step index, always `< sequence.len()`
    active: usize,
    /// Seconds left on the active step (0 for rep steps)
    remaining_s: u32,
    /// Countdown running
    running: bool,
    /// Final countdown ran out
    completed: bool,
}

impl<'s> Session<'s> {
    /// Start a session at the first step, not running
    pub fn new(sequence: &'s Sequence) -> Self {
        let mut session = Self {
            sequence,
            active: 0,
            remaining_s: 0,
            running: false,
            completed: false,
        };
        session.enter(0);
        session
    }

    /// The sequence being walked
    pub fn sequence(&self) -> &'s Sequence {
        self.sequence
    }

    /// Active step index
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Active step
    pub fn current_step(&self) -> &'s Step {
        &self.sequence[self.active]
    }

    /// Seconds left on the active step (meaningful for timed steps only)
    pub fn remaining_s(&self) -> u32 {
        self.remaining_s
    }

    /// Check if the countdown is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Check if the final countdown has run out
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else if self.running {
            Phase::Counting
        } else {
            Phase::Idle
        }
    }

    /// Whether a tick source should currently be delivering ticks
    ///
    /// True only while running on a timed step with time left.
    pub fn wants_ticks(&self) -> bool {
        self.running && !self.completed && self.current_step().is_timed() && self.remaining_s > 0
    }

    /// Check if a manual advance is available (not on the last step)
    pub fn can_advance(&self) -> bool {
        self.active < self.sequence.last_index()
    }

    /// Start or pause the countdown
    ///
    /// Rep steps have no countdown and a completed session has nothing left
    /// to run; both return `None` without changing state.
    pub fn toggle_run(&mut self) -> Option<SessionEvent> {
        if self.completed || !self.current_step().is_timed() {
            return None;
        }

        self.running = !self.running;
        Some(if self.running {
            SessionEvent::Started
        } else {
            SessionEvent::Paused
        })
    }

    /// One second elapsed
    ///
    /// Ignored unless [`wants_ticks`](Self::wants_ticks). When the countdown
    /// reaches zero the session advances in the same call.
    pub fn tick(&mut self) -> Option<SessionEvent> {
        if !self.wants_ticks() {
            return None;
        }

        self.remaining_s -= 1;
        if self.remaining_s > 0 {
            return None;
        }

        Some(self.expire())
    }

    /// Resolve a countdown that reached zero
    fn expire(&mut self) -> SessionEvent {
        let next = self.active + 1;
        if next >= self.sequence.len() {
            self.running = false;
            self.completed = true;
            return SessionEvent::Completed;
        }

        self.enter(next);
        // A timed step keeps the countdown going; a rep step waits for the user
        if !self.current_step().is_timed() {
            self.running = false;
        }
        SessionEvent::AutoAdvanced { index: next }
    }

    /// Stop and restore the active step's full duration
    pub fn reset(&mut self) -> SessionEvent {
        self.running = false;
        self.enter(self.active);
        SessionEvent::Reset { index: self.active }
    }

    /// Complete the active step and move to the next one
    ///
    /// Always stops the countdown and loads the next step's full duration.
    /// Returns `None` on the last step, where advancing is unavailable.
    pub fn advance(&mut self) -> Option<SessionEvent> {
        if !self.can_advance() {
            return None;
        }

        let next = self.active + 1;
        self.running = false;
        self.enter(next);
        Some(SessionEvent::Advanced { index: next })
    }

    /// Make the step at `index` active
    ///
    /// Stops the countdown and loads the target's full duration, even when
    /// `index` is already active. An out-of-range index leaves the session
    /// untouched.
    pub fn jump_to(&mut self, index: usize) -> Result<SessionEvent, SessionError> {
        if index >= self.sequence.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.sequence.len(),
            });
        }

        self.running = false;
        self.enter(index);
        Ok(SessionEvent::Jumped { index })
    }

    /// Return to the state of a freshly created session
    pub fn restart(&mut self) -> SessionEvent {
        self.running = false;
        self.enter(0);
        SessionEvent::Restarted
    }

    /// Activate a step and resynchronize the countdown from its duration
    ///
    /// Leaves `running` to the caller.
    fn enter(&mut self, index: usize) {
        self.active = index;
        self.completed = false;
        self.remaining_s = match self.sequence[index].kind {
            StepKind::Timed { duration_s } => duration_s,
            StepKind::Reps { .. } => 0,
        };
    }
}
