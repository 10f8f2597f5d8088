//! Session controller
//!
//! Couples a [`Session`] to a [`TickSource`]. Every intent and every tick
//! goes through the controller, which re-evaluates afterwards whether the
//! source should be armed. The source is therefore armed exactly while the
//! session is counting down, and released on pause, on auto-advance into
//! a rep step, on completion, and when the controller is dropped.

use super::events::{Intent, SessionEvent};
use super::machine::{Session, SessionError};
use super::snapshot::Snapshot;
use super::timer::TickSource;
use crate::sequence::Sequence;

/// Session plus the tick source that drives it
pub struct Controller<'s, T: TickSource> {
    session: Session<'s>,
    ticks: T,
    /// Last state requested from `ticks`
    armed: bool,
}

impl<'s, T: TickSource> Controller<'s, T> {
    /// Create a controller at the first step of `sequence`
    pub fn new(sequence: &'s Sequence, ticks: T) -> Self {
        let mut controller = Self {
            session: Session::new(sequence),
            ticks,
            armed: false,
        };
        // Release anything the source had pending
        controller.ticks.disarm();
        controller
    }

    /// Current session state
    pub fn session(&self) -> &Session<'s> {
        &self.session
    }

    /// Capture the current state for rendering
    pub fn snapshot(&self) -> Snapshot<'s> {
        self.session.snapshot()
    }

    /// Check if the tick source is armed
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Apply a user intent
    ///
    /// Returns the resulting event, `None` when the intent did not apply
    /// (toggling a rep step, advancing past the last step). A rejected
    /// jump leaves both the session and the tick source untouched.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Option<SessionEvent>, SessionError> {
        let event = match intent {
            Intent::ToggleRun => self.session.toggle_run(),
            Intent::Reset => Some(self.session.reset()),
            Intent::Advance => self.session.advance(),
            Intent::JumpTo(index) => Some(self.session.jump_to(index)?),
        };
        self.sync_ticks();
        Ok(event)
    }

    /// Deliver one tick from the source
    pub fn tick(&mut self) -> Option<SessionEvent> {
        let event = self.session.tick();
        self.sync_ticks();
        event
    }

    /// Return to the first step, stopped
    pub fn restart(&mut self) -> SessionEvent {
        let event = self.session.restart();
        self.sync_ticks();
        event
    }

    /// Arm or release the tick source to match the session
    fn sync_ticks(&mut self) {
        let wanted = self.session.wants_ticks();
        if wanted == self.armed {
            return;
        }

        if wanted {
            self.ticks.arm();
        } else {
            self.ticks.disarm();
        }
        self.armed = wanted;
    }
}

impl<T: TickSource> Drop for Controller<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.ticks.disarm();
        }
    }
}
