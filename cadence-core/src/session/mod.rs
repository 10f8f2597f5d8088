//! Session state machine
//!
//! Owns the run-time state of one workout run: which step is active, how
//! much of its countdown is left, and whether the countdown is running.
//! All mutation goes through ticks and user intents; each transition
//! reports what happened as a [`SessionEvent`].

pub mod controller;
pub mod events;
pub mod machine;
pub mod snapshot;
pub mod timer;

pub use controller::Controller;
pub use events::{Intent, SessionEvent};
pub use machine::{Phase, Session, SessionError};
pub use snapshot::Snapshot;
pub use timer::TickSource;
