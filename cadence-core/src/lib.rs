//! Platform-agnostic core logic for the Cadence workout timer
//!
//! This crate contains all workout logic that does not depend on a
//! particular clock, executor, or display:
//!
//! - Program model (sections of rounds of exercises, standalone rests)
//! - Sequence compiler (nested program to flat, indexable steps)
//! - Session state machine (countdown, auto-advance, manual controls)
//! - Tick source abstraction and the controller that arms it
//! - Progress and navigation window calculations

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod program;
pub mod progress;
pub mod sequence;
pub mod session;
