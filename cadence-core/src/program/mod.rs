//! Workout program definitions
//!
//! The authoring-side representation of a workout: an ordered list of
//! sections, each either a group of exercises repeated for a number of
//! rounds or a standalone rest. Programs are static configuration; they
//! are compiled once into a flat [`Sequence`](crate::sequence::Sequence).

pub mod types;

pub use types::*;
