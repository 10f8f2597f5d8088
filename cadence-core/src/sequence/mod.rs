//! Step sequence
//!
//! Compiles a nested program into a flat, immutable list of steps that
//! can be addressed by index for the rest of the session.

pub mod compiler;
pub mod step;

pub use compiler::{compile, CompileError, SpecFault, MAX_STEPS};
pub use step::{SectionSpan, Sequence, Step, StepKind};
