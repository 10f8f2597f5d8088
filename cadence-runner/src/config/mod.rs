//! Workout configuration
//!
//! Workouts are TOML files deserialized into the core program model. A
//! default workout is compiled into the binary; a file on the command
//! line replaces it.

pub mod loader;

pub use loader::load_workout;
