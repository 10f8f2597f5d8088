//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.
//! Terminal input is read on a plain thread because stdin has no async
//! driver under the std executor.

pub mod controller;
pub mod stdin;
pub mod tick;

pub use controller::controller_task;
pub use stdin::spawn_stdin_reader;
pub use tick::{tick_task, SignalTicks};
