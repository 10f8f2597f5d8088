//! Terminal display
//!
//! Turns session snapshots into plain text frames.

pub mod renderer;

pub use renderer::Renderer;
