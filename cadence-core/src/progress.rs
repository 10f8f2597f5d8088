//! Progress and navigation window
//!
//! Stateless derivations over a sequence and an active index. Nothing here
//! mutates session state.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::sequence::Sequence;

/// Steps shown before the active one
pub const WINDOW_BEFORE: usize = 1;

/// Steps shown after the active one
pub const WINDOW_AFTER: usize = 2;

/// Maximum window size
pub const WINDOW_CAPACITY: usize = WINDOW_BEFORE + 1 + WINDOW_AFTER;

/// Fraction of the workout reached, counting the active step as reached
///
/// `(active + 1) / len`: `1 / len` at the first step, exactly `1.0` at the
/// last. Indexes past the end clamp to the last step.
pub fn progress_fraction(sequence: &Sequence, active: usize) -> f32 {
    let len = sequence.len();
    let reached = active.min(sequence.last_index()) + 1;
    reached as f32 / len as f32
}

/// Round marker shown next to a step name in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoundLabel {
    pub round: u32,
}

impl fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.round)
    }
}

/// One entry of the navigation window
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowEntry<'a> {
    /// Flat index, usable with `jump_to`
    pub index: usize,
    /// Step name
    pub name: &'a str,
    /// Present only when the step's group has more than one round
    pub round: Option<RoundLabel>,
    /// True for exactly one entry: the active step
    pub is_current: bool,
}

/// Bounded window of steps around the active one
pub type Window<'a> = Vec<WindowEntry<'a>, WINDOW_CAPACITY>;

/// Steps near the active index, for navigation
///
/// Covers `[active - 1, active + 2]` clamped to the sequence. Near either
/// end fewer entries are returned; the window never pads or wraps.
pub fn visible_window(sequence: &Sequence, active: usize) -> Window<'_> {
    let active = active.min(sequence.last_index());
    let first = active.saturating_sub(WINDOW_BEFORE);
    let last = (active + WINDOW_AFTER).min(sequence.last_index());

    let mut window = Window::new();
    for index in first..=last {
        let step = &sequence[index];
        // Capacity covers the widest possible range
        let _ = window.push(WindowEntry {
            index,
            name: &step.name,
            round: step.has_rounds().then_some(RoundLabel { round: step.round }),
            is_current: index == active,
        });
    }
    window
}

/// Clock text for a number of seconds
pub type ClockText = String<12>;

/// Format seconds as `M:SS`
///
/// Minutes are not padded and may exceed 59 (`75:00`).
pub fn format_clock(seconds: u32) -> ClockText {
    let mut text = ClockText::new();
    // u32::MAX seconds is 11 characters
    let _ = write!(text, "{}:{:02}", seconds / 60, seconds % 60);
    text
}
