//! Screen rendering
//!
//! Builds text frames for the terminal. A full frame is drawn whenever the
//! active step or run state changes; plain countdown ticks only redraw the
//! status line.

use std::fmt::Write;

use cadence_core::progress::format_clock;
use cadence_core::sequence::{Sequence, StepKind};
use cadence_core::session::{Phase, Snapshot};

/// Width of the progress bar in characters
pub const PROGRESS_WIDTH: usize = 30;

/// Widest description line before wrapping
pub const WRAP_COLS: usize = 72;

/// Text frame builder
#[derive(Debug, Default)]
pub struct Renderer {
    frame: String,
}

impl Renderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full screen for a snapshot
    pub fn render(&mut self, snap: &Snapshot<'_>) -> &str {
        self.frame.clear();
        let step = snap.step;
        let f = &mut self.frame;

        let _ = writeln!(f, "Step {} of {}", snap.index + 1, snap.len);
        let _ = write!(f, "{}", step.name);
        if step.has_rounds() {
            let _ = write!(f, "  (round {}/{})", step.round, step.total_rounds);
        }
        let _ = writeln!(f);
        if let Some(section) = &step.section {
            let _ = writeln!(f, "{}", section);
        }
        let _ = writeln!(f);

        let _ = writeln!(f, "{}", status_line(snap));
        let _ = writeln!(f, "{}", progress_bar(snap.progress));
        let _ = writeln!(f);

        for line in wrap(&step.description, WRAP_COLS) {
            let _ = writeln!(f, "  {}", line);
        }
        if !step.description.is_empty() {
            let _ = writeln!(f);
        }

        let _ = writeln!(f, "{}", window_line(snap));
        let _ = writeln!(f, "{}", controls_line(snap));

        &self.frame
    }

    /// Build the countdown line alone
    pub fn render_status(&mut self, snap: &Snapshot<'_>) -> &str {
        self.frame.clear();
        self.frame.push_str(&status_line(snap));
        &self.frame
    }

    /// Build the section outline with the active step marked
    pub fn render_outline(&mut self, sequence: &Sequence, active: usize) -> &str {
        self.frame.clear();
        let f = &mut self.frame;

        for (i, span) in sequence.spans().iter().enumerate() {
            let marker = if span.contains(active) { '>' } else { ' ' };
            let _ = write!(f, "{} {}. {}", marker, i + 1, span.label);
            if span.rounds > 1 {
                let _ = write!(f, " x{}", span.rounds);
            }
            let _ = writeln!(f);

            if span.rounds == 1 && span.per_round == 1 && sequence[span.start].section.is_none() {
                continue;
            }
            for e in 0..span.per_round {
                let step = &sequence[span.start + e];
                let _ = writeln!(f, "     {}. {} ({})", e + 1, step.name, target(&step.kind));
            }
        }

        &self.frame
    }
}

/// Remaining time or rep target plus run state
fn status_line(snap: &Snapshot<'_>) -> String {
    match &snap.step.kind {
        StepKind::Timed { .. } => {
            let state = match snap.phase {
                Phase::Counting => "running",
                Phase::Idle => "paused",
                Phase::Completed => "workout complete",
            };
            format!("  {}  [{}]", format_clock(snap.remaining_s), state)
        }
        StepKind::Reps { label } => format!("  {} reps  [complete when done]", label),
    }
}

/// Countdown length or rep target, for outlines
fn target(kind: &StepKind) -> String {
    match kind {
        StepKind::Timed { duration_s } => format_clock(*duration_s).to_string(),
        StepKind::Reps { label } => format!("{} reps", label),
    }
}

/// `[#########---------]  45%`
fn progress_bar(progress: f32) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * PROGRESS_WIDTH as f32).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        (progress * 100.0).round() as u32
    )
}

/// Nearby steps, numbered for `j`, active one bracketed
fn window_line(snap: &Snapshot<'_>) -> String {
    snap.window
        .iter()
        .map(|entry| {
            let mut item = format!("{}. {}", entry.index + 1, entry.name);
            if let Some(round) = entry.round {
                let _ = write!(item, " ({})", round);
            }
            if entry.is_current {
                format!("[{}]", item)
            } else {
                item
            }
        })
        .collect::<Vec<_>>()
        .join("  >  ")
}

/// Controls that apply to the active step
fn controls_line(snap: &Snapshot<'_>) -> String {
    let mut controls = Vec::new();
    if snap.step.is_timed() && snap.phase != Phase::Completed {
        controls.push(if snap.running { "p:pause" } else { "p:play" });
        controls.push("r:reset");
    }
    if snap.can_advance {
        controls.push("n:complete");
    }
    controls.push("j:jump");
    controls.push("h:help");
    controls.join("  ")
}

/// Greedy word wrap
fn wrap(text: &str, cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > cols {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines
}
