//! Main controller task
//!
//! Owns the session. Receives commands from the terminal and ticks from
//! the tick task, applies them, and redraws the screen.

use std::io::{self, Write};

use embassy_futures::select::{select, Either};
use log::{debug, info, warn};

use cadence_core::sequence::Sequence;
use cadence_core::session::{Controller, Intent, SessionEvent};

use crate::channels::{COMMAND_CHANNEL, TICK_SIGNAL};
use crate::display::Renderer;
use crate::input::{Command, HELP};
use crate::tasks::SignalTicks;

type WorkoutController = Controller<'static, SignalTicks>;

/// Controller task - main coordination loop
///
/// Returns (ending the process) when the user quits.
#[embassy_executor::task]
pub async fn controller_task(sequence: &'static Sequence, autostart: bool) {
    info!("Controller task started");

    let mut controller = Controller::new(sequence, SignalTicks);
    let mut renderer = Renderer::new();
    let mut screen = Screen::default();

    if autostart {
        if let Ok(Some(event)) = controller.dispatch(Intent::ToggleRun) {
            log_event(sequence, event);
        }
    }
    screen.frame(renderer.render(&controller.snapshot()));

    loop {
        match select(COMMAND_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(Command::Quit) => break,
            Either::First(command) => {
                handle_command(&mut controller, &mut renderer, &mut screen, command);
            }
            Either::Second(()) => match controller.tick() {
                Some(event) => {
                    log_event(sequence, event);
                    screen.frame(renderer.render(&controller.snapshot()));
                }
                None => screen.status(renderer.render_status(&controller.snapshot())),
            },
        }
    }

    // Releases the tick task
    drop(controller);
    info!("Session closed");
    std::process::exit(0);
}

/// Apply one terminal command
fn handle_command(
    controller: &mut WorkoutController,
    renderer: &mut Renderer,
    screen: &mut Screen,
    command: Command,
) {
    let sequence = controller.session().sequence();

    let intent = match command {
        Command::Intent(intent) => intent,
        Command::Goto(pos) => match sequence.position_of(pos.section, pos.round, pos.exercise) {
            Some(index) => Intent::JumpTo(index),
            None => {
                warn!(
                    "No exercise {} in round {} of section {}",
                    pos.exercise + 1,
                    pos.round,
                    pos.section + 1
                );
                return;
            }
        },
        Command::Restart => {
            log_event(sequence, controller.restart());
            screen.frame(renderer.render(&controller.snapshot()));
            return;
        }
        Command::Outline => {
            screen.frame(renderer.render_outline(sequence, controller.session().active_index()));
            return;
        }
        Command::Help => {
            screen.frame(HELP);
            return;
        }
        // Handled by the task loop
        Command::Quit => return,
    };

    match controller.dispatch(intent) {
        Ok(Some(event)) => log_event(sequence, event),
        Ok(None) => debug!("{:?} does not apply to the current step", intent),
        Err(e) => {
            warn!("{}", e);
            return;
        }
    }
    screen.frame(renderer.render(&controller.snapshot()));
}

/// Log a session event with the step it concerns
fn log_event(sequence: &Sequence, event: SessionEvent) {
    match event {
        SessionEvent::Started => debug!("Countdown started"),
        SessionEvent::Paused => debug!("Countdown paused"),
        SessionEvent::Reset { index } => debug!("Step {} reset", index + 1),
        SessionEvent::Completed => info!("Workout complete"),
        _ => {
            if let Some((index, step)) = event
                .step_index()
                .and_then(|index| Some((index, sequence.get(index)?)))
            {
                let how = if event.is_automatic() { "auto" } else { "manual" };
                info!("Step {}: {} ({})", index + 1, step.name, how);
            }
        }
    }
}

/// Stdout writer that keeps the status line and full frames apart
#[derive(Debug, Default)]
struct Screen {
    /// Cursor is at the end of an unterminated status line
    on_status: bool,
}

impl Screen {
    /// Print a full frame below everything else
    fn frame(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        if self.on_status {
            let _ = writeln!(out);
            self.on_status = false;
        }
        let _ = writeln!(out, "\n{}", text.trim_end());
        let _ = out.flush();
    }

    /// Overwrite the current status line in place
    fn status(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        if !self.on_status {
            let _ = writeln!(out);
        }
        let _ = write!(out, "\r{}\x1b[K", text);
        let _ = out.flush();
        self.on_status = true;
    }
}
