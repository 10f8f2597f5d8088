//! Inter-task communication channels
//!
//! Static channels and signals connecting the input reader, the tick
//! task, and the controller task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::input::Command;

/// Channel capacity for commands from the terminal
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Commands typed by the user
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Arm (`true`) or release (`false`) the tick task
pub static TIMER_ARM: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// One countdown second elapsed
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();
