//! Terminal input reader
//!
//! Reads lines from stdin on a dedicated thread and forwards parsed
//! commands to the controller task.

use std::io::{self, BufRead};
use std::thread;

use embassy_futures::block_on;
use log::{debug, error, warn};

use crate::channels::COMMAND_CHANNEL;
use crate::input::{parse_line, Command};

/// Start the reader thread
///
/// End of input is treated as a quit request.
pub fn spawn_stdin_reader() -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin".into())
        .spawn(read_commands)
}

fn read_commands() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                error!("Failed to read input: {}", e);
                break;
            }
            None => break,
        };

        match parse_line(&line) {
            Ok(command) => {
                debug!("Command: {:?}", command);
                block_on(COMMAND_CHANNEL.send(command));
                if command == Command::Quit {
                    return;
                }
            }
            Err(e) => {
                warn!("{}", e);
                block_on(COMMAND_CHANNEL.send(Command::Help));
            }
        }
    }

    block_on(COMMAND_CHANNEL.send(Command::Quit));
}
