//! Tick task for the countdown
//!
//! Sleeps until the controller arms it, then signals one tick per
//! interval until released. Re-arming restarts the interval so the first
//! tick after a resume is always a full second away.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};
use log::{debug, info};

use cadence_core::session::TickSource;

use crate::channels::{TICK_SIGNAL, TIMER_ARM};

/// Tick source backed by the tick task
///
/// Arming and releasing are signals to [`tick_task`]. Releasing also drops
/// any tick that was signalled but not yet consumed, so a stale tick can
/// never land on the next step.
#[derive(Debug, Default)]
pub struct SignalTicks;

impl TickSource for SignalTicks {
    fn arm(&mut self) {
        TICK_SIGNAL.reset();
        TIMER_ARM.signal(true);
    }

    fn disarm(&mut self) {
        TIMER_ARM.signal(false);
        TICK_SIGNAL.reset();
    }
}

/// Tick task - signals countdown seconds while armed
#[embassy_executor::task]
pub async fn tick_task(interval: Duration) {
    info!("Tick task started ({} ms per tick)", interval.as_millis());

    loop {
        // Wait until armed
        while !TIMER_ARM.wait().await {}
        debug!("Timer armed");

        let mut ticker = Ticker::every(interval);
        loop {
            // Arm changes are polled first so a release always wins over a due tick
            match select(TIMER_ARM.wait(), ticker.next()).await {
                Either::First(true) => ticker.reset(),
                Either::First(false) => break,
                Either::Second(()) => TICK_SIGNAL.signal(()),
            }
        }
        debug!("Timer released");
    }
}
