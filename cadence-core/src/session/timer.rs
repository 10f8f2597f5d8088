//! Tick source abstraction
//!
//! The session never reads a clock. Something outside delivers one tick
//! per elapsed second, and only while the session asks for it. The
//! [`Controller`](super::Controller) arms and disarms the source as the
//! session moves in and out of a running countdown.

/// A cancellable source of one-second ticks
pub trait TickSource {
    /// Start delivering ticks, the first one a full period from now
    fn arm(&mut self);

    /// Stop delivering ticks; none may arrive after this returns
    fn disarm(&mut self);
}

impl<T: TickSource + ?Sized> TickSource for &mut T {
    fn arm(&mut self) {
        (**self).arm();
    }

    fn disarm(&mut self) {
        (**self).disarm();
    }
}
