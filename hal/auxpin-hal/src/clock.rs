//! Poll pacing for blocking waits
//!
//! Measurements block on hardware status flags. The loops doing that call
//! [`PollClock::relax`] between polls, so hardware can spin politely while
//! host tests advance a fake peripheral deterministically.

/// Source of pacing between status-flag polls
pub trait PollClock {
    /// Called once after every unsuccessful poll
    fn relax(&mut self);
}

/// Busy-spin pacing for real hardware
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinClock;

impl PollClock for SpinClock {
    fn relax(&mut self) {
        core::hint::spin_loop();
    }
}
