//! Blocking wait on hardware status flags
//!
//! There is no timeout: if the flag never comes up, the caller blocks
//! forever. Hardware waits here are bounded by the signal itself (a one
//! second gate, or the next edge of a present signal).

use auxpin_hal::PollClock;

/// Spin until `ready` returns true, relaxing `clock` between polls
///
/// Returns the number of unsuccessful polls.
pub fn wait_for<C, F>(clock: &mut C, mut ready: F) -> u32
where
    C: PollClock + ?Sized,
    F: FnMut() -> bool,
{
    let mut polls: u32 = 0;
    while !ready() {
        clock.relax();
        polls = polls.saturating_add(1);
    }
    polls
}
