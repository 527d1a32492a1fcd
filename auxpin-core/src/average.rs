//! Period averager
//!
//! Below a few kHz, counting edges for one second gives poor resolution.
//! Timestamping each rising edge against the 16 MHz tick source and averaging
//! the intervals gives a period good to a fraction of a tick.
//!
//! The pass covers `count` intervals; with `count` set to the coarse edge
//! rate that is about one second of signal.

use core::num::NonZeroU16;

use auxpin_hal::{EdgeCapture, PinRoute, PollClock};

use crate::guard::ReleaseGuard;
use crate::wait::wait_for;

/// Mean interval between `count` consecutive rising edges, in ticks
///
/// Blocks until `count + 1` edges have been captured. There is no timeout:
/// a signal that stops mid-measurement blocks forever. The timer block is
/// released on return.
pub fn average_period<T, C>(timers: &mut T, clock: &mut C, count: NonZeroU16) -> u32
where
    T: EdgeCapture,
    C: PollClock + ?Sized,
{
    let mut timers = ReleaseGuard::acquire(timers);
    timers.route(PinRoute::Capture);
    timers.start_capture();

    let mut drained = 0u16;
    while timers.capture_pending() {
        timers.read_capture();
        drained = drained.wrapping_add(1);
    }
    if drained > 0 {
        trace!("drained {} stale captures", drained);
    }

    wait_for(clock, || timers.capture_pending());
    let mut previous = timers.read_capture();

    let mut total: u64 = 0;
    for _ in 0..count.get() {
        wait_for(clock, || timers.capture_pending());
        let current = timers.read_capture();
        total += current.ticks_since(previous) as u64;
        previous = current;
    }

    let mean = (total / count.get() as u64) as u32;
    debug!("averaged {} intervals: {} ticks", count.get(), mean);
    mean
}
