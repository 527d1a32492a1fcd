//! Scoped release of the shared timer block
//!
//! Measurements hold a [`ReleaseGuard`] for as long as they use the timers.
//! Dropping it stops every unit and detaches the pin, whichever way the
//! measurement left.

use core::ops::{Deref, DerefMut};

use auxpin_hal::{PinRoute, TimerBlock};

/// Exclusive use of the timer block, released on drop
pub struct ReleaseGuard<'a, T: TimerBlock> {
    timers: &'a mut T,
}

impl<'a, T: TimerBlock> ReleaseGuard<'a, T> {
    /// Reset the timer block and take it for a scoped operation
    pub fn acquire(timers: &'a mut T) -> Self {
        timers.reset();
        Self { timers }
    }
}

impl<T: TimerBlock> Deref for ReleaseGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.timers
    }
}

impl<T: TimerBlock> DerefMut for ReleaseGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.timers
    }
}

impl<T: TimerBlock> Drop for ReleaseGuard<'_, T> {
    fn drop(&mut self) {
        self.timers.reset();
        self.timers.route(PinRoute::Detached);
    }
}
