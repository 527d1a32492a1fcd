//! Gate counter
//!
//! Counts signal edges for one reference gate (one second by default) and
//! auto-ranges the prescaler: a first pass at 1:256 covers fast signals,
//! and anything at or below the autorange threshold is re-measured at 1:1
//! for full resolution.

use auxpin_hal::{EdgeCounter, PinRoute, PollClock, Prescaler};

use crate::config::MeasureConfig;
use crate::guard::ReleaseGuard;
use crate::wait::wait_for;

/// Result of a gated edge count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GateReading {
    /// Edges per gate, corrected for the prescaler (Hz for a 1 s gate)
    pub hz: u32,
    /// Whether the 1:1 re-measurement was used
    pub autoranged: bool,
}

impl GateReading {
    /// Whether any edges were observed
    pub fn has_signal(&self) -> bool {
        self.hz > 0
    }
}

/// Measure the pin's edge rate
///
/// Blocks for one gate, or two when auto-ranging. `on_autorange` runs just
/// before the 1:1 re-measurement starts. The timer block is released on
/// return.
pub fn count_edges<T, C, F>(
    timers: &mut T,
    clock: &mut C,
    config: &MeasureConfig,
    on_autorange: F,
) -> GateReading
where
    T: EdgeCounter,
    C: PollClock + ?Sized,
    F: FnOnce(),
{
    let mut timers = ReleaseGuard::acquire(timers);
    timers.route(PinRoute::CounterClock);

    let coarse = run_gate(&mut *timers, clock, Prescaler::Div256, config.gate_ticks);
    if coarse > config.autorange_threshold {
        let hz = coarse.saturating_mul(Prescaler::Div256.ratio());
        debug!("gate 1:256 count {} -> {} Hz", coarse, hz);
        return GateReading {
            hz,
            autoranged: false,
        };
    }

    info!("gate 1:256 count {} at or below threshold, autoranging", coarse);
    on_autorange();

    let hz = run_gate(&mut *timers, clock, Prescaler::Div1, config.gate_ticks);
    debug!("gate 1:1 count {} Hz", hz);
    GateReading {
        hz,
        autoranged: true,
    }
}

/// One armed-and-waited gate
fn run_gate<T, C>(timers: &mut T, clock: &mut C, prescaler: Prescaler, gate_ticks: u32) -> u32
where
    T: EdgeCounter + ?Sized,
    C: PollClock + ?Sized,
{
    timers.arm_gate(prescaler, gate_ticks);
    timers.start_gate();
    wait_for(clock, || timers.gate_expired());
    timers.stop_gate();
    timers.read_counter()
}
