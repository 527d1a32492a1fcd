//! Timer and capture block abstractions
//!
//! Pulse generation, gated edge counting and edge timestamp capture all run
//! on one shared set of timers. The traits below split that block by use,
//! but every implementation is expected to be a single peripheral owner:
//! [`TimerBlock::reset`] must bring *all* of it back to a neutral state.

/// Timer clock prescaler ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    /// 1:1
    #[default]
    Div1,
    /// 1:8
    Div8,
    /// 1:64
    Div64,
    /// 1:256
    Div256,
}

impl Prescaler {
    /// Number of source ticks per counter increment
    pub const fn ratio(self) -> u32 {
        match self {
            Prescaler::Div1 => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
        }
    }
}

/// What the aux pin is attached to inside the timer block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRoute {
    /// Not attached to any timer function
    #[default]
    Detached,
    /// Driven by the PWM compare output
    CompareOutput,
    /// Input used as the edge counter's clock
    CounterClock,
    /// Input feeding both capture channels
    Capture,
}

/// One captured edge timestamp
///
/// The capture hardware latches the low and high halves of a 32-bit
/// free-running counter on two synchronized 16-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeSample {
    /// Low half of the timestamp
    pub low: u16,
    /// High half of the timestamp
    pub high: u16,
}

impl EdgeSample {
    /// Split a 32-bit tick count into a sample
    pub const fn from_ticks(ticks: u32) -> Self {
        Self {
            low: ticks as u16,
            high: (ticks >> 16) as u16,
        }
    }

    /// Full 32-bit timestamp
    pub const fn ticks(self) -> u32 {
        ((self.high as u32) << 16) | self.low as u32
    }

    /// Ticks elapsed since `earlier`, correct across counter wraparound
    pub const fn ticks_since(self, earlier: EdgeSample) -> u32 {
        self.ticks().wrapping_sub(earlier.ticks())
    }
}

/// Shared timer block ownership
pub trait TimerBlock {
    /// Stop every timer, compare and capture unit and clear their setup
    ///
    /// Leaves the pin routing untouched.
    fn reset(&mut self);

    /// Attach the aux pin to a timer function (or detach it)
    fn route(&mut self, route: PinRoute);
}

/// Compare-output pulse generator
pub trait PulseOutput: TimerBlock {
    /// Select the generator timer's prescaler
    fn set_prescaler(&mut self, prescaler: Prescaler);

    /// Load the period register (counts `0..=ticks`, then restarts)
    fn set_period(&mut self, ticks: u16);

    /// Load the compare register
    ///
    /// The output is high while the counter is below `ticks`, so `0` holds
    /// it low and anything past the period holds it high for the whole frame.
    fn set_compare(&mut self, ticks: u16);

    /// Enable the compare output and start the generator timer
    fn start_output(&mut self);
}

/// Gated edge counter
///
/// A 32-bit counter clocked by the aux pin plus an independent reference
/// timer clocked by the tick source that flags when the gate has elapsed.
pub trait EdgeCounter: TimerBlock {
    /// Clear both counters, set the edge prescaler and load the gate length
    fn arm_gate(&mut self, prescaler: Prescaler, gate_ticks: u32);

    /// Start the edge counter and the reference timer together
    fn start_gate(&mut self);

    /// Stop both counters
    fn stop_gate(&mut self);

    /// Whether the reference timer's expiry flag is set
    fn gate_expired(&mut self) -> bool;

    /// Read the accumulated edge count (low and high halves combined)
    fn read_counter(&mut self) -> u32;
}

/// Paired edge timestamp capture
pub trait EdgeCapture: TimerBlock {
    /// Start the capture timebase and both capture channels on rising edges
    fn start_capture(&mut self);

    /// Whether the capture buffer holds at least one sample
    fn capture_pending(&mut self) -> bool;

    /// Pop the oldest captured sample from both channels
    fn read_capture(&mut self) -> EdgeSample;
}
