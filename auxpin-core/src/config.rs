//! Measurement and servo configuration
//!
//! Defaults reproduce the timing constants of a 16 MHz tick source.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use auxpin_hal::TICK_HZ;

/// Gate and averaging parameters for frequency measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasureConfig {
    /// Reference gate length in tick-source ticks (one second)
    pub gate_ticks: u32,
    /// Largest 1:256 edge count that still triggers a 1:1 re-measurement
    pub autorange_threshold: u32,
    /// Highest counted frequency (Hz) that is refined by period averaging
    pub averaging_ceiling_hz: u32,
}

impl MeasureConfig {
    /// Interactive measurement: autorange below 0x4000 prescaled edges
    ///
    /// The edge counter is unreliable above ~6.7 MHz; 0x3FFF × 256 is the
    /// nearest power of two below that.
    pub const INTERACTIVE: Self = Self {
        gate_ticks: TICK_HZ,
        autorange_threshold: 0x3FFF,
        averaging_ceiling_hz: 3999,
    };

    /// Raw measurement used by other firmware modes
    pub const RAW: Self = Self {
        gate_ticks: TICK_HZ,
        autorange_threshold: 0xFF,
        averaging_ceiling_hz: 3999,
    };
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self::INTERACTIVE
    }
}

/// Servo frame parameters
///
/// The generator runs at 1:256, so one tick is 16 µs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoConfig {
    /// Frame period in generator ticks (20 ms)
    pub frame_period: u16,
    /// Pulse width at 0° in generator ticks (~1 ms)
    pub min_pulse: u16,
    /// Angle divisor: pulse = frame_period × angle / angle_scale + min_pulse
    pub angle_scale: u16,
    /// Largest accepted angle in degrees
    pub max_angle: u8,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            frame_period: 1250,
            min_pulse: 62,
            angle_scale: 3500,
            max_angle: 180,
        }
    }
}
