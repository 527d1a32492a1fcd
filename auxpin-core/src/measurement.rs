//! Frequency measurement results

use core::fmt::{self, Write};

use heapless::String;

use crate::decimal::DecimalReading;

/// Capacity of a rendered measurement
pub const MAX_RENDERED_LEN: usize = 24;

/// Outcome of a successful frequency measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Measurement {
    /// Edge count over one gate, in whole Hz
    Counted(u32),
    /// Averaged period converted to a banded decimal
    Averaged(DecimalReading),
}

impl Measurement {
    /// Whole-hertz part
    pub fn whole_hz(&self) -> u32 {
        match self {
            Measurement::Counted(hz) => *hz,
            Measurement::Averaged(reading) => reading.integer(),
        }
    }

    /// Number of fractional digits carried
    pub fn digits(&self) -> u8 {
        match self {
            Measurement::Counted(_) => 0,
            Measurement::Averaged(reading) => reading.digits(),
        }
    }

    /// Render into a fixed-capacity string
    pub fn render(&self) -> Result<String<MAX_RENDERED_LEN>, fmt::Error> {
        let mut text = String::new();
        write!(text, "{}", self)?;
        Ok(text)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Counted(hz) => write!(f, "{}", hz),
            Measurement::Averaged(reading) => fmt::Display::fmt(reading, f),
        }
    }
}
