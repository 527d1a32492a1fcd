//! Banded decimal formatting of averaged periods
//!
//! Converts a period in ticks to a frequency with as many fractional digits
//! as one tick of period resolution justifies. Longer periods resolve finer
//! frequency steps, so they get more digits.
//!
//! | period (ticks)  | digits |
//! |-----------------|--------|
//! | > 400000        | 5      |
//! | > 126491        | 4      |
//! | > 40000         | 3      |
//! | > 12649         | 2      |
//! | otherwise       | 1      |
//!
//! The thresholds are tuned for a 16 MHz tick source and kept as-is; a
//! threshold value itself belongs to the coarser band.

use core::fmt;

use crate::config::TICK_HZ;

/// Precision bands as (period threshold, fractional digits), finest first
const PRECISION_BANDS: [(u32, u8); 4] = [(400_000, 5), (126_491, 4), (40_000, 3), (12_649, 2)];

/// Digits used when the period is at or below every threshold
const COARSEST_DIGITS: u8 = 1;

/// A frequency split into integer and zero-padded fractional parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecimalReading {
    integer: u32,
    fraction: u32,
    digits: u8,
}

impl DecimalReading {
    /// Frequency for an averaged period of `period_ticks`
    ///
    /// Returns `None` for a zero period.
    pub fn from_period(period_ticks: u32) -> Option<Self> {
        if period_ticks == 0 {
            return None;
        }

        let digits = Self::digits_for(period_ticks);
        let scale = 10u64.pow(digits as u32);
        let value = TICK_HZ as u64 * scale / period_ticks as u64;

        Some(Self {
            integer: (value / scale) as u32,
            fraction: (value % scale) as u32,
            digits,
        })
    }

    /// Fractional digits shown for a period of `period_ticks`
    pub fn digits_for(period_ticks: u32) -> u8 {
        PRECISION_BANDS
            .iter()
            .find(|&&(threshold, _)| period_ticks > threshold)
            .map_or(COARSEST_DIGITS, |&(_, digits)| digits)
    }

    /// Whole hertz
    ///
    /// Thousands grouping is left to the caller's number printer.
    pub fn integer(&self) -> u32 {
        self.integer
    }

    /// Fractional part, scaled by 10^digits
    pub fn fraction(&self) -> u32 {
        self.fraction
    }

    /// Number of fractional digits
    pub fn digits(&self) -> u8 {
        self.digits
    }
}

impl fmt::Display for DecimalReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.integer,
            self.fraction,
            width = self.digits as usize
        )
    }
}
