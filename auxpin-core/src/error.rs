//! Error types

use core::fmt;

/// Errors reported by aux pin operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuxError {
    /// Frequency measurement requested while a pulse output is active
    ///
    /// Nothing was touched; the pulse keeps running.
    ModeConflict,
    /// Measurement finished without observing any edges
    SignalAbsent,
}

impl fmt::Display for AuxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuxError::ModeConflict => f.write_str("pulse output active"),
            AuxError::SignalAbsent => f.write_str("no signal"),
        }
    }
}
