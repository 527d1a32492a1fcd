//! Digital line abstractions
//!
//! The aux function can be routed to one of several physical lines. Which one
//! is in use is decided outside this crate and passed in as an [`AuxSelect`].

pub use embedded_hal::digital::PinState;

/// Physical line carrying the aux function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuxSelect {
    /// Primary AUX line
    #[default]
    Aux0,
    /// Chip-select line borrowed as aux
    Cs,
    /// Secondary AUX line
    Aux1,
    /// Tertiary AUX line
    Aux2,
}

impl AuxSelect {
    /// Decode a selector value
    ///
    /// Only the low two bits are significant.
    pub fn from_u8(value: u8) -> Self {
        match value & 0b11 {
            0 => AuxSelect::Aux0,
            1 => AuxSelect::Cs,
            2 => AuxSelect::Aux1,
            _ => AuxSelect::Aux2,
        }
    }

    /// Selector value for this line
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Direct access to the aux lines
///
/// Implementations own the direction and latch registers of every line
/// that can carry the aux function.
pub trait AuxLines {
    /// Switch the line to input (high impedance)
    fn set_input(&mut self, line: AuxSelect);

    /// Switch the line to output and drive it to `state`
    fn drive(&mut self, line: AuxSelect, state: PinState);

    /// Sample the line's input level
    ///
    /// The line is expected to already be an input.
    fn sample(&mut self, line: AuxSelect) -> PinState;

    /// Allow a freshly reconfigured input to settle before sampling
    fn settle(&mut self) {}
}
