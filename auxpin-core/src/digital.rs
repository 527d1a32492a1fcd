//! Digital I/O adapter
//!
//! Direct drive, read and release of whichever line carries the aux
//! function. Independent of the timed modes; callers only use it while the
//! pin is in I/O mode.

use auxpin_hal::gpio::PinState;
use auxpin_hal::{AuxLines, AuxSelect};

use crate::status::Status;

/// Stateless pass-through to the aux lines
pub struct DigitalIo<L> {
    lines: L,
}

impl<L: AuxLines> DigitalIo<L> {
    /// Wrap the line driver
    pub fn new(lines: L) -> Self {
        Self { lines }
    }

    /// Switch `line` to input and sample it
    pub fn read(&mut self, line: AuxSelect) -> PinState {
        self.lines.set_input(line);
        self.lines.settle();
        self.lines.sample(line)
    }

    /// Drive `line` as an output
    pub fn drive(&mut self, line: AuxSelect, state: PinState) -> Status {
        self.lines.drive(line, state);
        match state {
            PinState::High => Status::DrivenHigh,
            PinState::Low => Status::DrivenLow,
        }
    }

    /// Release `line` to high impedance
    pub fn set_high_impedance(&mut self, line: AuxSelect) -> Status {
        self.lines.set_input(line);
        Status::HighImpedanceSet
    }

    /// Access the underlying line driver
    pub fn lines(&self) -> &L {
        &self.lines
    }

    /// Give back the line driver
    pub fn release(self) -> L {
        self.lines
    }
}
