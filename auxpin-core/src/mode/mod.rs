//! Aux pin mode control
//!
//! The pin is in exactly one mode at a time. Frequency measurement is a
//! transient excursion out of I/O mode, never a resting state.

pub mod controller;
pub mod machine;

pub use controller::{AngleSource, AuxController, PulseConfig, PulseState};
pub use machine::{ModeEvent, PinMode};
