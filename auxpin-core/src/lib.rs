//! Board-agnostic logic for the multi-purpose auxiliary pin
//!
//! The aux pin works as plain digital I/O, as a frequency measurement input,
//! or as a PWM/servo pulse output. This crate holds everything that does not
//! depend on a specific chip:
//!
//! - Mode controller and its transition table
//! - Pulse generator (prescaler band selection, PWM and servo timing)
//! - Gate counter with prescaler auto-ranging
//! - Period averager for low frequencies
//! - Banded decimal formatting of averaged periods
//! - Digital I/O pass-through
//!
//! Hardware is reached only through the `auxpin-hal` traits, so the whole
//! crate runs on the host against fake peripherals.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod average;
pub mod config;
pub mod decimal;
pub mod digital;
pub mod error;
pub mod gate;
pub mod guard;
pub mod measurement;
pub mod mode;
pub mod pulse;
pub mod status;
pub mod wait;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{MeasureConfig, ServoConfig};
pub use error::AuxError;
pub use measurement::Measurement;
pub use mode::{AngleSource, AuxController, PinMode, PulseConfig, PulseState};
pub use status::{Status, StatusSink};
