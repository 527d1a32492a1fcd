//! Auxiliary pin Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the auxiliary pin logic needs.
//! Chip-specific crates implement them on real peripherals; the core crate
//! implements them on fakes for host testing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  auxpin-core (mode controller, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  auxpin-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chip HAL (timers, input capture, PPS)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::AuxLines`] - Direct drive/read/high-impedance of the aux lines
//! - [`timer::TimerBlock`] - Reset and pin routing of the shared timer block
//! - [`timer::PulseOutput`] - Compare-output pulse generation
//! - [`timer::EdgeCounter`] - Gated edge counting
//! - [`timer::EdgeCapture`] - Paired 16-bit edge timestamp capture
//! - [`clock::PollClock`] - Pacing of busy-wait loops

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use clock::{PollClock, SpinClock};
pub use gpio::{AuxLines, AuxSelect};
pub use timer::{EdgeCapture, EdgeCounter, EdgeSample, PinRoute, Prescaler, PulseOutput, TimerBlock};

/// Timer tick source frequency in Hz
pub const TICK_HZ: u32 = 16_000_000;
