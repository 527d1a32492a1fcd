//! Status vocabulary
//!
//! Every user-visible outcome of an aux pin operation maps to one [`Status`].
//! Operations push them to a [`StatusSink`] in the order they happen; the
//! sink decides how to render them.

use core::fmt;

use crate::measurement::Measurement;

/// Status codes emitted by aux pin operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Pulse output stopped, pin detached
    PwmDisabled,
    /// PWM output running
    PwmEnabled,
    /// Servo pulse train running
    ServoEnabled,
    /// Frequency measurement started
    FrequencyCounting,
    /// No edges seen during the measurement
    FrequencyTooLow,
    /// Measurement refused because a pulse output is active
    FrequencyModeConflict,
    /// Measurement switching to a finer method
    AutorangeNotice,
    /// Line released to high impedance
    HighImpedanceSet,
    /// Line driven high
    DrivenHigh,
    /// Line driven low
    DrivenLow,
}

// Wire format values
const STATUS_PWM_DISABLED: u8 = 0x01;
const STATUS_PWM_ENABLED: u8 = 0x02;
const STATUS_SERVO_ENABLED: u8 = 0x03;
const STATUS_FREQUENCY_COUNTING: u8 = 0x10;
const STATUS_FREQUENCY_TOO_LOW: u8 = 0x11;
const STATUS_FREQUENCY_MODE_CONFLICT: u8 = 0x12;
const STATUS_AUTORANGE_NOTICE: u8 = 0x13;
const STATUS_HIGH_IMPEDANCE_SET: u8 = 0x20;
const STATUS_DRIVEN_HIGH: u8 = 0x21;
const STATUS_DRIVEN_LOW: u8 = 0x22;

impl Status {
    /// Parse a status from its code byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            STATUS_PWM_DISABLED => Some(Status::PwmDisabled),
            STATUS_PWM_ENABLED => Some(Status::PwmEnabled),
            STATUS_SERVO_ENABLED => Some(Status::ServoEnabled),
            STATUS_FREQUENCY_COUNTING => Some(Status::FrequencyCounting),
            STATUS_FREQUENCY_TOO_LOW => Some(Status::FrequencyTooLow),
            STATUS_FREQUENCY_MODE_CONFLICT => Some(Status::FrequencyModeConflict),
            STATUS_AUTORANGE_NOTICE => Some(Status::AutorangeNotice),
            STATUS_HIGH_IMPEDANCE_SET => Some(Status::HighImpedanceSet),
            STATUS_DRIVEN_HIGH => Some(Status::DrivenHigh),
            STATUS_DRIVEN_LOW => Some(Status::DrivenLow),
            _ => None,
        }
    }

    /// Convert to code byte
    pub fn to_byte(self) -> u8 {
        match self {
            Status::PwmDisabled => STATUS_PWM_DISABLED,
            Status::PwmEnabled => STATUS_PWM_ENABLED,
            Status::ServoEnabled => STATUS_SERVO_ENABLED,
            Status::FrequencyCounting => STATUS_FREQUENCY_COUNTING,
            Status::FrequencyTooLow => STATUS_FREQUENCY_TOO_LOW,
            Status::FrequencyModeConflict => STATUS_FREQUENCY_MODE_CONFLICT,
            Status::AutorangeNotice => STATUS_AUTORANGE_NOTICE,
            Status::HighImpedanceSet => STATUS_HIGH_IMPEDANCE_SET,
            Status::DrivenHigh => STATUS_DRIVEN_HIGH,
            Status::DrivenLow => STATUS_DRIVEN_LOW,
        }
    }

    /// Human-readable message text
    pub fn message(self) -> &'static str {
        match self {
            Status::PwmDisabled => "PWM disabled",
            Status::PwmEnabled => "PWM active",
            Status::ServoEnabled => "Servo active",
            Status::FrequencyCounting => "Frequency on the AUX pin:",
            Status::FrequencyTooLow => "Frequency too low or no signal",
            Status::FrequencyModeConflict => "PWM active, stop it before measuring",
            Status::AutorangeNotice => "Autorange",
            Status::HighImpedanceSet => "AUX input/high impedance",
            Status::DrivenHigh => "AUX high",
            Status::DrivenLow => "AUX low",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Text-output collaborator
pub trait StatusSink {
    /// Report a status code
    fn status(&mut self, status: Status);

    /// Report a completed frequency measurement
    fn measurement(&mut self, measurement: &Measurement);
}
