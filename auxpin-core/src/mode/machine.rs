//! Mode transition table

/// Operating mode of the aux pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Plain digital I/O (initial state)
    #[default]
    Io,
    /// Measurement in progress; only exists for the duration of the call
    Frequency,
    /// PWM or servo pulse output running
    Pwm,
}

/// Inputs to the mode transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    /// A pulse output was programmed
    PulseEnabled,
    /// The pulse output was stopped
    PulseDisabled,
    /// A frequency measurement wants the timers
    MeasureStart,
    /// The frequency measurement finished
    MeasureEnd,
}

impl PinMode {
    /// Check if a frequency measurement may start
    pub fn measurement_allowed(&self) -> bool {
        matches!(self, PinMode::Io)
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: ModeEvent) -> Self {
        use ModeEvent::*;
        use PinMode::*;

        match (self, event) {
            (Io, PulseEnabled) | (Pwm, PulseEnabled) => Pwm,
            (_, PulseDisabled) => Io,

            (Io, MeasureStart) => Frequency,
            // Refused: the pulse keeps the timers
            (Pwm, MeasureStart) => Pwm,
            (Frequency, MeasureEnd) => Io,

            // Default: stay in current mode
            _ => self,
        }
    }
}
