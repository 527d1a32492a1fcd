//! Mode controller
//!
//! Owns the aux pin's mode and the shared timer block, and is the only way
//! in for callers. Inputs are expected to be validated already (frequency
//! and duty within the ranges offered to the user, servo angle 0–180).
//!
//! Every timed operation starts from a fully reset timer block, so nothing
//! configured by a previous mode leaks into the next one.

use core::num::NonZeroU16;

use auxpin_hal::gpio::PinState;
use auxpin_hal::{AuxLines, AuxSelect, EdgeCapture, EdgeCounter, PinRoute, PollClock, PulseOutput};

use super::machine::{ModeEvent, PinMode};
use crate::average::average_period;
use crate::config::{MeasureConfig, ServoConfig};
use crate::decimal::DecimalReading;
use crate::digital::DigitalIo;
use crate::error::AuxError;
use crate::gate::count_edges;
use crate::measurement::Measurement;
use crate::pulse::PulseTiming;
use crate::status::{Status, StatusSink};

/// Last requested pulse output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseConfig {
    /// PWM frequency in kHz (0 = no PWM in force)
    pub frequency_khz: u16,
    /// Duty cycle in percent (0-100)
    pub duty_percent: u8,
    /// Servo angle, while a servo train runs instead of PWM
    pub servo_angle: Option<u8>,
}

impl PulseConfig {
    /// Check if a PWM or servo output was requested
    pub fn is_enabled(&self) -> bool {
        self.frequency_khz != 0 || self.servo_angle.is_some()
    }
}

/// Outcome of a pulse setup call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseState {
    /// Output stopped and pin detached
    Disabled,
    /// Output running with this timing
    Enabled(PulseTiming),
}

/// Supplier of servo angles for a repeat session
pub trait AngleSource {
    /// Next angle in degrees
    ///
    /// A negative angle ends the session, as does `None`.
    fn next_angle(&mut self) -> Option<i16>;
}

/// Register programming for a resting mode
enum PinSetup {
    Detached,
    Pulse(PulseTiming),
}

/// Aux pin mode controller
pub struct AuxController<T, L, C, S> {
    timers: T,
    io: DigitalIo<L>,
    timed_line: AuxSelect,
    clock: C,
    sink: S,
    mode: PinMode,
    pulse: PulseConfig,
    measure: MeasureConfig,
    servo: ServoConfig,
}

impl<T, L, C, S> AuxController<T, L, C, S>
where
    T: PulseOutput + EdgeCounter + EdgeCapture,
    L: AuxLines,
    C: PollClock,
    S: StatusSink,
{
    /// Take the peripherals, leaving the pin detached in I/O mode
    pub fn new(timers: T, lines: L, clock: C, sink: S) -> Self {
        let mut controller = Self {
            timers,
            io: DigitalIo::new(lines),
            timed_line: AuxSelect::Aux0,
            clock,
            sink,
            mode: PinMode::Io,
            pulse: PulseConfig::default(),
            measure: MeasureConfig::default(),
            servo: ServoConfig::default(),
        };
        controller.program(PinSetup::Detached);
        controller
    }

    /// Replace the measurement and servo parameters
    pub fn with_config(mut self, measure: MeasureConfig, servo: ServoConfig) -> Self {
        self.measure = measure;
        self.servo = servo;
        self
    }

    /// Line the timer functions are wired to (AUX0 unless changed)
    pub fn with_timed_line(mut self, line: AuxSelect) -> Self {
        self.timed_line = line;
        self
    }

    /// Current mode
    pub fn mode(&self) -> PinMode {
        self.mode
    }

    /// Last requested pulse output
    pub fn pulse_config(&self) -> PulseConfig {
        self.pulse
    }

    /// Timer block, for inspection
    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Status sink, for inspection
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the peripherals
    pub fn release(self) -> (T, L, C, S) {
        (self.timers, self.io.release(), self.clock, self.sink)
    }

    /// Start a PWM output, or stop it with a zero frequency
    pub fn configure_pulse(&mut self, frequency_khz: u16, duty_percent: u8) -> PulseState {
        let Some(timing) = PulseTiming::pwm(frequency_khz, duty_percent) else {
            return self.disable_pulse();
        };

        self.pulse = PulseConfig {
            frequency_khz,
            duty_percent: duty_percent.min(100),
            servo_angle: None,
        };
        self.program(PinSetup::Pulse(timing));
        self.apply(ModeEvent::PulseEnabled);
        self.sink.status(Status::PwmEnabled);
        PulseState::Enabled(timing)
    }

    /// Change the duty cycle, keeping the last requested frequency
    ///
    /// A running servo train has no duty of its own and is left in place.
    pub fn update_duty_cycle(&mut self, duty_percent: u8) -> PulseState {
        if let Some(angle) = self.pulse.servo_angle {
            warn!("duty update ignored while servo runs at {} deg", angle);
            return PulseState::Enabled(PulseTiming::servo(angle, &self.servo));
        }
        self.configure_pulse(self.pulse.frequency_khz, duty_percent)
    }

    /// Start a 50 Hz servo pulse train for `angle` degrees
    ///
    /// Any PWM setting stops being in force; its duty is kept.
    pub fn configure_servo(&mut self, angle: u8) -> PulseTiming {
        let timing = PulseTiming::servo(angle, &self.servo);
        self.pulse.frequency_khz = 0;
        self.pulse.servo_angle = Some(angle.min(self.servo.max_angle));
        self.program(PinSetup::Pulse(timing));
        self.apply(ModeEvent::PulseEnabled);
        self.sink.status(Status::ServoEnabled);
        timing
    }

    /// Reposition the servo for each angle `source` supplies
    ///
    /// Ends on a negative angle, when the source runs dry, or after
    /// `max_steps` angles. Returns how many angles were applied.
    pub fn run_servo_session<A: AngleSource + ?Sized>(
        &mut self,
        source: &mut A,
        max_steps: u16,
    ) -> u16 {
        let mut applied = 0;
        while applied < max_steps {
            let Some(angle) = source.next_angle() else {
                break;
            };
            if angle < 0 {
                debug!("servo session ended by sentinel after {} angles", applied);
                break;
            }
            let max = self.servo.max_angle;
            let angle = u8::try_from(angle.min(max as i16)).unwrap_or(max);
            self.configure_servo(angle);
            applied += 1;
        }
        applied
    }

    /// Measure the pin's frequency
    ///
    /// Counts edges for one second (two when auto-ranging). Below 4 kHz the
    /// coarse count is refined by averaging that many edge intervals, which
    /// takes about another second.
    pub fn measure_frequency(&mut self) -> Result<Measurement, AuxError> {
        if !self.mode.measurement_allowed() {
            warn!("frequency measurement refused in mode {}", self.mode);
            self.sink.status(Status::FrequencyModeConflict);
            return Err(AuxError::ModeConflict);
        }

        self.sink.status(Status::FrequencyCounting);
        self.release_timed_line();
        self.apply(ModeEvent::MeasureStart);
        let result = self.run_measurement();
        self.apply(ModeEvent::MeasureEnd);

        match &result {
            Ok(measurement) => self.sink.measurement(measurement),
            Err(_) => self.sink.status(Status::FrequencyTooLow),
        }
        result
    }

    /// Gate-count the pin's frequency in whole Hz
    ///
    /// Quiet variant for use by other modes: lower autorange threshold, no
    /// averaging, no status output. A missing signal reads as 0.
    pub fn measure_raw_frequency(&mut self) -> Result<u32, AuxError> {
        if !self.mode.measurement_allowed() {
            warn!("raw frequency measurement refused in mode {}", self.mode);
            return Err(AuxError::ModeConflict);
        }

        let config = MeasureConfig {
            autorange_threshold: MeasureConfig::RAW.autorange_threshold,
            ..self.measure
        };

        self.release_timed_line();
        self.apply(ModeEvent::MeasureStart);
        let reading = count_edges(&mut self.timers, &mut self.clock, &config, || {});
        self.apply(ModeEvent::MeasureEnd);
        Ok(reading.hz)
    }

    /// Switch `line` to input and read it
    pub fn read_pin(&mut self, line: AuxSelect) -> PinState {
        self.io.read(line)
    }

    /// Drive `line` high or low
    pub fn drive_pin(&mut self, line: AuxSelect, state: PinState) -> Status {
        let status = self.io.drive(line, state);
        self.sink.status(status);
        status
    }

    /// Release `line` to high impedance
    pub fn set_high_impedance(&mut self, line: AuxSelect) -> Status {
        let status = self.io.set_high_impedance(line);
        self.sink.status(status);
        status
    }

    fn disable_pulse(&mut self) -> PulseState {
        self.program(PinSetup::Detached);
        self.pulse.frequency_khz = 0;
        self.pulse.servo_angle = None;
        self.apply(ModeEvent::PulseDisabled);
        self.sink.status(Status::PwmDisabled);
        PulseState::Disabled
    }

    /// Counter and capture inputs need the line undriven
    fn release_timed_line(&mut self) {
        self.io.set_high_impedance(self.timed_line);
    }

    fn run_measurement(&mut self) -> Result<Measurement, AuxError> {
        let Self {
            timers,
            clock,
            sink,
            measure,
            ..
        } = self;

        let gate = count_edges(timers, clock, measure, || sink.status(Status::AutorangeNotice));
        if gate.hz > measure.averaging_ceiling_hz {
            return Ok(Measurement::Counted(gate.hz));
        }

        let count = NonZeroU16::new(u16::try_from(gate.hz).unwrap_or(u16::MAX))
            .ok_or(AuxError::SignalAbsent)?;

        sink.status(Status::AutorangeNotice);
        let period = average_period(timers, clock, count);
        DecimalReading::from_period(period)
            .map(Measurement::Averaged)
            .ok_or(AuxError::SignalAbsent)
    }

    /// The single place timer registers are programmed for a resting mode
    fn program(&mut self, setup: PinSetup) {
        self.timers.reset();
        match setup {
            PinSetup::Detached => self.timers.route(PinRoute::Detached),
            PinSetup::Pulse(timing) => timing.apply(&mut self.timers),
        }
    }

    fn apply(&mut self, event: ModeEvent) {
        let next = self.mode.transition(event);
        if next != self.mode {
            debug!("aux mode {} -> {}", self.mode, next);
        }
        self.mode = next;
    }
}
