//! Pulse generator
//!
//! Derives prescaler, period and compare values for a PWM or servo pulse
//! train and programs them into the compare output. PWM and servo share the
//! same engine; they only differ in how [`PulseTiming`] is computed.
//!
//! # Frequency unit
//!
//! Band divisors are the tick rate seen by the period register expressed
//! per millisecond (16 MHz / 1000 at 1:1), so the requested frequency is in
//! kHz: 1000 kHz at 1:1 gives `16000 / 1000 - 1 = 15`, i.e. 16 ticks.

use auxpin_hal::{PinRoute, Prescaler, PulseOutput};

use crate::config::ServoConfig;

/// A prescaler ratio with its frequency divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PrescalerBand {
    /// Generator timer prescaler
    pub prescaler: Prescaler,
    /// Divisor turning a frequency into a period
    pub divisor: u16,
}

impl PrescalerBand {
    /// 1:256, for f < 4
    pub const DIV_256: Self = Self {
        prescaler: Prescaler::Div256,
        divisor: 62,
    };
    /// 1:64, for 4 ≤ f < 31
    pub const DIV_64: Self = Self {
        prescaler: Prescaler::Div64,
        divisor: 250,
    };
    /// 1:8, for 31 ≤ f < 245
    pub const DIV_8: Self = Self {
        prescaler: Prescaler::Div8,
        divisor: 2000,
    };
    /// 1:1, for f ≥ 245
    pub const DIV_1: Self = Self {
        prescaler: Prescaler::Div1,
        divisor: 16000,
    };

    /// Pick the band for a target frequency
    ///
    /// Boundaries are strict less-than. `frequency` must be non-zero.
    pub fn select(frequency: u16) -> Self {
        if frequency < 4 {
            Self::DIV_256
        } else if frequency < 31 {
            Self::DIV_64
        } else if frequency < 245 {
            Self::DIV_8
        } else {
            Self::DIV_1
        }
    }

    /// Period register value for `frequency` in this band
    pub fn period_for(self, frequency: u16) -> u16 {
        (self.divisor / frequency).saturating_sub(1)
    }
}

/// Everything needed to program the compare output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTiming {
    /// Generator timer prescaler
    pub prescaler: Prescaler,
    /// Period register value
    pub period: u16,
    /// Compare register value (high time in ticks)
    pub duty_ticks: u16,
}

impl PulseTiming {
    /// PWM timing for `frequency_khz` at `duty_percent`
    ///
    /// Duty is clamped to 100; 0 is fully off, 100 fully on. A frame is
    /// `period + 1` counts, so full duty loads one past the period. Returns
    /// `None` for a zero frequency.
    pub fn pwm(frequency_khz: u16, duty_percent: u8) -> Option<Self> {
        if frequency_khz == 0 {
            return None;
        }

        let band = PrescalerBand::select(frequency_khz);
        let period = band.period_for(frequency_khz);
        let duty_ticks = match duty_percent {
            100.. => period.saturating_add(1),
            duty => (period as u32 * duty as u32 / 100) as u16,
        };

        trace!(
            "pwm {} kHz: prescaler 1:{} period {} duty {}",
            frequency_khz,
            band.prescaler.ratio(),
            period,
            duty_ticks
        );

        Some(Self {
            prescaler: band.prescaler,
            period,
            duty_ticks,
        })
    }

    /// Servo timing for `angle` degrees
    ///
    /// One 20 ms frame at 1:256; 0–180° maps onto roughly 1–2 ms of high
    /// time. Angles above the configured maximum are clamped.
    pub fn servo(angle: u8, config: &ServoConfig) -> Self {
        let angle = angle.min(config.max_angle) as u32;
        let period = config.frame_period;
        let scaled = period as u32 * angle / config.angle_scale.max(1) as u32;
        let duty_ticks = (scaled + config.min_pulse as u32).min(u16::MAX as u32) as u16;

        trace!("servo {} deg: period {} duty {}", angle, period, duty_ticks);

        Self {
            prescaler: Prescaler::Div256,
            period,
            duty_ticks,
        }
    }

    /// Program the timing into the compare output and start it
    ///
    /// The caller is responsible for having reset the timer block.
    pub fn apply<T: PulseOutput + ?Sized>(&self, timers: &mut T) {
        timers.set_prescaler(self.prescaler);
        timers.set_period(self.period);
        timers.route(PinRoute::CompareOutput);
        timers.set_compare(self.duty_ticks);
        timers.start_output();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTimers;
    use proptest::prelude::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(PrescalerBand::select(1), PrescalerBand::DIV_256);
        assert_eq!(PrescalerBand::select(3), PrescalerBand::DIV_256);
        assert_eq!(PrescalerBand::select(4), PrescalerBand::DIV_64);
        assert_eq!(PrescalerBand::select(30), PrescalerBand::DIV_64);
        assert_eq!(PrescalerBand::select(31), PrescalerBand::DIV_8);
        assert_eq!(PrescalerBand::select(244), PrescalerBand::DIV_8);
        assert_eq!(PrescalerBand::select(245), PrescalerBand::DIV_1);
        assert_eq!(PrescalerBand::select(u16::MAX), PrescalerBand::DIV_1);
    }

    #[test]
    fn test_pwm_1000_at_50_percent() {
        let timing = PulseTiming::pwm(1000, 50).unwrap();
        assert_eq!(timing.prescaler, Prescaler::Div1);
        assert_eq!(timing.period, 15);
        assert_eq!(timing.duty_ticks, 7);
    }

    #[test]
    fn test_pwm_zero_frequency_is_disabled() {
        assert_eq!(PulseTiming::pwm(0, 50), None);
    }

    #[test]
    fn test_pwm_duty_extremes() {
        let off = PulseTiming::pwm(50, 0).unwrap();
        assert_eq!(off.duty_ticks, 0);

        let on = PulseTiming::pwm(50, 100).unwrap();
        assert_eq!(on.duty_ticks, on.period + 1);

        let clamped = PulseTiming::pwm(50, 250).unwrap();
        assert_eq!(clamped, on);
    }

    #[test]
    fn test_full_duty_holds_output_high() {
        let mut timers = FakeTimers::default();
        PulseTiming::pwm(1000, 100).unwrap().apply(&mut timers);
        assert_eq!(timers.frame_ticks(), 16);
        assert_eq!(timers.high_ticks(), 16);

        PulseTiming::pwm(1000, 0).unwrap().apply(&mut timers);
        assert_eq!(timers.high_ticks(), 0);

        PulseTiming::pwm(1000, 99).unwrap().apply(&mut timers);
        assert!(timers.high_ticks() < timers.frame_ticks());
    }

    #[test]
    fn test_pwm_large_period_duty_does_not_overflow() {
        // 16000 / 245 - 1 = 64
        let timing = PulseTiming::pwm(245, 99).unwrap();
        assert_eq!(timing.period, 64);
        assert_eq!(timing.duty_ticks, 63);
    }

    #[test]
    fn test_servo_range() {
        let config = ServoConfig::default();

        let zero = PulseTiming::servo(0, &config);
        assert_eq!(zero.prescaler, Prescaler::Div256);
        assert_eq!(zero.period, 1250);
        assert_eq!(zero.duty_ticks, 62);

        let mid = PulseTiming::servo(90, &config);
        assert_eq!(mid.duty_ticks, (1250u32 * 90 / 3500 + 62) as u16);

        let max = PulseTiming::servo(180, &config);
        assert_eq!(max.duty_ticks, 64 + 62);
    }

    #[test]
    fn test_servo_clamps_angle() {
        let config = ServoConfig::default();
        assert_eq!(
            PulseTiming::servo(255, &config),
            PulseTiming::servo(180, &config)
        );
    }

    #[test]
    fn test_apply_programs_output() {
        let mut timers = FakeTimers::default();
        PulseTiming::pwm(1000, 50).unwrap().apply(&mut timers);

        assert_eq!(timers.route, PinRoute::CompareOutput);
        assert_eq!(timers.prescaler, Some(Prescaler::Div1));
        assert_eq!(timers.period, 15);
        assert_eq!(timers.compare, 7);
        assert!(timers.output_running);
    }

    proptest! {
        #[test]
        fn prop_band_matches_ranges(f in 1u16..=u16::MAX) {
            let band = PrescalerBand::select(f);
            let expected = match f {
                1..=3 => PrescalerBand::DIV_256,
                4..=30 => PrescalerBand::DIV_64,
                31..=244 => PrescalerBand::DIV_8,
                _ => PrescalerBand::DIV_1,
            };
            prop_assert_eq!(band, expected);
        }

        #[test]
        fn prop_duty_fits_frame(f in 1u16..=u16::MAX, duty in 0u8..=100) {
            let timing = PulseTiming::pwm(f, duty).unwrap();
            prop_assert!(timing.duty_ticks <= timing.period + 1);
            prop_assert_eq!(timing.duty_ticks == timing.period + 1, duty == 100);
        }
    }
}
