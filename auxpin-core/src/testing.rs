//! Fake peripherals for host tests

use std::collections::VecDeque;
use std::vec::Vec;

use auxpin_hal::gpio::PinState;
use auxpin_hal::{
    AuxLines, AuxSelect, EdgeCapture, EdgeCounter, EdgeSample, PinRoute, PollClock, Prescaler,
    PulseOutput, TimerBlock, TICK_HZ,
};

use crate::measurement::Measurement;
use crate::status::{Status, StatusSink};

/// Timer block driven by a simulated input signal
///
/// The capture FIFO survives `reset()`, like the hardware buffer does, so
/// samples left behind by an earlier activation show up as stale data.
#[derive(Debug, Default)]
pub struct FakeTimers {
    pub route: PinRoute,
    pub resets: u32,

    pub prescaler: Option<Prescaler>,
    pub period: u16,
    pub compare: u16,
    pub output_running: bool,

    /// Frequency of the simulated input signal
    pub signal_hz: u32,
    /// Polls of the expiry flag before the gate elapses
    pub gate_polls: u32,
    pub gate_prescaler: Option<Prescaler>,
    pub gate_ticks: u32,
    pub gate_running: bool,
    /// Prescaler of every gate started, in order
    pub gates: Vec<Prescaler>,
    gate_polls_left: u32,
    counter: u32,

    pub capture_running: bool,
    /// Edges still to arrive on the pin
    pub edges: VecDeque<EdgeSample>,
    /// Polls of the buffer flag before each edge is latched
    pub edge_latency: u32,
    pub captures_read: u32,
    fifo: VecDeque<EdgeSample>,
    latency_left: u32,
    idle_polled: bool,
}

impl FakeTimers {
    /// Timer block seeing a steady signal of `signal_hz`
    pub fn with_signal(signal_hz: u32) -> Self {
        Self {
            signal_hz,
            gate_polls: 3,
            ..Self::default()
        }
    }

    /// Queue edges every `interval` ticks starting at `start`
    pub fn push_edges(&mut self, start: u32, interval: u32, count: usize) {
        let mut ticks = start;
        for _ in 0..count {
            self.edges.push_back(EdgeSample::from_ticks(ticks));
            ticks = ticks.wrapping_add(interval);
        }
    }

    /// Leave samples in the capture buffer as if from an earlier run
    pub fn leave_stale(&mut self, ticks: &[u32]) {
        for &t in ticks {
            self.fifo.push_back(EdgeSample::from_ticks(t));
        }
    }

    /// Everything stopped and unconfigured
    pub fn is_neutral(&self) -> bool {
        !self.output_running
            && !self.gate_running
            && !self.capture_running
            && self.prescaler.is_none()
            && self.gate_prescaler.is_none()
    }

    /// Counts in one output frame
    pub fn frame_ticks(&self) -> u32 {
        self.period as u32 + 1
    }

    /// Counts per frame the compare output spends high
    pub fn high_ticks(&self) -> u32 {
        (0..self.frame_ticks())
            .filter(|&count| count < self.compare as u32)
            .count() as u32
    }

    fn gated_count(&self) -> u32 {
        let ratio = self.gate_prescaler.map_or(1, Prescaler::ratio) as u64;
        let edges = self.signal_hz as u64 * self.gate_ticks as u64 / TICK_HZ as u64;
        (edges / ratio).min(u32::MAX as u64) as u32
    }
}

impl TimerBlock for FakeTimers {
    fn reset(&mut self) {
        self.resets += 1;
        self.prescaler = None;
        self.period = 0;
        self.compare = 0;
        self.output_running = false;
        self.gate_prescaler = None;
        self.gate_ticks = 0;
        self.gate_running = false;
        self.counter = 0;
        self.capture_running = false;
    }

    fn route(&mut self, route: PinRoute) {
        self.route = route;
    }
}

impl PulseOutput for FakeTimers {
    fn set_prescaler(&mut self, prescaler: Prescaler) {
        self.prescaler = Some(prescaler);
    }

    fn set_period(&mut self, ticks: u16) {
        self.period = ticks;
    }

    fn set_compare(&mut self, ticks: u16) {
        self.compare = ticks;
    }

    fn start_output(&mut self) {
        self.output_running = true;
    }
}

impl EdgeCounter for FakeTimers {
    fn arm_gate(&mut self, prescaler: Prescaler, gate_ticks: u32) {
        self.gate_prescaler = Some(prescaler);
        self.gate_ticks = gate_ticks;
        self.gate_running = false;
        self.counter = 0;
        self.gate_polls_left = self.gate_polls;
    }

    fn start_gate(&mut self) {
        self.gate_running = true;
        self.gates.push(self.gate_prescaler.unwrap_or_default());
    }

    fn stop_gate(&mut self) {
        if self.gate_running {
            self.counter = self.gated_count();
        }
        self.gate_running = false;
    }

    fn gate_expired(&mut self) -> bool {
        if !self.gate_running {
            return false;
        }
        if self.gate_polls_left > 0 {
            self.gate_polls_left -= 1;
            return false;
        }
        true
    }

    fn read_counter(&mut self) -> u32 {
        self.counter
    }
}

impl EdgeCapture for FakeTimers {
    fn start_capture(&mut self) {
        self.capture_running = true;
        self.latency_left = self.edge_latency;
        self.idle_polled = false;
    }

    fn capture_pending(&mut self) -> bool {
        if !self.fifo.is_empty() {
            return true;
        }
        if !self.capture_running || self.edges.is_empty() {
            return false;
        }
        // An edge never lands on the first poll after a read, so a drain
        // loop always finds the buffer empty once the stale data is gone.
        if self.latency_left > 0 || !self.idle_polled {
            self.latency_left = self.latency_left.saturating_sub(1);
            self.idle_polled = true;
            return false;
        }
        if let Some(edge) = self.edges.pop_front() {
            self.fifo.push_back(edge);
        }
        true
    }

    fn read_capture(&mut self) -> EdgeSample {
        self.captures_read += 1;
        self.latency_left = self.edge_latency;
        self.idle_polled = false;
        self.fifo.pop_front().unwrap_or_default()
    }
}

/// Poll clock that only counts
#[derive(Debug, Default)]
pub struct CountingClock {
    pub relaxed: u32,
}

impl PollClock for CountingClock {
    fn relax(&mut self) {
        self.relaxed += 1;
    }
}

/// Direction/latch state of one fake line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Input,
    Output(PinState),
}

/// Four aux lines with settable input levels
#[derive(Debug)]
pub struct FakeLines {
    pub state: [LineState; 4],
    pub level: [PinState; 4],
    pub settles: u32,
}

impl Default for FakeLines {
    fn default() -> Self {
        Self {
            state: [LineState::Input; 4],
            level: [PinState::Low; 4],
            settles: 0,
        }
    }
}

impl FakeLines {
    pub fn line(&self, line: AuxSelect) -> LineState {
        self.state[line.as_u8() as usize]
    }
}

impl AuxLines for FakeLines {
    fn set_input(&mut self, line: AuxSelect) {
        self.state[line.as_u8() as usize] = LineState::Input;
    }

    fn drive(&mut self, line: AuxSelect, state: PinState) {
        self.state[line.as_u8() as usize] = LineState::Output(state);
    }

    fn sample(&mut self, line: AuxSelect) -> PinState {
        let index = line.as_u8() as usize;
        match self.state[index] {
            LineState::Input => self.level[index],
            LineState::Output(state) => state,
        }
    }

    fn settle(&mut self) {
        self.settles += 1;
    }
}

/// Sink remembering everything it was given
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub statuses: Vec<Status>,
    pub measurements: Vec<Measurement>,
}

impl StatusSink for RecordingSink {
    fn status(&mut self, status: Status) {
        self.statuses.push(status);
    }

    fn measurement(&mut self, measurement: &Measurement) {
        self.measurements.push(*measurement);
    }
}
