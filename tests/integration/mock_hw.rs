//! Mock hardware for integration tests.
//!
//! Scripted climate and raw-count streams feed the supervisor; every
//! actuator call, sleep and event is recorded so tests can assert on the
//! full history without touching real GPIO.

use std::collections::VecDeque;

use filadry::app::events::{AppEvent, TelemetryData};
use filadry::app::ports::{ActuatorPort, ClimatePort, ClockPort, EventSink, ScalePort};
use filadry::error::{BusError, ClimateError, LoadCellError};
use filadry::sensors::ClimateReading;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Heater(bool),
    Fan(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    climate: VecDeque<Result<ClimateReading, ClimateError>>,
    raw: VecDeque<Result<i32, LoadCellError>>,
    /// Returned once the raw script runs dry.
    pub idle_raw: i32,
    pub calls: Vec<ActuatorCall>,
    /// Heater line refuses to go high (relay driver fault).
    pub heater_stuck_off: bool,
    heater: bool,
    fan: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            climate: VecDeque::new(),
            raw: VecDeque::new(),
            idle_raw: 0,
            calls: Vec::new(),
            heater_stuck_off: false,
            heater: false,
            fan: false,
        }
    }

    /// Script one good reading per temperature (humidity fixed at 40 %).
    pub fn with_temps(temps: &[f32]) -> Self {
        let mut hw = Self::new();
        for &t in temps {
            hw.push_temp(t);
        }
        hw
    }

    pub fn push_temp(&mut self, t: f32) {
        self.climate
            .push_back(Ok(ClimateReading::new(t, 40.0).expect("scripted reading in range")));
    }

    pub fn push_climate_err(&mut self, e: ClimateError) {
        self.climate.push_back(Err(e));
    }

    pub fn push_raw(&mut self, raw: i32) {
        self.raw.push_back(Ok(raw));
    }

    pub fn push_raw_err(&mut self, e: LoadCellError) {
        self.raw.push_back(Err(e));
    }

    pub fn heater_on(&self) -> bool {
        self.heater
    }

    pub fn fan_on(&self) -> bool {
        self.fan
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ClimatePort for MockHardware {
    fn read_climate(&mut self) -> Result<ClimateReading, ClimateError> {
        self.climate
            .pop_front()
            .unwrap_or(Err(ClimateError::Bus(BusError::Unavailable)))
    }
}

impl ScalePort for MockHardware {
    fn read_raw(&mut self) -> Result<i32, LoadCellError> {
        self.raw.pop_front().unwrap_or(Ok(self.idle_raw))
    }
}

impl ActuatorPort for MockHardware {
    fn set_heater(&mut self, on: bool) {
        self.heater = on && !self.heater_stuck_off;
        self.calls.push(ActuatorCall::Heater(on));
    }

    fn set_fan(&mut self, on: bool) {
        self.fan = on;
        self.calls.push(ActuatorCall::Fan(on));
    }

    fn is_heater_on(&self) -> bool {
        self.heater
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Records every sleep instead of blocking.
#[derive(Default)]
pub struct MockClock {
    pub sleeps: Vec<u32>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_slept_ms(&self) -> u64 {
        self.sleeps.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl ClockPort for MockClock {
    fn sleep_ms(&mut self, ms: u32) {
        self.sleeps.push(ms);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn telemetry(&self) -> Vec<TelemetryData> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Telemetry(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    /// Rendered status lines, exactly as the log sink prints them.
    pub fn telemetry_lines(&self) -> Vec<String> {
        self.telemetry().iter().map(ToString::to_string).collect()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn take(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
