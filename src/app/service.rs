//! Control supervisor, the hexagonal core.
//!
//! [`Supervisor`] owns the thermostat latch, the safety supervisor and the
//! learned tare.  All I/O flows through port traits injected at call
//! sites, so every cycle can be replayed against scripted sensor streams.
//!
//! ```text
//!  ClimatePort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!   ScalePort  ──▶ │        Supervisor         │
//! ActuatorPort ◀── │  Safety · Thermostat · Fan │ ──▶ ClockPort
//!                  └──────────────────────────┘
//! ```
//!
//! One cycle:
//!
//! 1. read climate; safety evaluates the result
//! 2. sense loss → heater off, fan on, back off, done
//! 3. over-temperature → heater off (dominates the thermostat)
//!    otherwise → thermostat decides
//! 4. fan = heater on || T > fan-assist
//! 5. drive both lines, read weight, emit telemetry, sleep one period

use log::{debug, info, warn};

use crate::config::{MAX_TARE_SAMPLES, SystemConfig};
use crate::control::{HeaterState, Thermostat, fan_demand};
use crate::drivers::watchdog::Watchdog;
use crate::error::{LoadCellError, SafetyFault};
use crate::safety::SafetySupervisor;
use crate::sensors::{ClimateReading, TareOffset, WeightCalibration};

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, ClimatePort, ClockPort, EventSink, ScalePort};

/// Tare attempts made by [`Supervisor::bootstrap`] before giving up.
pub const TARE_ATTEMPTS: u8 = 3;

/// Outcome of one control cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// `None` when the climate read failed.
    pub climate: Option<ClimateReading>,
    pub heater: HeaterState,
    pub fan_on: bool,
    pub faults: u8,
    pub weight: f32,
    /// Time slept at the end of the cycle.
    pub slept_ms: u32,
}

/// The control supervisor.
pub struct Supervisor {
    config: SystemConfig,
    thermostat: Thermostat,
    safety: SafetySupervisor,
    calibration: WeightCalibration,
    /// Reported when the load cell misses a cycle.
    last_weight: f32,
    cycle_count: u64,
}

impl Supervisor {
    /// Construct the supervisor.  Tare starts at zero until
    /// [`learn_tare`](Self::learn_tare) or [`bootstrap`](Self::bootstrap).
    pub fn new(config: SystemConfig) -> Self {
        let thermostat = Thermostat::from_config(&config);
        let safety = SafetySupervisor::new(&config);
        let calibration = WeightCalibration::new(TareOffset::ZERO, config.calibration_factor);
        Self {
            config,
            thermostat,
            safety,
            calibration,
            last_weight: 0.0,
            cycle_count: 0,
        }
    }

    // ── Bring-up ──────────────────────────────────────────────

    /// Reset posture, settling delay, then tare (retried a few times).
    /// A tare that never succeeds leaves the offset at zero; weight is not
    /// a control input so the loop still runs.
    pub fn bootstrap(
        &mut self,
        hw: &mut (impl ScalePort + ActuatorPort),
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> TareOffset {
        hw.all_off();
        info!("Settling for {} ms, keep the scale empty", self.config.settle_delay_ms);
        clock.sleep_ms(self.config.settle_delay_ms);

        for attempt in 1..=TARE_ATTEMPTS {
            match self.learn_tare(hw, clock, sink) {
                Ok(tare) => {
                    sink.emit(&AppEvent::Started);
                    return tare;
                }
                Err(error) => sink.emit(&AppEvent::TareFailed { attempt, error }),
            }
        }

        warn!("Tare unavailable, weights are relative to zero counts");
        sink.emit(&AppEvent::Started);
        self.calibration.tare()
    }

    /// Average `tare_samples` raw readings into the tare offset.  Any
    /// failed sample aborts without touching the stored offset.
    pub fn learn_tare(
        &mut self,
        hw: &mut impl ScalePort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<TareOffset, LoadCellError> {
        let n = usize::from(self.config.tare_samples).clamp(1, MAX_TARE_SAMPLES);
        let mut samples: heapless::Vec<i32, MAX_TARE_SAMPLES> = heapless::Vec::new();

        for _ in 0..n {
            let raw = hw.read_raw()?;
            if samples.push(raw).is_err() {
                warn!("Tare buffer full at {} samples", samples.len());
                break;
            }
            clock.sleep_ms(self.config.tare_sample_gap_ms);
        }

        let tare = TareOffset::from_samples(&samples).unwrap_or_default();
        self.calibration = WeightCalibration::new(tare, self.config.calibration_factor);
        sink.emit(&AppEvent::TareLearned {
            offset: tare.raw(),
            samples: samples.len() as u8,
        });
        Ok(tare)
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle including its trailing sleep.
    ///
    /// `hw` carries all three hardware ports in one value.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl ClimatePort + ScalePort + ActuatorPort),
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;
        let prev_heater = self.thermostat.state();
        let prev_faults = self.safety.faults();

        // 1. Climate + safety
        let climate = hw.read_climate();
        let faults = self.safety.evaluate(&climate);

        // 2. Sense loss: fail-safe and back off
        let reading = match climate {
            Ok(reading) => reading,
            Err(e) => {
                self.thermostat.force_off();
                hw.fail_safe();
                Self::note_heater_change(prev_heater, HeaterState::Off, sink);
                sink.emit(&AppEvent::SensorFault(e));

                let backoff = self.config.sensor_fail_backoff_ms;
                clock.sleep_ms(backoff);
                return CycleReport {
                    climate: None,
                    heater: HeaterState::Off,
                    fan_on: true,
                    faults,
                    weight: self.last_weight,
                    slept_ms: backoff,
                };
            }
        };
        let t = reading.temperature_c;

        // 3. Heater decision, safety first
        let heater = if self.safety.has_fault(SafetyFault::OverTemperature) {
            self.thermostat.force_off();
            if t >= self.config.max_safe_temp_c {
                sink.emit(&AppEvent::OverTemperature {
                    temperature_c: t,
                    limit_c: self.config.max_safe_temp_c,
                });
            } else {
                debug!("Cooling below limit, heater held off ({:.1} C)", t);
            }
            HeaterState::Off
        } else {
            self.thermostat.update(t)
        };

        // 4. Fan co-actuation
        let fan_on = fan_demand(heater, t, self.config.fan_assist_temp_c);

        // 5. Apply; report what the line actually holds
        hw.set_heater(heater.is_on());
        let heater = if heater.is_on() && !hw.is_heater_on() {
            self.thermostat.force_off();
            warn!("Heater did not switch on, reporting OFF");
            HeaterState::Off
        } else {
            heater
        };
        hw.set_fan(fan_on);
        Self::note_heater_change(prev_heater, heater, sink);
        if prev_faults != 0 && faults == 0 {
            sink.emit(&AppEvent::FaultCleared);
        }

        // 6. Weight (never a control input)
        match hw.read_raw() {
            Ok(raw) => self.last_weight = self.calibration.weight(raw),
            Err(e) => sink.emit(&AppEvent::WeightUnavailable(e)),
        }

        // 7. Telemetry
        sink.emit(&AppEvent::Telemetry(TelemetryData {
            temperature_c: t,
            humidity_pct: reading.humidity_pct,
            weight: self.last_weight,
            heater,
        }));

        // 8. Pace
        let period = self.config.cycle_period_ms;
        clock.sleep_ms(period);

        CycleReport {
            climate: Some(reading),
            heater,
            fan_on,
            faults,
            weight: self.last_weight,
            slept_ms: period,
        }
    }

    /// The control loop.  Never returns; the watchdog is fed once per cycle.
    pub fn run(
        &mut self,
        hw: &mut (impl ClimatePort + ScalePort + ActuatorPort),
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
        watchdog: &Watchdog,
    ) -> ! {
        info!("Supervisor running ({} ms period)", self.config.cycle_period_ms);
        loop {
            watchdog.feed();
            self.run_cycle(hw, clock, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Latched heater decision.
    pub fn heater_state(&self) -> HeaterState {
        self.thermostat.state()
    }

    /// Current active fault bitmask (0 = no faults).
    pub fn fault_flags(&self) -> u8 {
        self.safety.faults()
    }

    pub fn tare(&self) -> TareOffset {
        self.calibration.tare()
    }

    /// Weight reported in the most recent telemetry line.
    pub fn last_weight(&self) -> f32 {
        self.last_weight
    }

    /// Control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn note_heater_change(from: HeaterState, to: HeaterState, sink: &mut impl EventSink) {
        if from != to {
            sink.emit(&AppEvent::HeaterChanged { from, to });
        }
    }
}
