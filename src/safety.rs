//! Safety supervisor.
//!
//! Runs **every cycle before the thermostat** and maintains a fault
//! bitmask.  Any set bit forces the heater off for that cycle, whatever
//! the thermostat would have decided.
//!
//! ## Fault lifecycle
//!
//! 1. A condition triggers a fault (climate read failed, `T >= Tmax`).
//! 2. The supervisor sets the corresponding bit and logs the edge once.
//! 3. Each cycle the condition is re-evaluated.  Sense loss clears on the
//!    next good reading; over-temperature clears once `T` drops below
//!    `Tmax - rearm_margin`.
//! 4. With no bits set, the thermostat resumes from OFF.

use log::{error, info};

use crate::config::SystemConfig;
use crate::error::{ClimateError, SafetyFault};
use crate::sensors::ClimateReading;

/// Safety supervisor.
pub struct SafetySupervisor {
    max_temp_c: f32,
    rearm_margin_c: f32,
    /// Latched fault bitmask.
    faults: u8,
}

impl SafetySupervisor {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            max_temp_c: config.max_safe_temp_c,
            rearm_margin_c: config.safety_rearm_margin_c,
            faults: 0,
        }
    }

    /// Evaluate all safety conditions against this cycle's climate result.
    /// Returns the updated fault bitmask.
    pub fn evaluate(&mut self, climate: &Result<ClimateReading, ClimateError>) -> u8 {
        match climate {
            Ok(reading) => {
                self.eval_fault(SafetyFault::SensorLoss, false);

                // ── Temperature (with optional re-arm hysteresis) ─────
                let t = reading.temperature_c;
                if t >= self.max_temp_c {
                    self.eval_fault(SafetyFault::OverTemperature, true);
                } else if t < self.max_temp_c - self.rearm_margin_c {
                    self.eval_fault(SafetyFault::OverTemperature, false);
                }
            }
            Err(_) => {
                // Keep any over-temperature latch: we cannot prove it cleared.
                self.eval_fault(SafetyFault::SensorLoss, true);
            }
        }

        self.faults
    }

    /// Current fault bitmask.
    pub fn faults(&self) -> u8 {
        self.faults
    }

    /// True if **any** fault is active.
    pub fn has_faults(&self) -> bool {
        self.faults != 0
    }

    /// Check if a specific fault is active.
    pub fn has_fault(&self, fault: SafetyFault) -> bool {
        self.faults & fault.mask() != 0
    }

    // ── Internal ──────────────────────────────────────────────────

    /// Set or clear a fault bit based on a boolean condition.
    fn eval_fault(&mut self, fault: SafetyFault, condition: bool) {
        if condition {
            if self.faults & fault.mask() == 0 {
                error!("SAFETY FAULT SET: {fault}");
            }
            self.faults |= fault.mask();
        } else {
            if self.faults & fault.mask() != 0 {
                info!("SAFETY FAULT CLEARED: {fault}");
            }
            self.faults &= !fault.mask();
        }
    }
}
