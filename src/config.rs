//! System configuration parameters
//!
//! All tunable parameters for the drying cabinet.  Values are compile-time
//! defaults; tare is the only quantity learned at runtime.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sensors::climate::MIN_CONVERSION_MS;

/// Upper bound on samples averaged into the tare.
pub const MAX_TARE_SAMPLES: usize = 64;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Thermostat ---
    /// Enclosure setpoint (Celsius)
    pub target_temp_c: f32,
    /// Width of the deadband below the setpoint (Celsius)
    pub temp_hysteresis_c: f32,
    /// Hard cut-off; heater is forced off at or above this (Celsius)
    pub max_safe_temp_c: f32,
    /// Extra cooling below the cut-off before the heater may re-arm (Celsius)
    pub safety_rearm_margin_c: f32,
    /// Fan runs above this even with the heater idle (Celsius)
    pub fan_assist_temp_c: f32,

    // --- Scale ---
    /// Raw counts per engineering unit of load
    pub calibration_factor: f32,
    /// Samples averaged into the boot-time tare
    pub tare_samples: u8,
    /// Gap between tare samples (milliseconds)
    pub tare_sample_gap_ms: u32,
    /// Upper bound on the load-cell ready wait (milliseconds)
    pub load_cell_ready_timeout_ms: u32,

    // --- Climate sensor ---
    /// 7-bit two-wire address of the climate sensor
    pub climate_address: u8,
    /// Wait between measurement command and reply read (milliseconds)
    pub climate_conversion_ms: u32,
    /// Two-wire bus clock (Hz)
    pub i2c_baudrate_hz: u32,

    // --- Timing ---
    /// Power-up settling delay before tare (milliseconds)
    pub settle_delay_ms: u32,
    /// Supervisor tick (milliseconds)
    pub cycle_period_ms: u32,
    /// Wait after a failed climate read (milliseconds)
    pub sensor_fail_backoff_ms: u32,
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thermostat
            target_temp_c: 85.0,
            temp_hysteresis_c: 5.0,
            max_safe_temp_c: 95.0,
            safety_rearm_margin_c: 0.0,
            fan_assist_temp_c: 35.0,

            // Scale
            calibration_factor: 426.0,
            tare_samples: 10,
            tare_sample_gap_ms: 50,
            load_cell_ready_timeout_ms: 1000,

            // Climate sensor
            climate_address: 0x44,
            climate_conversion_ms: 20, // datasheet minimum is 15
            i2c_baudrate_hz: 100_000,

            // Timing
            settle_delay_ms: 5000,
            cycle_period_ms: 1000,         // 1 Hz
            sensor_fail_backoff_ms: 2000,
            watchdog_timeout_ms: 10_000,
        }
    }
}

impl SystemConfig {
    /// Lower edge of the thermostat deadband.
    pub fn deadband_floor_c(&self) -> f32 {
        self.target_temp_c - self.temp_hysteresis_c
    }

    /// Longest a single supervisor cycle may block, excluding the
    /// bit-banged shift itself (tens of microseconds).
    pub fn worst_case_cycle_ms(&self) -> u32 {
        self.cycle_period_ms.max(self.sensor_fail_backoff_ms)
            + self.climate_conversion_ms
            + self.load_cell_ready_timeout_ms
    }

    /// Reject parameter sets that would make the control loop unsafe or
    /// meaningless.  Written as negated comparisons so NaN fails too.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<()> {
        if !(self.temp_hysteresis_c > 0.0) {
            return Err(Error::Config("temp_hysteresis_c must be positive"));
        }
        if !(self.target_temp_c < self.max_safe_temp_c) {
            return Err(Error::Config("target_temp_c must be below max_safe_temp_c"));
        }
        if !(self.fan_assist_temp_c < self.max_safe_temp_c) {
            return Err(Error::Config("fan_assist_temp_c must be below max_safe_temp_c"));
        }
        if !(self.safety_rearm_margin_c >= 0.0) {
            return Err(Error::Config("safety_rearm_margin_c must not be negative"));
        }
        if !(self.calibration_factor > 0.0) {
            return Err(Error::Config("calibration_factor must be positive"));
        }
        if self.tare_samples == 0 || usize::from(self.tare_samples) > MAX_TARE_SAMPLES {
            return Err(Error::Config("tare_samples must be within 1..=64"));
        }
        if self.climate_conversion_ms < MIN_CONVERSION_MS {
            return Err(Error::Config("climate_conversion_ms below sensor conversion time"));
        }
        if self.climate_address > 0x7F {
            return Err(Error::Config("climate_address must be a 7-bit address"));
        }
        if self.cycle_period_ms == 0 {
            return Err(Error::Config("cycle_period_ms must be positive"));
        }
        if self.watchdog_timeout_ms <= self.worst_case_cycle_ms() {
            return Err(Error::Config("watchdog_timeout_ms shorter than worst-case cycle"));
        }
        Ok(())
    }
}
