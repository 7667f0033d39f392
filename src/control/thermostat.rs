//! Bang-bang thermostat with a lower deadband.
//!
//! ```text
//!         T < Tset - Th
//!   OFF ─────────────────▶ ON
//!    ▲                      │
//!    └──────────────────────┘
//!          T > Tset
//! ```
//!
//! Inside `[Tset - Th, Tset]` the previous decision is held.  Safety
//! cut-off and sense-loss are applied on top via [`Thermostat::force_off`];
//! the thermostat itself never looks at `Tmax`.

use core::fmt;

use crate::config::SystemConfig;

/// Latched relay decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaterState {
    #[default]
    Off,
    On,
}

impl HeaterState {
    pub fn is_on(self) -> bool {
        self == Self::On
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

impl From<bool> for HeaterState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl fmt::Display for HeaterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Thermostat {
    setpoint_c: f32,
    hysteresis_c: f32,
    state: HeaterState,
}

impl Thermostat {
    pub fn new(setpoint_c: f32, hysteresis_c: f32) -> Self {
        Self {
            setpoint_c,
            hysteresis_c,
            state: HeaterState::Off,
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.target_temp_c, config.temp_hysteresis_c)
    }

    /// Apply one temperature sample and return the (possibly unchanged)
    /// decision.
    pub fn update(&mut self, temperature_c: f32) -> HeaterState {
        if temperature_c < self.setpoint_c - self.hysteresis_c {
            self.state = HeaterState::On;
        } else if temperature_c > self.setpoint_c {
            self.state = HeaterState::Off;
        }
        self.state
    }

    /// Drop to OFF regardless of temperature (safety trip, sense loss).
    pub fn force_off(&mut self) {
        self.state = HeaterState::Off;
    }

    pub fn state(&self) -> HeaterState {
        self.state
    }
}

/// Fan runs with the heater, or on its own once the enclosure is warm.
pub fn fan_demand(heater: HeaterState, temperature_c: f32, assist_temp_c: f32) -> bool {
    heater.is_on() || temperature_c > assist_temp_c
}
