//! Closed-loop control: thermostat and fan co-actuation.

pub mod thermostat;

pub use thermostat::{HeaterState, Thermostat, fan_demand};
