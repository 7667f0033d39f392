//! Heater relay driver.
//!
//! A single push-pull output to the relay coil; high energises the
//! heating element.  The driver is a dumb actuator: the decision to heat
//! and the over-temperature cut-off live in the supervisor.
//!
//! ## Dual-target design
//!
//! Generic over [`embedded_hal::digital::OutputPin`]: an ESP-IDF
//! `PinDriver` on target, a recording pin in tests.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaterLine {
    Off,
    On,
    /// Forced off by the supervisor; cleared by the next `set`.
    Faulted(&'static str),
}

pub struct HeaterDriver<P> {
    pin: P,
    state: HeaterLine,
}

impl<P: OutputPin> HeaterDriver<P> {
    /// Take the pin and drive it low before anything else happens.
    pub fn new(pin: P) -> Result<Self, ActuatorError> {
        let mut driver = Self {
            pin,
            state: HeaterLine::Off,
        };
        driver.write(false)?;
        Ok(driver)
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.write(on)?;
        self.state = if on { HeaterLine::On } else { HeaterLine::Off };
        Ok(())
    }

    /// Drive the line low and remember why.
    pub fn fault_shutdown(&mut self, reason: &'static str) {
        if let Err(e) = self.write(false) {
            warn!("Heater fault shutdown could not drive the line: {}", e);
        }
        self.state = HeaterLine::Faulted(reason);
        warn!("Heater fault shutdown: {}", reason);
    }

    pub fn state(&self) -> HeaterLine {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == HeaterLine::On
    }

    fn write(&mut self, on: bool) -> Result<(), ActuatorError> {
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| ActuatorError::GpioWriteFailed)
    }
}
