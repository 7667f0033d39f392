//! Circulation fan driver.
//!
//! On/off only; the fan's job is to move heat from the element through
//! the spool chamber and to purge residual heat when the climate reading
//! is lost.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;

pub struct FanDriver<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> FanDriver<P> {
    pub fn new(pin: P) -> Result<Self, ActuatorError> {
        let mut driver = Self { pin, on: false };
        driver.set(false)?;
        Ok(driver)
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
