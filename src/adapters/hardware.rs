//! Hardware adapter: bridges the drivers to the domain port traits.
//!
//! Owns the climate sensor, the load-cell amplifier and both actuator
//! drivers, exposing them through [`ClimatePort`], [`ScalePort`] and
//! [`ActuatorPort`].  Every driver is generic over `embedded-hal`, so the
//! same adapter runs on ESP-IDF pin drivers and on host simulators.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::I2c;
use log::{error, warn};

use crate::app::ports::{ActuatorPort, ClimatePort, ScalePort};
use crate::drivers::fan::FanDriver;
use crate::drivers::heater::HeaterDriver;
use crate::error::{ClimateError, LoadCellError};
use crate::sensors::{ClimateReading, Hx711, Sht31};

// ── Driver → port glue ────────────────────────────────────────

impl<I2C: I2c, D: DelayNs> ClimatePort for Sht31<I2C, D> {
    fn read_climate(&mut self) -> Result<ClimateReading, ClimateError> {
        self.measure()
    }
}

impl<DT: InputPin, SCK: OutputPin, D: DelayNs> ScalePort for Hx711<DT, SCK, D> {
    fn read_raw(&mut self) -> Result<i32, LoadCellError> {
        Hx711::read_raw(self)
    }
}

// ── Adapter ───────────────────────────────────────────────────

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<C, S, H, F> {
    climate: C,
    scale: S,
    heater: HeaterDriver<H>,
    fan: FanDriver<F>,
}

impl<C, S, H, F> HardwareAdapter<C, S, H, F>
where
    C: ClimatePort,
    S: ScalePort,
    H: OutputPin,
    F: OutputPin,
{
    pub fn new(climate: C, scale: S, heater: HeaterDriver<H>, fan: FanDriver<F>) -> Self {
        Self {
            climate,
            scale,
            heater,
            fan,
        }
    }

    pub fn is_fan_on(&self) -> bool {
        self.fan.is_on()
    }
}

impl<C: ClimatePort, S, H, F> ClimatePort for HardwareAdapter<C, S, H, F> {
    fn read_climate(&mut self) -> Result<ClimateReading, ClimateError> {
        self.climate.read_climate()
    }
}

impl<C, S: ScalePort, H, F> ScalePort for HardwareAdapter<C, S, H, F> {
    fn read_raw(&mut self) -> Result<i32, LoadCellError> {
        self.scale.read_raw()
    }
}

impl<C, S, H: OutputPin, F: OutputPin> ActuatorPort for HardwareAdapter<C, S, H, F> {
    fn set_heater(&mut self, on: bool) {
        if let Err(e) = self.heater.set(on) {
            if on {
                error!("Heater ON write failed: {}", e);
            } else {
                // Could not confirm the element is de-energised.
                error!("Heater OFF write failed: {}", e);
                self.heater.fault_shutdown("off write failed");
            }
        }
    }

    fn set_fan(&mut self, on: bool) {
        if let Err(e) = self.fan.set(on) {
            warn!("Fan line write failed: {}", e);
        }
    }

    fn is_heater_on(&self) -> bool {
        self.heater.is_on()
    }
}
