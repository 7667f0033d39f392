//! One-shot board bring-up.
//!
//! Claims the peripherals, turns the pin numbers in [`pins`] into owned
//! drivers and configures the two-wire master.  Called once from `main()`
//! before the supervisor starts; everything it returns is moved into the
//! sensor and actuator drivers.

use esp_idf_svc::hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, Input, Output, PinDriver};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use log::{error, info};

use crate::config::SystemConfig;
use crate::error::{Error, Result};
use crate::pins;

pub type InputLine = PinDriver<'static, AnyInputPin, Input>;
pub type OutputLine = PinDriver<'static, AnyOutputPin, Output>;

/// Everything the firmware drives, already configured.
pub struct Board {
    pub load_cell_data: InputLine,
    pub load_cell_clock: OutputLine,
    pub i2c: I2cDriver<'static>,
    pub heater: OutputLine,
    pub fan: OutputLine,
}

pub fn init_board(config: &SystemConfig) -> Result<Board> {
    let peripherals = Peripherals::take().map_err(|e| {
        error!("hw_init: peripherals already taken ({})", e);
        Error::Init("peripherals")
    })?;

    // SAFETY: `Peripherals::take()` succeeded, so nothing else owns a
    // GPIO, and each number in `pins` is distinct and used exactly once.
    let (dt, sck, sda, scl, heater, fan) = unsafe {
        (
            AnyInputPin::new(pins::LOAD_CELL_DATA_GPIO),
            AnyOutputPin::new(pins::LOAD_CELL_CLOCK_GPIO),
            AnyIOPin::new(pins::I2C_SDA_GPIO),
            AnyIOPin::new(pins::I2C_SCL_GPIO),
            AnyOutputPin::new(pins::HEATER_ENABLE_GPIO),
            AnyOutputPin::new(pins::FAN_ENABLE_GPIO),
        )
    };

    // Actuators first so both loads are low as early as possible.
    let heater = output(heater, "heater")?;
    let fan = output(fan, "fan")?;

    let load_cell_data = PinDriver::input(dt).map_err(|e| {
        error!("hw_init: load-cell data pin ({})", e);
        Error::Init("load-cell data pin")
    })?;
    let load_cell_clock = output(sck, "load-cell clock")?;

    let i2c_cfg = I2cConfig::new()
        .baudrate(Hertz(config.i2c_baudrate_hz))
        .sda_enable_pullup(true)
        .scl_enable_pullup(true);
    let i2c = I2cDriver::new(peripherals.i2c0, sda, scl, &i2c_cfg).map_err(|e| {
        error!("hw_init: I2C master ({})", e);
        Error::Init("i2c master")
    })?;

    info!(
        "hw_init: board ready (HX711 DT={} SCK={}, I2C SDA={} SCL={} @ {} Hz, heater={}, fan={})",
        pins::LOAD_CELL_DATA_GPIO,
        pins::LOAD_CELL_CLOCK_GPIO,
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        config.i2c_baudrate_hz,
        pins::HEATER_ENABLE_GPIO,
        pins::FAN_ENABLE_GPIO,
    );

    Ok(Board {
        load_cell_data,
        load_cell_clock,
        i2c,
        heater,
        fan,
    })
}

fn output(pin: AnyOutputPin, what: &'static str) -> Result<OutputLine> {
    let mut line = PinDriver::output(pin).map_err(|e| {
        error!("hw_init: {} pin ({})", what, e);
        Error::Init(what)
    })?;
    line.set_low().map_err(|e| {
        error!("hw_init: {} pin low ({})", what, e);
        Error::Init(what)
    })?;
    Ok(line)
}
