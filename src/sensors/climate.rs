//! SHT31 temperature / relative-humidity sensor over I²C.
//!
//! Single-shot, high repeatability, clock stretching disabled:
//!
//! ```text
//!   W 0x44: 0x24 0x00        (start measurement)
//!   wait  >= 15 ms            (conversion)
//!   R 0x44: T_msb T_lsb T_crc H_msb H_lsb H_crc
//! ```
//!
//! Each 16-bit word carries a Sensirion CRC-8 (poly 0x31, init 0xFF).
//! A frame with a bad CRC is rejected, never decoded.

use crc::{CRC_8_NRSC_5, Crc};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::error::{BusError, ClimateError};

/// Default 7-bit address (ADDR pin low).
pub const SHT31_ADDRESS: u8 = 0x44;
/// Single-shot, high repeatability, no clock stretching.
pub const CMD_MEASURE_HIGH_REP: [u8; 2] = [0x24, 0x00];
/// Worst-case high-repeatability conversion time (datasheet).
pub const MIN_CONVERSION_MS: u32 = 15;

/// Sensor operating range (datasheet).
pub const TEMP_RANGE_C: (f32, f32) = (-45.0, 130.0);
pub const HUMIDITY_RANGE_PCT: (f32, f32) = (0.0, 100.0);

/// CRC-8/NRSC-5 is the Sensirion checksum: poly 0x31, init 0xFF, no
/// reflection, no final XOR.
const SENSIRION_CRC: Crc<u8> = Crc::<u8>::new(&CRC_8_NRSC_5);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl ClimateReading {
    /// Build a reading, rejecting values outside the sensor's range.
    pub fn new(temperature_c: f32, humidity_pct: f32) -> Result<Self, ClimateError> {
        let in_range = |v: f32, (lo, hi): (f32, f32)| v >= lo && v <= hi;
        if in_range(temperature_c, TEMP_RANGE_C) && in_range(humidity_pct, HUMIDITY_RANGE_PCT) {
            Ok(Self {
                temperature_c,
                humidity_pct,
            })
        } else {
            Err(ClimateError::OutOfRange)
        }
    }
}

/// Sensirion CRC of one data word.
pub fn crc8(word: [u8; 2]) -> u8 {
    SENSIRION_CRC.checksum(&word)
}

/// Raw temperature ticks to Celsius.
pub fn celsius_from_raw(raw: u16) -> f32 {
    -45.0 + 175.0 * (f32::from(raw) / 65_535.0)
}

/// Raw humidity ticks to %RH.
pub fn humidity_from_raw(raw: u16) -> f32 {
    100.0 * (f32::from(raw) / 65_535.0)
}

/// Validate and decode a six-byte reply frame.
pub fn decode_frame(frame: &[u8; 6]) -> Result<ClimateReading, ClimateError> {
    let [t_msb, t_lsb, t_crc, h_msb, h_lsb, h_crc] = *frame;
    if crc8([t_msb, t_lsb]) != t_crc || crc8([h_msb, h_lsb]) != h_crc {
        return Err(ClimateError::ChecksumFailure);
    }
    ClimateReading::new(
        celsius_from_raw(u16::from_be_bytes([t_msb, t_lsb])),
        humidity_from_raw(u16::from_be_bytes([h_msb, h_lsb])),
    )
}

pub struct Sht31<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    conversion_ms: u32,
}

impl<I2C, D> Sht31<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, address: u8, conversion_ms: u32) -> Self {
        Self {
            i2c,
            delay,
            address,
            conversion_ms,
        }
    }

    /// One blocking measurement transaction.
    pub fn measure(&mut self) -> Result<ClimateReading, ClimateError> {
        self.i2c
            .write(self.address, &CMD_MEASURE_HIGH_REP)
            .map_err(|e| BusError::from_i2c(&e))?;

        self.delay.delay_ms(self.conversion_ms);

        let mut frame = [0u8; 6];
        self.i2c
            .read(self.address, &mut frame)
            .map_err(|e| BusError::from_i2c(&e))?;

        decode_frame(&frame)
    }
}
