//! HX711 load-cell amplifier driver (bit-banged two-line serial).
//!
//! The chip pulls DOUT low when a conversion is ready.  The driver then
//! clocks out 24 bits MSB-first on PD_SCK and appends 1–3 extra pulses
//! that select channel and gain for the *next* conversion.
//!
//! PD_SCK held high for more than ~60 µs powers the chip down, so the whole
//! pulse train runs inside a critical section.
//!
//! Tare and unit conversion live in [`TareOffset`] / [`WeightCalibration`],
//! which the supervisor owns.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::error::LoadCellError;

/// Smallest value representable by the 24-bit converter.
pub const HX711_MINIMUM: i32 = -(1 << 23);
/// Largest value representable by the 24-bit converter.
pub const HX711_MAXIMUM: i32 = (1 << 23) - 1;

/// Half-period of the bit-banged clock.
const CLOCK_HOLD_US: u32 = 1;
/// Interval between DOUT polls while waiting for a conversion.
const READY_POLL_US: u32 = 100;

/// Channel / gain selected for the conversion that follows a read.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GainMode {
    /// Channel A, gain 128 (lowest noise).
    #[default]
    A128 = 1,
    /// Channel B, gain 32.
    B32 = 2,
    /// Channel A, gain 64.
    A64 = 3,
}

impl GainMode {
    /// Number of clock pulses appended after the 24 data bits.
    pub const fn extra_pulses(self) -> u8 {
        self as u8
    }
}

/// Interpret the low 24 bits of `raw` as a two's-complement value.
pub const fn sign_extend_24(raw: u32) -> i32 {
    let value = raw & 0x00FF_FFFF;
    if value & 0x0080_0000 != 0 {
        (value | 0xFF00_0000) as i32
    } else {
        value as i32
    }
}

pub struct Hx711<DT, SCK, D> {
    data: DT,
    clock: SCK,
    delay: D,
    gain: GainMode,
    ready_timeout_us: u32,
    last_raw: Option<i32>,
}

impl<DT, SCK, D> Hx711<DT, SCK, D>
where
    DT: InputPin,
    SCK: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the two lines.  The clock is driven low so the
    /// chip stays powered.
    pub fn new(data: DT, mut clock: SCK, delay: D, ready_timeout_ms: u32) -> Result<Self, LoadCellError> {
        clock.set_low().map_err(|_| LoadCellError::GpioFailed)?;
        Ok(Self {
            data,
            clock,
            delay,
            gain: GainMode::default(),
            ready_timeout_us: ready_timeout_ms.saturating_mul(1000),
            last_raw: None,
        })
    }

    pub fn gain(&self) -> GainMode {
        self.gain
    }

    /// Applies from the conversion after the next read.
    pub fn set_gain(&mut self, gain: GainMode) {
        self.gain = gain;
    }

    /// Most recent successful sample.
    pub fn last_raw(&self) -> Option<i32> {
        self.last_raw
    }

    /// True when DOUT is low, i.e. a conversion is waiting.
    pub fn is_ready(&mut self) -> Result<bool, LoadCellError> {
        self.data.is_low().map_err(|_| LoadCellError::GpioFailed)
    }

    /// Acquire one signed 24-bit sample, waiting at most the configured
    /// ready timeout.
    pub fn read_raw(&mut self) -> Result<i32, LoadCellError> {
        self.wait_ready()?;

        let gain_pulses = self.gain.extra_pulses();
        let value = critical_section::with(|_| -> Result<u32, LoadCellError> {
            let mut value: u32 = 0;
            for _ in 0..24 {
                self.pulse()?;
                // bits arrive MSB first
                value = (value << 1) | u32::from(self.data.is_high().map_err(|_| LoadCellError::GpioFailed)?);
            }
            for _ in 0..gain_pulses {
                self.pulse()?;
            }
            Ok(value)
        })?;

        let signed = sign_extend_24(value);
        self.last_raw = Some(signed);
        Ok(signed)
    }

    fn wait_ready(&mut self) -> Result<(), LoadCellError> {
        let mut waited_us: u32 = 0;
        loop {
            if self.is_ready()? {
                return Ok(());
            }
            if waited_us >= self.ready_timeout_us {
                debug!("hx711: DOUT high for {} us, giving up", waited_us);
                return Err(LoadCellError::NotReady);
            }
            self.delay.delay_us(READY_POLL_US);
            waited_us = waited_us.saturating_add(READY_POLL_US);
        }
    }

    /// One clock pulse; DOUT is sampled by the caller after the falling edge.
    fn pulse(&mut self) -> Result<(), LoadCellError> {
        self.clock.set_high().map_err(|_| LoadCellError::GpioFailed)?;
        self.delay.delay_us(CLOCK_HOLD_US);
        self.clock.set_low().map_err(|_| LoadCellError::GpioFailed)?;
        self.delay.delay_us(CLOCK_HOLD_US);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tare and conversion
// ---------------------------------------------------------------------------

/// Raw reading corresponding to an empty scale.  Learned once at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TareOffset(i32);

impl TareOffset {
    pub const ZERO: Self = Self(0);

    /// Arithmetic mean of `samples`, truncated toward zero.  `None` when
    /// `samples` is empty.
    pub fn from_samples(samples: &[i32]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let sum: i64 = samples.iter().map(|&s| i64::from(s)).sum();
        Some(Self((sum / samples.len() as i64) as i32))
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// Converts raw counts into engineering units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightCalibration {
    tare: TareOffset,
    counts_per_unit: f32,
}

impl WeightCalibration {
    pub fn new(tare: TareOffset, counts_per_unit: f32) -> Self {
        Self {
            tare,
            counts_per_unit,
        }
    }

    pub fn tare(&self) -> TareOffset {
        self.tare
    }

    /// `(raw - tare) / factor`.  Negative results are legal.
    pub fn weight(&self, raw: i32) -> f32 {
        let delta = i64::from(raw) - i64::from(self.tare.raw());
        delta as f32 / self.counts_per_unit
    }
}
