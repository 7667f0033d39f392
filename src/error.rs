//! Unified error types for the Filadry firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the boot
//! path can propagate uniformly.  The per-subsystem enums are `Copy` and
//! travel through the supervisor each cycle without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Climate sensor transaction or decode failed.
    Climate(ClimateError),
    /// Load-cell acquisition failed.
    LoadCell(LoadCellError),
    /// An actuator line could not be driven.
    Actuator(ActuatorError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is inconsistent.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Climate(e) => write!(f, "climate: {e}"),
            Self::LoadCell(e) => write!(f, "load cell: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Two-wire bus errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The addressed device did not acknowledge.
    Unavailable,
    /// The transaction did not complete (clock stretch, arbitration, overrun).
    Timeout,
}

impl BusError {
    /// Classify an `embedded-hal` I²C error.
    pub fn from_i2c<E: embedded_hal::i2c::Error>(err: &E) -> Self {
        match err.kind() {
            embedded_hal::i2c::ErrorKind::NoAcknowledge(_) => Self::Unavailable,
            _ => Self::Timeout,
        }
    }
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "device did not acknowledge"),
            Self::Timeout => write!(f, "transaction timed out"),
        }
    }
}

impl core::error::Error for BusError {}

// ---------------------------------------------------------------------------
// Climate sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateError {
    /// Command write or reply read failed on the bus.
    Bus(BusError),
    /// A reply word did not match its CRC byte.
    ChecksumFailure,
    /// Decoded value lies outside the sensor's specified range.
    OutOfRange,
}

impl fmt::Display for ClimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus failure ({e})"),
            Self::ChecksumFailure => write!(f, "checksum mismatch"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<BusError> for ClimateError {
    fn from(e: BusError) -> Self {
        Self::Bus(e)
    }
}

impl core::error::Error for ClimateError {}

impl From<ClimateError> for Error {
    fn from(e: ClimateError) -> Self {
        Self::Climate(e)
    }
}

// ---------------------------------------------------------------------------
// Load-cell errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadCellError {
    /// Data line stayed high past the ready timeout.
    NotReady,
    /// A data or clock line access failed.
    GpioFailed,
}

impl fmt::Display for LoadCellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "sensor not ready"),
            Self::GpioFailed => write!(f, "GPIO access failed"),
        }
    }
}

impl core::error::Error for LoadCellError {}

impl From<LoadCellError> for Error {
    fn from(e: LoadCellError) -> Self {
        Self::LoadCell(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl core::error::Error for ActuatorError {}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Safety faults
// ---------------------------------------------------------------------------

/// Safety faults are accumulated in a bitfield by the safety supervisor so
/// that simultaneous conditions are tracked and cleared individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SafetyFault {
    /// Enclosure temperature at or above the hard limit.
    OverTemperature = 0b0000_0001,
    /// Climate sensor could not be read this cycle.
    SensorLoss = 0b0000_0010,
}

impl SafetyFault {
    /// Return the bitmask for this fault.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for SafetyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverTemperature => write!(f, "over temperature"),
            Self::SensorLoss => write!(f, "climate sensing lost"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
