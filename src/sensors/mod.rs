//! Sensor drivers.
//!
//! Both are synchronous and generic over `embedded-hal` traits, so the
//! same code runs on ESP-IDF peripherals and on test simulators.

pub mod climate;
pub mod load_cell;

pub use climate::{ClimateReading, Sht31};
pub use load_cell::{GainMode, Hx711, TareOffset, WeightCalibration};
