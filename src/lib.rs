//! Filadry firmware library.
//!
//! Exposes the pure-logic modules for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; host builds get simulation paths instead.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod safety;
pub mod sensors;

#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
mod pins;

// Hardware-facing rings. Drivers are generic over embedded-hal traits,
// so they compile and test on the host as well.
pub mod adapters;
pub mod drivers;
