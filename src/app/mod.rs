//! Application core: pure domain logic, zero I/O.
//!
//! Business rules for the drying cabinet: thermostat orchestration,
//! safety evaluation, tare learning and telemetry.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
