//! Actuator drivers, board bring-up and the task watchdog.

pub mod fan;
pub mod heater;
#[cfg(target_os = "espidf")]
pub mod hw_init;
pub mod watchdog;
