//! System clock adapter.
//!
//! Implements [`ClockPort`] for the supervisor's suspension points.
//!
//! - **`target_os = "espidf"`**: `FreeRtos::delay_ms`, which yields to the
//!   scheduler so the idle task and the watchdog keep running.
//! - **`not(target_os = "espidf")`**: `std::thread::sleep` for host-side
//!   simulation.

use crate::app::ports::ClockPort;

#[derive(Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl ClockPort for SystemClock {
    fn sleep_ms(&mut self, ms: u32) {
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl ClockPort for SystemClock {
    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
