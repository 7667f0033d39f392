//! Task Watchdog Timer (TWDT) driver.
//!
//! Subscribes the supervisor task to the ESP-IDF TWDT so a stalled cycle
//! (wedged bus, stuck ready wait) resets the board instead of leaving the
//! heater line in whatever state it was last driven to.
//!
//! [`Supervisor::run`](crate::app::service::Supervisor::run) calls
//! [`Watchdog::feed`] once per cycle.  The timeout must exceed
//! [`SystemConfig::worst_case_cycle_ms`](crate::config::SystemConfig::worst_case_cycle_ms).

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Reconfigure the TWDT and subscribe the calling task.
    pub fn new(timeout_ms: u32) -> Self {
        #[cfg(target_os = "espidf")]
        {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            // SAFETY: plain FFI calls with a valid config; the null task
            // handle means "current task".
            let ret = unsafe { esp_task_wdt_reconfigure(&cfg) };
            if ret != ESP_OK {
                log::warn!("TWDT reconfigure returned {} (may already be configured)", ret);
            }

            let ret = unsafe { esp_task_wdt_add(core::ptr::null_mut()) };
            let subscribed = ret == ESP_OK;
            if subscribed {
                info!("Watchdog: subscribed ({} ms timeout, panic on trigger)", timeout_ms);
            } else {
                log::warn!("Watchdog: failed to subscribe ({})", ret);
            }

            Self {
                timeout_ms,
                subscribed,
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("Watchdog(sim): no-op ({} ms)", timeout_ms);
            Self { timeout_ms }
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Reset the countdown.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: the task was subscribed in `new`.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
