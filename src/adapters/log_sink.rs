//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade (the ESP-IDF logger, i.e. UART / USB-CDC, in production).  The
//! telemetry line goes out verbatim at `info` so the host monitor can
//! match it behind the logger prefix.

use log::{debug, error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => info!("{}", t),
            AppEvent::OverTemperature {
                temperature_c,
                limit_c,
            } => {
                warn!(
                    "DANGER: temperature {:.1} C at or above safety limit ({:.1} C), heater off",
                    temperature_c, limit_c
                );
            }
            AppEvent::SensorFault(e) => {
                error!("Climate read failed ({}), heater off, fan purging", e);
            }
            AppEvent::WeightUnavailable(e) => debug!("SCALE | skipped: {}", e),
            AppEvent::HeaterChanged { from, to } => info!("HEATER | {} -> {}", from, to),
            AppEvent::TareLearned { offset, samples } => {
                info!("TARE | offset={} ({} samples)", offset, samples);
            }
            AppEvent::TareFailed { attempt, error } => {
                warn!("TARE | attempt {} failed: {}", attempt, error);
            }
            AppEvent::FaultCleared => info!("FAULT | all cleared"),
            AppEvent::Started => info!("START | control loop starting"),
        }
    }
}
