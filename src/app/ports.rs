//! Port traits: the hexagonal boundary between the supervisor and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Supervisor (domain)
//! ```
//!
//! Driven adapters (sensors, actuator lines, clock, event sinks) implement
//! these traits.  The [`Supervisor`](super::service::Supervisor) consumes
//! them via generics, so the control core never touches hardware directly
//! and tests can script sensor streams through simulators.

use crate::error::{ClimateError, LoadCellError};
use crate::sensors::ClimateReading;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Temperature / humidity source.
pub trait ClimatePort {
    /// One validated reading, or the reason there is none.
    fn read_climate(&mut self) -> Result<ClimateReading, ClimateError>;
}

/// Load-cell source.  Returns raw signed counts; tare and scaling are
/// owned by the supervisor.
pub trait ScalePort {
    fn read_raw(&mut self) -> Result<i32, LoadCellError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the two switched loads.
pub trait ActuatorPort {
    /// Drive the heater relay.
    fn set_heater(&mut self, on: bool);

    /// Drive the circulation fan.
    fn set_fan(&mut self, on: bool);

    /// Heater level the line actually holds after the last command.
    fn is_heater_on(&self) -> bool;

    /// Both loads off (reset posture).
    fn all_off(&mut self) {
        self.set_heater(false);
        self.set_fan(false);
    }

    /// Heater off, fan on to purge residual heat.
    fn fail_safe(&mut self) {
        self.set_heater(false);
        self.set_fan(true);
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Suspension points of the supervisor.  Bit-level delays inside drivers
/// do not go through here.
pub trait ClockPort {
    /// Block for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostic stream)
// ───────────────────────────────────────────────────────────────

/// The supervisor emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
