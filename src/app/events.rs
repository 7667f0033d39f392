//! Outbound application events.
//!
//! The [`Supervisor`](super::service::Supervisor) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The log adapter renders
//! them to the diagnostic console, where a host monitor picks up the
//! telemetry line.

use core::fmt;
use core::str::FromStr;

use crate::control::HeaterState;
use crate::error::{ClimateError, LoadCellError};

/// Structured events emitted by the supervisor.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Bring-up finished and the control loop is about to start.
    Started,

    /// Boot-time tare completed.
    TareLearned { offset: i32, samples: u8 },

    /// Tare attempt failed; `attempt` is 1-based.
    TareFailed { attempt: u8, error: LoadCellError },

    /// Once per completed control cycle.
    Telemetry(TelemetryData),

    /// The heater decision changed.
    HeaterChanged { from: HeaterState, to: HeaterState },

    /// Temperature at or above the hard limit; heater forced off.
    OverTemperature { temperature_c: f32, limit_c: f32 },

    /// Climate read failed; fail-safe posture applied.
    SensorFault(ClimateError),

    /// Load cell not read this cycle; telemetry carries the last weight.
    WeightUnavailable(LoadCellError),

    /// All safety faults have been cleared.
    FaultCleared,
}

/// One status line:
///
/// `T: 25.0 C | H: 40.0 % | Peso: 123 | Aquecedor: ON`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub weight: f32,
    pub heater: HeaterState,
}

impl fmt::Display for TelemetryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T: {:.1} C | H: {:.1} % | Peso: {:.0} | Aquecedor: {}",
            self.temperature_c, self.humidity_pct, self.weight, self.heater
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryParseError {
    /// Field label not found where expected.
    MissingField(&'static str),
    /// Field present but its value did not parse.
    BadValue(&'static str),
}

impl fmt::Display for TelemetryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "missing field {name}"),
            Self::BadValue(name) => write!(f, "bad value for {name}"),
        }
    }
}

/// Parse `<label> <number> [unit]` out of one `|`-separated field.
fn numeric_field(
    field: Option<&str>,
    label: &'static str,
    unit: &str,
) -> Result<f32, TelemetryParseError> {
    let body = field
        .map(str::trim)
        .and_then(|f| f.strip_prefix(label))
        .ok_or(TelemetryParseError::MissingField(label))?
        .trim();
    let body = body.strip_suffix(unit).unwrap_or(body).trim();
    body.parse().map_err(|_| TelemetryParseError::BadValue(label))
}

/// Accepts the line anywhere inside `s`, so a logger prefix is tolerated.
impl FromStr for TelemetryData {
    type Err = TelemetryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let start = s.find("T:").ok_or(TelemetryParseError::MissingField("T:"))?;
        let mut fields = s[start..].split('|');

        let temperature_c = numeric_field(fields.next(), "T:", "C")?;
        let humidity_pct = numeric_field(fields.next(), "H:", "%")?;
        let weight = numeric_field(fields.next(), "Peso:", "")?;

        let heater = fields
            .next()
            .map(str::trim)
            .and_then(|f| f.strip_prefix("Aquecedor:"))
            .ok_or(TelemetryParseError::MissingField("Aquecedor:"))?
            .trim_start();
        let heater = if heater.starts_with("ON") {
            HeaterState::On
        } else if heater.starts_with("OFF") {
            HeaterState::Off
        } else {
            return Err(TelemetryParseError::BadValue("Aquecedor:"));
        };

        Ok(Self {
            temperature_c,
            humidity_pct,
            weight,
            heater,
        })
    }
}
