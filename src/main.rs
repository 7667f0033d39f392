//! Filadry Firmware: Main Entry Point
//!
//! Hexagonal architecture around a single cooperative supervisor loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter            LogEventSink     SystemClock       │
//! │  (Climate+Scale+Actuator)   (EventSink)      (ClockPort)       │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Supervisor (pure logic)                   │    │
//! │  │  Safety · Thermostat · Fan · Tare                      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Drivers: Sht31 (I2C) · Hx711 (bit-bang) · Heater · Fan · TWDT │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use log::info;

use filadry::adapters::hardware::HardwareAdapter;
use filadry::adapters::log_sink::LogEventSink;
use filadry::adapters::time::SystemClock;
use filadry::app::service::Supervisor;
use filadry::config::SystemConfig;
use filadry::drivers::fan::FanDriver;
use filadry::drivers::heater::HeaterDriver;
use filadry::drivers::hw_init;
use filadry::drivers::watchdog::Watchdog;
use filadry::sensors::{Hx711, Sht31};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Filadry v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;
    info!(
        "Config: setpoint={:.1} C hysteresis={:.1} C limit={:.1} C period={} ms",
        config.target_temp_c,
        config.temp_hysteresis_c,
        config.max_safe_temp_c,
        config.cycle_period_ms
    );

    // ── 3. Board bring-up (both loads driven low here) ────────
    let board = hw_init::init_board(&config)?;

    let heater = HeaterDriver::new(board.heater)?;
    let fan = FanDriver::new(board.fan)?;

    // Microsecond busy-wait for the bit-banged clock, FreeRTOS delay for
    // the millisecond conversion gap.
    let scale = Hx711::new(
        board.load_cell_data,
        board.load_cell_clock,
        Ets,
        config.load_cell_ready_timeout_ms,
    )?;
    let climate = Sht31::new(
        board.i2c,
        FreeRtos,
        config.climate_address,
        config.climate_conversion_ms,
    );

    let mut hw = HardwareAdapter::new(climate, scale, heater, fan);
    let mut clock = SystemClock::new();
    let mut log_sink = LogEventSink::new();

    // ── 4. Supervisor ─────────────────────────────────────────
    let mut supervisor = Supervisor::new(config);
    supervisor.bootstrap(&mut hw, &mut clock, &mut log_sink);

    // Subscribed after the settle + tare so the boot delay cannot trip it.
    let watchdog = Watchdog::new(supervisor.config().watchdog_timeout_ms);

    info!("System ready. Entering control loop.");
    supervisor.run(&mut hw, &mut clock, &mut log_sink, &watchdog)
}
