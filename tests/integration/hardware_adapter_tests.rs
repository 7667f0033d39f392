//! Full stack on the host: supervisor → hardware adapter → drivers →
//! simulated pins and bus.

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use filadry::adapters::hardware::HardwareAdapter;
use filadry::app::ports::ActuatorPort;
use filadry::app::service::Supervisor;
use filadry::config::SystemConfig;
use filadry::control::HeaterState;
use filadry::drivers::fan::FanDriver;
use filadry::drivers::heater::HeaterDriver;
use filadry::sensors::climate::SHT31_ADDRESS;
use filadry::sensors::{Hx711, Sht31};

use crate::mock_hw::{MockClock, RecordingSink};
use crate::sim::{
    SimDelay, SimHx711, SimHx711Clock, SimHx711Data, SimI2c, SimOutput, frame, raw_for_celsius,
};

type Adapter = HardwareAdapter<
    Sht31<SimI2c, SimDelay>,
    Hx711<SimHx711Data, SimHx711Clock, SimDelay>,
    SimOutput,
    SimOutput,
>;

struct Bench {
    hw: Adapter,
    bus: SimI2c,
    scale: SimHx711,
    heater: SimOutput,
    fan: SimOutput,
}

fn bench(celsius: f32) -> Bench {
    let config = SystemConfig::default();
    let bus = SimI2c::new(SHT31_ADDRESS, frame(raw_for_celsius(celsius), 0x4000));
    let scale = SimHx711::default();
    let heater = SimOutput::default();
    let fan = SimOutput::default();
    heater.high.set(true);
    fan.high.set(true);

    let climate = Sht31::new(
        bus.clone(),
        SimDelay::default(),
        config.climate_address,
        config.climate_conversion_ms,
    );
    let hx = Hx711::new(
        scale.data_pin(),
        scale.clock_pin(),
        SimDelay::default(),
        config.load_cell_ready_timeout_ms,
    )
    .unwrap();
    let hw = HardwareAdapter::new(
        climate,
        hx,
        HeaterDriver::new(heater.clone()).unwrap(),
        FanDriver::new(fan.clone()).unwrap(),
    );

    Bench {
        hw,
        bus,
        scale,
        heater,
        fan,
    }
}

#[test]
fn drivers_start_with_loads_off() {
    let b = bench(22.0);
    assert!(!b.heater.high.get());
    assert!(!b.fan.high.get());
    assert!(!b.hw.is_heater_on());
    assert!(!b.hw.is_fan_on());
}

#[test]
fn cold_cabinet_heats_and_reports_weight() {
    let mut b = bench(22.0);
    for _ in 0..10 {
        b.scale.queue(1_000_000);
    }
    b.scale.queue(1_042_600);

    let mut sup = Supervisor::new(SystemConfig::default());
    let mut clock = MockClock::new();
    let mut sink = RecordingSink::new();

    let tare = sup.bootstrap(&mut b.hw, &mut clock, &mut sink);
    assert_eq!(tare.raw(), 1_000_000);

    let r = sup.run_cycle(&mut b.hw, &mut clock, &mut sink);
    assert_eq!(r.heater, HeaterState::On);
    assert!(b.heater.high.get());
    assert!(b.fan.high.get());
    assert!((r.weight - 100.0).abs() < 1e-3);

    let t = sink.telemetry()[0];
    assert!((t.temperature_c - 22.0).abs() < 0.01);
    assert!((t.humidity_pct - 25.0).abs() < 0.01);
}

#[test]
fn bus_loss_drives_fail_safe_lines() {
    let mut b = bench(22.0);
    let mut sup = Supervisor::new(SystemConfig::default());
    let mut clock = MockClock::new();
    let mut sink = RecordingSink::new();

    b.scale.queue(0);
    sup.run_cycle(&mut b.hw, &mut clock, &mut sink);
    assert!(b.heater.high.get());

    b.bus.state.borrow_mut().write_fault =
        Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
    let r = sup.run_cycle(&mut b.hw, &mut clock, &mut sink);

    assert!(r.climate.is_none());
    assert!(!b.heater.high.get());
    assert!(b.fan.high.get());
    assert_eq!(clock.sleeps, vec![1000, 2000]);
}

#[test]
fn load_cell_timeout_does_not_stall_control() {
    let mut b = bench(90.0);
    let mut sup = Supervisor::new(SystemConfig::default());
    let mut clock = MockClock::new();
    let mut sink = RecordingSink::new();

    // No conversion queued: the ready wait gives up, control carries on.
    let r = sup.run_cycle(&mut b.hw, &mut clock, &mut sink);
    assert_eq!(r.heater, HeaterState::Off);
    assert!(b.fan.high.get());
    assert_eq!(r.weight, 0.0);
    assert_eq!(sink.telemetry().len(), 1);
}

#[test]
fn failed_heater_write_shows_off_in_status_line() {
    let mut b = bench(22.0);
    b.heater.fail.set(true);
    b.scale.queue(0);
    let mut sup = Supervisor::new(SystemConfig::default());
    let mut clock = MockClock::new();
    let mut sink = RecordingSink::new();

    let r = sup.run_cycle(&mut b.hw, &mut clock, &mut sink);

    assert_eq!(r.heater, HeaterState::Off);
    assert!(!b.heater.high.get());
    assert!(sink.telemetry_lines()[0].ends_with("Aquecedor: OFF"));
}

#[test]
fn failed_heater_write_is_reported_off() {
    let mut b = bench(22.0);
    b.heater.fail.set(true);

    b.hw.set_heater(true);
    assert!(!b.hw.is_heater_on());

    b.hw.set_heater(false);
    assert!(!b.hw.is_heater_on());

    b.heater.fail.set(false);
    b.hw.set_heater(true);
    assert!(b.hw.is_heater_on());
    assert!(b.heater.high.get());
}
