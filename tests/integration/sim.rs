//! Pin, bus and delay simulators implementing the `embedded-hal` traits.
//!
//! The drivers under test own their lines, so each simulator shares its
//! state through `Rc<RefCell<_>>` with a handle the test keeps.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, I2c, NoAcknowledgeSource, Operation};

// ── Delay ─────────────────────────────────────────────────────

/// Accumulates requested delay instead of sleeping.
#[derive(Clone, Default)]
pub struct SimDelay {
    pub total_ns: Rc<Cell<u64>>,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

// ── Output line ───────────────────────────────────────────────

/// Push-pull output whose level the test can observe.  `fail` makes every
/// write return an error.
#[derive(Clone, Default)]
pub struct SimOutput {
    pub high: Rc<Cell<bool>>,
    pub writes: Rc<Cell<u32>>,
    pub fail: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub struct SimPinError;

impl digital::Error for SimPinError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl digital::ErrorType for SimOutput {
    type Error = SimPinError;
}

impl OutputPin for SimOutput {
    fn set_low(&mut self) -> Result<(), SimPinError> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), SimPinError> {
        self.write(true)
    }
}

impl SimOutput {
    fn write(&mut self, high: bool) -> Result<(), SimPinError> {
        if self.fail.get() {
            return Err(SimPinError);
        }
        self.high.set(high);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// ── HX711 ─────────────────────────────────────────────────────

/// Behavioural model of the load-cell amplifier's two-wire interface.
#[derive(Default)]
pub struct Hx711State {
    /// Pending conversions; DOUT is low while one is queued.
    pub conversions: VecDeque<u32>,
    shifting: Option<u32>,
    pulses: u32,
    clock_high: bool,
    /// Pulse count of each finished acquisition (24 + gain pulses).
    pub completed_pulse_counts: Vec<u32>,
    /// Set if DOUT was sampled while the clock was high.
    pub sampled_with_clock_high: bool,
}

impl Hx711State {
    fn finish_if_done(&mut self) {
        if self.pulses > 24 && !self.clock_high {
            self.completed_pulse_counts.push(self.pulses);
            self.pulses = 0;
            self.shifting = None;
        }
    }

    fn dout(&mut self) -> bool {
        if self.clock_high {
            self.sampled_with_clock_high = true;
        }
        self.finish_if_done();
        match (self.pulses, self.shifting) {
            (0, _) => self.conversions.is_empty(),
            (n @ 1..=24, Some(word)) => (word >> (24 - n)) & 1 == 1,
            _ => true,
        }
    }

    fn clock(&mut self, high: bool) {
        if high && !self.clock_high {
            if self.pulses == 0 {
                self.shifting = self.conversions.pop_front();
            }
            self.pulses += 1;
        }
        self.clock_high = high;
    }
}

#[derive(Clone, Default)]
pub struct SimHx711 {
    pub state: Rc<RefCell<Hx711State>>,
}

impl SimHx711 {
    pub fn queue(&self, word: u32) {
        self.state.borrow_mut().conversions.push_back(word & 0x00FF_FFFF);
    }

    pub fn data_pin(&self) -> SimHx711Data {
        SimHx711Data(self.state.clone())
    }

    pub fn clock_pin(&self) -> SimHx711Clock {
        SimHx711Clock(self.state.clone())
    }

    pub fn clock_is_high(&self) -> bool {
        self.state.borrow().clock_high
    }
}

pub struct SimHx711Data(Rc<RefCell<Hx711State>>);
pub struct SimHx711Clock(Rc<RefCell<Hx711State>>);

impl digital::ErrorType for SimHx711Data {
    type Error = Infallible;
}

impl InputPin for SimHx711Data {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.borrow_mut().dout())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.borrow_mut().dout())
    }
}

impl digital::ErrorType for SimHx711Clock {
    type Error = Infallible;
}

impl OutputPin for SimHx711Clock {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().clock(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().clock(true);
        Ok(())
    }
}

// ── I2C ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimI2cError(pub ErrorKind);

impl i2c::Error for SimI2cError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Single-device bus model.
#[derive(Default)]
pub struct I2cState {
    pub device_address: u8,
    /// Reply to the next read.
    pub reply: [u8; 6],
    /// Fault injected into the next write or read, then cleared.
    pub write_fault: Option<ErrorKind>,
    pub read_fault: Option<ErrorKind>,
    pub writes: Vec<(u8, Vec<u8>)>,
    pub reads: u32,
}

#[derive(Clone, Default)]
pub struct SimI2c {
    pub state: Rc<RefCell<I2cState>>,
}

impl SimI2c {
    pub fn new(device_address: u8, reply: [u8; 6]) -> Self {
        let bus = Self::default();
        {
            let mut s = bus.state.borrow_mut();
            s.device_address = device_address;
            s.reply = reply;
        }
        bus
    }
}

impl i2c::ErrorType for SimI2c {
    type Error = SimI2cError;
}

impl I2c for SimI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), SimI2cError> {
        let mut s = self.state.borrow_mut();
        if address != s.device_address {
            return Err(SimI2cError(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if let Some(kind) = s.write_fault.take() {
                        return Err(SimI2cError(kind));
                    }
                    s.writes.push((address, bytes.to_vec()));
                }
                Operation::Read(buf) => {
                    if let Some(kind) = s.read_fault.take() {
                        return Err(SimI2cError(kind));
                    }
                    let n = buf.len().min(6);
                    buf[..n].copy_from_slice(&s.reply[..n]);
                    s.reads += 1;
                }
            }
        }
        Ok(())
    }
}

// ── Frame helpers ─────────────────────────────────────────────

/// Build a six-byte reply with correct CRC bytes.
pub fn frame(raw_t: u16, raw_h: u16) -> [u8; 6] {
    let t = raw_t.to_be_bytes();
    let h = raw_h.to_be_bytes();
    [
        t[0],
        t[1],
        filadry::sensors::climate::crc8(t),
        h[0],
        h[1],
        filadry::sensors::climate::crc8(h),
    ]
}

/// Inverse of the sensor's temperature transfer function, rounded.
pub fn raw_for_celsius(t: f32) -> u16 {
    (((t + 45.0) * 65535.0 / 175.0).round()) as u16
}
