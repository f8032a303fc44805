//! Recording fakes for the bus and the clock. Both push into one shared log, so tests can check
//! how writes and delays interleave.

use crate::clock::Clock;
use crate::i2c::I2cBus;
use crate::lcd::hd44780::driver::I2cHD44780Driver;
use crate::{TransportError, TransportResult};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Event {
    Write(u8, u8),
    DelayMs(u32),
    DelayUs(u32),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

#[derive(Debug)]
pub struct FakeBus {
    log: EventLog,
    writes: usize,
    /// Index of the write that fails with a NACK. The failed write is not logged.
    pub fail_at: Option<usize>,
}

impl I2cBus for FakeBus {
    fn write(&mut self, address: u8, byte: u8) -> TransportResult<()> {
        let index = self.writes;
        self.writes += 1;
        if self.fail_at == Some(index) {
            return Err(TransportError::Nack);
        }
        self.log.borrow_mut().push(Event::Write(address, byte));
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakeClock {
    log: EventLog,
}

impl Clock for FakeClock {
    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::DelayUs(us));
    }
}

pub type FakeDriver = I2cHD44780Driver<FakeBus, FakeClock>;

pub fn fake_driver(columns: u8, rows: u8) -> (FakeDriver, EventLog) {
    fake_driver_failing_at(columns, rows, None)
}

pub fn fake_driver_failing_at(
    columns: u8,
    rows: u8,
    fail_at: Option<usize>,
) -> (FakeDriver, EventLog) {
    let log = EventLog::default();
    let bus = FakeBus {
        log: log.clone(),
        writes: 0,
        fail_at,
    };
    let clock = FakeClock { log: log.clone() };
    let driver = I2cHD44780Driver::new(bus, clock, 0x27, columns, rows)
        .expect("valid test geometry");
    (driver, log)
}

/// Takes everything logged so far.
pub fn drain(log: &EventLog) -> Vec<Event> {
    log.borrow_mut().drain(..).collect()
}

/// Only the bytes written, in order.
pub fn written_bytes(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Write(_, byte) => Some(*byte),
            _ => None,
        })
        .collect()
}
