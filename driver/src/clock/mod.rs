//! Blocking delays.
//!
//! Every delay the HD44780 needs is a lower bound, so implementations may over-wait but must
//! never return early.

use std::fmt::Debug;
use std::thread::sleep;
use std::time::Duration;

pub trait Clock: Debug {
    /// Blocks for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Blocks for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}

/// [Clock] using [std::thread::sleep].
///
/// The scheduler usually oversleeps by tens of microseconds, which only makes the protocol
/// slower, never incorrect.
#[derive(Debug, Default, Copy, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    fn delay_ms(&mut self, ms: u32) {
        sleep(Duration::from_millis(u64::from(ms)));
    }

    fn delay_us(&mut self, us: u32) {
        sleep(Duration::from_micros(u64::from(us)));
    }
}
