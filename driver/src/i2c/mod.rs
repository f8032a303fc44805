//! I2C transport used to reach the PCF8574 expander.
//!
//! The driver only ever needs single-byte writes, so [I2cBus] is deliberately that narrow.
//! On Linux, [LinuxI2cBus] talks to a `/dev/i2c-N` adapter.

#[cfg(target_os = "linux")]
mod linux;

use crate::TransportResult;
use std::fmt::Debug;

#[cfg(target_os = "linux")]
pub use linux::*;

pub trait I2cBus: Debug {
    /// Writes a single byte to the device at the given 7-bit address.
    ///
    /// # Errors
    /// Any bus failure (NACK, arbitration loss, timeout) is returned as is; implementations
    /// must not retry.
    fn write(&mut self, address: u8, byte: u8) -> TransportResult<()>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    fn write(&mut self, address: u8, byte: u8) -> TransportResult<()> {
        (**self).write(address, byte)
    }
}
