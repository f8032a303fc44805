use crate::i2c::I2cBus;
use crate::{TransportError, TransportResult};
use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use log::{debug, trace};
use std::fmt::{Debug, Formatter};
use std::io;

impl From<LinuxI2CError> for TransportError {
    fn from(err: LinuxI2CError) -> Self {
        io::Error::from(err).into()
    }
}

/// [I2cBus] backed by the Linux i2c-dev interface.
///
/// The kernel binds a file descriptor to one slave address at a time, so the address is
/// switched lazily whenever a write targets a different device.
pub struct LinuxI2cBus {
    bus: u8,
    device: LinuxI2CDevice,
    address: u8,
}

impl LinuxI2cBus {
    /// Opens `/dev/i2c-<bus>`, initially bound to `address`.
    pub fn new(bus: u8, address: u8) -> TransportResult<Self> {
        let path = format!("/dev/i2c-{}", bus);
        debug!("Opening {} @ {:#04x}", path, address);
        Ok(LinuxI2cBus {
            bus,
            device: LinuxI2CDevice::new(path, u16::from(address))?,
            address,
        })
    }
}

impl Debug for LinuxI2cBus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LinuxI2cBus(/dev/i2c-{} @ {:#04x})", self.bus, self.address)
    }
}

impl I2cBus for LinuxI2cBus {
    fn write(&mut self, address: u8, byte: u8) -> TransportResult<()> {
        if address != self.address {
            trace!("Switching slave address {:#04x} -> {:#04x}", self.address, address);
            self.device.set_slave_address(u16::from(address))?;
            self.address = address;
        }
        self.device.smbus_write_byte(byte)?;
        Ok(())
    }
}
