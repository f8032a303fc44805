//! Driver for HD44780-compatible character LCDs attached through a PCF8574 I2C expander.
//!
//! The expander maps its 8 GPIO pins onto the display's 4 data lines, enable, read/write,
//! register-select and backlight. See [lcd::hd44780::driver::I2cHD44780Driver] for the driver
//! itself, [i2c::I2cBus] and [clock::Clock] for the platform capabilities it needs.

pub mod clock;
pub mod i2c;
pub mod lcd;
#[cfg(test)]
mod testing;

use std::io;
use thiserror::Error;

/// Linux errno values reported by the I2C adapter drivers.
const ENXIO: i32 = 6;
const EAGAIN: i32 = 11;
const ETIMEDOUT: i32 = 110;
const EREMOTEIO: i32 = 121;

/// Failure of a single bus write.
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum TransportError {
    #[error("device did not acknowledge")]
    Nack,
    #[error("bus arbitration lost")]
    ArbitrationLoss,
    #[error("bus timed out")]
    Timeout,
    #[error("IO error: {0}")]
    Io(io::ErrorKind),
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        match err.raw_os_error() {
            Some(ENXIO) | Some(EREMOTEIO) => TransportError::Nack,
            Some(EAGAIN) => TransportError::ArbitrationLoss,
            Some(ETIMEDOUT) => TransportError::Timeout,
            _ => match err.kind() {
                io::ErrorKind::TimedOut => TransportError::Timeout,
                kind => TransportError::Io(kind),
            },
        }
    }
}

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LcdError {
    /// A bus write failed during normal operation. Logical state was already updated, so the
    /// display may be out of sync until [begin](lcd::hd44780::driver::HD44780Driver::begin)
    /// is run again.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// A bus write failed during initialization. The controller's bus width is undefined and
    /// initialization has to be restarted from the beginning.
    #[error("initialization failed: {0}")]
    Initialization(TransportError),
    #[error("invalid argument")]
    InvalidArgument,
}

pub type LcdResult<T> = Result<T, LcdError>;
