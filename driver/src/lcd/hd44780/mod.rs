//! HD44780 LCD module.
//!
//! The command set lives in [driver::HD44780Driver]; [driver::I2cHD44780Driver] drives a
//! controller through a PCF8574 I2C backpack in 4-bit mode.

pub mod driver;
