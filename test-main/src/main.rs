mod config;

use crate::config::Config;
use dotenv::dotenv;
use log::{debug, info, warn};
use pcflcd_driver::clock::StdClock;
use pcflcd_driver::i2c::LinuxI2cBus;
use pcflcd_driver::lcd::align::Align;
use pcflcd_driver::lcd::hd44780::driver::{HD44780Driver, I2cHD44780Driver};
use std::thread::sleep;
use std::time::Duration;
use sysinfo::System;
use time::OffsetDateTime;

fn main() -> eyre::Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    const UNKNOWN_STR: &str = "???";

    info!(
        "Hello, {}!",
        System::name().as_deref().unwrap_or(UNKNOWN_STR)
    );
    info!(
        "System ver {} kernel ver {}",
        System::long_os_version().as_deref().unwrap_or(UNKNOWN_STR),
        System::kernel_version().as_deref().unwrap_or(UNKNOWN_STR),
    );

    debug!("Trying to load config...");
    let mut config = if let Some(config) = Config::try_load() {
        info!("Config loaded.");
        config
    } else {
        info!("Config not found. Using default");
        let config = Config::default();
        config.save()?;
        info!("Default config saved.");
        config
    };
    config.apply_env()?;

    info!(
        "LCD @ /dev/i2c-{}, address {:#04x}, {}x{}",
        config.i2c_bus, config.address, config.columns, config.rows
    );

    debug!("Initializing LCD driver...");
    let bus = LinuxI2cBus::new(config.i2c_bus, config.address)?;
    let mut lcd = I2cHD44780Driver::new(
        bus,
        StdClock,
        config.address,
        config.columns,
        config.rows,
    )?;
    lcd.begin()?;
    lcd.cursor(false)?;
    debug!("{:?} initialized.", lcd);

    // Flash the backlight so a broken backlight jumper is easy to spot
    lcd.backlight(false)?;
    sleep(Duration::from_millis(500));
    lcd.backlight(true)?;

    let clock_row = if config.rows > 1 {
        let host_name = System::host_name().unwrap_or_else(|| UNKNOWN_STR.to_string());
        lcd.print_aligned(0, &host_name, Align::Center)?;
        1
    } else {
        0
    };

    info!("Starting main loop...");

    let mut last_second = None;
    loop {
        let now = OffsetDateTime::now_local().unwrap_or_else(|err| {
            warn!("Local offset unavailable ({}), showing UTC", err);
            OffsetDateTime::now_utc()
        });

        if last_second != Some(now.second()) {
            let time_str = format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second());
            lcd.print_aligned(clock_row, &time_str, Align::Center)?;
            last_second = Some(now.second());
        }

        sleep(Duration::from_millis(50));
    }
}
