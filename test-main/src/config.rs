use std::env::var_os;
use std::ffi::OsStr;
use std::path::Path;
use dotenv::var;
use pcflcd_driver::lcd::hd44780::driver::DEFAULT_ADDRESS;
use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub i2c_bus: u8,
    pub address: u8,
    pub columns: u8,
    pub rows: u8,
}

impl Config {
    pub fn try_load() -> Option<Self> {
        let config_str = var_os("CONFIG_FILE");
        let config_str: &OsStr = config_str.as_deref().unwrap_or(OsStr::new("config.json"));
        let config_path = Path::new(config_str);
        if config_path.exists() {
            let file = std::fs::File::open(config_path).ok()?;
            let reader = std::io::BufReader::new(file);
            serde_json::from_reader(reader).ok()
        } else {
            None
        }
    }

    pub fn save(&self) -> std::io::Result<()> {
        let config_str = var("CONFIG_FILE").unwrap_or_else(|_| "config.json".to_string());
        let config_path = Path::new(&config_str);
        let file = std::fs::File::create(config_path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Applies `PCFLCD_I2C_BUS` and `PCFLCD_ADDRESS` from the environment, if set.
    pub fn apply_env(&mut self) -> eyre::Result<()> {
        if let Ok(bus) = var("PCFLCD_I2C_BUS") {
            self.i2c_bus = bus.trim().parse()?;
        }
        if let Ok(address) = var("PCFLCD_ADDRESS") {
            self.address = parse_address(&address)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            i2c_bus: 1,
            address: DEFAULT_ADDRESS,
            columns: 16,
            rows: 2,
        }
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal I2C address.
pub fn parse_address(s: &str) -> eyre::Result<u8> {
    let s = s.trim();
    let address = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16)?,
        None => s.parse()?,
    };
    if address > 0x7F {
        return Err(eyre::eyre!("I2C address {:#04x} is not a 7-bit address", address));
    }
    Ok(address)
}
