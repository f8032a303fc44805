use crate::{LcdError, LcdResult};

/// DDRAM holds 40 characters per line in two-line mode.
pub const MAX_COLUMNS: u8 = 40;
pub const MAX_ROWS: u8 = 4;

/// Size of the character matrix. Fixed for the lifetime of a driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Geometry {
    columns: u8,
    rows: u8,
}

impl Geometry {
    /// # Errors
    /// - `LcdError::InvalidArgument` if either dimension is zero or too large. Four-row
    ///   modules fold two DDRAM lines in half, so they can't be wider than 20 columns.
    pub fn new(columns: u8, rows: u8) -> LcdResult<Self> {
        if !(1..=MAX_COLUMNS).contains(&columns) || !(1..=MAX_ROWS).contains(&rows) {
            return Err(LcdError::InvalidArgument);
        }
        if rows > 2 && columns > MAX_COLUMNS / 2 {
            return Err(LcdError::InvalidArgument);
        }
        Ok(Geometry { columns, rows })
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Gets the DDRAM address of the given position, or `None` if it's off the display.
    ///
    /// Rows 2 and 3 continue rows 0 and 1 right after the visible columns, which gives the
    /// usual `0x00, 0x40, 0x14, 0x54` table on a 20x4 module.
    pub fn ddram_address(&self, row: u8, col: u8) -> Option<u8> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        let offset = match row {
            0 => 0x00,
            1 => 0x40,
            2 => self.columns,
            _ => 0x40 + self.columns,
        };
        Some(offset + col)
    }
}
