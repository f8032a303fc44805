use crate::LcdResult;
use crate::clock::Clock;
use crate::i2c::I2cBus;
use crate::lcd::hd44780::driver::I2cHD44780Driver;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl Align {
    /// Gets the first column of a `len` characters long text in a row `columns` wide.
    /// Text that doesn't fit starts at column 0.
    pub fn start_column(self, columns: u8, len: usize) -> u8 {
        let free = usize::from(columns).saturating_sub(len) as u8;
        match self {
            Align::Left => 0,
            Align::Right => free,
            Align::Center => free / 2,
        }
    }
}

impl<B: I2cBus, C: Clock> I2cHD44780Driver<B, C> {
    /// Prints `text` on `row`, aligned within the row. Text wider than the display is cut off.
    /// The rest of the row is left as is.
    pub fn print_aligned(&mut self, row: u8, text: &str, align: Align) -> LcdResult<()> {
        let columns = self.geometry().columns();
        let visible: String = text.chars().take(usize::from(columns)).collect();
        let col = align.start_column(columns, visible.chars().count());
        self.set_cursor(row, col)?;
        self.print(&visible)
    }
}
