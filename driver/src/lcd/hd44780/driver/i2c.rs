use crate::clock::Clock;
use crate::i2c::I2cBus;
use crate::lcd::geometry::Geometry;
use crate::lcd::hd44780::driver::{
    CursorDirection, DisplayControl, EIGHT_BIT_MODE, ENTRY_MODE_SET, EntryMode, FUNCTION_SET,
    Font, HD44780Driver, LONG_COMMAND_DELAY_MS, LineMode, is_long_command,
};
use crate::{LcdError, LcdResult, TransportResult};
use log::{debug, trace, warn};

// PCF8574 to HD44780:
// P7 P6 P5 P4 P3 P2 P1 P0
// D7 D6 D5 D4 BL EN RW RS
pub const PIN_RS: u8 = 0b00000001;
pub const PIN_RW: u8 = 0b00000010;
pub const PIN_EN: u8 = 0b00000100;
pub const BACKLIGHT: u8 = 0b00001000;
pub const NO_BACKLIGHT: u8 = 0b00000000;

/// Address of a PCF8574 with all address pins pulled high, the usual backpack default.
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// The controller needs 40 ms after Vcc rises to 2.7 V; boards often start earlier than that.
const POWER_ON_DELAY_MS: u32 = 50;
/// Waits after each of the three 8-bit function set nibbles.
const RESYNC_DELAYS_MS: [u32; 3] = [5, 1, 1];
/// Enable pulse width. The datasheet asks for 450 ns.
const ENABLE_PULSE_US: u32 = 1;
/// Time the controller gets to process a latched nibble (37 µs typical).
const NIBBLE_SETTLE_US: u32 = 50;
const DISPLAY_CONTROL_DELAY_US: u32 = 50;

/// Register-select value passed to [I2cHD44780Driver::send].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    Command,
    Data,
}

impl Mode {
    fn bits(self) -> u8 {
        match self {
            Mode::Command => 0,
            Mode::Data => PIN_RS,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Backlight {
    #[default]
    On,
    Off,
}

impl Backlight {
    pub fn mask(self) -> u8 {
        match self {
            Backlight::On => BACKLIGHT,
            Backlight::Off => NO_BACKLIGHT,
        }
    }
}

/// HD44780 driver talking through a PCF8574 I2C expander in 4-bit mode.
///
/// Every byte sent to the controller turns into 4 single-byte I2C writes: for each nibble,
/// one with EN high and one with EN low, as the controller latches on the falling edge.
/// The expander can't be read back, so the driver keeps the display control flags, the entry
/// mode and the backlight state itself and always sends them whole.
///
/// The driver is not synchronized. Interleaving nibbles from two callers corrupts the
/// controller's state, so shared use needs an outer lock.
///
/// Bus errors are never retried. Logical state is updated before the write, so after any
/// error the display may disagree with it until [HD44780Driver::begin] is run again.
#[derive(Debug)]
pub struct I2cHD44780Driver<B: I2cBus, C: Clock> {
    bus: B,
    clock: C,
    address: u8,
    geometry: Geometry,
    backlight: Backlight,
    display_control: DisplayControl,
    entry_mode: EntryMode,
}

impl<B: I2cBus, C: Clock> I2cHD44780Driver<B, C> {
    /// Creates a new driver for the expander at `address` and a display of the given size.
    /// Nothing is written until [HD44780Driver::begin] is called.
    ///
    /// # Errors
    /// - `LcdError::InvalidArgument` if the address isn't a 7-bit address, or the geometry is
    ///   not supported (see [Geometry::new]).
    pub fn new(bus: B, clock: C, address: u8, columns: u8, rows: u8) -> LcdResult<Self> {
        if address > 0x7F {
            return Err(LcdError::InvalidArgument);
        }
        Ok(I2cHD44780Driver {
            bus,
            clock,
            address,
            geometry: Geometry::new(columns, rows)?,
            backlight: Backlight::On,
            display_control: DisplayControl::default(),
            entry_mode: EntryMode::default(),
        })
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Changes the expander address used by subsequent writes.
    pub fn set_address(&mut self, address: u8) -> LcdResult<()> {
        if address > 0x7F {
            return Err(LcdError::InvalidArgument);
        }
        self.address = address;
        Ok(())
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn backlight_state(&self) -> Backlight {
        self.backlight
    }

    pub fn display_control_state(&self) -> DisplayControl {
        self.display_control
    }

    /// Gets the entry mode. [HD44780Driver::begin] doesn't send one, so until
    /// [entry_mode](Self::entry_mode) is called this is only the assumed reset default
    /// (increment, no shift), not something the controller was told.
    pub fn entry_mode_state(&self) -> EntryMode {
        self.entry_mode
    }

    /// Gives the bus and the clock back.
    pub fn release(self) -> (B, C) {
        (self.bus, self.clock)
    }

    /// Writes one byte to the expander, with the backlight bit merged in.
    fn expander_write(&mut self, data: u8) -> TransportResult<()> {
        let byte = data | self.backlight.mask();
        trace!("Expander write: {:08b}", byte);
        self.bus.write(self.address, byte)
    }

    fn pulse_enable(&mut self, data: u8) -> TransportResult<()> {
        self.expander_write(data | PIN_EN)?;
        self.clock.delay_us(ENABLE_PULSE_US);
        self.expander_write(data & !PIN_EN)?;
        self.clock.delay_us(NIBBLE_SETTLE_US);
        Ok(())
    }

    /// Latches the high nibble of `data` along with its control bits.
    fn write_4bits(&mut self, data: u8) -> TransportResult<()> {
        self.pulse_enable(data)
    }

    /// Sends a full byte as two nibbles, high nibble first.
    pub fn send(&mut self, value: u8, mode: Mode) -> TransportResult<()> {
        trace!("Sending data: {:08b}, mode: {:?}", value, mode);

        let high_nibble = value & 0xF0;
        let low_nibble = (value << 4) & 0xF0;
        self.write_4bits(high_nibble | mode.bits())?;
        self.write_4bits(low_nibble | mode.bits())?;
        Ok(())
    }

    fn init_sequence(&mut self) -> LcdResult<()> {
        debug!("Waiting {} ms for the controller to reset", POWER_ON_DELAY_MS);
        self.clock.delay_ms(POWER_ON_DELAY_MS);

        // Whatever mode the controller is in, three 8-bit function sets get it to 8-bit mode
        debug!("Synchronizing bus width");
        for delay_ms in RESYNC_DELAYS_MS {
            self.write_4bits(FUNCTION_SET | EIGHT_BIT_MODE)?;
            self.clock.delay_ms(delay_ms);
        }

        debug!("Switching to 4-bit mode");
        self.write_4bits(FUNCTION_SET)?;

        // Single-row modules are usually two 8-column lines side by side, so always two lines
        debug!("Setting two-line mode");
        self.function_set(LineMode::TwoLine, Font::default())?;

        self.clear_display()?;
        self.return_home()?;

        self.display_control = DisplayControl {
            display: true,
            cursor: true,
            blink: false,
        };
        self.apply_display_control()?;

        debug!("Display initialized");
        Ok(())
    }

    fn apply_display_control(&mut self) -> LcdResult<()> {
        let DisplayControl {
            display,
            cursor,
            blink,
        } = self.display_control;
        self.set_display_control(display, cursor, blink)?;
        self.clock.delay_us(DISPLAY_CONTROL_DELAY_US);
        Ok(())
    }

    /// Clears the display and moves the cursor home.
    pub fn clear(&mut self) -> LcdResult<()> {
        self.clear_display()
    }

    /// Moves the cursor home and undoes any display shift.
    pub fn home(&mut self) -> LcdResult<()> {
        self.return_home()
    }

    /// Moves the cursor to the given position.
    ///
    /// # Errors
    /// - `LcdError::InvalidArgument` if the position is outside the display. Nothing is sent.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> LcdResult<()> {
        let address = self
            .geometry
            .ddram_address(row, col)
            .ok_or(LcdError::InvalidArgument)?;
        self.set_ddram_address(address)
    }

    /// Turns the display on or off. DDRAM contents are kept while it's off.
    pub fn display(&mut self, on: bool) -> LcdResult<()> {
        self.display_control.display = on;
        self.apply_display_control()
    }

    /// Shows or hides the underline cursor.
    pub fn cursor(&mut self, on: bool) -> LcdResult<()> {
        self.display_control.cursor = on;
        self.apply_display_control()
    }

    /// Turns the blinking block cursor on or off.
    pub fn blink(&mut self, on: bool) -> LcdResult<()> {
        self.display_control.blink = on;
        self.apply_display_control()
    }

    /// Switches the backlight. Only the expander pin changes, nothing reaches the controller.
    pub fn backlight(&mut self, on: bool) -> LcdResult<()> {
        self.backlight = if on { Backlight::On } else { Backlight::Off };
        self.expander_write(0)?;
        Ok(())
    }

    /// Sets text direction and whether the display scrolls on each write.
    pub fn entry_mode(&mut self, direction: CursorDirection, shift: bool) -> LcdResult<()> {
        self.entry_mode = EntryMode { direction, shift };
        self.set_entry_mode(direction, shift)
    }

    /// Shifts the whole display by one column without touching DDRAM.
    pub fn scroll_display(&mut self, direction: CursorDirection) -> LcdResult<()> {
        self.cursor_shift(true, direction)
    }

    /// Moves the cursor by one column.
    pub fn move_cursor(&mut self, direction: CursorDirection) -> LcdResult<()> {
        self.cursor_shift(false, direction)
    }

    /// Writes a raw character code at the cursor.
    pub fn write_char(&mut self, code: u8) -> LcdResult<()> {
        self.send_data(code)
    }

    /// Writes `text` starting at the cursor. There's no wrapping: characters past the end of a
    /// row go wherever the controller's address counter points.
    ///
    /// Non-ASCII characters are written as `?`.
    pub fn print(&mut self, text: &str) -> LcdResult<()> {
        for c in text.chars() {
            if c.is_ascii() {
                self.write_char(c as u8)?;
            } else {
                warn!("Non-ASCII character: {}", c);
                self.write_char(b'?')?;
            }
        }
        Ok(())
    }
}

impl<B: I2cBus, C: Clock> HD44780Driver for I2cHD44780Driver<B, C> {
    /// Runs the HD44780 power-on sequence for 4-bit mode:
    /// - waits 50 ms for the controller's own reset,
    /// - sends the 8-bit function set nibble three times (waiting 5 ms, 1 ms, 1 ms), which
    ///   puts the controller into 8-bit mode no matter what it was in,
    /// - sends a single 4-bit function set nibble, fixing the bus width for good,
    /// - sends the full function set with the line mode for this geometry,
    /// - clears the display and returns home,
    /// - turns the display and the cursor on.
    ///
    /// Entry mode is left at the controller's reset default.
    fn begin(&mut self) -> LcdResult<()> {
        self.init_sequence().map_err(|err| match err {
            LcdError::Transport(err) => {
                warn!("Initialization failed: {}", err);
                LcdError::Initialization(err)
            }
            err => err,
        })
    }

    fn send_command(&mut self, command: u8) -> LcdResult<()> {
        self.send(command, Mode::Command)?;
        if is_long_command(command) {
            self.clock.delay_ms(LONG_COMMAND_DELAY_MS);
        }
        Ok(())
    }

    fn send_data(&mut self, data: u8) -> LcdResult<()> {
        self.send(data, Mode::Data)?;
        Ok(())
    }
}
