//! HD44780 command set.
//!
//! Every instruction is a single byte whose highest set bit selects the instruction and whose
//! lower bits are its flags. The trait below builds those bytes; transports only need to
//! provide [HD44780Driver::send_command] and [HD44780Driver::send_data].

mod i2c;

use crate::{LcdError, LcdResult};
pub use i2c::*;
use std::fmt::Debug;

pub const CLEAR_DISPLAY: u8 = 0b00000001;
pub const RETURN_HOME: u8 = 0b00000010;
pub const ENTRY_MODE_SET: u8 = 0b00000100;
pub const DISPLAY_CONTROL: u8 = 0b00001000;
pub const CURSOR_SHIFT: u8 = 0b00010000;
pub const FUNCTION_SET: u8 = 0b00100000;
pub const SET_DDRAM_ADDR: u8 = 0b10000000;

// Entry mode flags
pub const ENTRY_INCREMENT: u8 = 0b00000010;
pub const ENTRY_SHIFT: u8 = 0b00000001;

// Display control flags
pub const DISPLAY_ON: u8 = 0b00000100;
pub const CURSOR_ON: u8 = 0b00000010;
pub const BLINK_ON: u8 = 0b00000001;

// Cursor shift flags
pub const DISPLAY_MOVE: u8 = 0b00001000;
pub const MOVE_RIGHT: u8 = 0b00000100;

// Function set flags
pub const EIGHT_BIT_MODE: u8 = 0b00010000;
pub const TWO_LINE: u8 = 0b00001000;
pub const DOTS_5X10: u8 = 0b00000100;

/// Clear display and return home take up to 1.52 ms. Every other instruction finishes within
/// the 37 µs the controller gets after each nibble anyway.
pub const LONG_COMMAND_DELAY_MS: u32 = 2;

/// Whether `command` is one of the slow instructions (clear display, return home).
pub const fn is_long_command(command: u8) -> bool {
    command != 0 && command & 0b11111100 == 0
}

pub trait HD44780Driver: Debug {
    /// Runs the power-on initialization sequence, leaving the controller in 4-bit mode with
    /// the display on.
    ///
    /// # Errors
    /// - `LcdError::Initialization` if any write fails. The controller's state is undefined
    ///   afterwards and the whole sequence has to be repeated.
    fn begin(&mut self) -> LcdResult<()>;

    /// Clears the display and sets the cursor to the home position.
    fn clear_display(&mut self) -> LcdResult<()> {
        self.send_command(CLEAR_DISPLAY)
    }

    /// Sets the cursor to the home position and undoes any display shift.
    fn return_home(&mut self) -> LcdResult<()> {
        self.send_command(RETURN_HOME)
    }

    /// Sets the direction the cursor moves after writing, and whether the display shifts
    /// along with it.
    fn set_entry_mode(&mut self, cursor_direction: CursorDirection, shift: bool) -> LcdResult<()> {
        let mut command = ENTRY_MODE_SET;
        if cursor_direction == CursorDirection::Right {
            command |= ENTRY_INCREMENT;
        }
        if shift {
            command |= ENTRY_SHIFT;
        }
        self.send_command(command)
    }

    /// Sets the display on/off, cursor on/off, and blinking on/off.
    fn set_display_control(
        &mut self,
        display_on: bool,
        cursor_on: bool,
        blink_on: bool,
    ) -> LcdResult<()> {
        let mut command = DISPLAY_CONTROL;
        if display_on {
            command |= DISPLAY_ON;
        }
        if cursor_on {
            command |= CURSOR_ON;
        }
        if blink_on {
            command |= BLINK_ON;
        }
        self.send_command(command)
    }

    /// Moves the cursor or shifts the whole display by one position.
    fn cursor_shift(&mut self, display_shift: bool, direction: CursorDirection) -> LcdResult<()> {
        let mut command = CURSOR_SHIFT;
        if display_shift {
            command |= DISPLAY_MOVE;
        }
        if direction == CursorDirection::Right {
            command |= MOVE_RIGHT;
        }
        self.send_command(command)
    }

    /// Sets line mode and font. Data length is always 4 bits, the expander has no more data
    /// lines.
    fn function_set(&mut self, line_mode: LineMode, font: Font) -> LcdResult<()> {
        let mut command = FUNCTION_SET;
        if line_mode == LineMode::TwoLine {
            command |= TWO_LINE;
        }
        if font == Font::Dots5x10 {
            command |= DOTS_5X10;
        }
        self.send_command(command)
    }

    /// Sets the DDRAM address, which moves the cursor.
    ///
    /// # Errors
    /// - `LcdError::InvalidArgument` if the address doesn't fit in 7 bits.
    fn set_ddram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > 0b01111111 {
            return Err(LcdError::InvalidArgument);
        }
        self.send_command(SET_DDRAM_ADDR | address)
    }

    /// Sends a command to the HD44780 controller with RS low.
    /// Implementations wait out the execution time of slow commands (see [is_long_command]).
    fn send_command(&mut self, command: u8) -> LcdResult<()>;

    /// Sends a data byte (a character code) to the HD44780 controller with RS high.
    fn send_data(&mut self, data: u8) -> LcdResult<()>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum CursorDirection {
    /// Moves the cursor to the left after writing data.
    Left,
    /// Moves the cursor to the right after writing data.
    #[default]
    Right,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineMode {
    OneLine,
    /// Also used by 4-row modules, which are two long lines folded in half.
    #[default]
    TwoLine,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Font {
    #[default]
    Dots5x8,
    /// Only available in one-line mode.
    Dots5x10,
}

/// Display on/off control flags. Always sent to the controller as a whole.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct DisplayControl {
    pub display: bool,
    pub cursor: bool,
    pub blink: bool,
}

/// Entry mode flags: text direction and shift-on-write.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct EntryMode {
    pub direction: CursorDirection,
    pub shift: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        commands: Vec<u8>,
        data: Vec<u8>,
    }

    impl HD44780Driver for Recorder {
        fn begin(&mut self) -> LcdResult<()> {
            Ok(())
        }

        fn send_command(&mut self, command: u8) -> LcdResult<()> {
            self.commands.push(command);
            Ok(())
        }

        fn send_data(&mut self, data: u8) -> LcdResult<()> {
            self.data.push(data);
            Ok(())
        }
    }

    #[test]
    fn builds_command_bytes() {
        let mut lcd = Recorder::default();
        lcd.clear_display().unwrap();
        lcd.return_home().unwrap();
        lcd.set_entry_mode(CursorDirection::Right, false).unwrap();
        lcd.set_entry_mode(CursorDirection::Left, true).unwrap();
        lcd.set_display_control(true, true, false).unwrap();
        lcd.set_display_control(false, false, true).unwrap();
        lcd.cursor_shift(true, CursorDirection::Left).unwrap();
        lcd.cursor_shift(false, CursorDirection::Right).unwrap();
        lcd.function_set(LineMode::TwoLine, Font::Dots5x8).unwrap();
        lcd.function_set(LineMode::OneLine, Font::Dots5x10).unwrap();
        lcd.set_ddram_address(0x40).unwrap();

        assert_eq!(
            lcd.commands,
            [0x01, 0x02, 0x06, 0x05, 0x0E, 0x09, 0x18, 0x14, 0x28, 0x24, 0xC0]
        );
        assert!(lcd.data.is_empty());
    }

    #[test]
    fn rejects_ddram_address_out_of_range() {
        let mut lcd = Recorder::default();
        assert_eq!(lcd.set_ddram_address(0x80), Err(LcdError::InvalidArgument));
        assert!(lcd.commands.is_empty());
    }

    #[test]
    fn only_clear_and_home_are_long() {
        assert!(is_long_command(CLEAR_DISPLAY));
        assert!(is_long_command(RETURN_HOME));
        assert!(is_long_command(0x03));
        assert!(!is_long_command(0x00));
        assert!(!is_long_command(ENTRY_MODE_SET | ENTRY_INCREMENT));
        assert!(!is_long_command(SET_DDRAM_ADDR));
    }
}
