//! HD44780 character LCD driver
//!
//! Drives the controller over a 4-bit parallel bus (RS, EN, D4-D7) with
//! plain GPIO outputs. The R/W line is assumed tied low, so the busy flag is
//! never read and every command waits out its datasheet execution time.

use embedded_hal::delay::DelayNs;

use echolot_core::traits::display::{CharacterDisplay, DisplayError};
use echolot_hal::gpio::OutputPin;

/// HD44780 instructions
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_MODE: u8 = 0x04;
    pub const ENTRY_INCREMENT: u8 = 0x02;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const TWO_LINES: u8 = 0x08;
    pub const SET_DDRAM: u8 = 0x80;
}

/// Nibble that selects 8-bit mode during the wake-up sequence
const WAKE_8BIT: u8 = 0x03;
/// Nibble that switches the bus to 4-bit mode
const WAKE_4BIT: u8 = 0x02;

/// Command execution time for everything except clear/home
const COMMAND_US: u32 = 50;
/// Clear and home execution time
const SLOW_COMMAND_US: u32 = 2_000;

/// HD44780 display on a 4-bit bus
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    /// D4, D5, D6, D7
    data: [P; 4],
    delay: D,
    rows: u8,
    cols: u8,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    /// Create a driver for a 2x16 panel
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self::with_geometry(rs, en, data, delay, 2, 16)
    }

    /// Create a driver for a panel with the given rows and columns
    ///
    /// Rows beyond 4 are not addressable on this controller.
    pub fn with_geometry(rs: P, en: P, data: [P; 4], delay: D, rows: u8, cols: u8) -> Self {
        Self {
            rs,
            en,
            data,
            delay,
            rows: rows.min(4),
            cols,
        }
    }

    /// Power-on initialization
    ///
    /// Runs the 4-bit wake-up sequence, selects two-line 5x8 mode, turns
    /// the display on with the cursor hidden, and clears it.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Vcc rise time
        self.delay.delay_ms(50);
        self.rs.set_low();
        self.en.set_low();

        self.write_nibble(WAKE_8BIT);
        self.delay.delay_us(4_500);
        self.write_nibble(WAKE_8BIT);
        self.delay.delay_us(4_500);
        self.write_nibble(WAKE_8BIT);
        self.delay.delay_us(150);
        self.write_nibble(WAKE_4BIT);

        self.command(cmd::FUNCTION_SET | cmd::TWO_LINES);
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON);
        self.command(cmd::CLEAR);
        self.command(cmd::ENTRY_MODE | cmd::ENTRY_INCREMENT);
        Ok(())
    }

    /// Return the cursor to the top-left corner without clearing
    pub fn home(&mut self) {
        self.command(cmd::HOME);
    }

    /// Write one character at the cursor
    ///
    /// Characters outside ASCII are shown as `?`.
    pub fn write_char(&mut self, c: char) {
        let byte = if c.is_ascii() { c as u8 } else { b'?' };
        self.send(byte, true);
    }

    /// Panel size as (rows, cols)
    pub fn geometry(&self) -> (u8, u8) {
        (self.rows, self.cols)
    }

    /// DDRAM address of the first column of each row
    fn row_offset(&self, row: u8) -> u8 {
        match row {
            0 => 0x00,
            1 => 0x40,
            2 => self.cols,
            _ => 0x40 + self.cols,
        }
    }

    fn command(&mut self, command: u8) {
        self.send(command, false);
        if command == cmd::CLEAR || command == cmd::HOME {
            self.delay.delay_us(SLOW_COMMAND_US);
        }
    }

    fn send(&mut self, byte: u8, data: bool) {
        self.rs.set_state(data);
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    fn write_nibble(&mut self, nibble: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(nibble & (1 << bit) != 0);
        }
        self.en.set_high();
        self.delay.delay_us(1);
        self.en.set_low();
        self.delay.delay_us(COMMAND_US);
    }
}

impl<P: OutputPin, D: DelayNs> CharacterDisplay for Hd44780<P, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR);
        Ok(())
    }

    fn move_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= self.rows || col >= self.cols {
            return Err(DisplayError::InvalidCoordinates);
        }
        let address = self.row_offset(row) + col;
        self.command(cmd::SET_DDRAM | address);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for c in text.chars() {
            self.write_char(c);
        }
        Ok(())
    }
}
